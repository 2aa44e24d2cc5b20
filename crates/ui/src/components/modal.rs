//! Modal overlay shared by forms, confirmation dialogs and the QR viewer

use dioxus::prelude::*;

/// Properties for Modal component
#[derive(Props, Clone, PartialEq)]
pub struct ModalProps {
    /// Width class of the dialog box
    #[props(default = "max-w-lg".to_string())]
    pub width: String,

    /// Backdrop click; ignored when `locked`
    #[props(default)]
    pub on_close: EventHandler<()>,

    /// Keep the dialog open on backdrop clicks (request running)
    #[props(default = false)]
    pub locked: bool,

    pub children: Element,
}

/// Centered dialog over a dimmed backdrop
#[component]
pub fn Modal(props: ModalProps) -> Element {
    let locked = props.locked;
    rsx! {
        div {
            class: "fixed inset-0 z-40 flex items-center justify-center",

            div {
                class: "absolute inset-0 bg-black/50",
                onclick: move |_| {
                    if !locked {
                        props.on_close.call(());
                    }
                },
            }

            div {
                class: "relative bg-slate-800 rounded-lg shadow-xl border border-slate-700 mx-4 w-full max-h-[90vh] overflow-y-auto {props.width}",
                onclick: move |e| e.stop_propagation(),
                {props.children}
            }
        }
    }
}
