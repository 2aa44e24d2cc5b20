//! # Confirm Dialog Component
//!
//! Renders a pending [`ConfirmRequest`](crate::hooks::ConfirmRequest). The
//! dialog stays open while the confirmed action runs; both buttons are
//! disabled until it completes.

use dioxus::prelude::*;

use super::modal::Modal;

// ============================================================================
// Component Props
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: String,

    pub message: String,

    #[props(default = "Confirm".to_string())]
    pub confirm_label: String,

    /// Red confirm button
    #[props(default = true)]
    pub destructive: bool,

    /// The confirmed action is running
    #[props(default = false)]
    pub running: bool,

    #[props(default)]
    pub on_confirm: EventHandler<()>,

    #[props(default)]
    pub on_dismiss: EventHandler<()>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Confirmation dialog for destructive row actions
#[component]
pub fn ConfirmDialog(props: ConfirmDialogProps) -> Element {
    let running = props.running;
    let confirm_class = if props.destructive {
        "bg-rose-600 hover:bg-rose-700 disabled:bg-rose-600/50"
    } else {
        "bg-indigo-600 hover:bg-indigo-700 disabled:bg-indigo-600/50"
    };

    rsx! {
        Modal {
            locked: running,
            on_close: move |_| props.on_dismiss.call(()),

            div {
                class: "p-6",

                div {
                    class: "flex items-start gap-4 mb-6",
                    if props.destructive {
                        div {
                            class: "flex-shrink-0 w-12 h-12 rounded-full bg-rose-500/20 flex items-center justify-center",
                            span { class: "text-2xl", "⚠️" }
                        }
                    }
                    div {
                        class: "flex-1",
                        h2 { class: "text-xl font-bold text-white mb-2", "{props.title}" }
                        p { class: "text-slate-300", "{props.message}" }
                    }
                }

                div {
                    class: "flex justify-end gap-3",

                    button {
                        r#type: "button",
                        class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                        disabled: running,
                        onclick: move |_| props.on_dismiss.call(()),
                        "Close"
                    }

                    button {
                        r#type: "button",
                        class: "px-4 py-2 {confirm_class} disabled:cursor-not-allowed rounded-lg transition-colors flex items-center gap-2",
                        disabled: running,
                        onclick: move |_| props.on_confirm.call(()),
                        if running {
                            span { class: "animate-spin", "⏳" }
                            "Working..."
                        } else {
                            "{props.confirm_label}"
                        }
                    }
                }
            }
        }
    }
}
