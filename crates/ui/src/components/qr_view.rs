//! Owner verification QR code viewer

use dioxus::prelude::*;

use super::modal::Modal;

/// Modal showing a rendered verification QR code
#[component]
pub fn QrCodeView(
    owner: String,
    svg: String,
    #[props(default)] on_save: EventHandler<()>,
    #[props(default)] on_close: EventHandler<()>,
) -> Element {
    rsx! {
        Modal {
            width: "max-w-sm",
            on_close: move |_| on_close.call(()),
            div {
                class: "p-6 flex flex-col items-center gap-4",
                h2 { class: "text-lg font-semibold text-white", "Verification code" }
                p { class: "text-sm text-slate-400", "{owner}" }
                div {
                    class: "bg-white p-3 rounded-lg",
                    dangerous_inner_html: "{svg}",
                }
                div {
                    class: "flex gap-3",
                    button {
                        r#type: "button",
                        class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 rounded-lg transition-colors",
                        onclick: move |_| on_save.call(()),
                        "Save as SVG"
                    }
                    button {
                        r#type: "button",
                        class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
