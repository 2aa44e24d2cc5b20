//! Title bar of a screen with its primary actions on the right

use dioxus::prelude::*;

#[component]
pub fn PageHeader(
    title: String,
    #[props(default)] subtitle: Option<String>,
    #[props(default)] children: Element,
) -> Element {
    rsx! {
        div {
            class: "flex items-end justify-between mb-6",
            div {
                h1 { class: "text-2xl font-bold text-white", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "text-sm text-slate-400 mt-1", "{subtitle}" }
                }
            }
            div { class: "flex items-center gap-3", {children} }
        }
    }
}

/// Primary action button of a page header
#[component]
pub fn PrimaryButton(
    label: String,
    #[props(default)] disabled: bool,
    #[props(default)] on_click: EventHandler<()>,
) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-indigo-600/50 disabled:cursor-not-allowed rounded-lg text-sm font-medium transition-colors",
            disabled,
            onclick: move |_| on_click.call(()),
            "{label}"
        }
    }
}
