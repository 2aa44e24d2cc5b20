//! Dialog frame of an entity form: title, unmapped server errors, fields
//! and the save/cancel bar

use dioxus::prelude::*;
use sejour_model::FormSchema;

use super::feedback::ErrorPanel;
use super::modal::Modal;
use crate::forms::EntityForm;

/// Properties for FormShell component
#[derive(Props, Clone, PartialEq)]
pub struct FormShellProps<S: FormSchema + 'static> {
    pub form: Signal<EntityForm<S>>,

    #[props(default)]
    pub on_submit: EventHandler<()>,

    #[props(default)]
    pub on_close: EventHandler<()>,

    pub children: Element,
}

/// Modal entity form
#[component]
pub fn FormShell<S: FormSchema + 'static>(props: FormShellProps<S>) -> Element {
    let mut form = props.form;
    let title = form.read().title();
    let panel = form.read().panel().to_vec();
    let submitting = form.read().is_submitting();
    let save_label = if form.read().is_edit() { "Save changes" } else { "Create" };

    rsx! {
        Modal {
            width: "max-w-2xl",
            locked: submitting,
            on_close: move |_| props.on_close.call(()),

            div {
                class: "flex items-center justify-between px-6 py-4 border-b border-slate-700",
                h2 { class: "text-lg font-semibold text-white", "{title}" }
                button {
                    r#type: "button",
                    class: "text-slate-400 hover:text-white",
                    disabled: submitting,
                    onclick: move |_| props.on_close.call(()),
                    "✕"
                }
            }

            div {
                class: "px-6 py-4 space-y-4",
                ErrorPanel {
                    messages: panel,
                    on_close: move |_| form.write().close_panel(),
                }
                {props.children}
            }

            div {
                class: "flex justify-end gap-3 px-6 py-4 border-t border-slate-700",
                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                    disabled: submitting,
                    onclick: move |_| props.on_close.call(()),
                    "Cancel"
                }
                button {
                    r#type: "button",
                    class: "px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-indigo-600/50 disabled:cursor-not-allowed rounded-lg transition-colors flex items-center gap-2",
                    disabled: submitting,
                    onclick: move |_| props.on_submit.call(()),
                    if submitting {
                        span { class: "animate-spin", "⏳" }
                        "Saving..."
                    } else {
                        "{save_label}"
                    }
                }
            }
        }
    }
}
