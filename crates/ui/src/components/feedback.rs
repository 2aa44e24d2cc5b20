//! # Feedback Components
//!
//! Loading, error and empty states of data views, the unmapped server error
//! panel of forms, and the toast stack.

use chrono::Utc;
use dioxus::prelude::*;

use crate::state::UI_STATE;

/// Spinner with a caption
#[component]
pub fn LoadingState(#[props(default = "Loading...".to_string())] caption: String) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-center gap-3 py-16 text-slate-400",
            span { class: "animate-spin", "⏳" }
            span { "{caption}" }
        }
    }
}

/// Failed list fetch with a manual retry
#[component]
pub fn ErrorState(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center gap-4 py-16",
            p { class: "text-rose-400", "{message}" }
            button {
                r#type: "button",
                class: "px-4 py-2 bg-slate-700 hover:bg-slate-600 rounded-lg transition-colors",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

/// "No results" with an optional reset-filter control
#[component]
pub fn EmptyState(
    message: String,
    #[props(default)] can_reset: bool,
    #[props(default)] on_reset: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center gap-3 py-16 text-slate-400",
            span { class: "text-3xl", "🔍" }
            p { "{message}" }
            if can_reset {
                button {
                    r#type: "button",
                    class: "text-sm text-indigo-400 hover:text-indigo-300",
                    onclick: move |_| on_reset.call(()),
                    "Reset filter"
                }
            }
        }
    }
}

/// Server errors that belong to no field, shown above a form
#[component]
pub fn ErrorPanel(messages: Vec<String>, on_close: EventHandler<()>) -> Element {
    if messages.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            class: "mb-4 p-3 bg-rose-500/10 border border-rose-500/30 rounded-lg flex items-start gap-3",
            span { class: "text-rose-400", "⚠" }
            ul {
                class: "flex-1 text-sm text-rose-200 space-y-1",
                for message in messages.iter() {
                    li { "{message}" }
                }
            }
            button {
                r#type: "button",
                class: "text-rose-300 hover:text-white",
                onclick: move |_| on_close.call(()),
                "✕"
            }
        }
    }
}

/// Bottom-right toast stack; expired toasts are dropped every second
#[component]
pub fn ToastStack() -> Element {
    use_future(|| async {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            let now = Utc::now();
            if UI_STATE.peek().toasts.has_expired(now) {
                UI_STATE.write().toasts.expire(now);
            }
        }
    });

    let toasts: Vec<(u64, String, &'static str)> = UI_STATE
        .read()
        .toasts
        .iter()
        .map(|t| (t.id, t.text.clone(), t.level.class()))
        .collect();

    rsx! {
        div {
            class: "fixed bottom-4 right-4 z-50 flex flex-col gap-2 w-80",
            for (id, text, level_class) in toasts {
                div {
                    key: "{id}",
                    class: "px-4 py-3 rounded-lg shadow-lg text-sm flex items-start gap-3 {level_class}",
                    span { class: "flex-1", "{text}" }
                    button {
                        r#type: "button",
                        class: "opacity-70 hover:opacity-100",
                        onclick: move |_| UI_STATE.write().toasts.dismiss(id),
                        "✕"
                    }
                }
            }
        }
    }
}
