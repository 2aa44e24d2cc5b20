//! Sign-in and sign-up screens
//!
//! Both screens drive the headless forms of [`crate::forms`]: local
//! validation first, then the session call, then routing of the outcome.

use dioxus::prelude::*;
use sejour_core::UserType;

use crate::components::{
    Checkbox, ErrorPanel, Select, SelectOption, TextInput, optional_text, pick_choice,
};
use crate::forms::{AuthPrepared, SignInForm, SignUpForm, SubmitResult};
use crate::hooks::use_client;
use crate::state::{Route, StatusLevel, UI_STATE, navigate, notify};

// ============================================================================
// Sign In
// ============================================================================

/// Sign-in screen
#[component]
pub fn SignInPage() -> Element {
    let ctx = use_client();
    let remembered = ctx.session.remembered_email();
    let mut form = use_signal(move || SignInForm::new(remembered));

    let submitting = form.read().is_submitting();
    let panel = form.read().panel().to_vec();

    let on_submit = move |_| {
        let AuthPrepared::Ready(credentials) = form.write().prepare() else {
            return;
        };
        let session = ctx.session.clone();
        spawn(async move {
            let result = session.login(&credentials).await;
            let user = result.as_ref().ok().cloned();
            match form.write().finish(result) {
                SubmitResult::Submitted(route) => {
                    if let Some(user) = user {
                        notify(format!("Welcome back, {}", user.name), StatusLevel::Success);
                        UI_STATE.write().sign_in(user);
                    }
                    navigate(route);
                }
                SubmitResult::Invalid(_) | SubmitResult::Busy => {}
                SubmitResult::ServerError(message) => notify(message, StatusLevel::Error),
            }
        });
    };

    rsx! {
        AuthFrame {
            title: "Sign in",
            subtitle: "Manage your bookings and listings",

            ErrorPanel { messages: panel, on_close: move |_| form.write().close_panel() }

            TextInput {
                label: "Email",
                input_type: "email",
                value: form.read().credentials.email.clone(),
                error: form.read().error("email"),
                required: true,
                on_change: move |value: String| form.write().credentials.email = value,
            }
            TextInput {
                label: "Password",
                input_type: "password",
                value: form.read().credentials.password.clone(),
                error: form.read().error("password"),
                required: true,
                on_change: move |value: String| form.write().credentials.password = value,
            }
            Checkbox {
                label: "Remember my email",
                checked: form.read().credentials.remember,
                on_change: move |value: bool| form.write().credentials.remember = value,
            }

            SubmitButton { label: "Sign in", busy: submitting, on_click: on_submit }

            p {
                class: "text-sm text-slate-400 text-center",
                "No account yet? "
                button {
                    r#type: "button",
                    class: "text-indigo-400 hover:text-indigo-300",
                    onclick: move |_| navigate(Route::SignUp),
                    "Create one"
                }
            }
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// Account creation screen
#[component]
pub fn SignUpPage() -> Element {
    let ctx = use_client();
    let mut form = use_signal(SignUpForm::new);

    let submitting = form.read().is_submitting();
    let panel = form.read().panel().to_vec();
    let types: Vec<SelectOption> = UserType::registrable()
        .iter()
        .enumerate()
        .map(|(i, t)| SelectOption::new(i.to_string(), t.display_name()))
        .collect();
    let current_type = UserType::registrable()
        .iter()
        .position(|t| *t == form.read().payload.user_type)
        .unwrap_or_default()
        .to_string();

    let on_submit = move |_| {
        let AuthPrepared::Ready(payload) = form.write().prepare() else {
            return;
        };
        let remember = form.peek().remember;
        let session = ctx.session.clone();
        spawn(async move {
            let result = session.register(&payload).await;
            if result.is_ok() {
                if let Err(e) = session.remember_email(remember.then_some(payload.email.as_str())) {
                    tracing::warn!("Could not store remembered email: {}", e);
                }
            }
            let user = result.as_ref().ok().cloned();
            match form.write().finish(result) {
                SubmitResult::Submitted(route) => {
                    if let Some(user) = user {
                        notify("Account created", StatusLevel::Success);
                        UI_STATE.write().sign_in(user);
                    }
                    navigate(route);
                }
                SubmitResult::Invalid(_) | SubmitResult::Busy => {}
                SubmitResult::ServerError(message) => notify(message, StatusLevel::Error),
            }
        });
    };

    rsx! {
        AuthFrame {
            title: "Create an account",
            subtitle: "Book stays or list your properties",

            ErrorPanel { messages: panel, on_close: move |_| form.write().close_panel() }

            TextInput {
                label: "Full name",
                value: form.read().payload.name.clone(),
                error: form.read().error("name"),
                required: true,
                on_change: move |value: String| form.write().payload.name = value,
            }
            TextInput {
                label: "Email",
                input_type: "email",
                value: form.read().payload.email.clone(),
                error: form.read().error("email"),
                required: true,
                on_change: move |value: String| form.write().payload.email = value,
            }
            TextInput {
                label: "Phone",
                input_type: "tel",
                value: form.read().payload.phone.clone().unwrap_or_default(),
                error: form.read().error("phone"),
                on_change: move |value: String| form.write().payload.phone = optional_text(value),
            }
            Select {
                label: "Account type",
                value: current_type,
                options: types,
                error: form.read().error("type"),
                on_change: move |value: String| {
                    if let Some(user_type) = pick_choice(UserType::registrable(), &value) {
                        form.write().payload.user_type = user_type;
                    }
                },
            }
            TextInput {
                label: "Password",
                input_type: "password",
                value: form.read().payload.password.clone(),
                error: form.read().error("password"),
                required: true,
                on_change: move |value: String| form.write().payload.password = value,
            }
            TextInput {
                label: "Confirm password",
                input_type: "password",
                value: form.read().payload.password_confirmation.clone().unwrap_or_default(),
                error: form.read().error("password_confirmation"),
                required: true,
                on_change: move |value: String| form.write().payload.password_confirmation = Some(value),
            }
            Checkbox {
                label: "Remember my email",
                checked: form.read().remember,
                on_change: move |value: bool| form.write().remember = value,
            }

            SubmitButton { label: "Create account", busy: submitting, on_click: on_submit }

            p {
                class: "text-sm text-slate-400 text-center",
                "Already registered? "
                button {
                    r#type: "button",
                    class: "text-indigo-400 hover:text-indigo-300",
                    onclick: move |_| navigate(Route::SignIn),
                    "Sign in"
                }
            }
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

#[component]
fn AuthFrame(title: String, subtitle: String, children: Element) -> Element {
    rsx! {
        div {
            class: "min-h-full flex items-center justify-center p-8",
            div {
                class: "w-full max-w-md bg-slate-800 border border-slate-700 rounded-xl shadow-xl p-8 space-y-4",
                div {
                    class: "text-center mb-4",
                    h1 { class: "text-2xl font-bold text-white", "{title}" }
                    p { class: "text-sm text-slate-400 mt-1", "{subtitle}" }
                }
                {children}
            }
        }
    }
}

#[component]
fn SubmitButton(label: String, busy: bool, on_click: EventHandler<()>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "w-full py-2.5 bg-indigo-600 hover:bg-indigo-700 disabled:bg-indigo-600/50 disabled:cursor-not-allowed rounded-lg font-medium transition-colors flex items-center justify-center gap-2",
            disabled: busy,
            onclick: move |_| on_click.call(()),
            if busy {
                span { class: "animate-spin", "⏳" }
                "Please wait..."
            } else {
                "{label}"
            }
        }
    }
}
