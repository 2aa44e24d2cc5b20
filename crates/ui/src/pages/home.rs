//! Home screen shown after sign-in

use dioxus::prelude::*;

use crate::state::{Route, UI_STATE, navigate};

/// Screens offered as shortcuts to a user
pub fn shortcuts(user: Option<&sejour_model::User>) -> Vec<Route> {
    Route::all()
        .iter()
        .copied()
        .filter(|r| !r.is_public() && *r != Route::Home && r.allows(user))
        .collect()
}

/// Landing page with a shortcut card per reachable screen
#[component]
pub fn HomePage() -> Element {
    let user = UI_STATE.read().user.clone();
    let routes = shortcuts(user.as_ref());
    let greeting = match &user {
        Some(user) => format!("Hello, {}", user.name),
        None => "Hello".to_string(),
    };
    let role = user
        .as_ref()
        .map(|u| u.user_type.display_name())
        .unwrap_or_default();

    rsx! {
        div {
            class: "p-8 max-w-5xl mx-auto",

            div {
                class: "mb-8",
                h1 { class: "text-3xl font-bold text-white", "{greeting}" }
                p { class: "text-slate-400 mt-1", "{role} account" }
            }

            div {
                class: "grid grid-cols-3 gap-4",
                for route in routes {
                    button {
                        key: "{route.path()}",
                        r#type: "button",
                        class: "p-5 bg-slate-800 hover:bg-slate-700 border border-slate-700 hover:border-indigo-500 rounded-xl text-left transition-colors",
                        onclick: move |_| navigate(route),
                        div { class: "text-3xl mb-3", "{route.icon()}" }
                        div { class: "font-semibold text-white", "{route.display_name()}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sejour_core::{EntityId, UserType};
    use sejour_model::User;

    fn user(user_type: UserType) -> User {
        User {
            id: EntityId(1),
            name: "Jean Mbarga".to_string(),
            email: "jean@test.com".to_string(),
            user_type,
            phone: None,
            avatar_url: None,
            verification_status: None,
        }
    }

    #[test]
    fn test_customer_shortcuts() {
        assert_eq!(shortcuts(Some(&user(UserType::Customer))), vec![Route::Bookings]);
    }

    #[test]
    fn test_admin_sees_verification() {
        let routes = shortcuts(Some(&user(UserType::Admin)));
        assert!(routes.contains(&Route::Verifications));
        assert!(routes.contains(&Route::Hotels));
        assert!(!routes.contains(&Route::SignIn));
    }
}
