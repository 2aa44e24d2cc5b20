//! Main Application Component for Sejour
//!
//! The root component connects the API client and provides it through the
//! component context, restores the stored session, then renders either the
//! public sign-in screens or the signed-in layout: sidebar, active page and
//! toast stack.

use std::sync::Arc;

use dioxus::prelude::*;
use sejour_client::{ClientConfig, ClientContext, ClientResult, NominatimGeocoder};

use crate::components::{LoadingState, ToastStack};
use crate::hooks::{SharedGeocoder, use_client};
use crate::pages::{
    BookingsPage, DwellingsPage, HomePage, HotelsPage, LoungesPage, MenuItemsPage,
    ResidencesPage, RestaurantsPage, RoomsPage, SignInPage, SignUpPage, VerificationsPage,
};
use crate::state::{Route, StatusLevel, UI_STATE, notify};

// ============================================================================
// Startup
// ============================================================================

/// Services shared with every page
#[derive(Clone)]
struct Services {
    client: ClientContext,
    geocoder: SharedGeocoder,
}

fn connect(config: ClientResult<ClientConfig>) -> ClientResult<Services> {
    let config = config?;
    let geocoder = NominatimGeocoder::new(&config)?;
    Ok(Services {
        client: ClientContext::from_config(config)?,
        geocoder: SharedGeocoder(Arc::new(geocoder)),
    })
}

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    // Provided once; the error, if any, is kept for the fallback screen
    let startup_error = use_hook(|| match connect(ClientConfig::from_env()) {
        Ok(services) => {
            provide_context(services.client);
            provide_context(services.geocoder);
            None
        }
        Err(e) => {
            tracing::error!("Client setup failed: {}", e);
            Some(e.to_string())
        }
    });

    rsx! {
        div {
            class: "app-container h-screen w-screen flex bg-slate-900 text-slate-100 overflow-hidden",

            if let Some(message) = startup_error {
                StartupError { message }
            } else {
                Shell {}
            }

            ToastStack {}
        }
    }
}

/// Restores the session, then shows the screens the user may open
#[component]
fn Shell() -> Element {
    let ctx = use_client();
    let mut restoring = use_signal(|| true);

    use_future(move || {
        let ctx = ctx.clone();
        async move {
            match ctx.session.restore().await {
                Ok(Some(user)) => {
                    tracing::info!(user = %user.email, "Session restored");
                    UI_STATE.write().sign_in(user);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Session restore failed: {}", e),
            }
            restoring.set(false);
        }
    });

    let signed_in = UI_STATE.read().user.is_some();

    if restoring() {
        return rsx! {
            main {
                class: "flex-1 flex items-center justify-center",
                LoadingState { caption: "Restoring session..." }
            }
        };
    }

    rsx! {
        if signed_in {
            Sidebar {}
        }
        MainContent {}
    }
}

#[component]
fn StartupError(message: String) -> Element {
    rsx! {
        main {
            class: "flex-1 flex items-center justify-center",
            div {
                class: "max-w-md text-center",
                p { class: "text-2xl mb-4", "⚠️" }
                p { class: "text-lg font-semibold mb-2", "Sejour could not start" }
                p { class: "text-sm text-slate-400 mb-4", "{message}" }
                p {
                    class: "text-xs text-slate-500",
                    "Check SEJOUR_API_URL and SEJOUR_STORAGE_PATH, then restart."
                }
            }
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

/// Screens listed in the sidebar for the current user
fn sidebar_routes(state: &crate::state::UiState) -> Vec<Route> {
    Route::all()
        .iter()
        .copied()
        .filter(|route| !route.is_public() && route.allows(state.user.as_ref()))
        .collect()
}

/// Left navigation sidebar
#[component]
fn Sidebar() -> Element {
    let ctx = use_client();
    let state = UI_STATE.read();
    let collapsed = state.sidebar_collapsed;
    let current = state.visible_route();
    let routes = sidebar_routes(&state);
    let user = state
        .user
        .as_ref()
        .map(|u| (u.name.clone(), u.initials(), u.user_type.display_name()));
    drop(state);

    let sign_out = move |_| {
        let ctx = ctx.clone();
        spawn(async move {
            if let Err(e) = ctx.session.logout().await {
                tracing::warn!("Logout failed: {}", e);
            }
            ctx.cache.clear().await;
            UI_STATE.write().sign_out();
            notify("Signed out", StatusLevel::Info);
        });
    };

    rsx! {
        aside {
            class: "sidebar flex flex-col shrink-0 bg-slate-800 border-r border-slate-700 transition-all duration-200",
            style: if collapsed { "width: 60px;" } else { "width: 220px;" },

            // Header with toggle button
            div {
                class: "h-12 flex items-center justify-between px-3 border-b border-slate-700",

                if !collapsed {
                    span { class: "text-sm font-semibold text-slate-300", "Sejour" }
                }

                button {
                    class: "w-8 h-8 flex items-center justify-center rounded hover:bg-slate-700 text-slate-400 hover:text-slate-200 transition-colors",
                    title: if collapsed { "Expand sidebar" } else { "Collapse sidebar" },
                    onclick: move |_| {
                        UI_STATE.write().toggle_sidebar();
                    },
                    if collapsed { "☰" } else { "✕" }
                }
            }

            nav {
                class: "flex-1 py-4 overflow-y-auto",
                for route in routes {
                    SidebarItem { key: "{route.path()}", route, current, collapsed }
                }
            }

            // Signed-in user at the bottom
            if let Some((name, initials, role)) = user {
                div {
                    class: "border-t border-slate-700 p-3 flex items-center gap-3",
                    div {
                        class: "w-9 h-9 shrink-0 rounded-full bg-indigo-600 flex items-center justify-center text-sm font-semibold",
                        title: "{name}",
                        "{initials}"
                    }
                    if !collapsed {
                        div {
                            class: "flex-1 min-w-0",
                            p { class: "text-sm text-slate-200 truncate", "{name}" }
                            p { class: "text-xs text-slate-500", "{role}" }
                        }
                        button {
                            class: "text-xs text-slate-400 hover:text-rose-300",
                            onclick: sign_out,
                            "Sign out"
                        }
                    }
                }
            }
        }
    }
}

/// Individual sidebar navigation item
#[component]
fn SidebarItem(route: Route, current: Route, collapsed: bool) -> Element {
    let is_active = route == current;
    let icon = route.icon();
    let name = route.display_name();
    let colors = if is_active {
        "bg-indigo-600 text-white"
    } else {
        "text-slate-300 hover:bg-slate-700"
    };

    rsx! {
        button {
            class: "flex items-center rounded-lg transition-colors {colors}",
            class: if collapsed { "justify-center w-11 h-11 mx-auto my-1" } else { "gap-3 px-4 py-2.5 mx-2 my-0.5 w-[calc(100%-16px)] text-left" },
            title: "{name}",
            onclick: move |_| {
                UI_STATE.write().navigate(route);
            },
            span { class: "text-xl leading-none shrink-0", "{icon}" }
            if !collapsed {
                span { class: "text-sm font-medium", "{name}" }
            }
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Main content area that renders the active page
#[component]
fn MainContent() -> Element {
    let route = UI_STATE.read().visible_route();

    rsx! {
        main {
            class: "flex-1 overflow-auto bg-slate-900",

            match route {
                Route::SignIn => rsx! { SignInPage {} },
                Route::SignUp => rsx! { SignUpPage {} },
                Route::Home => rsx! { HomePage {} },
                Route::Bookings => rsx! { BookingsPage {} },
                Route::Residences => rsx! { ResidencesPage {} },
                Route::Dwellings => rsx! { DwellingsPage {} },
                Route::Hotels => rsx! { HotelsPage {} },
                Route::Rooms => rsx! { RoomsPage {} },
                Route::Restaurants => rsx! { RestaurantsPage {} },
                Route::MenuItems => rsx! { MenuItemsPage {} },
                Route::Lounges => rsx! { LoungesPage {} },
                Route::Verifications => rsx! { VerificationsPage {} },
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
