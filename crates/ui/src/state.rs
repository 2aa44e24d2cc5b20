//! Application State Management for Sejour
//!
//! Navigation, panels, the toast queue and a snapshot of the signed-in user
//! live in a Dioxus global signal. The session and the query cache are NOT
//! here: they are provided through the component context as a
//! [`sejour_client::ClientContext`].

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use dioxus::prelude::*;
use sejour_model::User;

// ============================================================================
// Routes
// ============================================================================

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    SignIn,
    SignUp,
    /// Landing page after sign-in
    Home,
    Bookings,
    Residences,
    Dwellings,
    Hotels,
    Rooms,
    Restaurants,
    MenuItems,
    Lounges,
    Verifications,
}

impl Route {
    /// URL-style path of the screen
    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "/sign-in",
            Route::SignUp => "/sign-up",
            Route::Home => "/",
            Route::Bookings => "/bookings",
            Route::Residences => "/admin/residences",
            Route::Dwellings => "/admin/dwellings",
            Route::Hotels => "/admin/hotels",
            Route::Rooms => "/admin/rooms",
            Route::Restaurants => "/admin/restaurants",
            Route::MenuItems => "/admin/menu-items",
            Route::Lounges => "/admin/lounges",
            Route::Verifications => "/admin/verifications",
        }
    }

    /// Resolve a path back to a screen
    pub fn from_path(path: &str) -> Option<Route> {
        Route::all().iter().copied().find(|r| r.path() == path)
    }

    /// Get the display name for this screen
    pub fn display_name(&self) -> &'static str {
        match self {
            Route::SignIn => "Sign in",
            Route::SignUp => "Create account",
            Route::Home => "Home",
            Route::Bookings => "Bookings",
            Route::Residences => "Residences",
            Route::Dwellings => "Dwellings",
            Route::Hotels => "Hotels",
            Route::Rooms => "Rooms",
            Route::Restaurants => "Restaurants",
            Route::MenuItems => "Menu items",
            Route::Lounges => "Lounges",
            Route::Verifications => "Owner verification",
        }
    }

    /// Get the icon for this screen (sidebar)
    pub fn icon(&self) -> &'static str {
        match self {
            Route::SignIn | Route::SignUp => "🔑",
            Route::Home => "🏠",
            Route::Bookings => "📅",
            Route::Residences => "🏘️",
            Route::Dwellings => "🛏️",
            Route::Hotels => "🏨",
            Route::Rooms => "🚪",
            Route::Restaurants => "🍽️",
            Route::MenuItems => "📋",
            Route::Lounges => "🍸",
            Route::Verifications => "🛡️",
        }
    }

    /// Screens reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::SignIn | Route::SignUp)
    }

    /// Back-office screens (owners and admins)
    pub fn is_back_office(&self) -> bool {
        !self.is_public() && !matches!(self, Route::Home | Route::Bookings)
    }

    /// Whether a user may open this screen
    pub fn allows(&self, user: Option<&User>) -> bool {
        match (self, user) {
            (route, _) if route.is_public() => true,
            (_, None) => false,
            (Route::Verifications, Some(user)) => user.user_type == sejour_core::UserType::Admin,
            (route, Some(user)) if route.is_back_office() => user.can_manage(),
            _ => true,
        }
    }

    /// Every screen, sidebar order
    pub fn all() -> &'static [Route] {
        &[
            Route::SignIn,
            Route::SignUp,
            Route::Home,
            Route::Bookings,
            Route::Residences,
            Route::Dwellings,
            Route::Hotels,
            Route::Rooms,
            Route::Restaurants,
            Route::MenuItems,
            Route::Lounges,
            Route::Verifications,
        ]
    }
}

// ============================================================================
// Toasts
// ============================================================================

/// Maximum toasts shown at once
pub const MAX_TOASTS: usize = 5;

/// How long a toast stays visible
pub const TOAST_TTL_SECS: i64 = 6;

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusLevel {
    /// CSS classes of the toast
    pub fn class(&self) -> &'static str {
        match self {
            StatusLevel::Info => "bg-slate-700 text-slate-100",
            StatusLevel::Success => "bg-emerald-600 text-white",
            StatusLevel::Warning => "bg-amber-500 text-slate-900",
            StatusLevel::Error => "bg-rose-600 text-white",
        }
    }
}

/// One-shot status message
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub id: u64,
    pub text: String,
    pub level: StatusLevel,
    pub created_at: DateTime<Utc>,
}

/// Bounded toast queue; the oldest toast is dropped first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toasts {
    items: VecDeque<StatusMessage>,
    next_id: u64,
}

impl Toasts {
    /// Queue a message, returning its id
    pub fn push(&mut self, text: impl Into<String>, level: StatusLevel) -> u64 {
        self.push_at(text, level, Utc::now())
    }

    fn push_at(&mut self, text: impl Into<String>, level: StatusLevel, now: DateTime<Utc>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(StatusMessage {
            id,
            text: text.into(),
            level,
            created_at: now,
        });
        while self.items.len() > MAX_TOASTS {
            self.items.pop_front();
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Drop toasts older than the time-to-live
    pub fn expire(&mut self, now: DateTime<Utc>) {
        let ttl = Duration::seconds(TOAST_TTL_SECS);
        self.items.retain(|t| now - t.created_at < ttl);
    }

    /// Whether any toast is past its time-to-live
    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        let ttl = Duration::seconds(TOAST_TTL_SECS);
        self.items.iter().any(|t| now - t.created_at >= ttl)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusMessage> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// UI State
// ============================================================================

/// General UI state (navigation, panels, toasts)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Currently active screen
    pub route: Route,
    /// Whether the sidebar is collapsed
    pub sidebar_collapsed: bool,
    /// Status messages
    pub toasts: Toasts,
    /// Signed-in user, for the sidebar and route guards
    pub user: Option<User>,
}

impl UiState {
    /// Create new UI state
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to a screen
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(path = route.path(), "Navigate");
        self.route = route;
    }

    /// Queue a toast
    pub fn toast(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.toasts.push(message, level);
    }

    /// Toggle sidebar
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Record the signed-in user and leave the public screens
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        if self.route.is_public() {
            self.navigate(Route::Home);
        }
    }

    /// Forget the user and return to the sign-in screen
    pub fn sign_out(&mut self) {
        self.user = None;
        self.navigate(Route::SignIn);
    }

    /// Screen actually shown: guarded screens fall back to sign-in (no
    /// session) or home (insufficient rights)
    pub fn visible_route(&self) -> Route {
        if self.route.allows(self.user.as_ref()) {
            self.route
        } else if self.user.is_none() {
            Route::SignIn
        } else {
            Route::Home
        }
    }
}

// ============================================================================
// Global State
// ============================================================================

/// Global UI state signal
pub static UI_STATE: GlobalSignal<UiState> = Signal::global(UiState::new);

/// Queue a toast from anywhere in the component tree
pub fn notify(message: impl Into<String>, level: StatusLevel) {
    UI_STATE.write().toast(message, level);
}

/// Navigate from anywhere in the component tree
pub fn navigate(route: Route) {
    UI_STATE.write().navigate(route);
}

/// Hook to access the current screen
pub fn use_current_route() -> Route {
    UI_STATE.read().route
}

// ============================================================================
// Tests
// ============================================================================
