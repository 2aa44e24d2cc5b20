//! Page Components for Sejour
//!
//! One page per screen of the sidebar, plus the public sign-in and
//! sign-up screens.
//!
//! ## Available Pages
//!
//! - **SignInPage / SignUpPage**: authentication, shown without a session
//! - **HomePage**: greeting and shortcuts to the screens the user may open
//! - **BookingsPage**: reservations with confirm, cancel and receipt download
//! - **HotelsPage / RoomsPage**, **ResidencesPage / DwellingsPage**,
//!   **RestaurantsPage / MenuItemsPage**, **LoungesPage**: listing management
//! - **VerificationsPage**: owner verification review and QR codes

pub mod auth;
pub mod bookings;
mod common;
pub mod home;
pub mod hotels;
pub mod lounges;
pub mod residences;
pub mod restaurants;
pub mod verifications;

// Re-export page components for convenience
pub use auth::{SignInPage, SignUpPage};
pub use bookings::BookingsPage;
pub use home::HomePage;
pub use hotels::{HotelsPage, RoomsPage};
pub use lounges::LoungesPage;
pub use residences::{DwellingsPage, ResidencesPage};
pub use restaurants::{MenuItemsPage, RestaurantsPage};
pub use verifications::VerificationsPage;
