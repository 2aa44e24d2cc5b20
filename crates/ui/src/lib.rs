//! # Sejour UI
//!
//! Dioxus Desktop UI for the Sejour booking marketplace.
//!
//! Owners manage their listings here (residences, hotels, restaurants and
//! lounges with their rooms, dwellings and menu items), customers follow
//! their bookings and administrators review owner verification files.
//!
//! ## Features
//!
//! - Session sign-in, sign-up and restore
//! - Listing tables with sort, filter, pagination and row actions
//! - Entity forms with images, amenities and address autocomplete
//! - Booking confirm / cancel and PDF receipts
//! - Owner verification review with QR codes
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod forms;
pub mod hooks;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use sejour_client;
pub use sejour_core;
pub use sejour_model;

// Re-export main components
pub use app::App;
pub use file_ops::{FileError, pick_images, save_qr, save_receipt, show_save_dialog};
pub use forms::{EntityForm, FormMode, SignInForm, SignUpForm, SubmitResult};
pub use pages::{BookingsPage, HomePage, SignInPage, VerificationsPage};
pub use state::{Route, StatusLevel, StatusMessage, Toasts, UI_STATE, UiState, navigate, notify};

// Re-export components
pub use components::{
    Checkbox, ConfirmDialog, EntityTable, FormShell, Modal, NumberInput, Select, SelectOption,
    TextArea, TextInput,
};

// Re-export hooks
pub use hooks::{Listing, TableState, use_client, use_listing};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Sejour";

/// Application display title
pub const TITLE: &str = "Sejour - Residences, Hotels, Restaurants & Lounges";

/// CSS styles for the application
/// This is the compiled Tailwind CSS included at build time
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Sejour desktop application
///
/// The API client is configured by the root component from the
/// environment (`SEJOUR_API_URL`, `SEJOUR_STORAGE_PATH`...), so a bad
/// configuration shows an error screen instead of aborting.
///
/// # Example
///
/// ```rust,ignore
/// fn main() {
///     sejour_ui::launch();
/// }
/// ```
pub fn launch() {
    launch_with_config(TITLE, 1280.0, 820.0);
}

/// Launch with custom configuration
///
/// Allows specifying custom window size and title.
pub fn launch_with_config(title: &str, width: f64, height: f64) {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(title)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(width, height))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(900.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.starts_with(NAME));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!STYLES.is_empty());
        assert!(STYLES.contains("tailwindcss"));
        assert!(get_styles().contains(".input-group"));
    }
}
