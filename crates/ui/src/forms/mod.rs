//! # Form State
//!
//! Headless state machines behind every form of the application. None of
//! them touches the network on its own: they validate, hand out payloads
//! and route the outcome of the call the page made.
//!
//! - Entity forms (listings) with images, amenities and address autocomplete
//! - Sign-in and sign-up
//! - The server error adapter shared by all of them

// ============================================================================
// Module Declarations
// ============================================================================

pub mod address;
pub mod amenities;
pub mod auth;
pub mod entity_form;
pub mod images;
pub mod server_errors;

// ============================================================================
// Re-exports
// ============================================================================

pub use address::{AddressAutocomplete, DEBOUNCE, MIN_QUERY_CHARS, SearchTicket, debounced_search};
pub use amenities::AmenitySelection;
pub use auth::{AuthPrepared, SignInForm, SignUpForm};
pub use entity_form::{EntityForm, FormImages, FormMode, Prepared, SubmitResult};
pub use images::{IMAGE_REQUIRED, ImageKey, ImagePreview, ImageSelection};
pub use server_errors::{GENERIC_ERROR, ServerErrorAdapter};
