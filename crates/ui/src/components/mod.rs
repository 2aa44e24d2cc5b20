//! # UI Components
//!
//! Reusable Dioxus components of the Sejour back office.
//!
//! - **Inputs**: text, number, select and checkbox fields with inline errors
//! - **Entity Table**: sortable, filterable table with row actions and pager
//! - **Listing Table**: entity table wired to a listing screen's state
//! - **Form Shell / Form Fields**: the generic entity form and its optional
//!   blocks (address autocomplete, images, amenities)
//! - **Confirm Dialog**: confirmation of destructive row actions
//! - **Feedback**: loading, error and empty states, toasts
//!
//! ## Component Hierarchy
//!
//! ```text
//! Listing page
//! ├── PageHeader
//! ├── EntityTable
//! │   ├── StatusBadge (badge cells)
//! │   └── Loading / Error / Empty state
//! ├── FormShell (create / edit)
//! │   ├── Inputs
//! │   ├── AddressBlock
//! │   ├── ImagePicker
//! │   └── AmenitySelect
//! └── ConfirmDialog
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod confirm_dialog;
pub mod entity_table;
pub mod feedback;
pub mod form_fields;
pub mod form_shell;
pub mod inputs;
pub mod listing_table;
pub mod modal;
pub mod page_header;
pub mod qr_view;
pub mod status_badge;

// ============================================================================
// Re-exports
// ============================================================================

pub use confirm_dialog::ConfirmDialog;
pub use entity_table::EntityTable;
pub use feedback::{EmptyState, ErrorPanel, ErrorState, LoadingState, ToastStack};
pub use form_fields::{AddressBlock, AmenitySelect, ImagePicker};
pub use form_shell::FormShell;
pub use inputs::{
    Checkbox, FieldError, NumberInput, Select, SelectOption, TextArea, TextInput, choice_options,
    choice_value, optional_text, pick_choice,
};
pub use listing_table::ListingTable;
pub use modal::Modal;
pub use page_header::{PageHeader, PrimaryButton};
pub use qr_view::QrCodeView;
pub use status_badge::StatusBadge;
