//! # UI Hooks
//!
//! Custom Dioxus hooks for the Sejour UI.
//!
//! This module provides reusable hooks for managing:
//! - Client context access and cached resource reads
//! - Entity table state (sort, filter, pagination, selection)
//! - Confirmation dialogs
//! - Entity editors (create / edit forms)
//! - Listing screens (query, page, table and delete confirmation)
//! - Row action commands (bookings, verifications, listings)

// ============================================================================
// Module Declarations
// ============================================================================

pub mod use_client;
pub mod use_confirm;
pub mod use_editor;
pub mod use_listing;
pub mod use_row_actions;
pub mod use_table;

// ============================================================================
// Re-exports
// ============================================================================

pub use use_client::{
    SharedGeocoder, fetch_page, retry, use_amenities, use_client, use_geocoder,
};
pub use use_confirm::{ConfirmRequest, ConfirmState, use_confirm};
pub use use_editor::{Editor, save_record, saved_message, use_editor};
pub use use_listing::{Listing, PageData, edit_delete, use_listing, with_availability};
pub use use_row_actions::{
    BookingApi, BookingCommand, RecordCommand, VerificationCommand, request_booking_action,
    run_confirmed,
};
pub use use_table::{
    CellValue, Column, ColumnHeader, RowAction, RowActionSlot, SortDirection, TableRow,
    TableState, TableView, use_table,
};
