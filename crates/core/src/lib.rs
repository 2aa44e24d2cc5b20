//! # Sejour Core
//!
//! Core types, traits, and error handling for the Sejour booking client.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: server identifiers, the canonical `Price`, listing and status enumerations
//! - **Traits**: common behaviors like `Identifiable`, `Named` and `Resource`
//! - **Errors**: unified error handling with `MarketError` and `MarketResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{MarketError, MarketResult, ResultExt};
pub use traits::{Identifiable, Named, Resource};
pub use types::{
    AmenityId, BookingStatus, EntityId, LoungeCategory, Price, ResidenceType, RoomType, Standing,
    StatusTone, StructureType, UserType, VerificationStatus,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
