//! # Sejour Model
//!
//! Records, form payloads and validation schemas for the Sejour booking
//! client.
//!
//! ## Core Concepts
//!
//! - **Record**: a read projection of a remote resource (Hotel, Room, Booking...)
//! - **FormData**: the editable payload of a resource, which is also its
//!   validation schema (see [`FormSchema`])
//! - **Envelope**: the shapes the API wraps data and errors in
//! - **FieldErrors**: the single field-name → messages error model shared by
//!   local validation and server-side errors
//!

// Module declarations
pub mod amenity;
pub mod booking;
pub mod envelope;
pub mod hotel;
pub mod image;
pub mod lounge;
pub mod payload;
pub mod residence;
pub mod restaurant;
pub mod schema;
pub mod user;
pub mod validation;
pub mod verification;

// Re-export commonly used types at crate root
pub use amenity::{Amenity, amenity_ids};
pub use booking::{BookableKind, BookableSummary, Booking, BookingAction, BookingRequest};
pub use envelope::{
    AuthResponse, DataEnvelope, ErrorEnvelope, MaybeWrapped, PageMeta, Paginated, TokenResponse,
};
pub use hotel::{Hotel, HotelFormData, Room, RoomFormData};
pub use image::{HasImages, ImageRef, ImageSet, MAX_IMAGES};
pub use lounge::{Lounge, LoungeFormData};
pub use payload::multipart_fields;
pub use residence::{Dwelling, DwellingFormData, Residence, ResidenceFormData};
pub use restaurant::{MenuCategory, MenuItem, MenuItemFormData, Restaurant, RestaurantFormData};
pub use schema::{AddressFields, FormSchema};
pub use user::{Credentials, RegisterPayload, User, UserSummary};
pub use validation::{FieldErrors, IMAGES_FIELD, PHONE_RE};
pub use verification::{OwnerVerification, VerificationAction};

// Re-export core types that are commonly used with records
pub use sejour_core::{
    AmenityId, BookingStatus, EntityId, MarketError, MarketResult, Price, Resource, UserType,
    VerificationStatus,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        AddressFields,
        Booking,
        BookingAction,
        EntityId,
        FieldErrors,
        // Contracts
        FormSchema,
        HasImages,
        Hotel,
        HotelFormData,
        ImageSet,
        // Errors
        MarketError,
        MarketResult,
        Paginated,
        Price,
        Resource,
        Room,
        RoomFormData,
        User,
    };
}

// ============================================================================
// Tests
// ============================================================================
