//! Bookings and their status transitions
//!
//! Transitions are decided by the server. The client only exposes the
//! actions that make sense for the status it was handed.

use chrono::{DateTime, NaiveDate, Utc};
use sejour_core::{BookingStatus, EntityId, Identifiable, Price, Resource};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::schema::FormSchema;
use crate::user::UserSummary;
use crate::validation::FieldErrors;

// ============================================================================
// Bookable
// ============================================================================

/// Kind of listing a booking targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookableKind {
    #[default]
    Dwelling,
    Room,
    Lounge,
    Restaurant,
}

impl BookableKind {
    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BookableKind::Dwelling => "Dwelling",
            BookableKind::Room => "Hotel room",
            BookableKind::Lounge => "Lounge",
            BookableKind::Restaurant => "Restaurant",
        }
    }
}

/// Listing summary embedded in a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookableSummary {
    #[serde(rename = "type")]
    pub kind: BookableKind,
    pub id: EntityId,
    pub name: String,
}

// ============================================================================
// Booking
// ============================================================================

/// A reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: EntityId,
    #[serde(default)]
    pub reference: String,
    pub status: BookingStatus,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guests")]
    pub guests: u32,
    pub total_price: Price,
    #[serde(default)]
    pub customer: Option<UserSummary>,
    #[serde(default)]
    pub bookable: Option<BookableSummary>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_guests() -> u32 {
    1
}

impl Booking {
    /// Number of nights between check-in and check-out
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }

    /// Label of the booked listing
    pub fn listing_label(&self) -> &str {
        self.bookable.as_ref().map(|b| b.name.as_str()).unwrap_or("-")
    }

    /// Name of the customer
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    }

    /// Actions offered for the current status
    pub fn available_actions(&self) -> &'static [BookingAction] {
        BookingAction::available_for(self.status)
    }

    /// Whether an action may be triggered for the current status
    pub fn allows(&self, action: BookingAction) -> bool {
        self.available_actions().contains(&action)
    }
}

impl Resource for Booking {
    const COLLECTION: &'static str = "bookings";
    const LABEL: &'static str = "booking";
}

impl Identifiable for Booking {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Status-changing row actions on a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingAction {
    Confirm,
    Cancel,
}

impl BookingAction {
    /// Actions offered for a status
    pub fn available_for(status: BookingStatus) -> &'static [BookingAction] {
        match status {
            BookingStatus::Pending => &[BookingAction::Confirm, BookingAction::Cancel],
            BookingStatus::Confirmed => &[BookingAction::Cancel],
            BookingStatus::Annule => &[],
        }
    }

    /// Path segment of the action endpoint (`bookings/{id}/{segment}`)
    pub fn segment(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "confirm",
            BookingAction::Cancel => "cancel",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "Confirm",
            BookingAction::Cancel => "Cancel booking",
        }
    }

    /// Whether the action must go through the confirmation dialog
    pub fn is_destructive(&self) -> bool {
        matches!(self, BookingAction::Cancel)
    }
}

// ============================================================================
// Booking request
// ============================================================================

/// Payload sent to create a booking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    pub bookable_type: BookableKind,

    #[validate(required(message = "Select what to book"))]
    pub bookable_id: Option<EntityId>,

    #[validate(required(message = "Check-in date is required"))]
    pub check_in: Option<NaiveDate>,

    #[validate(required(message = "Check-out date is required"))]
    pub check_out: Option<NaiveDate>,

    #[validate(range(min = 1, max = 50, message = "Guests must be between 1 and 50"))]
    pub guests: u32,

    #[validate(length(max = 1000, message = "Notes are too long"))]
    pub notes: Option<String>,
}

impl FormSchema for BookingRequest {
    type Record = Booking;
    const ENTITY: &'static str = "booking";
    const WITH_IMAGES: bool = false;

    fn from_record(record: &Booking) -> Self {
        Self {
            bookable_type: record.bookable.as_ref().map(|b| b.kind).unwrap_or_default(),
            bookable_id: record.bookable.as_ref().map(|b| b.id),
            check_in: Some(record.check_in),
            check_out: Some(record.check_out),
            guests: record.guests,
            notes: None,
        }
    }

    fn cross_field_errors(&self, errors: &mut FieldErrors) {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out <= check_in {
                errors.add("check_out", "Check-out must be after check-in");
            }
        }
    }
}
