//! Core types used throughout Sejour
//!
//! This module contains identifiers, the canonical price representation and
//! the closed enumerations the remote API exposes (listing kinds, standings,
//! booking and verification statuses).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Identifiers
// ============================================================================

/// Numeric identifier assigned by the remote API
///
/// The client never mints identifiers; they only ever come back from a
/// create call or a list/detail response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Wrap a raw identifier
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// Identifier of an amenity (sent as a flat integer array)
pub type AmenityId = u64;

// ============================================================================
// Price
// ============================================================================

/// Canonical monetary amount
///
/// The API is inconsistent about prices: some resources return `"12.50"`,
/// others `12.5`. Deserialization accepts both; serialization always emits
/// a JSON number rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Price(f64);

impl Price {
    /// Smallest accepted price
    pub const MIN: f64 = 0.01;

    /// Create a price, rounding to two decimals
    pub fn new(amount: f64) -> Self {
        Self((amount * 100.0).round() / 100.0)
    }

    /// Get the amount as a float
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Whether the amount satisfies the minimum-price rule
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= Self::MIN
    }

    /// Parse a user-entered amount (`"12,5"` and `"12.50"` are both accepted)
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().replace(',', ".");
        if normalized.is_empty() {
            return None;
        }
        normalized
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self::new)
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self::new(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Number(f64),
            Text(String),
        }

        match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(n) => Ok(Price::new(n)),
            RawPrice::Text(s) => Price::parse(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid price '{}'", s))),
        }
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Account discriminator sent on registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Books listings
    #[default]
    Customer,
    /// Lists properties and inventory
    Owner,
    /// Back-office staff
    Admin,
}

impl UserType {
    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            UserType::Customer => "Customer",
            UserType::Owner => "Owner",
            UserType::Admin => "Administrator",
        }
    }

    /// Account types a visitor may pick when signing up
    pub fn registrable() -> &'static [UserType] {
        &[UserType::Customer, UserType::Owner]
    }

    /// Whether this account may open the back-office
    pub fn can_manage(&self) -> bool {
        matches!(self, UserType::Owner | UserType::Admin)
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Listing Enumerations
// ============================================================================

/// Kind of residence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResidenceType {
    #[default]
    Apartment,
    House,
    Villa,
    Studio,
    Guesthouse,
}

impl ResidenceType {
    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ResidenceType::Apartment => "Apartment",
            ResidenceType::House => "House",
            ResidenceType::Villa => "Villa",
            ResidenceType::Studio => "Studio",
            ResidenceType::Guesthouse => "Guesthouse",
        }
    }

    /// Get all variants
    pub fn all() -> &'static [ResidenceType] {
        &[
            ResidenceType::Apartment,
            ResidenceType::House,
            ResidenceType::Villa,
            ResidenceType::Studio,
            ResidenceType::Guesthouse,
        ]
    }
}

/// Comfort level of a residence or dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Standing {
    Economy,
    #[default]
    Standard,
    Premium,
    Luxury,
}

impl Standing {
    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Standing::Economy => "Economy",
            Standing::Standard => "Standard",
            Standing::Premium => "Premium",
            Standing::Luxury => "Luxury",
        }
    }

    /// Get all variants
    pub fn all() -> &'static [Standing] {
        &[
            Standing::Economy,
            Standing::Standard,
            Standing::Premium,
            Standing::Luxury,
        ]
    }
}

/// Physical layout of a dwelling unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureType {
    #[default]
    Room,
    Studio,
    OneBedroom,
    TwoBedroom,
    ThreeBedroomPlus,
}

impl StructureType {
    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StructureType::Room => "Room",
            StructureType::Studio => "Studio",
            StructureType::OneBedroom => "1 bedroom",
            StructureType::TwoBedroom => "2 bedrooms",
            StructureType::ThreeBedroomPlus => "3+ bedrooms",
        }
    }

    /// Get all variants
    pub fn all() -> &'static [StructureType] {
        &[
            StructureType::Room,
            StructureType::Studio,
            StructureType::OneBedroom,
            StructureType::TwoBedroom,
            StructureType::ThreeBedroomPlus,
        ]
    }
}

/// Hotel room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Single,
    #[default]
    Double,
    Twin,
    Suite,
    Family,
}

impl RoomType {
    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Twin => "Twin",
            RoomType::Suite => "Suite",
            RoomType::Family => "Family",
        }
    }

    /// Get all variants
    pub fn all() -> &'static [RoomType] {
        &[
            RoomType::Single,
            RoomType::Double,
            RoomType::Twin,
            RoomType::Suite,
            RoomType::Family,
        ]
    }
}

/// Nightlife venue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoungeCategory {
    #[default]
    Lounge,
    Bar,
    Club,
    Rooftop,
}

impl LoungeCategory {
    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoungeCategory::Lounge => "Lounge",
            LoungeCategory::Bar => "Bar",
            LoungeCategory::Club => "Club",
            LoungeCategory::Rooftop => "Rooftop",
        }
    }

    /// Get all variants
    pub fn all() -> &'static [LoungeCategory] {
        &[
            LoungeCategory::Lounge,
            LoungeCategory::Bar,
            LoungeCategory::Club,
            LoungeCategory::Rooftop,
        ]
    }
}

// ============================================================================
// Status Enumerations
// ============================================================================

/// Server-owned booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    /// Cancelled (the API spells it the French way)
    Annule,
}

impl BookingStatus {
    /// Wire value as sent by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Annule => "ANNULE",
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Annule => "Cancelled",
        }
    }

    /// Badge tone used by status badges
    pub fn tone(&self) -> StatusTone {
        match self {
            BookingStatus::Pending => StatusTone::Warning,
            BookingStatus::Confirmed => StatusTone::Success,
            BookingStatus::Annule => StatusTone::Danger,
        }
    }

    /// Whether the booking is still open
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Annule)
    }

    /// Get all variants
    pub fn all() -> &'static [BookingStatus] {
        &[
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Annule,
        ]
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Server-owned KYC progress of an owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Suspended,
}

impl VerificationStatus {
    /// Wire value as sent by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "PENDING",
            VerificationStatus::Submitted => "SUBMITTED",
            VerificationStatus::UnderReview => "UNDER_REVIEW",
            VerificationStatus::Approved => "APPROVED",
            VerificationStatus::Rejected => "REJECTED",
            VerificationStatus::Suspended => "SUSPENDED",
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "Pending",
            VerificationStatus::Submitted => "Submitted",
            VerificationStatus::UnderReview => "Under review",
            VerificationStatus::Approved => "Approved",
            VerificationStatus::Rejected => "Rejected",
            VerificationStatus::Suspended => "Suspended",
        }
    }

    /// Badge tone used by status badges
    pub fn tone(&self) -> StatusTone {
        match self {
            VerificationStatus::Pending => StatusTone::Neutral,
            VerificationStatus::Submitted | VerificationStatus::UnderReview => StatusTone::Warning,
            VerificationStatus::Approved => StatusTone::Success,
            VerificationStatus::Rejected | VerificationStatus::Suspended => StatusTone::Danger,
        }
    }

    /// Get all variants
    pub fn all() -> &'static [VerificationStatus] {
        &[
            VerificationStatus::Pending,
            VerificationStatus::Submitted,
            VerificationStatus::UnderReview,
            VerificationStatus::Approved,
            VerificationStatus::Rejected,
            VerificationStatus::Suspended,
        ]
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual tone for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Neutral,
    Success,
    Warning,
    Danger,
}

impl StatusTone {
    /// Tailwind classes for the badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            StatusTone::Neutral => "bg-slate-600/40 text-slate-200",
            StatusTone::Success => "bg-emerald-500/20 text-emerald-300",
            StatusTone::Warning => "bg-amber-500/20 text-amber-300",
            StatusTone::Danger => "bg-rose-500/20 text-rose-300",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entity_id_transparent() {
        let id: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(id, EntityId(42));
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!("  7 ".parse::<EntityId>().unwrap(), EntityId(7));
    }

    #[test]
    fn test_price_accepts_string_and_number() {
        let a: Price = serde_json::from_str("\"12.50\"").unwrap();
        let b: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "12.5");
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
    }

    #[test]
    fn test_price_rounding_and_validity() {
        assert_eq!(Price::new(10.456).to_string(), "10.46");
        assert!(Price::new(0.01).is_valid());
        assert!(!Price::new(0.0).is_valid());
        assert!(!Price::new(-3.0).is_valid());
    }

    #[test]
    fn test_price_parse_user_input() {
        assert_eq!(Price::parse("12,5"), Some(Price::new(12.5)));
        assert_eq!(Price::parse(" 8 "), Some(Price::new(8.0)));
        assert_eq!(Price::parse(""), None);
        assert_eq!(Price::parse("NaN"), None);
    }

    #[test]
    fn test_user_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserType::Customer).unwrap(),
            "\"CUSTOMER\""
        );
        assert!(UserType::Owner.can_manage());
        assert!(!UserType::Customer.can_manage());
        assert!(!UserType::registrable().contains(&UserType::Admin));
    }

    #[test]
    fn test_booking_status_wire_format() {
        let status: BookingStatus = serde_json::from_str("\"ANNULE\"").unwrap();
        assert_eq!(status, BookingStatus::Annule);
        assert!(status.is_terminal());
        assert_eq!(status.display_name(), "Cancelled");
        assert_eq!(BookingStatus::Pending.tone(), StatusTone::Warning);
    }

    #[test]
    fn test_verification_status_wire_format() {
        let status: VerificationStatus = serde_json::from_str("\"UNDER_REVIEW\"").unwrap();
        assert_eq!(status, VerificationStatus::UnderReview);
        assert_eq!(status.to_string(), "UNDER_REVIEW");
        assert_eq!(VerificationStatus::all().len(), 6);
    }

    #[test]
    fn test_listing_enums() {
        assert_eq!(
            serde_json::to_string(&StructureType::TwoBedroom).unwrap(),
            "\"TWO_BEDROOM\""
        );
        assert_eq!(Standing::default(), Standing::Standard);
        assert_eq!(RoomType::all().len(), 5);
        assert_eq!(ResidenceType::Villa.display_name(), "Villa");
        assert_eq!(LoungeCategory::Rooftop.display_name(), "Rooftop");
    }
}
