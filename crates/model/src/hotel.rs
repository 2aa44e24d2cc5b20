//! Hotels and their rooms

use sejour_core::{AmenityId, EntityId, Identifiable, Named, Price, Resource, RoomType};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::amenity::{Amenity, amenity_ids};
use crate::image::{HasImages, ImageSet};
use crate::schema::{AddressFields, FormSchema};
use crate::validation::PHONE_RE;

// ============================================================================
// Hotel
// ============================================================================

/// A hotel as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub location: AddressFields,
    #[serde(default)]
    pub stars: u8,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Aggregated review score (read-only)
    #[serde(default)]
    pub rating: Option<f32>,
    /// Cheapest room rate (read-only)
    #[serde(default)]
    pub min_rate: Option<Price>,
    #[serde(default)]
    pub rooms_count: Option<u32>,
    #[serde(flatten)]
    pub images: ImageSet,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Resource for Hotel {
    const COLLECTION: &'static str = "hotels";
    const LABEL: &'static str = "hotel";
}

impl Identifiable for Hotel {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for Hotel {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasImages for Hotel {
    fn image_set(&self) -> ImageSet {
        self.images.clone()
    }
}

/// Editable hotel fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct HotelFormData {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub address: AddressFields,

    #[validate(range(min = 1, max = 5, message = "Stars must be between 1 and 5"))]
    pub stars: u8,

    #[validate(regex(path = *PHONE_RE, message = "Enter a valid phone number"))]
    pub phone: Option<String>,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,

    pub amenities: Vec<AmenityId>,
}

impl FormSchema for HotelFormData {
    type Record = Hotel;
    const ENTITY: &'static str = "hotel";

    fn from_record(record: &Hotel) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            address: record.location.clone(),
            stars: record.stars,
            phone: record.phone.clone(),
            email: record.email.clone(),
            amenities: amenity_ids(&record.amenities),
        }
    }

    fn record_images(record: &Hotel) -> ImageSet {
        record.image_set()
    }

    fn amenities(&self) -> Option<&[AmenityId]> {
        Some(&self.amenities)
    }

    fn set_amenities(&mut self, ids: Vec<AmenityId>) {
        self.amenities = ids;
    }

    fn address(&self) -> Option<&AddressFields> {
        Some(&self.address)
    }

    fn address_mut(&mut self) -> Option<&mut AddressFields> {
        Some(&mut self.address)
    }
}

// ============================================================================
// Room
// ============================================================================

/// A bookable hotel room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: EntityId,
    pub hotel_id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub room_type: RoomType,
    pub price: Price,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub is_available: bool,
    #[serde(flatten)]
    pub images: ImageSet,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Resource for Room {
    const COLLECTION: &'static str = "rooms";
    const LABEL: &'static str = "room";
}

impl Identifiable for Room {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for Room {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasImages for Room {
    fn image_set(&self) -> ImageSet {
        self.images.clone()
    }
}

/// Editable room fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RoomFormData {
    #[validate(required(message = "Select a hotel"))]
    pub hotel_id: Option<EntityId>,

    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    #[serde(rename = "type")]
    pub room_type: RoomType,

    #[validate(
        required(message = "Price is required"),
        range(min = 0.01, message = "Price must be at least 0.01")
    )]
    pub price: Option<f64>,

    #[validate(
        required(message = "Capacity is required"),
        range(min = 1, max = 50, message = "Capacity must be between 1 and 50")
    )]
    pub capacity: Option<u32>,

    pub is_available: bool,

    pub amenities: Vec<AmenityId>,
}

impl Default for RoomFormData {
    fn default() -> Self {
        Self {
            hotel_id: None,
            name: String::new(),
            room_type: RoomType::default(),
            price: None,
            capacity: None,
            is_available: true,
            amenities: Vec::new(),
        }
    }
}

impl RoomFormData {
    /// Blank form attached to a hotel
    pub fn for_hotel(hotel_id: EntityId) -> Self {
        Self {
            hotel_id: Some(hotel_id),
            ..Default::default()
        }
    }
}

impl FormSchema for RoomFormData {
    type Record = Room;
    const ENTITY: &'static str = "room";

    fn from_record(record: &Room) -> Self {
        Self {
            hotel_id: Some(record.hotel_id),
            name: record.name.clone(),
            room_type: record.room_type,
            price: Some(record.price.amount()),
            capacity: Some(record.capacity),
            is_available: record.is_available,
            amenities: amenity_ids(&record.amenities),
        }
    }

    fn record_images(record: &Room) -> ImageSet {
        record.image_set()
    }

    fn amenities(&self) -> Option<&[AmenityId]> {
        Some(&self.amenities)
    }

    fn set_amenities(&mut self, ids: Vec<AmenityId>) {
        self.amenities = ids;
    }
}

// ============================================================================
// Tests
// ============================================================================
