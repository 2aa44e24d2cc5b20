//! Lounges and nightlife venues

use sejour_core::{AmenityId, EntityId, Identifiable, LoungeCategory, Named, Price, Resource};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::amenity::{Amenity, amenity_ids};
use crate::image::{HasImages, ImageSet};
use crate::schema::{AddressFields, FormSchema};

/// A lounge, bar, club or rooftop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lounge {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub category: LoungeCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub location: AddressFields,
    #[serde(default)]
    pub entry_price: Option<Price>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(flatten)]
    pub images: ImageSet,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Lounge {
    /// Entry price label, "Free" when there is none
    pub fn entry_label(&self) -> String {
        match self.entry_price {
            Some(price) if price.amount() > 0.0 => price.to_string(),
            _ => "Free".to_string(),
        }
    }
}

impl Resource for Lounge {
    const COLLECTION: &'static str = "lounges";
    const LABEL: &'static str = "lounge";
}

impl Identifiable for Lounge {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for Lounge {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasImages for Lounge {
    fn image_set(&self) -> ImageSet {
        self.images.clone()
    }
}

/// Editable lounge fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoungeFormData {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    pub category: LoungeCategory,

    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub address: AddressFields,

    #[validate(range(min = 0.0, message = "Entry price cannot be negative"))]
    pub entry_price: Option<f64>,

    #[validate(length(max = 255, message = "Opening hours must be at most 255 characters"))]
    pub opening_hours: Option<String>,

    pub amenities: Vec<AmenityId>,
}

impl FormSchema for LoungeFormData {
    type Record = Lounge;
    const ENTITY: &'static str = "lounge";

    fn from_record(record: &Lounge) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category,
            description: record.description.clone(),
            address: record.location.clone(),
            entry_price: record.entry_price.map(|p| p.amount()),
            opening_hours: record.opening_hours.clone(),
            amenities: amenity_ids(&record.amenities),
        }
    }

    fn record_images(record: &Lounge) -> ImageSet {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_price_optional_but_not_negative() {
        let mut form = LoungeFormData::default();
        assert!(!form.check().has("entry_price"));

        form.entry_price = Some(-1.0);
        assert_eq!(
            form.check().first("entry_price"),
            Some("Entry price cannot be negative")
        );
    }

    #[test]
    fn test_entry_label() {
        let lounge: Lounge = serde_json::from_str(
            r#"{"id":1,"name":"Sky Bar","category":"ROOFTOP","address":"x","city":"Kribi",
                "country":"Cameroon","entry_price":null}"#,
        )
        .unwrap();
        assert_eq!(lounge.category, LoungeCategory::Rooftop);
        assert_eq!(lounge.entry_label(), "Free");
    }
}
