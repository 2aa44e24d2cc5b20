//! Residences and the dwellings they contain

use sejour_core::{
    AmenityId, EntityId, Identifiable, Named, Price, Resource, ResidenceType, Standing,
    StructureType,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::amenity::{Amenity, amenity_ids};
use crate::image::{HasImages, ImageSet};
use crate::schema::{AddressFields, FormSchema};

// ============================================================================
// Residence
// ============================================================================

/// A residence (building or property grouping dwellings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residence {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub residence_type: ResidenceType,
    #[serde(default)]
    pub standing: Standing,
    #[serde(flatten)]
    pub location: AddressFields,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub min_price: Option<Price>,
    #[serde(default)]
    pub dwellings_count: Option<u32>,
    #[serde(flatten)]
    pub images: ImageSet,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Resource for Residence {
    const COLLECTION: &'static str = "residences";
    const LABEL: &'static str = "residence";
}

impl Identifiable for Residence {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for Residence {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasImages for Residence {
    fn image_set(&self) -> ImageSet {
        self.images.clone()
    }
}

/// Editable residence fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ResidenceFormData {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub residence_type: ResidenceType,

    pub standing: Standing,

    #[serde(flatten)]
    #[validate(nested)]
    pub address: AddressFields,

    pub amenities: Vec<AmenityId>,
}

impl FormSchema for ResidenceFormData {
    type Record = Residence;
    const ENTITY: &'static str = "residence";

    fn from_record(record: &Residence) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            residence_type: record.residence_type,
            standing: record.standing,
            address: record.location.clone(),
            amenities: amenity_ids(&record.amenities),
        }
    }

    fn record_images(record: &Residence) -> ImageSet {
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
// Dwelling
// ============================================================================

/// A rentable unit inside a residence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dwelling {
    pub id: EntityId,
    pub residence_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub structure_type: StructureType,
    #[serde(default)]
    pub standing: Standing,
    /// Nightly rate
    pub price: Price,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub is_available: bool,
    /// Name of the parent residence (read-only)
    #[serde(default)]
    pub residence_name: Option<String>,
    #[serde(flatten)]
    pub images: ImageSet,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Resource for Dwelling {
    const COLLECTION: &'static str = "dwellings";
    const LABEL: &'static str = "dwelling";
}

impl Identifiable for Dwelling {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for Dwelling {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasImages for Dwelling {
    fn image_set(&self) -> ImageSet {
        self.images.clone()
    }
}

/// Editable dwelling fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DwellingFormData {
    #[validate(required(message = "Select a residence"))]
    pub residence_id: Option<EntityId>,

    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    pub structure_type: StructureType,

    pub standing: Standing,

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

    #[validate(range(max = 20, message = "At most 20 bedrooms"))]
    pub bedrooms: Option<u32>,

    pub is_available: bool,

    pub amenities: Vec<AmenityId>,
}

impl Default for DwellingFormData {
    fn default() -> Self {
        Self {
            residence_id: None,
            name: String::new(),
            structure_type: StructureType::default(),
            standing: Standing::default(),
            price: None,
            capacity: None,
            bedrooms: None,
            is_available: true,
            amenities: Vec::new(),
        }
    }
}

impl DwellingFormData {
    /// Blank form attached to a residence
    pub fn for_residence(residence_id: EntityId) -> Self {
        Self {
            residence_id: Some(residence_id),
            ..Default::default()
        }
    }
}

impl FormSchema for DwellingFormData {
    type Record = Dwelling;
    const ENTITY: &'static str = "dwelling";

    fn from_record(record: &Dwelling) -> Self {
        Self {
            residence_id: Some(record.residence_id),
            name: record.name.clone(),
            structure_type: record.structure_type,
            standing: record.standing,
            price: Some(record.price.amount()),
            capacity: Some(record.capacity),
            bedrooms: record.bedrooms,
            is_available: record.is_available,
            amenities: amenity_ids(&record.amenities),
        }
    }

    fn record_images(record: &Dwelling) -> ImageSet {
        record.image_set()
    }

    fn amenities(&self) -> Option<&[AmenityId]> {
        Some(&self.amenities)
    }

    fn set_amenities(&mut self, ids: Vec<AmenityId>) {
        self.amenities = ids;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_residence_wire_names() {
        let form = ResidenceFormData {
            residence_type: ResidenceType::Villa,
            standing: Standing::Luxury,
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["type"], "VILLA");
        assert_eq!(json["standing"], "LUXURY");
        assert!(json.get("residence_type").is_none());
    }

    #[test]
    fn test_dwelling_accepts_string_price() {
        let dwelling: Dwelling = serde_json::from_str(
            r#"{"id":3,"residence_id":1,"name":"A1","price":"35.5","capacity":2,
                "structure_type":"ONE_BEDROOM","is_available":true,
                "main_image":{"url":"https://cdn/a1.jpg"}}"#,
        )
        .unwrap();
        assert_eq!(dwelling.price, Price::new(35.5));
        assert_eq!(dwelling.structure_type, StructureType::OneBedroom);

        let form = DwellingFormData::from_record(&dwelling);
        assert_eq!(form.price, Some(35.5));
        assert_eq!(DwellingFormData::record_images(&dwelling).len(), 1);
        assert!(form.check().is_empty());
    }

    #[test]
    fn test_dwelling_form_requires_residence() {
        let errors = DwellingFormData::default().check();
        assert!(errors.has("residence_id"));
        assert!(errors.has("price"));
        assert!(errors.has("capacity"));

        let errors = DwellingFormData::for_residence(EntityId(1)).check();
        assert!(!errors.has("residence_id"));
    }
}
