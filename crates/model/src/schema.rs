//! The entity-form contract
//!
//! Every editable resource has a FormData payload that doubles as its
//! validation schema. `FormSchema` describes how a payload is seeded from an
//! existing record (edit mode), which optional parts of the generic form it
//! uses (images, amenities, address autocomplete) and which cross-field
//! rules apply on top of the declarative `validator` attributes.

use sejour_core::AmenityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::image::ImageSet;
use crate::validation::FieldErrors;

// ============================================================================
// Address block
// ============================================================================

/// Postal address and coordinates, flattened into the owning payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddressFields {
    #[validate(length(min = 2, max = 255, message = "Address must be between 2 and 255 characters"))]
    pub address: String,

    #[validate(length(min = 2, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 2, max = 100, message = "Country is required"))]
    pub country: String,

    #[validate(
        required(message = "Latitude is required"),
        range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,

    #[validate(
        required(message = "Longitude is required"),
        range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
}

// ============================================================================
// FormSchema
// ============================================================================

/// Contract implemented by every entity FormData
pub trait FormSchema: Validate + Serialize + Clone + Default + PartialEq {
    /// Read record the form edits
    type Record;

    /// Entity label used in titles and log lines
    const ENTITY: &'static str;

    /// Whether the form carries an image set (and its invariant)
    const WITH_IMAGES: bool = true;

    /// Seed the payload from an existing record (edit mode)
    fn from_record(record: &Self::Record) -> Self;

    /// Existing images of a record, pre-loaded into the image picker
    fn record_images(_record: &Self::Record) -> ImageSet {
        ImageSet::default()
    }

    /// Amenity ids currently in the payload
    fn amenities(&self) -> Option<&[AmenityId]> {
        None
    }

    /// Replace the amenity ids (no-op for forms without amenities)
    fn set_amenities(&mut self, _ids: Vec<AmenityId>) {}

    /// Address block, for forms with address autocomplete
    fn address(&self) -> Option<&AddressFields> {
        None
    }

    fn address_mut(&mut self) -> Option<&mut AddressFields> {
        None
    }

    /// Rules spanning several fields
    fn cross_field_errors(&self, _errors: &mut FieldErrors) {}

    /// Run every rule and report all failing fields at once
    fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::check(self);
        self.cross_field_errors(&mut errors);
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_blank_reports_every_field() {
        let errors = FieldErrors::check(&AddressFields::default());
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec!["address", "city", "country", "latitude", "longitude"]
        );
    }

    #[test]
    fn test_address_coordinate_ranges() {
        let address = AddressFields {
            address: "1 Rue Centrale".to_string(),
            city: "Douala".to_string(),
            country: "Cameroon".to_string(),
            latitude: Some(91.0),
            longitude: Some(-181.0),
        };
        let errors = FieldErrors::check(&address);
        assert_eq!(
            errors.first("latitude"),
            Some("Latitude must be between -90 and 90")
        );
        assert_eq!(
            errors.first("longitude"),
            Some("Longitude must be between -180 and 180")
        );
    }

    #[test]
    fn test_address_flattens_on_the_wire() {
        #[derive(Serialize)]
        struct Owner {
            name: &'static str,
            #[serde(flatten)]
            address: AddressFields,
        }

        let json = serde_json::to_value(Owner {
            name: "x",
            address: AddressFields {
                city: "Yaounde".to_string(),
                ..Default::default()
            },
        })
        .unwrap();
        assert_eq!(json["city"], "Yaounde");
        assert!(json.get("address").is_some());
    }
}
