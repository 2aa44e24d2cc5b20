//! Amenities attached to listings (many-to-many)

use sejour_core::{AmenityId, EntityId, Identifiable, Named, Resource};
use serde::{Deserialize, Serialize};

/// An amenity offered by a listing (wifi, pool, parking...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: AmenityId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Resource for Amenity {
    const COLLECTION: &'static str = "amenities";
    const LABEL: &'static str = "amenity";
}

impl Identifiable for Amenity {
    fn id(&self) -> EntityId {
        EntityId(self.id)
    }
}

impl Named for Amenity {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Ids of a list of amenities, in the order received
pub fn amenity_ids(amenities: &[Amenity]) -> Vec<AmenityId> {
    amenities.iter().map(|a| a.id).collect()
}
