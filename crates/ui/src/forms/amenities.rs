//! Amenity multi-select state

use std::collections::BTreeSet;

use sejour_model::AmenityId;

/// Order-insensitive set of selected amenity ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmenitySelection {
    selected: BTreeSet<AmenityId>,
}

impl AmenitySelection {
    /// Seed from previously selected ids
    pub fn from_ids(ids: &[AmenityId]) -> Self {
        Self {
            selected: ids.iter().copied().collect(),
        }
    }

    /// Select or deselect one amenity
    pub fn toggle(&mut self, id: AmenityId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn contains(&self, id: AmenityId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flat id array sent with the payload
    pub fn ids(&self) -> Vec<AmenityId> {
        self.selected.iter().copied().collect()
    }
}
