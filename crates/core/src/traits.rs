//! Core traits for Sejour
//!
//! Behaviors shared by API records: identity, naming and resource
//! addressing.

use crate::types::EntityId;

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for records that carry a server-assigned identifier
pub trait Identifiable {
    /// Get the identifier
    fn id(&self) -> EntityId;

    /// Check if this matches another identifier
    fn matches_id(&self, id: EntityId) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Named Trait
// ============================================================================

/// Trait for types that have a human-readable label
pub trait Named {
    /// Get the name
    fn name(&self) -> &str;

    /// Check if the name matches (case-insensitive)
    fn name_matches(&self, other: &str) -> bool {
        self.name().eq_ignore_ascii_case(other)
    }
}

// ============================================================================
// Resource Trait
// ============================================================================

/// Trait for records that live in a REST collection
///
/// The collection path is relative to the API base URL, e.g. `hotels` or
/// `menu-items`.
pub trait Resource {
    /// Collection path (no leading or trailing slash)
    const COLLECTION: &'static str;

    /// Human-readable singular label, used in dialogs and log lines
    const LABEL: &'static str;

    /// Path of one member of the collection
    fn member_path(id: EntityId) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Hotel {
        id: EntityId,
        name: String,
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

    impl Resource for Hotel {
        const COLLECTION: &'static str = "hotels";
        const LABEL: &'static str = "hotel";
    }

    #[test]
    fn test_resource_member_path() {
        assert_eq!(Hotel::member_path(EntityId(12)), "hotels/12");
    }

    #[test]
    fn test_identity_and_name() {
        let hotel = Hotel {
            id: EntityId(3),
            name: "Hilton Yaounde".to_string(),
        };
        assert!(hotel.matches_id(EntityId(3)));
        assert!(!hotel.matches_id(EntityId(4)));
        assert!(hotel.name_matches("HILTON YAOUNDE"));
    }
}
