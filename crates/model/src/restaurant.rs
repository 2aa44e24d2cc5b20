//! Restaurants, menu categories and menu items

use sejour_core::{EntityId, Identifiable, Named, Price, Resource};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::image::{HasImages, ImageSet};
use crate::schema::{AddressFields, FormSchema};
use crate::validation::PHONE_RE;

// ============================================================================
// Restaurant
// ============================================================================

/// A restaurant listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(flatten)]
    pub location: AddressFields,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(flatten)]
    pub images: ImageSet,
}

impl Resource for Restaurant {
    const COLLECTION: &'static str = "restaurants";
    const LABEL: &'static str = "restaurant";
}

impl Identifiable for Restaurant {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for Restaurant {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasImages for Restaurant {
    fn image_set(&self) -> ImageSet {
        self.images.clone()
    }
}

/// Editable restaurant fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RestaurantFormData {
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Cuisine must be at most 100 characters"))]
    pub cuisine: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub address: AddressFields,

    #[validate(regex(path = *PHONE_RE, message = "Enter a valid phone number"))]
    pub phone: Option<String>,

    #[validate(length(max = 255, message = "Opening hours must be at most 255 characters"))]
    pub opening_hours: Option<String>,
}

impl FormSchema for RestaurantFormData {
    type Record = Restaurant;
    const ENTITY: &'static str = "restaurant";

    fn from_record(record: &Restaurant) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            cuisine: record.cuisine.clone(),
            address: record.location.clone(),
            phone: record.phone.clone(),
            opening_hours: record.opening_hours.clone(),
        }
    }

    fn record_images(record: &Restaurant) -> ImageSet {
        record.image_set()
    }

    fn address(&self) -> Option<&AddressFields> {
        Some(&self.address)
    }

    fn address_mut(&mut self) -> Option<&mut AddressFields> {
        Some(&mut self.address)
    }
}

// ============================================================================
// Menu
// ============================================================================

/// A menu section (starters, mains...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub restaurant_id: Option<EntityId>,
}

impl Resource for MenuCategory {
    const COLLECTION: &'static str = "menu-categories";
    const LABEL: &'static str = "menu category";
}

impl Identifiable for MenuCategory {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for MenuCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A dish or drink on a restaurant menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: EntityId,
    pub restaurant_id: EntityId,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub category: Option<MenuCategory>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub is_available: bool,
    #[serde(flatten)]
    pub images: ImageSet,
}

impl MenuItem {
    /// Category id, from the flat field or the embedded category
    pub fn effective_category_id(&self) -> Option<EntityId> {
        self.category_id
            .or_else(|| self.category.as_ref().map(|c| c.id))
    }
}

impl Resource for MenuItem {
    const COLLECTION: &'static str = "menu-items";
    const LABEL: &'static str = "menu item";
}

impl Identifiable for MenuItem {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Named for MenuItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasImages for MenuItem {
    fn image_set(&self) -> ImageSet {
        self.images.clone()
    }
}

/// Editable menu item fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MenuItemFormData {
    #[validate(required(message = "Select a restaurant"))]
    pub restaurant_id: Option<EntityId>,

    #[validate(required(message = "Category is required"))]
    pub category_id: Option<EntityId>,

    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,

    #[validate(
        required(message = "Price is required"),
        range(min = 0.01, message = "Price must be at least 0.01")
    )]
    pub price: Option<f64>,

    pub is_available: bool,
}

impl Default for MenuItemFormData {
    fn default() -> Self {
        Self {
            restaurant_id: None,
            category_id: None,
            name: String::new(),
            description: None,
            price: None,
            is_available: true,
        }
    }
}

impl MenuItemFormData {
    /// Blank form attached to a restaurant
    pub fn for_restaurant(restaurant_id: EntityId) -> Self {
        Self {
            restaurant_id: Some(restaurant_id),
            ..Default::default()
        }
    }
}

impl FormSchema for MenuItemFormData {
    type Record = MenuItem;
    const ENTITY: &'static str = "menu item";

    fn from_record(record: &MenuItem) -> Self {
        Self {
            restaurant_id: Some(record.restaurant_id),
            category_id: record.effective_category_id(),
            name: record.name.clone(),
            description: record.description.clone(),
            price: Some(record.price.amount()),
            is_available: record.is_available,
        }
    }

    fn record_images(record: &MenuItem) -> ImageSet {
        record.image_set()
    }
}
