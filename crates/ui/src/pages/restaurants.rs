//! Restaurant and menu management screens

use dioxus::prelude::*;
use sejour_client::ListQuery;
use sejour_core::EntityId;
use sejour_model::{MenuCategory, MenuItem, MenuItemFormData, Restaurant, RestaurantFormData};

use super::common::{
    ParentFilter, id_options, id_value, parent_query, parse_id, rating_cell, use_parent_options,
};
use crate::components::{
    AddressBlock, Checkbox, FormShell, ImagePicker, ListingTable, NumberInput, PageHeader,
    PrimaryButton, Select, SelectOption, TextArea, TextInput, optional_text,
};
use crate::hooks::{
    CellValue, Column, Editor, edit_delete, use_client, use_editor, use_listing, with_availability,
};

// ============================================================================
// Restaurants
// ============================================================================

fn restaurant_columns() -> Vec<Column<Restaurant>> {
    vec![
        Column::new("name", "Name", |r| r.name.as_str().into()),
        Column::new("cuisine", "Cuisine", |r| r.cuisine.clone().into()),
        Column::new("city", "City", |r| r.location.city.as_str().into()),
        Column::new("hours", "Opening hours", |r| r.opening_hours.clone().into()),
        Column::new("rating", "Rating", |r| rating_cell(r.rating)),
    ]
}

#[component]
pub fn RestaurantsPage() -> Element {
    let mut listing = use_listing::<Restaurant>(ListQuery::new);
    let mut editor = use_editor::<RestaurantFormData>();
    let view = listing.view(&restaurant_columns(), edit_delete);

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Restaurants",
                PrimaryButton {
                    label: "New restaurant",
                    on_click: move |_| editor.create(RestaurantFormData::default()),
                }
            }
            ListingTable::<Restaurant> {
                listing,
                view,
                on_edit: move |restaurant: Restaurant| editor.edit(restaurant.id, &restaurant),
            }
            if editor.is_open() {
                RestaurantForm { editor, on_saved: move |_| listing.reload() }
            }
        }
    }
}

#[component]
fn RestaurantForm(editor: Editor<RestaurantFormData>, on_saved: EventHandler<()>) -> Element {
    let ctx = use_client();
    let mut editor = editor;
    let mut form = editor.form;
    let values = form.read().values.clone();

    rsx! {
        FormShell::<RestaurantFormData> {
            form,
            on_close: move |_| editor.close(),
            on_submit: move |_| editor.submit::<Restaurant>(ctx.clone(), move |_| on_saved.call(())),

            TextInput {
                label: "Name",
                value: values.name.clone(),
                required: true,
                error: form.read().error("name"),
                on_change: move |v: String| form.write().update("name", |d| d.name = v),
            }
            TextArea {
                label: "Description",
                value: values.description.clone().unwrap_or_default(),
                error: form.read().error("description"),
                on_change: move |v: String| form.write().update("description", |d| d.description = optional_text(v)),
            }
            div {
                class: "grid grid-cols-3 gap-3",
                TextInput {
                    label: "Cuisine",
                    placeholder: "Grill, seafood...",
                    value: values.cuisine.clone().unwrap_or_default(),
                    error: form.read().error("cuisine"),
                    on_change: move |v: String| form.write().update("cuisine", |d| d.cuisine = optional_text(v)),
                }
                TextInput {
                    label: "Phone",
                    input_type: "tel",
                    value: values.phone.clone().unwrap_or_default(),
                    error: form.read().error("phone"),
                    on_change: move |v: String| form.write().update("phone", |d| d.phone = optional_text(v)),
                }
                TextInput {
                    label: "Opening hours",
                    placeholder: "11:00 - 23:00",
                    value: values.opening_hours.clone().unwrap_or_default(),
                    error: form.read().error("opening_hours"),
                    on_change: move |v: String| {
                        form.write().update("opening_hours", |d| d.opening_hours = optional_text(v));
                    },
                }
            }
            AddressBlock::<RestaurantFormData> { form }
            ImagePicker::<RestaurantFormData> { form }
        }
    }
}

// ============================================================================
// Menu items
// ============================================================================

fn menu_item_columns() -> Vec<Column<MenuItem>> {
    vec![
        Column::new("name", "Name", |m| m.name.as_str().into()),
        Column::new("category", "Category", |m| {
            m.category.as_ref().map(|c| c.name.clone()).into()
        }),
        Column::new("price", "Price", |m| CellValue::Money(m.price)),
        Column::new("available", "Available", |m| CellValue::Flag(m.is_available)),
    ]
}

/// List query of the menu screen: restaurant first, then category
pub fn menu_query(restaurant: Option<EntityId>, category: Option<EntityId>) -> ListQuery {
    let query = parent_query("restaurant_id", restaurant);
    match (restaurant, category) {
        (Some(_), Some(category)) => query.filter("category_id", category),
        _ => query,
    }
}

/// Categories of a restaurant as select options; empty without a restaurant
fn use_category_options(restaurant: Memo<Option<EntityId>>) -> Resource<Vec<SelectOption>> {
    let ctx = use_client();
    use_resource(move || {
        let ctx = ctx.clone();
        let restaurant = restaurant();
        async move {
            let Some(id) = restaurant else {
                return Vec::new();
            };
            match ctx.api().menu_categories(id).await {
                Ok(categories) => id_options::<MenuCategory>(&categories),
                Err(e) => {
                    tracing::warn!(restaurant = %id, "Could not load menu categories: {}", e);
                    Vec::new()
                }
            }
        }
    })
}

fn options_of(resource: &Resource<Vec<SelectOption>>) -> Vec<SelectOption> {
    resource.cloned().unwrap_or_default()
}

#[component]
pub fn MenuItemsPage() -> Element {
    let mut listing = use_listing::<MenuItem>(ListQuery::new);
    let mut editor = use_editor::<MenuItemFormData>();
    let mut restaurant = use_signal(|| None::<EntityId>);
    let mut category = use_signal(|| None::<EntityId>);
    let restaurants = use_parent_options::<Restaurant>();
    let categories = use_category_options(use_memo(move || restaurant()));
    let view = listing.view(&menu_item_columns(), |m: &MenuItem| with_availability(m.is_available));

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Menu",
                subtitle: "Dishes and drinks, by restaurant and category",
                ParentFilter {
                    label: "Restaurant",
                    value: id_value(restaurant()),
                    options: restaurants(),
                    on_change: move |id: Option<EntityId>| {
                        restaurant.set(id);
                        category.set(None);
                        listing.set_query(menu_query(id, None));
                    },
                }
                if restaurant().is_some() {
                    ParentFilter {
                        label: "Category",
                        value: id_value(category()),
                        options: options_of(&categories),
                        on_change: move |id: Option<EntityId>| {
                            category.set(id);
                            listing.set_query(menu_query(restaurant(), id));
                        },
                    }
                }
                PrimaryButton {
                    label: "New item",
                    on_click: move |_| {
                        let mut values = restaurant()
                            .map(MenuItemFormData::for_restaurant)
                            .unwrap_or_default();
                        values.category_id = category();
                        editor.create(values);
                    },
                }
            }
            ListingTable::<MenuItem> {
                listing,
                view,
                on_edit: move |item: MenuItem| editor.edit(item.id, &item),
            }
            if editor.is_open() {
                MenuItemForm {
                    editor,
                    restaurants: restaurants(),
                    on_saved: move |_| listing.reload(),
                }
            }
        }
    }
}

#[component]
fn MenuItemForm(
    editor: Editor<MenuItemFormData>,
    restaurants: Vec<SelectOption>,
    on_saved: EventHandler<()>,
) -> Element {
    let ctx = use_client();
    let mut editor = editor;
    let mut form = editor.form;
    let restaurant = use_memo(move || form.read().values.restaurant_id);
    let categories = use_category_options(restaurant);
    let values = form.read().values.clone();

    rsx! {
        FormShell::<MenuItemFormData> {
            form,
            on_close: move |_| editor.close(),
            on_submit: move |_| editor.submit::<MenuItem>(ctx.clone(), move |_| on_saved.call(())),

            div {
                class: "grid grid-cols-2 gap-3",
                Select {
                    label: "Restaurant",
                    value: id_value(values.restaurant_id),
                    options: restaurants,
                    placeholder: "Select a restaurant",
                    required: true,
                    error: form.read().error("restaurant_id"),
                    on_change: move |v: String| {
                        form.write().update("restaurant_id", |d| {
                            d.restaurant_id = parse_id(&v);
                            d.category_id = None;
                        });
                    },
                }
                Select {
                    label: "Category",
                    value: id_value(values.category_id),
                    options: options_of(&categories),
                    placeholder: "No category",
                    disabled: values.restaurant_id.is_none(),
                    error: form.read().error("category_id"),
                    on_change: move |v: String| form.write().update("category_id", |d| d.category_id = parse_id(&v)),
                }
                TextInput {
                    label: "Name",
                    value: values.name.clone(),
                    required: true,
                    error: form.read().error("name"),
                    on_change: move |v: String| form.write().update("name", |d| d.name = v),
                }
                NumberInput {
                    label: "Price",
                    value: values.price,
                    unit: "XAF",
                    required: true,
                    error: form.read().error("price"),
                    on_change: move |v: Option<f64>| form.write().update("price", |d| d.price = v),
                }
            }
            TextArea {
                label: "Description",
                value: values.description.clone().unwrap_or_default(),
                error: form.read().error("description"),
                on_change: move |v: String| form.write().update("description", |d| d.description = optional_text(v)),
            }
            Checkbox {
                label: "Available",
                checked: values.is_available,
                on_change: move |v: bool| form.write().update("is_available", |d| d.is_available = v),
            }
            ImagePicker::<MenuItemFormData> { form }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_query() {
        assert_eq!(menu_query(None, None).cache_key("menu-items"), "menu-items");
        assert_eq!(
            menu_query(Some(EntityId(3)), None).cache_key("menu-items"),
            "menu-items?restaurant_id=3"
        );
        // a category alone means nothing without its restaurant
        assert_eq!(menu_query(None, Some(EntityId(8))).cache_key("menu-items"), "menu-items");
        let key = menu_query(Some(EntityId(3)), Some(EntityId(8))).cache_key("menu-items");
        assert!(key.contains("restaurant_id=3"));
        assert!(key.contains("category_id=8"));
    }
}
