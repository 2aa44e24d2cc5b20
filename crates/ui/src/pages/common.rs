//! Helpers shared by the listing screens

use dioxus::prelude::*;
use sejour_client::{ListQuery, QueryResult};
use sejour_core::{EntityId, Identifiable, Named, Price, Resource};
use sejour_model::{Amenity, Paginated};
use serde::de::DeserializeOwned;

use crate::components::SelectOption;
use crate::hooks::{CellValue, fetch_page, use_client};

/// Amenities once loaded; empty while loading or on failure
pub fn amenity_list(resource: &dioxus::prelude::Resource<QueryResult<Vec<Amenity>>>) -> Vec<Amenity> {
    match &*resource.read() {
        Some(Ok(list)) => list.as_ref().clone(),
        _ => Vec::new(),
    }
}

/// Options of a parent select (hotels for rooms, residences for dwellings...)
pub fn use_parent_options<R>() -> Signal<Vec<SelectOption>>
where
    R: Resource + Identifiable + Named + Clone + DeserializeOwned + Send + Sync + 'static,
{
    let ctx = use_client();
    let mut options = use_signal(Vec::new);
    use_future(move || {
        let ctx = ctx.clone();
        async move {
            match fetch_page::<R>(&ctx, ListQuery::new()).await {
                Ok(page) => options.set(id_options(&page.data)),
                Err(e) => tracing::warn!(resource = R::COLLECTION, "Could not load options: {}", e),
            }
        }
    });
    options
}

/// Select options valued by record id
pub fn id_options<R: Identifiable + Named>(records: &[R]) -> Vec<SelectOption> {
    records
        .iter()
        .map(|r| SelectOption::new(r.id().to_string(), r.name()))
        .collect()
}

/// Id behind a select value; blank means none
pub fn parse_id(value: &str) -> Option<EntityId> {
    value.parse().ok()
}

/// Select value of an optional id
pub fn id_value(id: Option<EntityId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// List query filtered by a parent id, or unfiltered
pub fn parent_query(filter: &str, parent: Option<EntityId>) -> ListQuery {
    match parent {
        Some(id) => ListQuery::new().filter(filter, id),
        None => ListQuery::new(),
    }
}

pub fn money_cell(price: Option<Price>) -> CellValue {
    price.map(CellValue::Money).unwrap_or(CellValue::Empty)
}

pub fn count_cell(count: Option<u32>) -> CellValue {
    count
        .map(|c| CellValue::Number(f64::from(c)))
        .unwrap_or(CellValue::Empty)
}

pub fn rating_cell(rating: Option<f32>) -> CellValue {
    rating
        .map(|r| CellValue::Number(f64::from(r)))
        .unwrap_or(CellValue::Empty)
}

/// Parent filter shown above child listings
#[component]
pub fn ParentFilter(
    label: String,
    value: String,
    options: Vec<SelectOption>,
    on_change: EventHandler<Option<EntityId>>,
) -> Element {
    rsx! {
        label {
            class: "flex items-center gap-2 text-sm text-slate-400",
            "{label}"
            select {
                class: "px-3 py-1.5 bg-slate-800 border border-slate-700 rounded-lg text-sm text-slate-100",
                onchange: move |e| on_change.call(parse_id(&e.value())),
                option { value: "", selected: value.is_empty(), "All" }
                for choice in options {
                    option {
                        key: "{choice.value}",
                        value: "{choice.value}",
                        selected: choice.value == value,
                        "{choice.label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_query() {
        assert_eq!(
            parent_query("hotel_id", Some(EntityId(4))).cache_key("rooms"),
            "rooms?hotel_id=4"
        );
        assert_eq!(parent_query("hotel_id", None).cache_key("rooms"), "rooms");
    }

    #[test]
    fn test_id_select_values() {
        assert_eq!(parse_id("12"), Some(EntityId(12)));
        assert_eq!(parse_id(""), None);
        assert_eq!(id_value(Some(EntityId(3))), "3");
        assert_eq!(id_value(None), "");
    }

    #[test]
    fn test_cells() {
        assert_eq!(count_cell(None), CellValue::Empty);
        assert_eq!(count_cell(Some(3)), CellValue::Number(3.0));
        assert_eq!(money_cell(Some(Price::new(25.0))), CellValue::Money(Price::new(25.0)));
    }
}
