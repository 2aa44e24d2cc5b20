//! Typed resource operations
//!
//! Collections are addressed through the [`Resource`] trait so that every
//! listing kind shares the same list / fetch / create / update / delete
//! plumbing. Status-changing actions (bookings, verifications) and the
//! binary/QR endpoints live here too.

use reqwest::Method;
use sejour_core::{EntityId, Resource};
use sejour_model::{
    Amenity, Booking, BookingAction, MaybeWrapped, MenuCategory, OwnerVerification, Paginated,
    TokenResponse, VerificationAction, multipart_fields,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::upload::{ImageUpload, REMOVED_FIELD};

// ============================================================================
// List query
// ============================================================================

/// Server-driven list parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Category filter (menu category id, lounge category...)
    pub category: Option<String>,
    /// Free-text search
    pub search: Option<String>,
    /// Extra filters (`hotel_id`, `status`...)
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// First page, no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a page
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Free-text search (blank searches are dropped)
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then(|| search.trim().to_string());
        self
    }

    /// Add an arbitrary filter
    pub fn filter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((name.into(), value.to_string()));
        self
    }

    /// Query-string pairs
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }

    /// Stable cache key for a collection
    pub fn cache_key(&self, collection: &str) -> String {
        let pairs = self.to_pairs();
        if pairs.is_empty() {
            collection.to_string()
        } else {
            let query: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}?{}", collection, query.join("&"))
        }
    }
}

/// List bodies come either paginated or as a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Paged(Paginated<T>),
    Bare(Vec<T>),
}

impl<T> From<ListBody<T>> for Paginated<T> {
    fn from(body: ListBody<T>) -> Self {
        match body {
            ListBody::Paged(page) => page,
            ListBody::Bare(items) => Paginated::unpaged(items),
        }
    }
}

// ============================================================================
// CRUD
// ============================================================================

impl ApiClient {
    /// List a collection
    pub async fn list<R>(&self, query: &ListQuery) -> ClientResult<Paginated<R>>
    where
        R: Resource + DeserializeOwned,
    {
        let body: ListBody<R> = self.get(R::COLLECTION, &query.to_pairs()).await?;
        Ok(body.into())
    }

    /// Fetch one record
    pub async fn fetch<R>(&self, id: EntityId) -> ClientResult<R>
    where
        R: Resource + DeserializeOwned,
    {
        let body: MaybeWrapped<R> = self.get(&R::member_path(id), &[]).await?;
        Ok(body.into_inner())
    }

    /// Create a record, as multipart when images are attached
    pub async fn create<R, P>(&self, payload: &P, images: ImageUpload) -> ClientResult<R>
    where
        R: Resource + DeserializeOwned,
        P: Serialize,
    {
        tracing::info!(resource = R::COLLECTION, "Creating {}", R::LABEL);
        self.mutate(Method::POST, R::COLLECTION, payload, images)
            .await
    }

    /// Update a record, as multipart when images are attached
    pub async fn update<R, P>(&self, id: EntityId, payload: &P, images: ImageUpload) -> ClientResult<R>
    where
        R: Resource + DeserializeOwned,
        P: Serialize,
    {
        tracing::info!(resource = R::COLLECTION, id = %id, "Updating {}", R::LABEL);
        self.mutate(Method::PUT, &R::member_path(id), payload, images)
            .await
    }

    /// Delete a record
    pub async fn remove<R: Resource>(&self, id: EntityId) -> ClientResult<()> {
        tracing::info!(resource = R::COLLECTION, id = %id, "Deleting {}", R::LABEL);
        self.delete(&R::member_path(id)).await
    }

    /// Switch the availability flag of a record
    pub async fn set_availability<R>(&self, id: EntityId, available: bool) -> ClientResult<R>
    where
        R: Resource + DeserializeOwned,
    {
        let body = serde_json::json!({ "is_available": available });
        let record: MaybeWrapped<R> = self.patch(&R::member_path(id), &body).await?;
        Ok(record.into_inner())
    }

    async fn mutate<R, P>(
        &self,
        method: Method,
        path: &str,
        payload: &P,
        images: ImageUpload,
    ) -> ClientResult<R>
    where
        R: DeserializeOwned,
        P: Serialize,
    {
        let record: MaybeWrapped<R> = if images.has_files() {
            let fields = multipart_fields(payload)?;
            self.send_multipart(method, path, fields, images).await?
        } else {
            let mut body = serde_json::to_value(payload).map_err(sejour_core::MarketError::from)?;
            if !images.removed_image_ids.is_empty() {
                if let Some(object) = body.as_object_mut() {
                    object.insert(
                        REMOVED_FIELD.trim_end_matches("[]").to_string(),
                        serde_json::json!(images.removed_image_ids),
                    );
                }
            }
            if method == Method::PUT {
                self.put(path, &body).await?
            } else {
                self.post(path, &body).await?
            }
        };
        Ok(record.into_inner())
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Every amenity, for the amenity multi-select
    pub async fn amenities(&self) -> ClientResult<Vec<Amenity>> {
        let page: Paginated<Amenity> = self.list(&ListQuery::new()).await?;
        Ok(page.data)
    }

    /// Menu categories of a restaurant
    pub async fn menu_categories(&self, restaurant_id: EntityId) -> ClientResult<Vec<MenuCategory>> {
        let query = ListQuery::new().filter("restaurant_id", restaurant_id);
        let page: Paginated<MenuCategory> = self.list(&query).await?;
        Ok(page.data)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Confirm or cancel a booking
    pub async fn booking_action(&self, id: EntityId, action: BookingAction) -> ClientResult<Booking> {
        tracing::info!(booking = %id, action = action.segment(), "Booking action");
        let path = format!("{}/{}", Booking::member_path(id), action.segment());
        let body: MaybeWrapped<Booking> = self.post(&path, &serde_json::json!({})).await?;
        Ok(body.into_inner())
    }

    /// Download the PDF receipt of a booking
    pub async fn booking_receipt(&self, id: EntityId) -> ClientResult<Vec<u8>> {
        let path = format!("{}/receipt", Booking::member_path(id));
        self.get_bytes(&path, &[("format".to_string(), "pdf".to_string())])
            .await
    }

    // ========================================================================
    // Owner verification
    // ========================================================================

    /// Apply a review action to a verification file
    pub async fn verification_action(
        &self,
        id: EntityId,
        action: VerificationAction,
        notes: Option<&str>,
    ) -> ClientResult<OwnerVerification> {
        tracing::info!(verification = %id, action = action.segment(), "Verification action");
        let path = format!("{}/{}", OwnerVerification::member_path(id), action.segment());
        let body = serde_json::json!({ "notes": notes });
        let record: MaybeWrapped<OwnerVerification> = self.post(&path, &body).await?;
        Ok(record.into_inner())
    }

    /// Token to encode in the verification QR code
    pub async fn verification_token(&self, id: EntityId) -> ClientResult<String> {
        let path = format!("{}/token", OwnerVerification::member_path(id));
        let body: MaybeWrapped<TokenResponse> = self.get(&path, &[]).await?;
        Ok(body.into_inner().token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sejour_model::Hotel;

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery::new()
            .page(2)
            .category("4")
            .search("  pool ")
            .filter("hotel_id", 7);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("category".to_string(), "4".to_string()),
                ("search".to_string(), "pool".to_string()),
                ("hotel_id".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let query = ListQuery::new().search("   ");
        assert!(query.search.is_none());
        assert_eq!(query.cache_key(Hotel::COLLECTION), "hotels");
    }

    #[test]
    fn test_cache_key_includes_query() {
        let query = ListQuery::new().page(3);
        assert_eq!(query.cache_key("bookings"), "bookings?page=3");
    }

    #[test]
    fn test_list_body_shapes() {
        let paged: ListBody<u32> =
            serde_json::from_str(r#"{"data":[1,2],"meta":{"current_page":1,"last_page":3}}"#)
                .unwrap();
        let page: Paginated<u32> = paged.into();
        assert_eq!(page.data, vec![1, 2]);
        assert!(page.meta_or_single().has_next());

        let bare: ListBody<u32> = serde_json::from_str("[5]").unwrap();
        let page: Paginated<u32> = bare.into();
        assert_eq!(page.data, vec![5]);
    }
}
