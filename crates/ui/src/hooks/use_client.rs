//! # Client Hooks
//!
//! Access to the [`ClientContext`] provided at the root of the app, and the
//! data hooks that read resources through its query cache.

use std::sync::Arc;

use dioxus::prelude::*;
use sejour_client::{ClientContext, Geocoder, ListQuery, QueryResult};
use sejour_core::Resource;
use sejour_model::{Amenity, Paginated};
use serde::de::DeserializeOwned;

/// Geocoder shared through the component context
#[derive(Clone)]
pub struct SharedGeocoder(pub Arc<dyn Geocoder>);

/// Session, API client and cache of the app
pub fn use_client() -> ClientContext {
    use_context::<ClientContext>()
}

/// Geocoder used by address autocomplete
pub fn use_geocoder() -> Arc<dyn Geocoder> {
    use_context::<SharedGeocoder>().0
}

/// Every amenity, cached for the whole session
pub fn use_amenities() -> dioxus::prelude::Resource<QueryResult<Vec<Amenity>>> {
    let ctx = use_client();
    use_resource(move || {
        let ctx = ctx.clone();
        async move {
            let api = ctx.api().clone();
            ctx.cache
                .fetch(Amenity::COLLECTION, move || async move { api.amenities().await })
                .await
        }
    })
}

/// Cached read of one page
pub async fn fetch_page<R>(ctx: &ClientContext, query: ListQuery) -> QueryResult<Paginated<R>>
where
    R: Resource + DeserializeOwned + Send + Sync + 'static,
{
    let key = query.cache_key(R::COLLECTION);
    let api = ctx.api().clone();
    ctx.cache
        .fetch(key, move || async move { api.list::<R>(&query).await })
        .await
}

/// Drop the cached pages of a collection and reload the view
///
/// Used by the "retry" control of a failed list.
pub fn retry<T: 'static>(
    ctx: &ClientContext,
    collection: &'static str,
    mut resource: dioxus::prelude::Resource<T>,
) {
    let cache = ctx.cache.clone();
    spawn(async move {
        cache.invalidate_prefix(collection).await;
        resource.restart();
    });
}
