//! # Entity Editor Hook
//!
//! Opens the generic entity form in create or edit mode and submits it
//! through the query cache, so the collection is refetched after a save.

use dioxus::prelude::*;
use sejour_client::{ApiClient, ClientContext, ClientResult, QueryCache};
use sejour_core::Resource;
use sejour_model::FormSchema;
use serde::de::DeserializeOwned;

use crate::forms::{EntityForm, FormImages, FormMode, Prepared, SubmitResult};
use crate::state::{StatusLevel, notify};

/// Create or update a record and invalidate its collection
pub async fn save_record<R, S>(
    api: &ApiClient,
    cache: &QueryCache,
    mode: FormMode,
    payload: S,
    images: FormImages,
) -> ClientResult<R>
where
    R: Resource + DeserializeOwned,
    S: FormSchema,
{
    cache
        .mutate(&[R::COLLECTION], async {
            match mode {
                FormMode::Create => api.create::<R, S>(&payload, images).await,
                FormMode::Edit(id) => api.update::<R, S>(id, &payload, images).await,
            }
        })
        .await
}

/// Toast shown after a successful save
pub fn saved_message(entity: &str, mode: FormMode) -> String {
    match mode {
        FormMode::Create => format!("New {} created", entity),
        FormMode::Edit(_) => format!("Changes to the {} saved", entity),
    }
}

/// Form signal plus its open flag
pub struct Editor<S: FormSchema + 'static> {
    pub form: Signal<EntityForm<S>>,
    open: Signal<bool>,
}

impl<S: FormSchema + 'static> Clone for Editor<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: FormSchema + 'static> Copy for Editor<S> {}

impl<S: FormSchema + 'static> PartialEq for Editor<S> {
    fn eq(&self, other: &Self) -> bool {
        self.form == other.form && self.open == other.open
    }
}

impl<S: FormSchema + 'static> Editor<S> {
    pub fn is_open(&self) -> bool {
        (self.open)()
    }

    /// Open a blank form, or one with preset values
    pub fn create(&mut self, values: S) {
        self.form.set(EntityForm::create_with(values));
        self.open.set(true);
    }

    /// Open the form on an existing record
    pub fn edit(&mut self, id: sejour_core::EntityId, record: &S::Record) {
        self.form.set(EntityForm::edit(id, record));
        self.open.set(true);
    }

    /// Close unless a submission is running
    pub fn close(&mut self) {
        if !self.form.peek().is_submitting() {
            self.open.set(false);
        }
    }

    /// Validate and save; invalid fields stay in the form
    ///
    /// `on_saved` runs after the dialog closed and the toast was queued.
    pub fn submit<R>(self, ctx: ClientContext, on_saved: impl FnOnce(R) + 'static)
    where
        R: Resource + DeserializeOwned + 'static,
    {
        let mut form = self.form;
        let mut open = self.open;
        let mode = form.peek().mode();
        let Prepared::Ready(payload, images) = form.write().prepare() else {
            return;
        };

        spawn(async move {
            let result = save_record::<R, S>(ctx.api(), &ctx.cache, mode, payload, images).await;
            let outcome = form.write().finish(result);
            match outcome {
                SubmitResult::Submitted(record) => {
                    open.set(false);
                    notify(saved_message(S::ENTITY, mode), StatusLevel::Success);
                    on_saved(record);
                }
                SubmitResult::Invalid(errors) => {
                    tracing::debug!(entity = S::ENTITY, fields = errors.len(), "Server rejected fields");
                }
                SubmitResult::ServerError(message) => notify(message, StatusLevel::Error),
                SubmitResult::Busy => {}
            }
        });
    }
}

/// Editor for one entity type, closed until a create or edit
pub fn use_editor<S: FormSchema + 'static>() -> Editor<S> {
    Editor {
        form: use_signal(EntityForm::<S>::create),
        open: use_signal(|| false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::post};
    use sejour_core::EntityId;
    use sejour_model::{Lounge, LoungeFormData, Paginated};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{}/", addr)
    }

    #[test]
    fn test_saved_message() {
        assert_eq!(saved_message("hotel", FormMode::Create), "New hotel created");
        assert_eq!(
            saved_message("room", FormMode::Edit(EntityId(3))),
            "Changes to the room saved"
        );
    }

    #[tokio::test]
    async fn test_save_invalidates_collection() {
        let router = Router::new().route(
            "/lounges",
            post(|| async {
                Json(json!({
                    "data": {
                        "id": 9,
                        "name": "Sky Bar",
                        "category": "BAR",
                        "address": "Rue Joss",
                        "city": "Douala",
                        "country": "Cameroon",
                        "latitude": 4.05,
                        "longitude": 9.7
                    }
                }))
            }),
        );
        let api = ApiClient::with_base_url(&serve(router).await).unwrap();
        let cache = QueryCache::new();
        cache
            .fetch("lounges?page=1", || async { Ok(Paginated::<Lounge>::unpaged(Vec::new())) })
            .await
            .unwrap();

        let saved: Lounge = save_record(
            &api,
            &cache,
            FormMode::Create,
            LoungeFormData::default(),
            FormImages::default(),
        )
        .await
        .unwrap();

        assert_eq!(saved.id, EntityId(9));
        assert!(
            cache
                .peek::<Paginated<Lounge>>("lounges?page=1")
                .await
                .is_none()
        );
    }
}
