//! # Listing Hook
//!
//! Everything a listing screen keeps between renders: the server query, the
//! fetched page, the table state and the pending delete confirmation. Row
//! actions are routed here: edit goes back to the page, delete waits for
//! the dialog, availability switches run at once.

use dioxus::prelude::*;
use sejour_client::{ClientContext, ListQuery, QueryResult};
use sejour_core::{EntityId, Identifiable, Named, Resource};
use sejour_model::{PageMeta, Paginated};
use serde::de::DeserializeOwned;

use super::use_client::{fetch_page, retry};
use super::use_confirm::ConfirmState;
use super::use_row_actions::{RecordCommand, run_confirmed};
use super::use_table::{Column, RowAction, RowActionSlot, TableState, TableView};
use crate::state::{StatusLevel, notify};

// ============================================================================
// Page Data
// ============================================================================

/// Rows and fetch status of one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<R> {
    pub rows: Vec<R>,
    pub meta: Option<PageMeta>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<R: Clone> PageData<R> {
    /// Snapshot of a resource state (`None` while the first fetch runs)
    pub fn from_state(state: Option<&QueryResult<Paginated<R>>>) -> Self {
        match state {
            None => Self {
                rows: Vec::new(),
                meta: None,
                loading: true,
                error: None,
            },
            Some(Ok(page)) => Self {
                rows: page.data.clone(),
                meta: page.meta,
                loading: false,
                error: None,
            },
            Some(Err(e)) => Self {
                rows: Vec::new(),
                meta: None,
                loading: false,
                error: Some(e.user_message()),
            },
        }
    }
}

// ============================================================================
// Listing
// ============================================================================

/// State of one listing screen
pub struct Listing<R: 'static> {
    pub query: Signal<ListQuery>,
    pub data: dioxus::prelude::Resource<QueryResult<Paginated<R>>>,
    pub table: Signal<TableState>,
    pub confirm: Signal<ConfirmState<RecordCommand>>,
}

impl<R: 'static> Clone for Listing<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for Listing<R> {}

impl<R: 'static> PartialEq for Listing<R> {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query && self.table == other.table && self.confirm == other.confirm
    }
}

impl<R> Listing<R>
where
    R: Resource + Identifiable + Clone + DeserializeOwned + Send + Sync + 'static,
{
    /// Current page snapshot
    pub fn page(&self) -> PageData<R> {
        let state = self.data.read();
        PageData::from_state(Option::as_ref(&*state))
    }

    /// Table rows for the current page
    pub fn view(&self, columns: &[Column<R>], actions: impl Fn(&R) -> Vec<RowActionSlot>) -> TableView {
        let page = self.page();
        self.table.read().view(&page.rows, columns, actions)
    }

    /// Loaded record by id
    pub fn record(&self, id: EntityId) -> Option<R> {
        self.page().rows.into_iter().find(|r| r.id() == id)
    }

    /// Refetch the current page
    pub fn reload(&mut self) {
        self.data.restart();
    }

    /// Request a server page (1-based)
    pub fn go_to_page(&mut self, page: u32) {
        self.table.write().clear_selection();
        self.query.write().page = Some(page.max(1));
    }

    /// Replace the server query, back on the first page
    pub fn set_query(&mut self, query: ListQuery) {
        self.table.write().clear_selection();
        self.query.set(query);
    }

    /// Drop the cached pages and fetch again
    pub fn retry(&self, ctx: &ClientContext) {
        retry(ctx, R::COLLECTION, self.data);
    }
}

impl<R> Listing<R>
where
    R: Resource + Identifiable + Named + Clone + DeserializeOwned + Send + Sync + 'static,
{
    /// Route a row action
    pub fn on_row(&mut self, ctx: &ClientContext, id: EntityId, action: RowAction, on_edit: impl FnOnce(R)) {
        let Some(record) = self.record(id) else {
            tracing::warn!(resource = R::COLLECTION, id = %id, "Row action on a record not loaded");
            return;
        };
        if action == RowAction::Edit {
            on_edit(record);
            return;
        }
        let Some(command) = RecordCommand::from_row(id, action) else {
            return;
        };
        if command.needs_confirmation() {
            self.confirm
                .write()
                .open(command.confirm_request(R::LABEL, record.name()));
            return;
        }

        let api = ctx.api().clone();
        let cache = ctx.cache.clone();
        let mut data = self.data;
        spawn(async move {
            match command.run::<R>(&api, &cache).await {
                Ok(()) => {
                    notify(command.success_message(R::LABEL), StatusLevel::Success);
                    data.restart();
                }
                Err(e) => notify(e.user_message(), StatusLevel::Error),
            }
        });
    }

    /// Run the command confirmed in the dialog
    pub fn confirm(&self, ctx: &ClientContext) {
        let api = ctx.api().clone();
        let cache = ctx.cache.clone();
        let mut data = self.data;
        run_confirmed(
            self.confirm,
            move |command: RecordCommand| async move { command.run::<R>(&api, &cache).await },
            move |command, ()| {
                notify(command.success_message(R::LABEL), StatusLevel::Success);
                data.restart();
            },
        );
    }

    /// Close the dialog without running anything
    pub fn dismiss(&self) {
        let mut confirm = self.confirm;
        confirm.write().dismiss();
    }
}

/// Listing state for a collection, re-fetched whenever `initial` changes
/// through [`Listing::set_query`] or [`Listing::go_to_page`]
pub fn use_listing<R>(initial: impl FnOnce() -> ListQuery) -> Listing<R>
where
    R: Resource + DeserializeOwned + Send + Sync + 'static,
{
    let ctx = super::use_client::use_client();
    let query = use_signal(initial);
    let data = use_resource(move || {
        let ctx = ctx.clone();
        let query = query();
        async move { fetch_page::<R>(&ctx, query).await }
    });
    Listing {
        query,
        data,
        table: use_signal(TableState::server_paged),
        confirm: use_signal(ConfirmState::new),
    }
}

// ============================================================================
// Row Action Sets
// ============================================================================

/// Edit and delete
pub fn edit_delete<R>(_record: &R) -> Vec<RowActionSlot> {
    vec![
        RowActionSlot::enabled(RowAction::Edit),
        RowActionSlot::enabled(RowAction::Delete),
    ]
}

/// Edit, availability switch and delete
pub fn with_availability(is_available: bool) -> Vec<RowActionSlot> {
    vec![
        RowActionSlot::enabled(RowAction::Edit),
        RowActionSlot::enabled(RowAction::SetAvailable(!is_available)),
        RowActionSlot::enabled(RowAction::Delete),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sejour_client::ClientError;
    use sejour_core::EntityId;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u64);

    #[test]
    fn test_page_data_states() {
        let loading = PageData::<Row>::from_state(None);
        assert!(loading.loading);
        assert!(loading.rows.is_empty());

        let page = Ok(Arc::new(Paginated {
            data: vec![Row(1), Row(2)],
            meta: Some(PageMeta {
                current_page: 1,
                last_page: 3,
                per_page: Some(2),
                total: Some(6),
            }),
        }));
        let loaded = PageData::from_state(Some(&page));
        assert!(!loaded.loading);
        assert_eq!(loaded.rows, vec![Row(1), Row(2)]);
        assert_eq!(loaded.meta.map(|m| m.last_page), Some(3));

        let failed: QueryResult<Paginated<Row>> =
            Err(Arc::new(ClientError::Storage("disk full".to_string())));
        let failed = PageData::from_state(Some(&failed));
        assert!(failed.error.is_some());
        assert!(!failed.loading);
    }

    #[test]
    fn test_availability_actions_offer_the_switch() {
        let actions = with_availability(true);
        assert!(actions.contains(&RowActionSlot::enabled(RowAction::SetAvailable(false))));
        let actions = with_availability(false);
        assert!(actions.contains(&RowActionSlot::enabled(RowAction::SetAvailable(true))));
        assert_eq!(edit_delete(&EntityId(1)).len(), 2);
    }
}
