//! Table of a listing screen wired to its [`Listing`] state

use dioxus::prelude::*;
use sejour_core::{EntityId, Identifiable, Named, Resource};
use serde::de::DeserializeOwned;

use super::confirm_dialog::ConfirmDialog;
use super::entity_table::EntityTable;
use crate::hooks::{Listing, RowAction, TableView, use_client};

/// Properties for ListingTable component
#[derive(Props, Clone, PartialEq)]
pub struct ListingTableProps<R: Clone + PartialEq + 'static> {
    pub listing: Listing<R>,

    /// Rows built by the page from its columns
    pub view: TableView,

    /// Edit pressed on a row
    pub on_edit: EventHandler<R>,
}

/// Entity table plus the delete confirmation of a listing
#[component]
pub fn ListingTable<
    R: Resource + Identifiable + Named + Clone + PartialEq + DeserializeOwned + Send + Sync + 'static,
>(
    props: ListingTableProps<R>,
) -> Element {
    let ctx = use_client();
    let mut listing = props.listing;
    let page = listing.page();
    let request = listing.confirm.read().request().cloned();
    let running = listing.confirm.read().is_running();

    let row_ctx = ctx.clone();
    let retry_ctx = ctx.clone();

    rsx! {
        EntityTable {
            view: props.view.clone(),
            state: listing.table,
            loading: page.loading,
            error: page.error.clone(),
            meta: page.meta,
            on_retry: move |_| listing.retry(&retry_ctx),
            on_page: move |number: u32| listing.go_to_page(number),
            on_action: move |(id, action): (EntityId, RowAction)| {
                listing.on_row(&row_ctx, id, action, |record| props.on_edit.call(record));
            },
        }

        if let Some(request) = request {
            ConfirmDialog {
                title: request.title,
                message: request.message,
                confirm_label: request.confirm_label,
                running,
                on_confirm: move |_| listing.confirm(&ctx),
                on_dismiss: move |_| listing.dismiss(),
            }
        }
    }
}
