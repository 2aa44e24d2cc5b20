//! Bookings screen
//!
//! Owners and admins confirm pending bookings, everyone can cancel a booking
//! that is not already cancelled, and confirmed bookings have a PDF receipt.
//! Confirm and cancel both go through the dialog.

use dioxus::prelude::*;
use sejour_client::{ApiClient, ClientContext, ListQuery, QueryResult};
use sejour_core::{BookingStatus, EntityId};
use sejour_model::{Booking, BookingAction, Paginated};

use crate::components::{
    ConfirmDialog, EntityTable, PageHeader, choice_options, choice_value, pick_choice,
};
use crate::file_ops::{self, FileError};
use crate::hooks::{
    BookingCommand, CellValue, Column, ConfirmState, RowAction, RowActionSlot, request_booking_action,
    run_confirmed, use_client, use_confirm, use_listing,
};
use crate::state::{StatusLevel, UI_STATE, notify};

// ============================================================================
// Table
// ============================================================================

fn booking_columns() -> Vec<Column<Booking>> {
    vec![
        Column::new("reference", "Reference", |b| b.reference.as_str().into()),
        Column::new("listing", "Listing", |b| b.listing_label().into()),
        Column::new("customer", "Customer", |b| b.customer_name().into()),
        Column::new("check_in", "Check-in", |b| b.check_in.format("%Y-%m-%d").to_string().into()),
        Column::new("nights", "Nights", |b| CellValue::Number(b.nights() as f64)),
        Column::new("guests", "Guests", |b| CellValue::Number(f64::from(b.guests))),
        Column::new("total", "Total", |b| CellValue::Money(b.total_price)),
        Column::new("status", "Status", |b| CellValue::Badge {
            label: b.status.display_name().to_string(),
            tone: b.status.tone(),
        }),
    ]
}

/// Row buttons; confirming is reserved to accounts that manage listings
pub fn booking_actions(booking: &Booking, can_confirm: bool) -> Vec<RowActionSlot> {
    let mut slots = Vec::with_capacity(3);
    if can_confirm {
        slots.push(RowActionSlot::when(
            RowAction::Booking(BookingAction::Confirm),
            booking.allows(BookingAction::Confirm),
        ));
    }
    slots.push(RowActionSlot::when(
        RowAction::Booking(BookingAction::Cancel),
        booking.allows(BookingAction::Cancel),
    ));
    slots.push(RowActionSlot::when(
        RowAction::Receipt,
        booking.status == BookingStatus::Confirmed,
    ));
    slots
}

/// Bookings with one status, or all of them
pub fn status_query(status: Option<BookingStatus>) -> ListQuery {
    match status {
        Some(status) => ListQuery::new().filter("status", status.as_str()),
        None => ListQuery::new(),
    }
}

/// Reference used in the receipt file name
fn receipt_reference(booking: &Booking) -> String {
    if booking.reference.is_empty() {
        format!("booking-{}", booking.id)
    } else {
        booking.reference.clone()
    }
}

// ============================================================================
// Receipt
// ============================================================================

async fn download_receipt(api: ApiClient, booking: Booking) {
    let pdf = match api.booking_receipt(booking.id).await {
        Ok(pdf) => pdf,
        Err(e) => {
            tracing::warn!(booking = %booking.id, "Receipt download failed: {}", e);
            notify(e.user_message(), StatusLevel::Error);
            return;
        }
    };
    match file_ops::save_receipt(&receipt_reference(&booking), &pdf).await {
        Ok(path) => notify(format!("Receipt saved to {}", path.display()), StatusLevel::Success),
        Err(FileError::Cancelled) => {}
        Err(e) => notify(e.to_string(), StatusLevel::Error),
    }
}

fn confirm_booking_action(
    ctx: &ClientContext,
    confirm: Signal<ConfirmState<BookingCommand>>,
    mut data: Resource<QueryResult<Paginated<Booking>>>,
) {
    let api = ctx.api().clone();
    let cache = ctx.cache.clone();
    run_confirmed(
        confirm,
        move |command: BookingCommand| async move { command.run(&api, &cache).await },
        move |command, _booking| {
            notify(command.success_message(), StatusLevel::Success);
            data.restart();
        },
    );
}

// ============================================================================
// Page
// ============================================================================

#[component]
pub fn BookingsPage() -> Element {
    let ctx = use_client();
    let mut listing = use_listing::<Booking>(ListQuery::new);
    let mut confirm = use_confirm::<BookingCommand>();
    let mut status = use_signal(|| None::<BookingStatus>);
    let can_confirm = UI_STATE.read().user.as_ref().is_some_and(|u| u.can_manage());

    let page = listing.page();
    let view = listing.view(&booking_columns(), |b: &Booking| booking_actions(b, can_confirm));
    let request = confirm.read().request().cloned();
    let running = confirm.read().is_running();

    let on_status = move |e: FormEvent| {
        let picked = pick_choice(BookingStatus::all(), &e.value());
        status.set(picked);
        listing.set_query(status_query(picked));
    };

    let action_ctx = ctx.clone();
    let on_action = move |(id, action): (EntityId, RowAction)| {
        let Some(booking) = listing.record(id) else {
            return;
        };
        match action {
            RowAction::Booking(booking_action) => {
                if !request_booking_action(&mut confirm.write(), &booking, booking_action) {
                    notify(
                        format!("A {} booking cannot be changed", booking.status.display_name().to_lowercase()),
                        StatusLevel::Warning,
                    );
                }
            }
            RowAction::Receipt => {
                spawn(download_receipt(action_ctx.api().clone(), booking));
            }
            _ => {}
        }
    };

    let retry_ctx = ctx.clone();
    let data = listing.data;

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Bookings",
                subtitle: "Reservations across your listings",
                label {
                    class: "flex items-center gap-2 text-sm text-slate-400",
                    "Status"
                    select {
                        class: "px-3 py-1.5 bg-slate-800 border border-slate-700 rounded-lg text-sm text-slate-100",
                        onchange: on_status,
                        option { value: "", selected: status().is_none(), "All" }
                        for choice in choice_options(BookingStatus::all(), BookingStatus::display_name) {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: status().is_some_and(|s| choice_value(BookingStatus::all(), &s) == choice.value),
                                "{choice.label}"
                            }
                        }
                    }
                }
            }

            EntityTable {
                view,
                state: listing.table,
                loading: page.loading,
                error: page.error.clone(),
                meta: page.meta,
                on_retry: move |_| listing.retry(&retry_ctx),
                on_page: move |number: u32| listing.go_to_page(number),
                on_action,
            }

            if let Some(request) = request {
                ConfirmDialog {
                    title: request.title,
                    message: request.message,
                    confirm_label: request.confirm_label,
                    destructive: request.action.action.is_destructive(),
                    running,
                    on_confirm: move |_| confirm_booking_action(&ctx, confirm, data),
                    on_dismiss: move |_| {
                        confirm.write().dismiss();
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sejour_core::Price;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: EntityId(21),
            reference: String::new(),
            status,
            check_in: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 8, 12).unwrap(),
            guests: 2,
            total_price: Price::new(90.0),
            customer: None,
            bookable: None,
            created_at: None,
        }
    }

    fn enabled(slots: &[RowActionSlot]) -> Vec<RowAction> {
        slots.iter().filter(|s| s.enabled).map(|s| s.action).collect()
    }

    #[test]
    fn test_pending_booking_actions() {
        let slots = booking_actions(&booking(BookingStatus::Pending), true);
        assert_eq!(
            enabled(&slots),
            vec![
                RowAction::Booking(BookingAction::Confirm),
                RowAction::Booking(BookingAction::Cancel)
            ]
        );
    }

    #[test]
    fn test_cancelled_booking_disables_cancel() {
        let slots = booking_actions(&booking(BookingStatus::Annule), false);
        assert_eq!(slots.len(), 2);
        assert!(enabled(&slots).is_empty());
    }

    #[test]
    fn test_customer_gets_no_confirm_button() {
        let slots = booking_actions(&booking(BookingStatus::Confirmed), false);
        assert!(slots.iter().all(|s| s.action != RowAction::Booking(BookingAction::Confirm)));
        assert!(enabled(&slots).contains(&RowAction::Receipt));
    }

    #[test]
    fn test_status_query_and_receipt_reference() {
        assert_eq!(
            status_query(Some(BookingStatus::Annule)).cache_key("bookings"),
            "bookings?status=ANNULE"
        );
        assert_eq!(receipt_reference(&booking(BookingStatus::Confirmed)), "booking-21");
    }
}
