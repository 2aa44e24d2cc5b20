//! # Row Action Controllers
//!
//! Tables only emit [`RowAction`]s. The commands here are what the owning
//! page runs in response: each one goes through the query cache as a
//! mutation so the affected collection is invalidated on success, and the
//! page then restarts its data hook.

use std::future::Future;

use async_trait::async_trait;
use dioxus::prelude::*;
use sejour_client::{ApiClient, ClientResult, QueryCache};
use sejour_core::{EntityId, Resource};
use sejour_model::{Booking, BookingAction, OwnerVerification, VerificationAction};
use serde::de::DeserializeOwned;

use super::use_confirm::{ConfirmRequest, ConfirmState};
use super::use_table::RowAction;
use crate::state::{StatusLevel, notify};

// ============================================================================
// Bookings
// ============================================================================

/// Booking endpoints used by the bookings screen
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Confirm or cancel a booking
    async fn booking_action(&self, id: EntityId, action: BookingAction) -> ClientResult<Booking>;
}

#[async_trait]
impl BookingApi for ApiClient {
    async fn booking_action(&self, id: EntityId, action: BookingAction) -> ClientResult<Booking> {
        ApiClient::booking_action(self, id, action).await
    }
}

/// A booking status change waiting for (or past) confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingCommand {
    pub id: EntityId,
    pub action: BookingAction,
}

impl BookingCommand {
    /// Dialog text for the change, or `None` if the status forbids it
    pub fn confirm_request(booking: &Booking, action: BookingAction) -> Option<ConfirmRequest<Self>> {
        if !booking.allows(action) {
            return None;
        }
        let command = Self {
            id: booking.id,
            action,
        };
        let reference = if booking.reference.is_empty() {
            format!("#{}", booking.id)
        } else {
            booking.reference.clone()
        };
        let request = match action {
            BookingAction::Cancel => ConfirmRequest::new(
                command,
                "Cancel booking",
                format!("Cancel booking {}? The customer will be notified.", reference),
            )
            .with_confirm_label("Cancel booking"),
            BookingAction::Confirm => ConfirmRequest::new(
                command,
                "Confirm booking",
                format!("Confirm booking {} for {}?", reference, booking.customer_name()),
            ),
        };
        Some(request)
    }

    /// Run the change and invalidate every cached booking page
    pub async fn run(self, api: &dyn BookingApi, cache: &QueryCache) -> ClientResult<Booking> {
        cache
            .mutate(&[Booking::COLLECTION], api.booking_action(self.id, self.action))
            .await
    }

    pub fn success_message(&self) -> &'static str {
        match self.action {
            BookingAction::Confirm => "Booking confirmed",
            BookingAction::Cancel => "Booking cancelled",
        }
    }
}

/// Open the dialog for a booking row action
///
/// Returns `false` when the action is not offered for the booking's status.
pub fn request_booking_action(
    confirm: &mut ConfirmState<BookingCommand>,
    booking: &Booking,
    action: BookingAction,
) -> bool {
    match BookingCommand::confirm_request(booking, action) {
        Some(request) => confirm.open(request),
        None => false,
    }
}

// ============================================================================
// Owner verification
// ============================================================================

/// A review action on a verification file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationCommand {
    pub id: EntityId,
    pub action: VerificationAction,
}

impl VerificationCommand {
    pub fn confirm_request(verification: &OwnerVerification, action: VerificationAction) -> ConfirmRequest<Self> {
        ConfirmRequest::new(
            Self {
                id: verification.id,
                action,
            },
            action.label(),
            format!(
                "{} the verification of {}?",
                action.label(),
                verification.owner_name()
            ),
        )
        .with_confirm_label(action.label())
    }

    pub async fn run(self, api: &ApiClient, cache: &QueryCache) -> ClientResult<OwnerVerification> {
        cache
            .mutate(
                &[OwnerVerification::COLLECTION],
                api.verification_action(self.id, self.action, None),
            )
            .await
    }
}

// ============================================================================
// Listings
// ============================================================================

/// Mutations a listing row can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordCommand {
    Delete(EntityId),
    SetAvailable(EntityId, bool),
}

impl RecordCommand {
    /// Command behind a row action (edit has none: it opens the form)
    pub fn from_row(id: EntityId, action: RowAction) -> Option<Self> {
        match action {
            RowAction::Delete => Some(RecordCommand::Delete(id)),
            RowAction::SetAvailable(available) => Some(RecordCommand::SetAvailable(id, available)),
            _ => None,
        }
    }

    /// Dialog text for a delete
    pub fn confirm_request(self, entity: &str, name: &str) -> ConfirmRequest<Self> {
        ConfirmRequest::new(
            self,
            format!("Delete {}", entity),
            format!("Delete \"{}\"? This cannot be undone.", name),
        )
        .with_confirm_label("Delete")
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, RecordCommand::Delete(_))
    }

    /// Run the mutation and invalidate the collection
    pub async fn run<R>(self, api: &ApiClient, cache: &QueryCache) -> ClientResult<()>
    where
        R: Resource + DeserializeOwned,
    {
        match self {
            RecordCommand::Delete(id) => {
                cache
                    .mutate(&[R::COLLECTION], api.remove::<R>(id))
                    .await
            }
            RecordCommand::SetAvailable(id, available) => {
                cache
                    .mutate(&[R::COLLECTION], async {
                        api.set_availability::<R>(id, available).await.map(|_| ())
                    })
                    .await
            }
        }
    }

    pub fn success_message(&self, entity: &str) -> String {
        match self {
            RecordCommand::Delete(_) => format!("{} deleted", capitalize(entity)),
            RecordCommand::SetAvailable(_, true) => format!("{} marked available", capitalize(entity)),
            RecordCommand::SetAvailable(_, false) => {
                format!("{} marked unavailable", capitalize(entity))
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Dioxus glue
// ============================================================================

/// Run the action confirmed in `confirm`, then close the dialog
///
/// Failures become an error toast; `on_success` typically shows a toast and
/// restarts the page's data hook.
pub fn run_confirmed<A, T, F, Fut>(
    mut confirm: Signal<ConfirmState<A>>,
    run: F,
    on_success: impl FnOnce(A, T) + 'static,
) where
    A: Clone + 'static,
    T: 'static,
    F: FnOnce(A) -> Fut + 'static,
    Fut: Future<Output = ClientResult<T>> + 'static,
{
    let Some(action) = confirm.write().confirm() else {
        return;
    };
    spawn(async move {
        let result = run(action.clone()).await;
        confirm.write().finish();
        match result {
            Ok(value) => on_success(action, value),
            Err(e) => {
                tracing::warn!("Row action failed: {}", e);
                notify(e.user_message(), StatusLevel::Error);
            }
        }
    });
}

// ============================================================================
// Tests
// ============================================================================
