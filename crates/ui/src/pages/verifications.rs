//! Owner verification review (administrators only)

use dioxus::prelude::*;
use sejour_client::{ApiClient, ClientContext, ListQuery, QueryCache, verification_qr_svg};
use sejour_core::{EntityId, VerificationStatus};
use sejour_model::{OwnerVerification, VerificationAction};

use crate::components::{
    ConfirmDialog, EntityTable, PageHeader, QrCodeView, choice_options, choice_value, pick_choice,
};
use crate::file_ops::{self, FileError};
use crate::hooks::{
    CellValue, Column, RowAction, RowActionSlot, VerificationCommand, run_confirmed, use_client,
    use_confirm, use_listing,
};
use crate::state::{StatusLevel, notify};

const REVIEW_ACTIONS: [VerificationAction; 4] = [
    VerificationAction::StartReview,
    VerificationAction::Approve,
    VerificationAction::Reject,
    VerificationAction::Suspend,
];

fn verification_columns() -> Vec<Column<OwnerVerification>> {
    vec![
        Column::new("owner", "Owner", |v| v.owner_name().into()),
        Column::new("document", "Document", |v| v.document_type.clone().into()),
        Column::new("submitted", "Submitted", |v| {
            v.submitted_at.map(|at| at.format("%Y-%m-%d").to_string()).into()
        }),
        Column::new("status", "Status", |v| CellValue::Badge {
            label: v.status.display_name().to_string(),
            tone: v.status.tone(),
        }),
    ]
}

/// Review buttons enabled for the file's status, then the QR code
pub fn verification_actions(verification: &OwnerVerification) -> Vec<RowActionSlot> {
    let available = verification.available_actions();
    let mut slots: Vec<RowActionSlot> = REVIEW_ACTIONS
        .iter()
        .map(|action| RowActionSlot::when(RowAction::Verification(*action), available.contains(action)))
        .collect();
    slots.push(RowActionSlot::when(
        RowAction::ShowQr,
        verification.status == VerificationStatus::Approved,
    ));
    slots
}

pub fn status_query(status: Option<VerificationStatus>) -> ListQuery {
    match status {
        Some(status) => ListQuery::new().filter("status", status.as_str()),
        None => ListQuery::new(),
    }
}

/// QR code being shown
#[derive(Debug, Clone, PartialEq)]
struct QrPreview {
    owner: String,
    svg: String,
}

async fn load_qr(api: ApiClient, verification: OwnerVerification) -> Option<QrPreview> {
    let svg = match api.verification_token(verification.id).await {
        Ok(token) => verification_qr_svg(&token),
        Err(e) => Err(e),
    };
    match svg {
        Ok(svg) => Some(QrPreview {
            owner: verification.owner_name().to_string(),
            svg,
        }),
        Err(e) => {
            tracing::warn!(verification = %verification.id, "QR code unavailable: {}", e);
            notify(e.user_message(), StatusLevel::Error);
            None
        }
    }
}

async fn run_review(command: VerificationCommand, api: ApiClient, cache: QueryCache) -> bool {
    match command.run(&api, &cache).await {
        Ok(updated) => {
            notify(
                format!("{}: {}", command.action.label(), updated.status.display_name()),
                StatusLevel::Success,
            );
            true
        }
        Err(e) => {
            notify(e.user_message(), StatusLevel::Error);
            false
        }
    }
}

#[component]
pub fn VerificationsPage() -> Element {
    let ctx = use_client();
    let mut listing = use_listing::<OwnerVerification>(ListQuery::new);
    let mut confirm = use_confirm::<VerificationCommand>();
    let mut status = use_signal(|| None::<VerificationStatus>);
    let mut qr = use_signal(|| None::<QrPreview>);

    let page = listing.page();
    let view = listing.view(&verification_columns(), verification_actions);
    let request = confirm.read().request().cloned();
    let running = confirm.read().is_running();
    let mut data = listing.data;

    let on_status = move |e: FormEvent| {
        let picked = pick_choice(VerificationStatus::all(), &e.value());
        status.set(picked);
        listing.set_query(status_query(picked));
    };

    let action_ctx: ClientContext = ctx.clone();
    let on_action = move |(id, action): (EntityId, RowAction)| {
        let Some(verification) = listing.record(id) else {
            return;
        };
        let api = action_ctx.api().clone();
        match action {
            RowAction::Verification(review) if review.is_destructive() => {
                confirm
                    .write()
                    .open(VerificationCommand::confirm_request(&verification, review));
            }
            RowAction::Verification(review) => {
                let cache = action_ctx.cache.clone();
                let command = VerificationCommand { id, action: review };
                spawn(async move {
                    if run_review(command, api, cache).await {
                        data.restart();
                    }
                });
            }
            RowAction::ShowQr => {
                spawn(async move {
                    if let Some(preview) = load_qr(api, verification).await {
                        qr.set(Some(preview));
                    }
                });
            }
            _ => {}
        }
    };

    let confirm_ctx = ctx.clone();
    let on_confirm = move |_: ()| {
        let api = confirm_ctx.api().clone();
        let cache = confirm_ctx.cache.clone();
        run_confirmed(
            confirm,
            move |command: VerificationCommand| async move { command.run(&api, &cache).await },
            move |command, updated: OwnerVerification| {
                notify(
                    format!("{}: {}", command.action.label(), updated.status.display_name()),
                    StatusLevel::Success,
                );
                data.restart();
            },
        );
    };

    let save_qr = move |_: ()| {
        let Some(preview) = qr() else {
            return;
        };
        spawn(async move {
            match file_ops::save_qr(&preview.owner, &preview.svg).await {
                Ok(path) => notify(format!("QR code saved to {}", path.display()), StatusLevel::Success),
                Err(FileError::Cancelled) => {}
                Err(e) => notify(e.to_string(), StatusLevel::Error),
            }
        });
    };

    rsx! {
        div {
            class: "p-8",
            PageHeader {
                title: "Owner verification",
                subtitle: "Review identity files before owners can publish",
                label {
                    class: "flex items-center gap-2 text-sm text-slate-400",
                    "Status"
                    select {
                        class: "px-3 py-1.5 bg-slate-800 border border-slate-700 rounded-lg text-sm text-slate-100",
                        onchange: on_status,
                        option { value: "", selected: status().is_none(), "All" }
                        for choice in choice_options(VerificationStatus::all(), VerificationStatus::display_name) {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: status().is_some_and(|s| choice_value(VerificationStatus::all(), &s) == choice.value),
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
                on_retry: move |_| listing.retry(&ctx),
                on_page: move |number: u32| listing.go_to_page(number),
                on_action,
            }

            if let Some(request) = request {
                ConfirmDialog {
                    title: request.title,
                    message: request.message,
                    confirm_label: request.confirm_label,
                    running,
                    on_confirm,
                    on_dismiss: move |_| {
                        confirm.write().dismiss();
                    },
                }
            }

            if let Some(preview) = qr() {
                QrCodeView {
                    owner: preview.owner,
                    svg: preview.svg,
                    on_save: save_qr,
                    on_close: move |_| qr.set(None),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verification(status: VerificationStatus) -> OwnerVerification {
        OwnerVerification {
            id: EntityId(4),
            status,
            user: None,
            document_type: Some("ID card".to_string()),
            document_url: None,
            submitted_at: None,
            reviewer_notes: None,
        }
    }

    fn enabled(slots: &[RowActionSlot]) -> Vec<RowAction> {
        slots.iter().filter(|s| s.enabled).map(|s| s.action).collect()
    }

    #[test]
    fn test_under_review_actions() {
        let slots = verification_actions(&verification(VerificationStatus::UnderReview));
        assert_eq!(slots.len(), 5);
        assert_eq!(
            enabled(&slots),
            vec![
                RowAction::Verification(VerificationAction::Approve),
                RowAction::Verification(VerificationAction::Reject)
            ]
        );
    }

    #[test]
    fn test_approved_file_offers_qr_and_suspend() {
        let slots = verification_actions(&verification(VerificationStatus::Approved));
        assert_eq!(
            enabled(&slots),
            vec![
                RowAction::Verification(VerificationAction::Suspend),
                RowAction::ShowQr
            ]
        );
    }

    #[test]
    fn test_pending_file_is_read_only() {
        let slots = verification_actions(&verification(VerificationStatus::Pending));
        assert!(enabled(&slots).is_empty());
        assert_eq!(
            status_query(Some(VerificationStatus::UnderReview)).cache_key("owner-verifications"),
            "owner-verifications?status=UNDER_REVIEW"
        );
    }
}
