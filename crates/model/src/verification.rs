//! Owner verification (KYC) records

use chrono::{DateTime, Utc};
use sejour_core::{EntityId, Identifiable, Resource, VerificationStatus};
use serde::{Deserialize, Serialize};

use crate::user::UserSummary;

/// An owner's verification file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerVerification {
    pub id: EntityId,
    pub status: VerificationStatus,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewer_notes: Option<String>,
}

impl OwnerVerification {
    /// Name of the owner under review
    pub fn owner_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("-")
    }

    /// Actions offered for the current status
    pub fn available_actions(&self) -> &'static [VerificationAction] {
        VerificationAction::available_for(self.status)
    }
}

impl Resource for OwnerVerification {
    const COLLECTION: &'static str = "owner-verifications";
    const LABEL: &'static str = "verification";
}

impl Identifiable for OwnerVerification {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Review actions on a verification file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationAction {
    StartReview,
    Approve,
    Reject,
    Suspend,
}

impl VerificationAction {
    /// Actions offered for a status
    pub fn available_for(status: VerificationStatus) -> &'static [VerificationAction] {
        use VerificationAction::*;
        match status {
            VerificationStatus::Pending => &[],
            VerificationStatus::Submitted => &[StartReview, Reject],
            VerificationStatus::UnderReview => &[Approve, Reject],
            VerificationStatus::Approved => &[Suspend],
            VerificationStatus::Rejected => &[StartReview],
            VerificationStatus::Suspended => &[Approve],
        }
    }

    /// Path segment of the action endpoint (`owner-verifications/{id}/{segment}`)
    pub fn segment(&self) -> &'static str {
        match self {
            VerificationAction::StartReview => "review",
            VerificationAction::Approve => "approve",
            VerificationAction::Reject => "reject",
            VerificationAction::Suspend => "suspend",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            VerificationAction::StartReview => "Start review",
            VerificationAction::Approve => "Approve",
            VerificationAction::Reject => "Reject",
            VerificationAction::Suspend => "Suspend",
        }
    }

    /// Whether the action must go through the confirmation dialog
    pub fn is_destructive(&self) -> bool {
        matches!(self, VerificationAction::Reject | VerificationAction::Suspend)
    }
}
