//! Certification history domain models.
//!
//! History entries are an append-only audit trail: one record per lifecycle
//! or document action, never updated or deleted after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::certification::{CertificationStatus, LifecycleAction};

/// Audited certification actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Created,
    Issued,
    Renewed,
    Suspended,
    Revoked,
    Expired,
    Reactivated,
    Updated,
    DocumentGenerated,
}

impl From<LifecycleAction> for HistoryAction {
    fn from(action: LifecycleAction) -> Self {
        match action {
            LifecycleAction::Issue => HistoryAction::Issued,
            LifecycleAction::Renew => HistoryAction::Renewed,
            LifecycleAction::Suspend => HistoryAction::Suspended,
            LifecycleAction::Revoke => HistoryAction::Revoked,
            LifecycleAction::Reactivate => HistoryAction::Reactivated,
        }
    }
}

impl FromStr for HistoryAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(HistoryAction::Created),
            "issued" => Ok(HistoryAction::Issued),
            "renewed" => Ok(HistoryAction::Renewed),
            "suspended" => Ok(HistoryAction::Suspended),
            "revoked" => Ok(HistoryAction::Revoked),
            "expired" => Ok(HistoryAction::Expired),
            "reactivated" => Ok(HistoryAction::Reactivated),
            "updated" => Ok(HistoryAction::Updated),
            "document_generated" => Ok(HistoryAction::DocumentGenerated),
            _ => Err(format!("Unknown history action: {}", s)),
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HistoryAction::Created => "created",
            HistoryAction::Issued => "issued",
            HistoryAction::Renewed => "renewed",
            HistoryAction::Suspended => "suspended",
            HistoryAction::Revoked => "revoked",
            HistoryAction::Expired => "expired",
            HistoryAction::Reactivated => "reactivated",
            HistoryAction::Updated => "updated",
            HistoryAction::DocumentGenerated => "document_generated",
        };
        write!(f, "{}", s)
    }
}

/// One immutable audit record of a certification action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub certification_id: Uuid,
    pub action: HistoryAction,
    pub previous_status: Option<CertificationStatus>,
    pub new_status: Option<CertificationStatus>,
    pub notes: Option<String>,
    /// Opaque acting identity supplied by the caller's session.
    pub performed_by: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

/// Input for appending a history entry.
#[derive(Debug, Clone)]
pub struct CreateHistoryInput {
    pub certification_id: Uuid,
    pub action: HistoryAction,
    pub previous_status: Option<CertificationStatus>,
    pub new_status: Option<CertificationStatus>,
    pub notes: Option<String>,
    pub performed_by: Option<Uuid>,
}

impl CreateHistoryInput {
    pub fn new(certification_id: Uuid, action: HistoryAction) -> Self {
        Self {
            certification_id,
            action,
            previous_status: None,
            new_status: None,
            notes: None,
            performed_by: None,
        }
    }

    pub fn with_statuses(
        mut self,
        previous: CertificationStatus,
        new: CertificationStatus,
    ) -> Self {
        self.previous_status = Some(previous);
        self.new_status = Some(new);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_actor(mut self, actor: Option<Uuid>) -> Self {
        self.performed_by = actor;
        self
    }
}
