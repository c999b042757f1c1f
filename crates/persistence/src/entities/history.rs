//! Certification history entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::{CertificationStatus, HistoryAction, HistoryEntry};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for certification history records.
#[derive(Debug, Clone, FromRow)]
pub struct HistoryEntity {
    pub id: Uuid,
    pub certification_id: Uuid,
    pub action: String,
    pub previous_status: Option<String>,
    pub new_status: Option<String>,
    pub notes: Option<String>,
    pub performed_by: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl From<HistoryEntity> for HistoryEntry {
    fn from(entity: HistoryEntity) -> Self {
        let action = entity
            .action
            .parse::<HistoryAction>()
            .unwrap_or(HistoryAction::Updated);
        let previous_status = entity
            .previous_status
            .and_then(|s| s.parse::<CertificationStatus>().ok());
        let new_status = entity
            .new_status
            .and_then(|s| s.parse::<CertificationStatus>().ok());
        HistoryEntry {
            id: entity.id,
            certification_id: entity.certification_id,
            action,
            previous_status,
            new_status,
            notes: entity.notes,
            performed_by: entity.performed_by,
            timestamp: entity.timestamp,
        }
    }
}
