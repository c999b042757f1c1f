//! Certification history repository.
//!
//! The history table is append-only: entries are inserted, listed, and never
//! updated or deleted. Entries that accompany a status transition are written
//! through [`append`] inside the same transaction as the status update, so a
//! transition and its audit record commit or roll back together.

use domain::models::{CreateHistoryInput, HistoryEntry};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::HistoryEntity;

/// Append a history entry on an existing connection or transaction.
pub(crate) async fn append(
    conn: &mut PgConnection,
    input: &CreateHistoryInput,
) -> Result<HistoryEntry, sqlx::Error> {
    let entity = sqlx::query_as::<_, HistoryEntity>(
        r#"
        INSERT INTO certification_history (
            certification_id, action, previous_status, new_status, notes, performed_by
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, certification_id, action, previous_status, new_status,
                  notes, performed_by, timestamp
        "#,
    )
    .bind(input.certification_id)
    .bind(input.action.to_string())
    .bind(input.previous_status.map(|s| s.to_string()))
    .bind(input.new_status.map(|s| s.to_string()))
    .bind(&input.notes)
    .bind(input.performed_by)
    .fetch_one(conn)
    .await?;

    Ok(entity.into())
}

/// Repository for certification history records.
#[derive(Clone)]
pub struct HistoryRepository {
    pool: PgPool,
}

impl HistoryRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a standalone history entry outside any transition.
    pub async fn insert(&self, input: CreateHistoryInput) -> Result<HistoryEntry, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        append(&mut conn, &input).await
    }

    /// List all history entries for a certification, oldest first.
    pub async fn list_for_certification(
        &self,
        certification_id: Uuid,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, HistoryEntity>(
            r#"
            SELECT id, certification_id, action, previous_status, new_status,
                   notes, performed_by, timestamp
            FROM certification_history
            WHERE certification_id = $1
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(certification_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(HistoryEntry::from).collect())
    }
}
