//! ISO standard repository for database operations.

use domain::models::{CreateIsoStandardRequest, IsoStandard};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::IsoStandardEntity;

const ISO_STANDARD_COLUMNS: &str =
    "id, code, name, description, is_active, created_at, updated_at";

/// Repository for ISO standard reference data.
#[derive(Clone)]
pub struct IsoStandardRepository {
    pool: PgPool,
}

impl IsoStandardRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new ISO standard.
    pub async fn create(
        &self,
        request: &CreateIsoStandardRequest,
    ) -> Result<IsoStandard, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO iso_standards (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING {ISO_STANDARD_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, IsoStandardEntity>(&query)
            .bind(&request.code)
            .bind(&request.name)
            .bind(&request.description)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(iso_standard_id = %entity.id, code = %entity.code, "Created ISO standard");
        Ok(entity.into())
    }

    /// Find an ISO standard by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<IsoStandard>, sqlx::Error> {
        let query = format!("SELECT {ISO_STANDARD_COLUMNS} FROM iso_standards WHERE id = $1");
        let entity = sqlx::query_as::<_, IsoStandardEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(IsoStandard::from))
    }

    /// List ISO standards ordered by code, optionally only active ones.
    pub async fn list(&self, only_active: bool) -> Result<Vec<IsoStandard>, sqlx::Error> {
        let query = format!(
            "SELECT {ISO_STANDARD_COLUMNS} FROM iso_standards \
             WHERE is_active OR NOT $1 ORDER BY code ASC"
        );
        let entities = sqlx::query_as::<_, IsoStandardEntity>(&query)
            .bind(only_active)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(IsoStandard::from).collect())
    }

    /// Deactivate an ISO standard; existing certifications keep referencing it.
    pub async fn deactivate(&self, id: Uuid) -> Result<Option<IsoStandard>, sqlx::Error> {
        let query = format!(
            "UPDATE iso_standards SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 RETURNING {ISO_STANDARD_COLUMNS}"
        );
        let entity = sqlx::query_as::<_, IsoStandardEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(IsoStandard::from))
    }
}
