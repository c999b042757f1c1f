//! ISO standard entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::IsoStandard;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for ISO standards.
#[derive(Debug, Clone, FromRow)]
pub struct IsoStandardEntity {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IsoStandardEntity> for IsoStandard {
    fn from(entity: IsoStandardEntity) -> Self {
        IsoStandard {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            description: entity.description,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
