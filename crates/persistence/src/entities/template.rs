//! Template entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::{Template, TemplateType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for document templates.
#[derive(Debug, Clone, FromRow)]
pub struct TemplateEntity {
    pub id: Uuid,
    pub template_id: String,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub version: String,
    pub is_default: bool,
    pub is_active: bool,
    pub body: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<TemplateEntity> for Template {
    fn from(entity: TemplateEntity) -> Self {
        let template_type = entity
            .template_type
            .parse::<TemplateType>()
            .unwrap_or(TemplateType::Certificate);
        Template {
            id: entity.id,
            template_id: entity.template_id,
            name: entity.name,
            description: entity.description,
            template_type,
            version: entity.version,
            is_default: entity.is_default,
            is_active: entity.is_active,
            body: entity.body,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}
