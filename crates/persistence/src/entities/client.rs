//! Client entity for database operations.

use chrono::{DateTime, Utc};
use domain::models::{Client, ClientStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for clients.
#[derive(Debug, Clone, FromRow)]
pub struct ClientEntity {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub industry: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClientEntity> for Client {
    fn from(entity: ClientEntity) -> Self {
        let status = entity
            .status
            .parse::<ClientStatus>()
            .unwrap_or(ClientStatus::Active);
        Client {
            id: entity.id,
            name: entity.name,
            contact: entity.contact,
            email: entity.email,
            phone: entity.phone,
            address: entity.address,
            industry: entity.industry,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
