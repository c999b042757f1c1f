//! Client repository for database operations.

use domain::models::{Client, ClientStatus, CreateClientRequest, UpdateClientRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ClientEntity;

const CLIENT_COLUMNS: &str =
    "id, name, contact, email, phone, address, industry, status, created_at, updated_at";

/// Repository for client database operations.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new client.
    pub async fn create(&self, request: &CreateClientRequest) -> Result<Client, sqlx::Error> {
        let status = request.status.unwrap_or(ClientStatus::Active);
        let query = format!(
            r#"
            INSERT INTO clients (name, contact, email, phone, address, industry, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CLIENT_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, ClientEntity>(&query)
            .bind(&request.name)
            .bind(&request.contact)
            .bind(&request.email)
            .bind(&request.phone)
            .bind(&request.address)
            .bind(&request.industry)
            .bind(status.to_string())
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(client_id = %entity.id, name = %entity.name, "Created client");
        Ok(entity.into())
    }

    /// Find a client by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
        let entity = sqlx::query_as::<_, ClientEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Client::from))
    }

    /// List all clients ordered by name.
    pub async fn list(&self) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY name ASC");
        let entities = sqlx::query_as::<_, ClientEntity>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Client::from).collect())
    }

    /// Update a client; absent fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateClientRequest,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                contact = COALESCE($3, contact),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                industry = COALESCE($7, industry),
                status = COALESCE($8, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, ClientEntity>(&query)
            .bind(id)
            .bind(&request.name)
            .bind(&request.contact)
            .bind(&request.email)
            .bind(&request.phone)
            .bind(&request.address)
            .bind(&request.industry)
            .bind(request.status.map(|s| s.to_string()))
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Client::from))
    }

    /// Delete a client and, via cascade, its certifications.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
