//! Client management endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{Client, CreateClientRequest, UpdateClientRequest};
use persistence::repositories::ClientRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Create a client.
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    request.validate()?;

    let repo = ClientRepository::new(state.pool.clone());
    let client = repo.create(&request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// List all clients.
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    let repo = ClientRepository::new(state.pool.clone());
    Ok(Json(repo.list().await?))
}

/// Fetch a single client.
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    let repo = ClientRepository::new(state.pool.clone());
    let client = repo
        .find_by_id(client_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("client {client_id}")))?;
    Ok(Json(client))
}

/// Update a client.
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    request.validate()?;

    let repo = ClientRepository::new(state.pool.clone());
    let client = repo
        .update(client_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("client {client_id}")))?;
    Ok(Json(client))
}

/// Delete a client and its certifications.
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = ClientRepository::new(state.pool.clone());
    if repo.delete(client_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("client {client_id}")))
    }
}
