//! ISO standard reference endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateIsoStandardRequest, IsoStandard};
use persistence::repositories::IsoStandardRepository;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Create an ISO standard.
pub async fn create_iso_standard(
    State(state): State<AppState>,
    Json(request): Json<CreateIsoStandardRequest>,
) -> Result<(StatusCode, Json<IsoStandard>), ApiError> {
    request.validate()?;

    let repo = IsoStandardRepository::new(state.pool.clone());
    let standard = repo.create(&request).await?;
    Ok((StatusCode::CREATED, Json(standard)))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListIsoStandardsQuery {
    #[serde(default)]
    pub only_active: bool,
}

/// List ISO standards.
pub async fn list_iso_standards(
    State(state): State<AppState>,
    Query(query): Query<ListIsoStandardsQuery>,
) -> Result<Json<Vec<IsoStandard>>, ApiError> {
    let repo = IsoStandardRepository::new(state.pool.clone());
    Ok(Json(repo.list(query.only_active).await?))
}

/// Fetch a single ISO standard.
pub async fn get_iso_standard(
    State(state): State<AppState>,
    Path(iso_standard_id): Path<Uuid>,
) -> Result<Json<IsoStandard>, ApiError> {
    let repo = IsoStandardRepository::new(state.pool.clone());
    let standard = repo
        .find_by_id(iso_standard_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("ISO standard {iso_standard_id}")))?;
    Ok(Json(standard))
}

/// Deactivate an ISO standard.
pub async fn deactivate_iso_standard(
    State(state): State<AppState>,
    Path(iso_standard_id): Path<Uuid>,
) -> Result<Json<IsoStandard>, ApiError> {
    let repo = IsoStandardRepository::new(state.pool.clone());
    let standard = repo
        .deactivate(iso_standard_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("ISO standard {iso_standard_id}")))?;
    Ok(Json(standard))
}
