//! Template management endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateTemplateRequest, ListTemplatesQuery, Template};
use persistence::repositories::TemplateRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Actor;

/// Create a template. The version is allocated server-side.
pub async fn create_template(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    request.validate()?;

    let repo = TemplateRepository::new(state.pool.clone());
    let template = repo.create(&request, actor.id()).await?;

    Ok((StatusCode::CREATED, Json(template)))
}

/// List templates with optional type/active/default filters.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> Result<Json<Vec<Template>>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let templates = repo.list(&query).await?;
    Ok(Json(templates))
}

/// List all active templates.
pub async fn list_active(State(state): State<AppState>) -> Result<Json<Vec<Template>>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let templates = repo.list_active().await?;
    Ok(Json(templates))
}

/// List the default template of each type.
pub async fn list_defaults(State(state): State<AppState>) -> Result<Json<Vec<Template>>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let templates = repo.list_defaults().await?;
    Ok(Json(templates))
}

/// Fetch a single template.
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Template>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let template = repo
        .find_by_id(template_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("template {template_id}")))?;
    Ok(Json(template))
}

/// Make a template the default for its type.
pub async fn set_default(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Template>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let template = repo.set_default(template_id).await?;

    tracing::info!(
        template_id = %template.id,
        template_type = %template.template_type,
        "Template set as default"
    );
    Ok(Json(template))
}

/// Deactivate a template without deleting it.
pub async fn deactivate_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Template>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let template = repo.deactivate(template_id).await?;
    Ok(Json(template))
}

/// Delete a template. Rejected with a conflict when certifications still
/// reference it.
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    repo.delete(template_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
