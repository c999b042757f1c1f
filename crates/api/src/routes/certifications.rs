//! Certification lifecycle endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::{
    CertificationResponse, CertificationStatistics, CreateCertificationRequest, HistoryEntry,
    LifecycleAction, LifecycleActionRequest, ListCertificationsQuery, ListCertificationsResponse,
    RenewRequest, UpdateCertificationRequest, EXPIRING_SOON_WINDOW_DAYS,
};
use persistence::repositories::{CertificationRepository, HistoryRepository};
use serde::Deserialize;
use shared::pagination::Pagination;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Actor;
use crate::middleware::metrics::record_lifecycle_transition;
use crate::services::document_generation;

/// Create a certification. The certificate number is generated when absent.
pub async fn create_certification(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateCertificationRequest>,
) -> Result<(StatusCode, Json<CertificationResponse>), ApiError> {
    request.validate()?;

    if request.expiry_date <= request.issue_date {
        return Err(ApiError::Validation(
            "expiryDate must be after issueDate".to_string(),
        ));
    }

    let repo = CertificationRepository::new(state.pool.clone());
    let certification = repo.create(&request, actor.id()).await?;

    let today = Utc::now().date_naive();
    Ok((
        StatusCode::CREATED,
        Json(CertificationResponse::from_certification(
            certification,
            today,
        )),
    ))
}

/// List certifications with filters and pagination.
pub async fn list_certifications(
    State(state): State<AppState>,
    Query(query): Query<ListCertificationsQuery>,
) -> Result<Json<ListCertificationsResponse>, ApiError> {
    let repo = CertificationRepository::new(state.pool.clone());
    let (certifications, total) = repo.list(&query).await?;

    let today = Utc::now().date_naive();
    let data = certifications
        .into_iter()
        .map(|c| CertificationResponse::from_certification(c, today))
        .collect();

    Ok(Json(ListCertificationsResponse {
        data,
        pagination: Pagination::new(&query.page, total),
    }))
}

/// Fetch a single certification.
pub async fn get_certification(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
) -> Result<Json<CertificationResponse>, ApiError> {
    let repo = CertificationRepository::new(state.pool.clone());
    let certification = repo
        .find_by_id(certification_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("certification {certification_id}")))?;

    let today = Utc::now().date_naive();
    Ok(Json(CertificationResponse::from_certification(
        certification,
        today,
    )))
}

/// Update non-lifecycle certification fields.
pub async fn update_certification(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<UpdateCertificationRequest>,
) -> Result<Json<CertificationResponse>, ApiError> {
    request.validate()?;

    let repo = CertificationRepository::new(state.pool.clone());
    let certification = repo.update(certification_id, &request, actor.id()).await?;

    let today = Utc::now().date_naive();
    Ok(Json(CertificationResponse::from_certification(
        certification,
        today,
    )))
}

/// Full audit trail for a certification, oldest first.
pub async fn history(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let repo = CertificationRepository::new(state.pool.clone());
    if repo.find_by_id(certification_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "certification {certification_id}"
        )));
    }

    let history_repo = HistoryRepository::new(state.pool.clone());
    let entries = history_repo.list_for_certification(certification_id).await?;
    Ok(Json(entries))
}

/// Per-status certification counts.
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<CertificationStatistics>, ApiError> {
    let repo = CertificationRepository::new(state.pool.clone());
    Ok(Json(repo.statistics().await?))
}

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<i64>,
}

/// Certifications expiring within the requested window (default 90 days).
pub async fn expiring(
    State(state): State<AppState>,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<Vec<CertificationResponse>>, ApiError> {
    let days = query.days.unwrap_or(EXPIRING_SOON_WINDOW_DAYS);
    if days < 0 {
        return Err(ApiError::Validation("days must be non-negative".to_string()));
    }

    let today = Utc::now().date_naive();
    let repo = CertificationRepository::new(state.pool.clone());
    let certifications = repo.expiring_within(today, days).await?;

    let data = certifications
        .into_iter()
        .map(|c| CertificationResponse::from_certification(c, today))
        .collect();
    Ok(Json(data))
}

/// Issue a pending certification.
pub async fn issue(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<LifecycleActionRequest>,
) -> Result<Json<CertificationResponse>, ApiError> {
    transition(state, certification_id, LifecycleAction::Issue, None, request.reason, actor).await
}

/// Renew a certification with a new expiry date.
///
/// The expiry extension is validated against the row read under the
/// transition lock, so a concurrent renew cannot pass a stale comparison.
pub async fn renew(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<RenewRequest>,
) -> Result<Json<CertificationResponse>, ApiError> {
    transition(
        state,
        certification_id,
        LifecycleAction::Renew,
        Some(request.expiry_date),
        request.reason,
        actor,
    )
    .await
}

/// Suspend an in-force certification.
pub async fn suspend(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<LifecycleActionRequest>,
) -> Result<Json<CertificationResponse>, ApiError> {
    transition(state, certification_id, LifecycleAction::Suspend, None, request.reason, actor).await
}

/// Revoke a certification. Revocation is terminal.
pub async fn revoke(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<LifecycleActionRequest>,
) -> Result<Json<CertificationResponse>, ApiError> {
    transition(state, certification_id, LifecycleAction::Revoke, None, request.reason, actor).await
}

/// Reactivate a suspended certification.
pub async fn reactivate(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<LifecycleActionRequest>,
) -> Result<Json<CertificationResponse>, ApiError> {
    transition(
        state,
        certification_id,
        LifecycleAction::Reactivate,
        None,
        request.reason,
        actor,
    )
    .await
}

async fn transition(
    state: AppState,
    certification_id: Uuid,
    action: LifecycleAction,
    new_expiry: Option<chrono::NaiveDate>,
    reason: Option<String>,
    actor: Actor,
) -> Result<Json<CertificationResponse>, ApiError> {
    let repo = CertificationRepository::new(state.pool.clone());
    let certification = repo
        .transition(certification_id, action, new_expiry, reason, actor.id())
        .await?;

    record_lifecycle_transition(&action.to_string());

    let today = Utc::now().date_naive();
    Ok(Json(CertificationResponse::from_certification(
        certification,
        today,
    )))
}

/// Render the certification document and store its location.
pub async fn generate_document(
    State(state): State<AppState>,
    Path(certification_id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<CertificationResponse>, ApiError> {
    let certification =
        document_generation::generate(&state, certification_id, actor.id()).await?;

    let today = Utc::now().date_naive();
    Ok(Json(CertificationResponse::from_certification(
        certification,
        today,
    )))
}
