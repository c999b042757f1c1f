//! Certification document generation.
//!
//! Resolves the template (explicit reference first, then the default
//! certificate template), assembles the placeholder context, renders the
//! body, writes the result under the media root and records the stored
//! location on the certification together with its history entry.

use chrono::Utc;
use domain::models::{Certification, TemplateType};
use domain::services::{document_relative_path, render, DocumentContext};
use persistence::repositories::{
    CertificationRepository, ClientRepository, IsoStandardRepository, TemplateRepository,
};
use std::path::Path;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_document_generated;

/// Render and store the document for a certification.
pub async fn generate(
    state: &AppState,
    certification_id: Uuid,
    actor: Option<Uuid>,
) -> Result<Certification, ApiError> {
    let cert_repo = CertificationRepository::new(state.pool.clone());
    let certification = cert_repo
        .find_by_id(certification_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("certification {certification_id}")))?;

    let template_repo = TemplateRepository::new(state.pool.clone());
    let template = match certification.template_id {
        Some(template_id) => template_repo
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("template {template_id}")))?,
        None => template_repo
            .get_default(TemplateType::Certificate)
            .await?
            .ok_or_else(|| {
                ApiError::Conflict(
                    "no template referenced and no default certificate template configured"
                        .to_string(),
                )
            })?,
    };

    let client = ClientRepository::new(state.pool.clone())
        .find_by_id(certification.client_id)
        .await?
        .ok_or_else(|| ApiError::Internal("certification references missing client".to_string()))?;
    let standard = IsoStandardRepository::new(state.pool.clone())
        .find_by_id(certification.iso_standard_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal("certification references missing ISO standard".to_string())
        })?;

    let today = Utc::now().date_naive();
    // There is no auditor directory to resolve a display name from; with no
    // name the context omits the key and `{{lead_auditor_name}}` stays
    // literal in the output for the reviewer to fill in.
    let context =
        DocumentContext::build(&certification, &client, &standard, None, today).into_map();
    let rendered = render(&template.body, &context)?;

    let relative_path = document_relative_path(&certification.certificate_number, today);
    let full_path = Path::new(&state.config.media.root).join(&relative_path);
    if let Some(parent) = full_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to create media directory: {e}")))?;
    }
    tokio::fs::write(&full_path, rendered.as_bytes())
        .await
        .map_err(|e| ApiError::Internal(format!("failed to write document: {e}")))?;

    let document_url = format!(
        "{}/{}",
        state.config.media.base_url.trim_end_matches('/'),
        relative_path
    );
    let updated = cert_repo
        .set_document_url(certification_id, &document_url, actor)
        .await?;

    record_document_generated();
    tracing::info!(
        certification_id = %certification_id,
        template_id = %template.id,
        template_version = %template.version,
        document_url = %document_url,
        "Generated certification document"
    );

    Ok(updated)
}
