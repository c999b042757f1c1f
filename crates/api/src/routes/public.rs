//! Public certification directory endpoints.
//!
//! Verification by certificate number plus a search over active
//! certifications, both unauthenticated. Only the fields a third party needs
//! to confirm a certificate are exposed: status, validity window and the
//! names on the certificate. Internal notes and identifiers stay private.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use persistence::repositories::{
    CertificationRepository, ClientRepository, IsoStandardRepository, PublicSearchFilters,
};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination};

use crate::app::AppState;
use crate::error::ApiError;

/// Public view of a certificate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCertificate {
    pub certificate_number: String,
    pub status: String,
    pub valid: bool,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub client_name: String,
    pub iso_standard_code: String,
    pub certification_body: Option<String>,
}

/// Look up a certificate by its number.
pub async fn verify_certificate(
    State(state): State<AppState>,
    Path(certificate_number): Path<String>,
) -> Result<Json<PublicCertificate>, ApiError> {
    let repo = CertificationRepository::new(state.pool.clone());
    let certification = repo
        .find_by_number(&certificate_number)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("certificate {certificate_number}")))?;

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
    let valid = matches!(
        certification.status,
        domain::models::CertificationStatus::Active
            | domain::models::CertificationStatus::ExpiringSoon
    ) && !certification.is_expired(today);

    Ok(Json(PublicCertificate {
        certificate_number: certification.certificate_number,
        status: certification.status.to_string(),
        valid,
        issue_date: certification.issue_date,
        expiry_date: certification.expiry_date,
        client_name: client.name,
        iso_standard_code: standard.code,
        certification_body: certification.certification_body,
    }))
}

/// Query parameters for the public directory search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSearchQuery {
    #[serde(flatten)]
    pub page: PageParams,
    pub search: Option<String>,
    pub iso_standard_code: Option<String>,
    pub client_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSearchResponse {
    pub data: Vec<PublicCertificate>,
    pub pagination: Pagination,
}

/// Search the public directory. Only active certifications are listed.
pub async fn search_certificates(
    State(state): State<AppState>,
    Query(query): Query<PublicSearchQuery>,
) -> Result<Json<PublicSearchResponse>, ApiError> {
    let filters = PublicSearchFilters {
        search: query.search,
        iso_standard_code: query.iso_standard_code,
        client_name: query.client_name,
    };

    let repo = CertificationRepository::new(state.pool.clone());
    let (rows, total) = repo.search_public(&filters, &query.page).await?;

    let today = Utc::now().date_naive();
    let data = rows
        .into_iter()
        .map(|row| PublicCertificate {
            valid: row.expiry_date >= today,
            certificate_number: row.certificate_number,
            status: row.status,
            issue_date: row.issue_date,
            expiry_date: row.expiry_date,
            client_name: row.client_name,
            iso_standard_code: row.iso_standard_code,
            certification_body: row.certification_body,
        })
        .collect();

    Ok(Json(PublicSearchResponse {
        data,
        pagination: Pagination::new(&query.page, total),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_certificate_hides_internal_fields() {
        let cert = PublicCertificate {
            certificate_number: "CRT-2026-00042".to_string(),
            status: "active".to_string(),
            valid: true,
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2029, 3, 1).unwrap(),
            client_name: "Acme Manufacturing Ltd".to_string(),
            iso_standard_code: "ISO 9001:2015".to_string(),
            certification_body: None,
        };
        let json = serde_json::to_string(&cert).unwrap();
        assert!(json.contains("certificateNumber"));
        assert!(!json.contains("notes"));
        assert!(!json.contains("leadAuditor"));
    }

    #[test]
    fn test_search_query_defaults() {
        let query: PublicSearchQuery = serde_json::from_str("{}").unwrap();
        assert!(query.search.is_none());
        assert!(query.iso_standard_code.is_none());
        assert!(query.client_name.is_none());
        assert_eq!(query.page.per_page(), 50);
    }
}
