//! Certification domain models.
//!
//! A certification is a client's ISO certificate record with a lifecycle
//! status and expiry date. Status transitions are driven only by the
//! lifecycle engine so every transition is paired with a history entry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageParams, Pagination};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Days before expiry at which a certification counts as expiring soon.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 90;

/// Lifecycle status of a certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CertificationStatus {
    Pending,
    Active,
    ExpiringSoon,
    Expired,
    Suspended,
    Revoked,
}

impl CertificationStatus {
    /// All statuses, for statistics queries.
    pub const ALL: [CertificationStatus; 6] = [
        CertificationStatus::Pending,
        CertificationStatus::Active,
        CertificationStatus::ExpiringSoon,
        CertificationStatus::Expired,
        CertificationStatus::Suspended,
        CertificationStatus::Revoked,
    ];

    /// Whether this status was reached by a manual action that overrides
    /// date-derived status until reactivated.
    pub fn is_manual_override(&self) -> bool {
        matches!(
            self,
            CertificationStatus::Suspended | CertificationStatus::Revoked
        )
    }
}

impl FromStr for CertificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(CertificationStatus::Pending),
            "active" => Ok(CertificationStatus::Active),
            "expiring-soon" => Ok(CertificationStatus::ExpiringSoon),
            "expired" => Ok(CertificationStatus::Expired),
            "suspended" => Ok(CertificationStatus::Suspended),
            "revoked" => Ok(CertificationStatus::Revoked),
            _ => Err(format!("Unknown certification status: {}", s)),
        }
    }
}

impl std::fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CertificationStatus::Pending => write!(f, "pending"),
            CertificationStatus::Active => write!(f, "active"),
            CertificationStatus::ExpiringSoon => write!(f, "expiring-soon"),
            CertificationStatus::Expired => write!(f, "expired"),
            CertificationStatus::Suspended => write!(f, "suspended"),
            CertificationStatus::Revoked => write!(f, "revoked"),
        }
    }
}

/// Caller-invoked lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Issue,
    Renew,
    Suspend,
    Revoke,
    Reactivate,
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleAction::Issue => write!(f, "issue"),
            LifecycleAction::Renew => write!(f, "renew"),
            LifecycleAction::Suspend => write!(f, "suspend"),
            LifecycleAction::Revoke => write!(f, "revoke"),
            LifecycleAction::Reactivate => write!(f, "reactivate"),
        }
    }
}

/// A client's ISO certification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub certificate_number: String,
    pub client_id: Uuid,
    pub iso_standard_id: Uuid,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: CertificationStatus,
    pub scope: String,
    pub lead_auditor: Option<Uuid>,
    pub certification_body: Option<String>,
    pub accreditation_number: Option<String>,
    pub template_id: Option<Uuid>,
    pub document_url: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certification {
    /// Days until expiry relative to `today`; negative once past expiry.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    /// Whether the certification is past its expiry date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.days_until_expiry(today) < 0
    }

    /// Whether the certification expires within the expiring-soon window.
    pub fn is_expiring_soon(&self, today: NaiveDate) -> bool {
        let days = self.days_until_expiry(today);
        (0..=EXPIRING_SOON_WINDOW_DAYS).contains(&days)
    }
}

/// Request payload for creating a certification.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificationRequest {
    /// Generated (`CRT-<year>-<suffix>`) when absent.
    #[validate(custom(function = "validate_certificate_number_opt"))]
    pub certificate_number: Option<String>,

    pub client_id: Uuid,
    pub iso_standard_id: Uuid,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,

    /// Initial status; only `pending` or `active` are accepted.
    pub status: Option<CertificationStatus>,

    #[validate(length(min = 1))]
    pub scope: String,

    pub lead_auditor: Option<Uuid>,
    pub certification_body: Option<String>,
    pub accreditation_number: Option<String>,
    pub template_id: Option<Uuid>,
    pub notes: Option<String>,
}

fn validate_certificate_number_opt(value: &str) -> Result<(), validator::ValidationError> {
    shared::validation::validate_certificate_number(value)
}

/// Request payload for updating non-lifecycle certification fields.
///
/// Status is deliberately absent: transitions go through lifecycle actions.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCertificationRequest {
    #[validate(length(min = 1))]
    pub scope: Option<String>,
    pub lead_auditor: Option<Uuid>,
    pub certification_body: Option<String>,
    pub accreditation_number: Option<String>,
    pub template_id: Option<Uuid>,
    pub notes: Option<String>,
}

/// Body for suspend/revoke/reactivate/issue actions.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleActionRequest {
    pub reason: Option<String>,
}

/// Body for the renew action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewRequest {
    /// New expiry date; must extend beyond the current one.
    pub expiry_date: NaiveDate,
    pub reason: Option<String>,
}

/// Query parameters for listing certifications.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListCertificationsQuery {
    #[serde(flatten)]
    pub page: PageParams,
    pub status: Option<CertificationStatus>,
    pub client_id: Option<Uuid>,
    pub iso_standard_id: Option<Uuid>,
    pub lead_auditor: Option<Uuid>,
    /// Substring match on certificate number or scope.
    pub search: Option<String>,
}

/// A certification plus its derived expiry fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationResponse {
    #[serde(flatten)]
    pub certification: Certification,
    pub days_until_expiry: i64,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
}

impl CertificationResponse {
    /// Attach derived fields computed against `today`.
    pub fn from_certification(certification: Certification, today: NaiveDate) -> Self {
        let days_until_expiry = certification.days_until_expiry(today);
        let is_expired = certification.is_expired(today);
        let is_expiring_soon = certification.is_expiring_soon(today);
        Self {
            certification,
            days_until_expiry,
            is_expired,
            is_expiring_soon,
        }
    }
}

/// Response for certification list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCertificationsResponse {
    pub data: Vec<CertificationResponse>,
    pub pagination: Pagination,
}

/// Per-status certification counts.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CertificationStatistics {
    pub total: i64,
    pub pending: i64,
    pub active: i64,
    pub expiring_soon: i64,
    pub expired: i64,
    pub suspended: i64,
    pub revoked: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certification_expiring(expiry: NaiveDate) -> Certification {
        Certification {
            id: Uuid::new_v4(),
            certificate_number: "CRT-2026-00001".to_string(),
            client_id: Uuid::new_v4(),
            iso_standard_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2023, 8, 23).unwrap(),
            expiry_date: expiry,
            status: CertificationStatus::Active,
            scope: "Design and manufacture of widgets".to_string(),
            lead_auditor: None,
            certification_body: None,
            accreditation_number: None,
            template_id: None,
            document_url: None,
            notes: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            CertificationStatus::from_str("expiring-soon").unwrap(),
            CertificationStatus::ExpiringSoon
        );
        assert_eq!(
            CertificationStatus::from_str("Revoked").unwrap(),
            CertificationStatus::Revoked
        );
        assert!(CertificationStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn test_status_display_roundtrip() {
        for status in CertificationStatus::ALL {
            assert_eq!(
                CertificationStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_manual_override_statuses() {
        assert!(CertificationStatus::Suspended.is_manual_override());
        assert!(CertificationStatus::Revoked.is_manual_override());
        assert!(!CertificationStatus::Active.is_manual_override());
        assert!(!CertificationStatus::Expired.is_manual_override());
    }

    #[test]
    fn test_days_until_expiry() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let cert = certification_expiring(today + chrono::Duration::days(30));
        assert_eq!(cert.days_until_expiry(today), 30);
        assert!(!cert.is_expired(today));
        assert!(cert.is_expiring_soon(today));
    }

    #[test]
    fn test_expired_yesterday() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let cert = certification_expiring(today - chrono::Duration::days(1));
        assert_eq!(cert.days_until_expiry(today), -1);
        assert!(cert.is_expired(today));
        assert!(!cert.is_expiring_soon(today));
    }

    #[test]
    fn test_expiring_soon_boundaries() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();

        let on_boundary = certification_expiring(today + chrono::Duration::days(90));
        assert!(on_boundary.is_expiring_soon(today));

        let past_boundary = certification_expiring(today + chrono::Duration::days(91));
        assert!(!past_boundary.is_expiring_soon(today));

        let expires_today = certification_expiring(today);
        assert!(expires_today.is_expiring_soon(today));
        assert!(!expires_today.is_expired(today));
    }

    #[test]
    fn test_response_derived_fields() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let cert = certification_expiring(today + chrono::Duration::days(45));
        let response = CertificationResponse::from_certification(cert, today);
        assert_eq!(response.days_until_expiry, 45);
        assert!(response.is_expiring_soon);
        assert!(!response.is_expired);
    }
}
