//! Certification entity for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Certification, CertificationStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for certifications.
#[derive(Debug, Clone, FromRow)]
pub struct CertificationEntity {
    pub id: Uuid,
    pub certificate_number: String,
    pub client_id: Uuid,
    pub iso_standard_id: Uuid,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: String,
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

impl From<CertificationEntity> for Certification {
    fn from(entity: CertificationEntity) -> Self {
        let status = entity
            .status
            .parse::<CertificationStatus>()
            .unwrap_or(CertificationStatus::Pending);
        Certification {
            id: entity.id,
            certificate_number: entity.certificate_number,
            client_id: entity.client_id,
            iso_standard_id: entity.iso_standard_id,
            issue_date: entity.issue_date,
            expiry_date: entity.expiry_date,
            status,
            scope: entity.scope,
            lead_auditor: entity.lead_auditor,
            certification_body: entity.certification_body,
            accreditation_number: entity.accreditation_number,
            template_id: entity.template_id,
            document_url: entity.document_url,
            notes: entity.notes,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Joined row for the public certification directory: certification fields
/// plus the client and standard names third parties are allowed to see.
#[derive(Debug, Clone, FromRow)]
pub struct PublicCertificationRow {
    pub certificate_number: String,
    pub status: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub scope: String,
    pub certification_body: Option<String>,
    pub client_name: String,
    pub iso_standard_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certification_entity_to_domain() {
        let entity = CertificationEntity {
            id: Uuid::new_v4(),
            certificate_number: "CRT-2026-00042".to_string(),
            client_id: Uuid::new_v4(),
            iso_standard_id: Uuid::new_v4(),
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2029, 3, 1).unwrap(),
            status: "expiring-soon".to_string(),
            scope: "Widget manufacture".to_string(),
            lead_auditor: None,
            certification_body: None,
            accreditation_number: None,
            template_id: None,
            document_url: None,
            notes: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let certification: Certification = entity.into();
        assert_eq!(certification.status, CertificationStatus::ExpiringSoon);
        assert_eq!(certification.certificate_number, "CRT-2026-00042");
    }
}
