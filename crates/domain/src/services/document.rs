//! Render-context assembly for certification documents.
//!
//! The renderer itself knows nothing about entity shapes; callers build an
//! explicit name -> value mapping here and hand it over. Dates are formatted
//! for display (`August 23, 2026`) and every value is plain text.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{Certification, Client, IsoStandard};

/// Display format for dates embedded in documents.
const DATE_FORMAT: &str = "%B %d, %Y";

/// Builder for the placeholder context of one certification document.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    values: BTreeMap<String, String>,
}

impl DocumentContext {
    /// Assemble the standard context from a certification and its related
    /// entities. `today` is passed in so rendering stays reproducible.
    pub fn build(
        certification: &Certification,
        client: &Client,
        standard: &IsoStandard,
        auditor_name: Option<&str>,
        today: NaiveDate,
    ) -> Self {
        let mut values = BTreeMap::new();

        // Certificate information
        values.insert(
            "certificate_number".to_string(),
            certification.certificate_number.clone(),
        );
        values.insert(
            "issue_date".to_string(),
            certification.issue_date.format(DATE_FORMAT).to_string(),
        );
        values.insert(
            "expiry_date".to_string(),
            certification.expiry_date.format(DATE_FORMAT).to_string(),
        );
        values.insert("scope".to_string(), certification.scope.clone());

        // Client information
        values.insert("client_name".to_string(), client.name.clone());
        values.insert("client_address".to_string(), client.address.clone());
        values.insert("client_email".to_string(), client.email.clone());
        values.insert("client_phone".to_string(), client.phone.clone());
        values.insert(
            "client_industry".to_string(),
            client.industry.clone().unwrap_or_default(),
        );

        // ISO standard
        values.insert("iso_standard_code".to_string(), standard.code.clone());
        values.insert("iso_standard_name".to_string(), standard.name.clone());
        values.insert(
            "iso_standard_description".to_string(),
            standard.description.clone(),
        );

        // Auditor and certification body. The auditor key is only set when a
        // name is known; an unresolved auditor leaves `{{lead_auditor_name}}`
        // literal in the output instead of vanishing into an empty string.
        if let Some(name) = auditor_name {
            values.insert("lead_auditor_name".to_string(), name.to_string());
        }
        values.insert(
            "certification_body".to_string(),
            certification.certification_body.clone().unwrap_or_default(),
        );
        values.insert(
            "accreditation_number".to_string(),
            certification
                .accreditation_number
                .clone()
                .unwrap_or_default(),
        );

        // Generation date
        values.insert(
            "current_date".to_string(),
            today.format(DATE_FORMAT).to_string(),
        );
        values.insert("current_year".to_string(), today.year().to_string());

        Self { values }
    }

    /// Override or add a single context value.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// The assembled mapping, ready for the renderer.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }

    /// Borrow the assembled mapping.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Relative storage path for a generated document:
/// `certificates/<year>/<month>/<certificate_number>.txt`.
pub fn document_relative_path(certificate_number: &str, today: NaiveDate) -> String {
    format!(
        "certificates/{}/{:02}/{}.txt",
        today.year(),
        today.month(),
        certificate_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertificationStatus, ClientStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn fixtures() -> (Certification, Client, IsoStandard) {
        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4(),
            name: "Acme Manufacturing Ltd".to_string(),
            contact: "Jane Smith".to_string(),
            email: "jane@acme.example".to_string(),
            phone: "+44 29 2018 0000".to_string(),
            address: "168 City Road, Cardiff".to_string(),
            industry: Some("Manufacturing".to_string()),
            status: ClientStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let standard = IsoStandard {
            id: Uuid::new_v4(),
            code: "ISO 9001:2015".to_string(),
            name: "Quality management systems".to_string(),
            description: "Requirements for a quality management system".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let certification = Certification {
            id: Uuid::new_v4(),
            certificate_number: "CRT-2026-00042".to_string(),
            client_id: client.id,
            iso_standard_id: standard.id,
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2029, 3, 1).unwrap(),
            status: CertificationStatus::Active,
            scope: "Design and manufacture of widgets".to_string(),
            lead_auditor: None,
            certification_body: Some("AceQu International".to_string()),
            accreditation_number: None,
            template_id: None,
            document_url: None,
            notes: None,
            created_by: None,
            created_at: now,
            updated_at: now,
        };
        (certification, client, standard)
    }

    #[test]
    fn test_context_contains_expected_fields() {
        let (cert, client, standard) = fixtures();
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let ctx = DocumentContext::build(&cert, &client, &standard, Some("Kuldip Rai"), today);
        let map = ctx.as_map();

        assert_eq!(map["certificate_number"], "CRT-2026-00042");
        assert_eq!(map["issue_date"], "March 01, 2026");
        assert_eq!(map["expiry_date"], "March 01, 2029");
        assert_eq!(map["client_name"], "Acme Manufacturing Ltd");
        assert_eq!(map["iso_standard_code"], "ISO 9001:2015");
        assert_eq!(map["lead_auditor_name"], "Kuldip Rai");
        assert_eq!(map["certification_body"], "AceQu International");
        assert_eq!(map["current_date"], "August 23, 2026");
        assert_eq!(map["current_year"], "2026");
    }

    #[test]
    fn test_blank_stored_fields_render_empty() {
        let (cert, client, standard) = fixtures();
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let ctx = DocumentContext::build(&cert, &client, &standard, None, today);

        assert_eq!(ctx.as_map()["accreditation_number"], "");
    }

    #[test]
    fn test_unknown_auditor_leaves_placeholder_visible() {
        let (cert, client, standard) = fixtures();
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let map = DocumentContext::build(&cert, &client, &standard, None, today).into_map();

        assert!(!map.contains_key("lead_auditor_name"));
        let rendered =
            crate::services::renderer::render("Audited by {{lead_auditor_name}}", &map).unwrap();
        assert_eq!(rendered, "Audited by {{lead_auditor_name}}");
    }

    #[test]
    fn test_with_value_override() {
        let (cert, client, standard) = fixtures();
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let map = DocumentContext::build(&cert, &client, &standard, None, today)
            .with_value("audit_number", "AUD-2026-0100")
            .into_map();

        assert_eq!(map["audit_number"], "AUD-2026-0100");
    }

    #[test]
    fn test_context_renders_template() {
        let (cert, client, standard) = fixtures();
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let map = DocumentContext::build(&cert, &client, &standard, None, today).into_map();

        let rendered = crate::services::renderer::render(
            "Certificate {{certificate_number}} issued to {{client_name}} for {{iso_standard_code}}",
            &map,
        )
        .unwrap();
        assert_eq!(
            rendered,
            "Certificate CRT-2026-00042 issued to Acme Manufacturing Ltd for ISO 9001:2015"
        );
    }

    #[test]
    fn test_document_relative_path() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(
            document_relative_path("CRT-2026-00042", today),
            "certificates/2026/08/CRT-2026-00042.txt"
        );
    }
}
