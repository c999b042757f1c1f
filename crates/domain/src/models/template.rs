//! Document template domain models.
//!
//! Templates hold a text body with `{{name}}` placeholder markers. They are
//! versioned and typed; once a certification references a template the body
//! is immutable and edits produce a new version instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Category of document a template produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// ISO certificate documents.
    Certificate,
    /// Certification service contracts.
    Contract,
    /// Audit report documents.
    Report,
}

impl FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "certificate" => Ok(TemplateType::Certificate),
            "contract" => Ok(TemplateType::Contract),
            "report" => Ok(TemplateType::Report),
            _ => Err(format!("Unknown template type: {}", s)),
        }
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateType::Certificate => write!(f, "certificate"),
            TemplateType::Contract => write!(f, "contract"),
            TemplateType::Report => write!(f, "report"),
        }
    }
}

/// A stored document template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    /// Stable external identifier, distinct from the database primary key.
    pub template_id: String,
    pub name: String,
    pub description: Option<String>,
    pub template_type: TemplateType,
    /// Semantically ordered but stored as text; unique per
    /// `(template_type, version, is_default)`.
    pub version: String,
    pub is_default: bool,
    pub is_active: bool,
    /// Text body containing `{{name}}` placeholder markers.
    pub body: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a template.
///
/// The version is never supplied by the caller; the store allocates it.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    /// Caller-provided stable identifier; generated when absent.
    pub template_id: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub description: Option<String>,

    pub template_type: TemplateType,

    #[validate(length(min = 1))]
    pub body: String,

    #[serde(default)]
    pub is_default: bool,
}

/// Query parameters for listing templates.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListTemplatesQuery {
    pub template_type: Option<TemplateType>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_type_from_str() {
        assert_eq!(
            TemplateType::from_str("contract").unwrap(),
            TemplateType::Contract
        );
        assert_eq!(
            TemplateType::from_str("Certificate").unwrap(),
            TemplateType::Certificate
        );
        assert!(TemplateType::from_str("invoice").is_err());
    }

    #[test]
    fn test_template_type_display_roundtrip() {
        for ty in [
            TemplateType::Certificate,
            TemplateType::Contract,
            TemplateType::Report,
        ] {
            assert_eq!(TemplateType::from_str(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn test_create_template_request_validation() {
        let request = CreateTemplateRequest {
            template_id: None,
            name: "Certification Contract".to_string(),
            description: None,
            template_type: TemplateType::Contract,
            body: "Agreement between {{client_name}} and {{certification_body}}".to_string(),
            is_default: true,
        };
        assert!(request.validate().is_ok());

        let empty_body = CreateTemplateRequest {
            body: String::new(),
            ..request
        };
        assert!(empty_body.validate().is_err());
    }
}
