//! ISO standard reference models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An ISO standard clients can be certified against, e.g. `ISO 9001:2015`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsoStandard {
    pub id: Uuid,
    /// Unique code, e.g. `ISO 9001:2015`.
    pub code: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating an ISO standard.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIsoStandardRequest {
    #[validate(length(min = 1, max = 20))]
    pub code: String,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_iso_standard_validation() {
        let request = CreateIsoStandardRequest {
            code: "ISO 9001:2015".to_string(),
            name: "Quality management systems".to_string(),
            description: "Requirements for a quality management system".to_string(),
        };
        assert!(request.validate().is_ok());

        let empty_code = CreateIsoStandardRequest {
            code: String::new(),
            ..request
        };
        assert!(empty_code.validate().is_err());
    }
}
