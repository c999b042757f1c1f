//! Client domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Business status of a client relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientStatus {
    Active,
    Inactive,
    AtRisk,
    Churned,
}

impl FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ClientStatus::Active),
            "inactive" => Ok(ClientStatus::Inactive),
            "at-risk" => Ok(ClientStatus::AtRisk),
            "churned" => Ok(ClientStatus::Churned),
            _ => Err(format!("Unknown client status: {}", s)),
        }
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientStatus::Active => write!(f, "active"),
            ClientStatus::Inactive => write!(f, "inactive"),
            ClientStatus::AtRisk => write!(f, "at-risk"),
            ClientStatus::Churned => write!(f, "churned"),
        }
    }
}

/// A certified (or prospective) client organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub industry: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    pub contact: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 50))]
    pub phone: String,

    #[validate(length(min = 1))]
    pub address: String,

    pub industry: Option<String>,
    pub status: Option<ClientStatus>,
}

/// Request payload for updating a client.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub contact: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,

    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: Option<ClientStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_status_roundtrip() {
        for status in [
            ClientStatus::Active,
            ClientStatus::Inactive,
            ClientStatus::AtRisk,
            ClientStatus::Churned,
        ] {
            assert_eq!(ClientStatus::from_str(&status.to_string()).unwrap(), status);
        }
        assert!(ClientStatus::from_str("dormant").is_err());
    }

    #[test]
    fn test_create_client_request_validation() {
        let request = CreateClientRequest {
            name: "Acme Manufacturing Ltd".to_string(),
            contact: "Jane Smith".to_string(),
            email: "jane@acme.example".to_string(),
            phone: "+44 29 2018 0000".to_string(),
            address: "168 City Road, Cardiff".to_string(),
            industry: Some("Manufacturing".to_string()),
            status: None,
        };
        assert!(request.validate().is_ok());

        let bad_email = CreateClientRequest {
            email: "not-an-email".to_string(),
            ..request
        };
        assert!(bad_email.validate().is_err());
    }
}
