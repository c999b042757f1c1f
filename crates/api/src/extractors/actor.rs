//! Acting-identity extractor.
//!
//! Authentication is out of scope for this service; the deployment gateway
//! authenticates callers and forwards the acting user's id in the
//! `X-Actor-Id` header. History entries record it as `performed_by`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the acting user's id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// The acting identity for the current request, when one was forwarded.
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub Option<Uuid>);

impl Actor {
    pub fn id(&self) -> Option<Uuid> {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(ACTOR_ID_HEADER) {
            None => Ok(Actor(None)),
            Some(value) => {
                let raw = value.to_str().map_err(|_| {
                    ApiError::Validation("X-Actor-Id header is not valid UTF-8".to_string())
                })?;
                let id = raw.parse::<Uuid>().map_err(|_| {
                    ApiError::Validation("X-Actor-Id header is not a valid UUID".to_string())
                })?;
                Ok(Actor(Some(id)))
            }
        }
    }
}
