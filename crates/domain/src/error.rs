//! Domain error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{CertificationStatus, LifecycleAction};

/// Errors produced by the certification and template core.
///
/// All variants are reported to the caller as typed failures; none are
/// retried automatically except the bounded retry inside version allocation.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A lifecycle action was invoked from a state that does not allow it.
    /// The entity is left untouched and no history entry is written.
    #[error("invalid transition: cannot {action} a certification in status {from}")]
    InvalidTransition {
        from: CertificationStatus,
        action: LifecycleAction,
    },

    /// A renewal's requested expiry does not extend past the current one.
    #[error("renewal expiry {requested} does not extend beyond the current expiry {current}")]
    RenewalNotExtended {
        current: NaiveDate,
        requested: NaiveDate,
    },

    /// A referenced template or certification does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A template deletion was blocked because certifications reference it.
    #[error("template {0} is referenced by existing certifications and cannot be deleted")]
    TemplateInUse(uuid::Uuid),

    /// Version allocation exhausted its retry budget without finding a
    /// unique `(template_type, version, is_default)` triple.
    #[error("failed to allocate a unique template version after {attempts} attempts")]
    VersionAllocationFailed { attempts: u32 },

    /// The template body could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors produced by the placeholder renderer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// An opening `{{` marker with no matching `}}`.
    #[error("unterminated placeholder marker at byte offset {offset}")]
    Unterminated { offset: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = DomainError::InvalidTransition {
            from: CertificationStatus::Revoked,
            action: LifecycleAction::Renew,
        };
        assert_eq!(
            err.to_string(),
            "invalid transition: cannot renew a certification in status revoked"
        );
    }

    #[test]
    fn test_render_error_message() {
        let err = RenderError::Unterminated { offset: 12 };
        assert_eq!(
            err.to_string(),
            "unterminated placeholder marker at byte offset 12"
        );
    }

    #[test]
    fn test_version_allocation_failed_message() {
        let err = DomainError::VersionAllocationFailed { attempts: 5 };
        assert!(err.to_string().contains("5 attempts"));
    }
}
