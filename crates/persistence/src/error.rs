//! Repository error type.

use domain::DomainError;
use thiserror::Error;

/// Errors surfaced by repository operations.
///
/// Domain failures (invalid transitions, missing entities, exhausted version
/// allocation) carry through untouched so the API layer can map them to
/// response codes; everything else is a database failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Whether this error is a Postgres unique-constraint violation,
    /// optionally restricted to a specific constraint name.
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        let RepositoryError::Database(sqlx::Error::Database(db_err)) = self else {
            return false;
        };
        if db_err.code().as_deref() != Some("23505") {
            return false;
        }
        match constraint {
            Some(name) => db_err.constraint() == Some(name),
            None => true,
        }
    }

    /// Whether this error is a Postgres foreign-key violation, optionally
    /// restricted to a specific constraint name.
    pub fn is_foreign_key_violation(&self, constraint: Option<&str>) -> bool {
        let RepositoryError::Database(sqlx::Error::Database(db_err)) = self else {
            return false;
        };
        if db_err.code().as_deref() != Some("23503") {
            return false;
        }
        match constraint {
            Some(name) => db_err.constraint() == Some(name),
            None => true,
        }
    }
}

/// Fake Postgres errors for exercising constraint-dispatch logic in tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::RepositoryError;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;

    #[derive(Debug)]
    pub struct FakePgError {
        code: &'static str,
        constraint: &'static str,
    }

    impl std::fmt::Display for FakePgError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint \"{}\" violated", self.constraint)
        }
    }

    impl std::error::Error for FakePgError {}

    impl DatabaseError for FakePgError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    pub fn unique_violation(constraint: &'static str) -> RepositoryError {
        RepositoryError::Database(sqlx::Error::Database(Box::new(FakePgError {
            code: "23505",
            constraint,
        })))
    }

    pub fn foreign_key_violation(constraint: &'static str) -> RepositoryError {
        RepositoryError::Database(sqlx::Error::Database(Box::new(FakePgError {
            code: "23503",
            constraint,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{CertificationStatus, LifecycleAction};

    #[test]
    fn test_domain_error_passes_through() {
        let err: RepositoryError = DomainError::InvalidTransition {
            from: CertificationStatus::Revoked,
            action: LifecycleAction::Renew,
        }
        .into();
        assert!(matches!(err, RepositoryError::Domain(_)));
        assert!(!err.is_unique_violation(None));
    }

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        let err: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(!err.is_unique_violation(None));
    }

    #[test]
    fn test_unique_violation_matches_constraint_name() {
        let err = testing::unique_violation("templates_type_version_key");
        assert!(err.is_unique_violation(None));
        assert!(err.is_unique_violation(Some("templates_type_version_key")));
        assert!(!err.is_unique_violation(Some("certifications_certificate_number_key")));
        assert!(!err.is_foreign_key_violation(None));
    }

    #[test]
    fn test_foreign_key_violation_matches_constraint_name() {
        let err = testing::foreign_key_violation("certifications_template_id_fkey");
        assert!(err.is_foreign_key_violation(None));
        assert!(err.is_foreign_key_violation(Some("certifications_template_id_fkey")));
        assert!(!err.is_foreign_key_violation(Some("certifications_client_id_fkey")));
        assert!(!err.is_unique_violation(None));
    }
}
