//! Template version allocation.
//!
//! Versions are composed from a fixed semantic prefix and the creation
//! timestamp down to the second: `1.0.YYYYMMDDHHMMSS`. Two templates of the
//! same type created within the same second would still collide on the
//! `(template_type, version, is_default)` unique constraint, so the store
//! retries with a monotonically incremented suffix on constraint violation.
//! Allocation itself is pure computation; the caller persists.

use chrono::{DateTime, Utc};

/// Semantic prefix for allocated versions.
pub const VERSION_PREFIX: &str = "1.0";

/// Maximum allocation attempts before surfacing
/// `DomainError::VersionAllocationFailed`.
pub const MAX_VERSION_ATTEMPTS: u32 = 5;

/// Allocate a version string for a new template from the creation instant.
pub fn allocate_version(now: DateTime<Utc>) -> String {
    format!("{}.{}", VERSION_PREFIX, now.format("%Y%m%d%H%M%S"))
}

/// Version string for a retry attempt.
///
/// Attempt 0 is the base version unchanged; attempt N appends `-N` so the
/// sequence of candidates within one second is strictly increasing and
/// therefore collision-free against earlier attempts.
pub fn versioned_with_attempt(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_allocate_version_format() {
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 30, 15).unwrap();
        assert_eq!(allocate_version(now), "1.0.20260823143015");
    }

    #[test]
    fn test_allocated_version_passes_validation() {
        let version = allocate_version(Utc::now());
        assert!(shared::validation::validate_template_version(&version).is_ok());
        assert!(
            shared::validation::validate_template_version(&versioned_with_attempt(&version, 3))
                .is_ok()
        );
    }

    #[test]
    fn test_distinct_versions_across_seconds() {
        let first = Utc.with_ymd_and_hms(2026, 8, 23, 14, 30, 15).unwrap();
        let second = first + chrono::Duration::seconds(1);
        assert_ne!(allocate_version(first), allocate_version(second));
    }

    #[test]
    fn test_retry_suffixes_are_distinct_within_same_second() {
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 30, 15).unwrap();
        let base = allocate_version(now);

        let mut candidates: Vec<String> = (0..MAX_VERSION_ATTEMPTS)
            .map(|attempt| versioned_with_attempt(&base, attempt))
            .collect();
        let len_before = candidates.len();
        candidates.sort();
        candidates.dedup();
        assert_eq!(candidates.len(), len_before);
    }

    #[test]
    fn test_attempt_zero_is_base_version() {
        assert_eq!(
            versioned_with_attempt("1.0.20260823143015", 0),
            "1.0.20260823143015"
        );
        assert_eq!(
            versioned_with_attempt("1.0.20260823143015", 2),
            "1.0.20260823143015-2"
        );
    }
}
