//! Common validation logic for certification and template inputs.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Certificate numbers: uppercase alphanumeric segments joined by dashes,
    /// e.g. `CRT-2026-00042` or `ACQ-ISO9001-0017`.
    static ref CERTIFICATE_NUMBER_RE: Regex =
        Regex::new(r"^[A-Z0-9]+(-[A-Z0-9]+)+$").expect("invalid certificate number regex");

    /// Template versions: dotted numeric segments with an optional numeric
    /// retry suffix, e.g. `1.0.20260823143015` or `1.0.20260823143015-2`.
    static ref TEMPLATE_VERSION_RE: Regex =
        Regex::new(r"^\d+\.\d+(\.\d+)*(-\d+)?$").expect("invalid template version regex");

    /// Placeholder names usable in template bodies.
    static ref PLACEHOLDER_NAME_RE: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid placeholder name regex");
}

/// Validate a certificate number. Usable as a `validator` custom function.
pub fn validate_certificate_number(value: &str) -> Result<(), ValidationError> {
    if value.len() > 100 {
        return Err(ValidationError::new("certificate_number_too_long"));
    }
    if !CERTIFICATE_NUMBER_RE.is_match(value) {
        return Err(ValidationError::new("certificate_number_format"));
    }
    Ok(())
}

/// Validate a template version string.
pub fn validate_template_version(value: &str) -> Result<(), ValidationError> {
    if !TEMPLATE_VERSION_RE.is_match(value) {
        return Err(ValidationError::new("template_version_format"));
    }
    Ok(())
}

/// Check whether a string is a legal placeholder name.
pub fn is_valid_placeholder_name(name: &str) -> bool {
    PLACEHOLDER_NAME_RE.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_number_accepts_standard_formats() {
        assert!(validate_certificate_number("CRT-2026-00042").is_ok());
        assert!(validate_certificate_number("ACQ-ISO9001-0017").is_ok());
    }

    #[test]
    fn test_certificate_number_rejects_bad_formats() {
        assert!(validate_certificate_number("crt-2026-00042").is_err());
        assert!(validate_certificate_number("CRT 2026 00042").is_err());
        assert!(validate_certificate_number("CRT").is_err());
        assert!(validate_certificate_number("").is_err());
    }

    #[test]
    fn test_template_version_formats() {
        assert!(validate_template_version("1.0").is_ok());
        assert!(validate_template_version("1.0.20260823143015").is_ok());
        assert!(validate_template_version("1.0.20260823143015-2").is_ok());
        assert!(validate_template_version("v1.0").is_err());
        assert!(validate_template_version("1.0-").is_err());
    }

    #[test]
    fn test_placeholder_names() {
        assert!(is_valid_placeholder_name("client_name"));
        assert!(is_valid_placeholder_name("_internal"));
        assert!(is_valid_placeholder_name("year2026"));
        assert!(!is_valid_placeholder_name("2026year"));
        assert!(!is_valid_placeholder_name("client name"));
        assert!(!is_valid_placeholder_name(""));
    }
}
