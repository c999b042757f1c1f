//! Placeholder rendering for template bodies.
//!
//! Every `{{name}}` marker in the body is replaced by the matching context
//! value. Placeholders absent from the context are left as literal text so
//! missing data stays visible in the produced document instead of silently
//! disappearing. Placeholder content is never interpreted as an expression;
//! this is the template-injection boundary. Output is byte-identical for
//! identical `(body, context)` inputs.

use std::collections::BTreeMap;

use crate::error::RenderError;
use shared::validation::is_valid_placeholder_name;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitute `{{name}}` placeholders in `body` with values from `context`.
///
/// Fails with `RenderError::Unterminated` when an opening marker has no
/// closing marker anywhere after it. Text between markers that is not a
/// legal placeholder name passes through unchanged.
pub fn render(body: &str, context: &BTreeMap<String, String>) -> Result<String, RenderError> {
    let mut output = String::with_capacity(body.len());
    let mut rest = body;
    let mut offset = 0usize;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let Some(end) = after_open.find(CLOSE) else {
            return Err(RenderError::Unterminated {
                offset: offset + start,
            });
        };

        let name = &after_open[..end];
        if is_valid_placeholder_name(name) {
            match context.get(name) {
                Some(value) => output.push_str(value),
                // Missing key: keep the literal marker.
                None => {
                    output.push_str(OPEN);
                    output.push_str(name);
                    output.push_str(CLOSE);
                }
            }
            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        } else {
            // Not a placeholder; emit the opening marker literally and keep
            // scanning from just past it.
            output.push_str(OPEN);
            let consumed = start + OPEN.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
    }

    output.push_str(rest);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_substitution() {
        let ctx = context(&[("client_name", "Acme Ltd"), ("iso_standard_code", "ISO 9001:2015")]);
        let body = "This certifies that {{client_name}} meets {{iso_standard_code}}.";
        assert_eq!(
            render(body, &ctx).unwrap(),
            "This certifies that Acme Ltd meets ISO 9001:2015."
        );
    }

    #[test]
    fn test_missing_key_left_as_literal() {
        let ctx = context(&[("client_name", "Acme Ltd")]);
        let body = "{{client_name}} / {{accreditation_number}}";
        assert_eq!(
            render(body, &ctx).unwrap(),
            "Acme Ltd / {{accreditation_number}}"
        );
    }

    #[test]
    fn test_repeated_placeholder_replaced_everywhere() {
        let ctx = context(&[("year", "2026")]);
        assert_eq!(
            render("{{year}}-{{year}}-{{year}}", &ctx).unwrap(),
            "2026-2026-2026"
        );
    }

    #[test]
    fn test_deterministic_output() {
        let ctx = context(&[("a", "1"), ("b", "2")]);
        let body = "{{a}} {{b}} {{c}}";
        let first = render(body, &ctx).unwrap();
        let second = render(body, &ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unterminated_placeholder_is_error() {
        let ctx = context(&[]);
        let err = render("valid text {{client_name", &ctx).unwrap_err();
        assert_eq!(err, RenderError::Unterminated { offset: 11 });
    }

    #[test]
    fn test_non_placeholder_braces_pass_through() {
        let ctx = context(&[("x", "1")]);
        // Content with a space is not a placeholder name.
        assert_eq!(
            render("{{not a name}} {{x}}", &ctx).unwrap(),
            "{{not a name}} 1"
        );
        // Lone closing braces are plain text.
        assert_eq!(render("}} {{x}}", &ctx).unwrap(), "}} 1");
    }

    #[test]
    fn test_no_nested_evaluation() {
        // A context value that itself looks like a placeholder is inserted
        // verbatim, never re-expanded.
        let ctx = context(&[("a", "{{b}}"), ("b", "secret")]);
        assert_eq!(render("{{a}}", &ctx).unwrap(), "{{b}}");
    }

    #[test]
    fn test_empty_body_and_empty_context() {
        assert_eq!(render("", &context(&[])).unwrap(), "");
        assert_eq!(
            render("no markers here", &context(&[])).unwrap(),
            "no markers here"
        );
    }
}
