//! Flat `{{name}}` template resolution
//!
//! A single left-to-right scan replaces each placeholder with its scope
//! value. Resolved values are never re-scanned, so resolution is bounded
//! by the template length and cannot loop on self-referential values.
//! This is deliberately not a template language: no nesting, no
//! expressions, no defaults.

use crate::workflow::error::WorkflowError;
use std::collections::HashMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replace every `{{identifier}}` in `template` with its value from
/// `scope`. An identifier absent from scope is a fatal
/// [`WorkflowError::UnresolvedVariable`] naming both the identifier and
/// the template it appeared in — placeholders are never left in output.
pub fn resolve(template: &str, scope: &HashMap<String, String>) -> Result<String, WorkflowError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            // Unterminated braces are literal text, not a placeholder.
            out.push_str(&rest[start..]);
            return Ok(out);
        };

        let name = after[..end].trim();
        match scope.get(name) {
            Some(value) => out.push_str(value),
            None => {
                return Err(WorkflowError::UnresolvedVariable {
                    name: name.to_string(),
                    template: template.to_string(),
                })
            }
        }
        rest = &after[end + CLOSE.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Merge two scopes into a new map; `overrides` wins on conflicts and
/// neither input is modified.
pub fn merge_scope(
    base: &HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_bound_placeholders() {
        let result = resolve(
            "output/{{change_id}}/plan.md",
            &scope(&[("change_id", "42")]),
        )
        .unwrap();
        assert_eq!(result, "output/42/plan.md");
    }

    #[test]
    fn missing_variable_names_the_identifier_and_template() {
        let err = resolve("output/{{change_id}}/plan.md", &scope(&[])).unwrap_err();
        match err {
            WorkflowError::UnresolvedVariable { name, template } => {
                assert_eq!(name, "change_id");
                assert_eq!(template, "output/{{change_id}}/plan.md");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolution_is_total_and_idempotent() {
        let vars = scope(&[("topic", "caching"), ("change_id", "7")]);
        let once = resolve("research {{topic}} for change {{change_id}}", &vars).unwrap();
        assert!(!once.contains("{{"));
        let twice = resolve(&once, &vars).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        // A value containing placeholder syntax must pass through as-is.
        let vars = scope(&[("a", "{{b}}"), ("b", "boom")]);
        let result = resolve("x-{{a}}-y", &vars).unwrap();
        assert_eq!(result, "x-{{b}}-y");
    }

    #[test]
    fn whitespace_inside_braces_is_tolerated() {
        let result = resolve("{{ topic }}", &scope(&[("topic", "parsers")])).unwrap();
        assert_eq!(result, "parsers");
    }

    #[test]
    fn unterminated_braces_are_literal() {
        let result = resolve("a {{oops", &scope(&[])).unwrap();
        assert_eq!(result, "a {{oops");
    }

    #[test]
    fn merge_prefers_overrides_and_leaves_inputs_alone() {
        let base = scope(&[("topic", "base"), ("keep", "yes")]);
        let overrides = scope(&[("topic", "override")]);

        let merged = merge_scope(&base, &overrides);
        assert_eq!(merged.get("topic").unwrap(), "override");
        assert_eq!(merged.get("keep").unwrap(), "yes");
        assert_eq!(base.get("topic").unwrap(), "base");
        assert_eq!(overrides.len(), 1);
    }
}
