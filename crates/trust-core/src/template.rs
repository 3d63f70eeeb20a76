//! `${name}` placeholder handling.
//!
//! Placeholders are the only templating construct in a rule string. For UI
//! categories the name is a key of the captured value map; for API responses
//! the name is itself an XPath or JSONPath query.

use trust_contracts::values::RuntimeValueMap;

const PLACEHOLDER_START: &str = "${";
const PLACEHOLDER_END: char = '}';

/// Collapse every run of whitespace to one space and trim both ends.
///
/// Captured UI text is often multi-line; inserted raw it would break string
/// literals inside the rule expression.
pub fn normalize_space(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace every `${name}` whose `name` is a key of `values` with the
/// whitespace-normalized value.
///
/// Unknown placeholders and an unterminated `${` are copied verbatim.
/// Substituted values are inserted literally and never re-expanded. When
/// `values` is empty or `expression` is blank the expression is returned as is.
pub fn substitute(values: &RuntimeValueMap, expression: &str) -> String {
    if values.is_empty() || expression.trim().is_empty() {
        return expression.to_string();
    }

    let mut out = String::with_capacity(expression.len());
    let mut rest = expression;

    while let Some(start) = rest.find(PLACEHOLDER_START) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + PLACEHOLDER_START.len()..];

        let Some(end) = after_open.find(PLACEHOLDER_END) else {
            rest = &rest[start..];
            break;
        };

        let name = &after_open[..end];
        match values.get(name) {
            Some(value) => out.push_str(&normalize_space(value)),
            None => out.push_str(&rest[start..start + PLACEHOLDER_START.len() + end + 1]),
        }
        rest = &after_open[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Every non-empty placeholder body in `expression`, in order of appearance.
///
/// A body runs from `${` to the first following `}`; an unterminated `${`
/// ends the scan.
pub fn placeholders(expression: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = expression;

    while let Some(start) = rest.find(PLACEHOLDER_START) {
        let after_open = &rest[start + PLACEHOLDER_START.len()..];
        let Some(end) = after_open.find(PLACEHOLDER_END) else {
            break;
        };
        if end > 0 {
            found.push(after_open[..end].to_string());
        }
        rest = &after_open[end + 1..];
    }

    found
}
