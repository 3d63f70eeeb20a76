//! JSONPath extraction from JSON payloads.

use serde_json::Value;
use serde_json_path::JsonPath;
use tracing::warn;

use trust_core::traits::QueryEvaluator;

/// Runs JSONPath queries against JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathEvaluator;

impl QueryEvaluator for JsonPathEvaluator {
    fn query(&self, query: &str, payload: &str) -> String {
        evaluate_json_path_to_string(query, payload)
    }
}

/// Evaluate `query` against `json` and return the first match as a string.
///
/// The query result is always treated as a node list, whether or not the
/// path is definite. String matches are returned unquoted; every other value
/// is rendered as compact JSON. No match, malformed JSON, or an invalid path
/// yields an empty string.
pub fn evaluate_json_path_to_string(query: &str, json: &str) -> String {
    match try_evaluate(query, json) {
        Ok(value) => value,
        Err(reason) => {
            warn!(%query, %reason, "impossible to evaluate the JSONPath expression");
            String::new()
        }
    }
}

fn try_evaluate(query: &str, json: &str) -> Result<String, String> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| format!("invalid JSON payload: {e}"))?;
    let path = JsonPath::parse(query).map_err(|e| format!("invalid JSONPath: {e}"))?;

    let first = path.query(&document).all().into_iter().next();
    Ok(match first {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    })
}
