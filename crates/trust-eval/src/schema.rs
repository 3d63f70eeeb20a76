//! JSON Schema validation of API payloads.
//!
//! Structural validation runs independently of rule verification: a test
//! step may validate a payload, verify its rules, or both, in any order.

use serde_json::Value;
use tracing::{debug, warn};

use trust_contracts::error::{TrustError, TrustResult};
use trust_core::traits::SchemaValidator;

/// Validates JSON payloads against one compiled JSON Schema document.
pub struct JsonSchemaValidator {
    schema_id: String,
    validator: jsonschema::Validator,
}

impl JsonSchemaValidator {
    /// Compile `schema`.
    ///
    /// Returns `TrustError::ConfigError` when the schema document itself is
    /// invalid.
    pub fn new(schema_id: impl Into<String>, schema: &Value) -> TrustResult<Self> {
        let schema_id = schema_id.into();
        let validator = jsonschema::validator_for(schema).map_err(|e| TrustError::ConfigError {
            reason: format!("invalid JSON Schema document '{schema_id}': {e}"),
        })?;
        Ok(Self { schema_id, validator })
    }

    /// Parse `schema` as JSON and compile it.
    pub fn from_json_str(schema_id: impl Into<String>, schema: &str) -> TrustResult<Self> {
        let schema: Value = serde_json::from_str(schema).map_err(|e| TrustError::ConfigError {
            reason: format!("failed to parse JSON Schema: {e}"),
        })?;
        Self::new(schema_id, &schema)
    }

    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }
}

impl SchemaValidator for JsonSchemaValidator {
    /// Validate `payload`. A blank payload has nothing to validate and passes.
    ///
    /// Every violation is collected into one `SchemaValidation` error.
    fn validate(&self, payload: &str) -> TrustResult<()> {
        if payload.trim().is_empty() {
            debug!(schema_id = %self.schema_id, "blank payload; skipping schema validation");
            return Ok(());
        }

        let instance: Value = serde_json::from_str(payload).map_err(|e| {
            TrustError::SchemaValidation {
                reason: format!("payload is not valid JSON: {e}"),
            }
        })?;

        let violations: Vec<String> = self
            .validator
            .iter_errors(&instance)
            .map(|error| format!("at '{}': {}", error.instance_path, error))
            .collect();

        if violations.is_empty() {
            debug!(schema_id = %self.schema_id, "payload conforms to schema");
            return Ok(());
        }

        warn!(
            schema_id = %self.schema_id,
            violations = violations.len(),
            "payload violates schema"
        );
        Err(TrustError::SchemaValidation {
            reason: format!("{}: {}", self.schema_id, violations.join("; ")),
        })
    }
}
