//! Trait seams of the TRUST verification pipeline.
//!
//! Evaluators are pure from the orchestrator's point of view: they take an
//! expression (and for queries, a payload) and always produce a value.
//! Evaluation problems are folded into that value and never raised, so a
//! malformed rule string cannot abort a run.
//!
//! - `BooleanEvaluator`: evaluates a substituted rule to a verdict
//! - `QueryEvaluator`: extracts a string from an XML or JSON payload
//! - `RuntimeValueSource`: collaborator that captures UI text
//! - `SchemaValidator`: collaborator that checks payload structure

use trust_contracts::{error::TrustResult, values::RuntimeValueMap, verify::ExpressionVerdict};

/// Evaluates one rule expression after placeholder substitution.
///
/// Implementations must not mutate shared state while evaluating: one
/// evaluator may serve every test thread of a parallel runner.
pub trait BooleanEvaluator: Send + Sync {
    /// Evaluate `expression`. Errors become `ExpressionVerdict::Broken`.
    fn evaluate(&self, expression: &str) -> ExpressionVerdict;

    /// Evaluate `expression` to a plain boolean. Broken expressions are false.
    fn evaluate_bool(&self, expression: &str) -> bool {
        self.evaluate(expression).is_true()
    }
}

/// Runs a query language (XPath, JSONPath) against a raw payload.
pub trait QueryEvaluator: Send + Sync {
    /// Return the string result of `query` over `payload`, or an empty string
    /// when the payload or query cannot be evaluated or nothing matched.
    fn query(&self, query: &str, payload: &str) -> String;
}

/// Supplies captured runtime values for the UI categories.
///
/// A browser-driving layer implements this to expose e.g. `ALERT_MSG` with the
/// text of the current alert dialog.
pub trait RuntimeValueSource {
    fn capture_runtime_values(&self) -> TrustResult<RuntimeValueMap>;
}

/// Checks a payload's structure independently of rule verification.
pub trait SchemaValidator: Send + Sync {
    /// Return `Ok(())` when `payload` conforms, or
    /// `TrustError::SchemaValidation` describing every violation.
    fn validate(&self, payload: &str) -> TrustResult<()>;
}
