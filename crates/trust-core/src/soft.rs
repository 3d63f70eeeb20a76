//! Soft assertions: evaluate everything, then fail once.
//!
//! A tester must see every broken rule of a verification in one run. The
//! aggregator therefore never short-circuits: each expression is evaluated
//! and recorded, and only `finish` decides whether the batch failed.

use tracing::{debug, warn};

use trust_contracts::{
    category::VerificationCategory,
    error::{TrustError, TrustResult},
    values::RuntimeValueMap,
    verify::{ExpressionOutcome, ExpressionVerdict, VerificationReport},
};

use crate::template::substitute;
use crate::traits::BooleanEvaluator;

/// Collects per-expression outcomes for one verification call.
#[derive(Debug)]
pub struct SoftAssertions {
    report: VerificationReport,
}

impl SoftAssertions {
    pub fn new(category: VerificationCategory) -> Self {
        Self {
            report: VerificationReport::empty(category),
        }
    }

    /// Record the verdict for `expression` (the substituted rule text).
    pub fn record(&mut self, expression: impl Into<String>, verdict: ExpressionVerdict) {
        let expression = expression.into();
        match &verdict {
            ExpressionVerdict::True => debug!(%expression, "expression passed"),
            ExpressionVerdict::False => warn!(%expression, "expression evaluated false"),
            ExpressionVerdict::Broken { reason } => {
                warn!(%expression, %reason, "expression could not be evaluated")
            }
        }
        self.report.outcomes.push(ExpressionOutcome { expression, verdict });
    }

    /// Close the batch.
    ///
    /// Returns the report when every recorded expression passed, otherwise
    /// `TrustError::VerificationFailed` listing all failures in record order.
    pub fn finish(self) -> TrustResult<VerificationReport> {
        let failures = self.report.failures();
        debug!(
            verification_id = %self.report.verification_id,
            category = %self.report.category,
            evaluated = self.report.outcomes.len(),
            failure_count = failures.len(),
            "soft assertions complete"
        );

        if failures.is_empty() {
            Ok(self.report)
        } else {
            Err(TrustError::VerificationFailed {
                category: self.report.category,
                failures,
            })
        }
    }
}

/// Substitute `values` into every expression, evaluate each with `evaluator`,
/// and fail once at the end if any expression did not evaluate true.
pub fn verify_all<S: AsRef<str>>(
    evaluator: &dyn BooleanEvaluator,
    values: &RuntimeValueMap,
    expressions: &[S],
    category: VerificationCategory,
) -> TrustResult<VerificationReport> {
    let mut softly = SoftAssertions::new(category);

    for expression in expressions {
        let substituted = substitute(values, expression.as_ref());
        let verdict = evaluator.evaluate(&substituted);
        softly.record(substituted, verdict);
    }

    softly.finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Treats the literal text `"true"` as passing, `"broken"` as a broken
    /// expression, and anything else as false. Records every call.
    struct LiteralEvaluator {
        seen: Mutex<Vec<String>>,
    }

    impl LiteralEvaluator {
        fn new() -> Self {
            Self {
                seen: Mutex::new(vec![]),
            }
        }
    }

    impl BooleanEvaluator for LiteralEvaluator {
        fn evaluate(&self, expression: &str) -> ExpressionVerdict {
            self.seen.lock().unwrap().push(expression.to_string());
            match expression {
                "true" => ExpressionVerdict::True,
                "broken" => ExpressionVerdict::Broken {
                    reason: "cannot parse".to_string(),
                },
                _ => ExpressionVerdict::False,
            }
        }
    }

    #[test]
    fn all_passing_returns_report() {
        let evaluator = LiteralEvaluator::new();
        let report = verify_all(
            &evaluator,
            &RuntimeValueMap::new(),
            &["true", "true"],
            VerificationCategory::UiCommon,
        )
        .unwrap();

        assert!(report.passed());
        assert_eq!(report.outcomes.len(), 2);
    }

    #[test]
    fn evaluates_every_expression_before_failing() {
        let evaluator = LiteralEvaluator::new();
        let err = verify_all(
            &evaluator,
            &RuntimeValueMap::new(),
            &["false-one", "true", "broken", "false-two"],
            VerificationCategory::UiAlert,
        )
        .unwrap_err();

        // No short-circuit: all four expressions reached the evaluator.
        assert_eq!(evaluator.seen.lock().unwrap().len(), 4);

        match err {
            TrustError::VerificationFailed { category, failures } => {
                assert_eq!(category, VerificationCategory::UiAlert);
                let names: Vec<_> = failures.iter().map(|f| f.expression.as_str()).collect();
                assert_eq!(names, ["false-one", "broken", "false-two"]);
                assert_eq!(failures[1].error.as_deref(), Some("cannot parse"));
            }
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn records_substituted_expression_text() {
        let evaluator = LiteralEvaluator::new();
        let values: RuntimeValueMap = [("FLAG".to_string(), " true\n".to_string())]
            .into_iter()
            .collect();

        let report = verify_all(&evaluator, &values, &["${FLAG}"], VerificationCategory::UiCommon)
            .unwrap();

        assert_eq!(report.outcomes[0].expression, "true");
        assert_eq!(evaluator.seen.lock().unwrap()[0], "true");
    }

    #[test]
    fn empty_batch_passes() {
        let evaluator = LiteralEvaluator::new();
        let expressions: [&str; 0] = [];
        let report = verify_all(
            &evaluator,
            &RuntimeValueMap::new(),
            &expressions,
            VerificationCategory::UiError,
        )
        .unwrap();
        assert!(report.passed());
        assert!(report.outcomes.is_empty());
    }
}
