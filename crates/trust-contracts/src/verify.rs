//! Verdicts, per-expression outcomes, and verification reports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::VerificationCategory;

/// The result of evaluating one boolean rule expression.
///
/// `Broken` covers syntax errors, unknown functions, and type errors. It fails
/// the rule exactly like `False`; the reason is kept only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionVerdict {
    True,
    False,
    Broken { reason: String },
}

impl ExpressionVerdict {
    pub fn is_true(&self) -> bool {
        matches!(self, ExpressionVerdict::True)
    }
}

impl From<bool> for ExpressionVerdict {
    fn from(value: bool) -> Self {
        if value {
            ExpressionVerdict::True
        } else {
            ExpressionVerdict::False
        }
    }
}

/// One evaluated expression, recorded under its substituted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionOutcome {
    /// The expression after placeholder substitution.
    pub expression: String,
    pub verdict: ExpressionVerdict,
}

impl ExpressionOutcome {
    pub fn passed(&self) -> bool {
        self.verdict.is_true()
    }

    /// The failure record for this outcome, or `None` when it passed.
    pub fn failure(&self) -> Option<ExpressionFailure> {
        let error = match &self.verdict {
            ExpressionVerdict::True => return None,
            ExpressionVerdict::False => None,
            ExpressionVerdict::Broken { reason } => Some(reason.clone()),
        };
        Some(ExpressionFailure {
            expression: self.expression.clone(),
            error,
        })
    }
}

/// A failing expression as reported inside `TrustError::VerificationFailed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionFailure {
    /// The expression after placeholder substitution, verbatim.
    pub expression: String,
    /// Set when the expression could not be evaluated at all.
    pub error: Option<String>,
}

impl fmt::Display for ExpressionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{} [evaluation error: {}]", self.expression, error),
            None => f.write_str(&self.expression),
        }
    }
}

/// Every outcome of one verification call for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub verification_id: Uuid,
    pub category: VerificationCategory,
    pub evaluated_at: DateTime<Utc>,
    /// Outcomes in evaluation order.
    pub outcomes: Vec<ExpressionOutcome>,
}

impl VerificationReport {
    /// An empty report for `category`. Used when the category has no rules.
    pub fn empty(category: VerificationCategory) -> Self {
        Self {
            verification_id: Uuid::new_v4(),
            category,
            evaluated_at: Utc::now(),
            outcomes: Vec::new(),
        }
    }

    /// True only if every outcome passed. Vacuously true for an empty report.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(ExpressionOutcome::passed)
    }

    /// The failing outcomes, in evaluation order.
    pub fn failures(&self) -> Vec<ExpressionFailure> {
        self.outcomes.iter().filter_map(ExpressionOutcome::failure).collect()
    }
}
