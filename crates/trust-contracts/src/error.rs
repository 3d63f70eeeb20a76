//! Error types for the TRUST verification engine.
//!
//! Per-rule problems never surface as errors: malformed rule blocks are
//! dropped and broken expressions evaluate to a failing verdict. Only the
//! aggregate `VerificationFailed` crosses the verification boundary; the other
//! variants come from configuration and collaborator seams.

use thiserror::Error;

use crate::category::VerificationCategory;
use crate::verify::ExpressionFailure;

/// The unified error type for the TRUST crates.
#[derive(Debug, Error)]
pub enum TrustError {
    /// One or more expressions in a verification batch evaluated false.
    ///
    /// `failures` lists every failing expression in evaluation order, not only
    /// the first.
    #[error(
        "{category} verification failed: {} expression(s) evaluated false{}",
        .failures.len(),
        render_failures(.failures)
    )]
    VerificationFailed {
        category: VerificationCategory,
        failures: Vec<ExpressionFailure>,
    },

    /// A configuration value (TOML file or environment override) is invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A payload failed structural schema validation.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// A runtime value source could not capture the values to verify.
    #[error("runtime value capture failed: {reason}")]
    CaptureFailed { reason: String },
}

fn render_failures(failures: &[ExpressionFailure]) -> String {
    failures.iter().map(|f| format!("\n  - {f}")).collect()
}

/// Convenience alias used throughout the TRUST crates.
pub type TrustResult<T> = Result<T, TrustError>;
