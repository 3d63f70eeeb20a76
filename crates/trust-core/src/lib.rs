//! # trust-core
//!
//! The verification pipeline of the TRUST rule engine.
//!
//! This crate provides:
//! - The evaluator and collaborator traits (`BooleanEvaluator`,
//!   `QueryEvaluator`, `RuntimeValueSource`, `SchemaValidator`)
//! - `${name}` placeholder substitution and extraction
//! - The soft-assertion aggregator that reports every failing rule at once
//! - `RuleVerifier`, which wires them together per verification category
//!
//! Concrete evaluators live in `trust-eval`; rule parsing lives in
//! `trust-rules`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trust_core::RuleVerifier;
//!
//! let verifier = RuleVerifier::new(boolean, xpath, jsonpath);
//! verifier.verify(&entities, &values, VerificationCategory::UiCommon)?;
//! ```

pub mod orchestrator;
pub mod soft;
pub mod template;
pub mod traits;

pub use orchestrator::RuleVerifier;
pub use soft::{verify_all, SoftAssertions};
pub use template::{normalize_space, placeholders, substitute};
