//! # trust-rules
//!
//! The rule-definition grammar of the TRUST verification engine.
//!
//! ## Overview
//!
//! Testers write pass/fail conditions as one compact string:
//!
//! ```text
//! UI_COMMON:  _.includes("${Status:}", "DONE");  !_.includes("${SomeField:}", "DONE")|&|API_RESPONSE:  _.includes("${$.description}", "Valid")
//! ```
//!
//! [`RuleParser`] splits it into a
//! [`VerificationEntityCollection`](trust_contracts::entity::VerificationEntityCollection),
//! one entity per category, rules in declaration order. [`TrustConfig`]
//! supplies the delimiters and the sandbox libraries, from TOML and/or the
//! environment.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use trust_rules::{RuleParser, TrustConfig};
//!
//! let config = TrustConfig::from_env()?;
//! let entities = RuleParser::new(config.delimiters).parse(definition);
//! ```

pub mod config;
pub mod grammar;
pub mod parser;

pub use config::TrustConfig;
pub use grammar::Delimiters;
pub use parser::{parse, RuleParser};

// ── Tests ─────────────────────────────────────────────────────────────────────
