//! # trust-contracts
//!
//! Shared types and contracts for the TRUST rule-based verification engine.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate, only the verification entity model, value maps, verdict and
//! report types, and the error type.

pub mod category;
pub mod entity;
pub mod error;
pub mod values;
pub mod verify;
