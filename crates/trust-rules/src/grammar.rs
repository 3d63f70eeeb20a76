//! Delimiters of the rule-definition grammar.
//!
//! ```text
//! definition := block ( TYPES block )*
//! block      := category TYPE body
//! body       := rule ( RULES rule )*
//! ```
//!
//! All three delimiters are literal strings, configurable through
//! `TrustConfig`. The defaults leave room for colons and semicolons inside
//! rule expressions (e.g. `${Status:}`) because the type and rules delimiters
//! require two trailing spaces.

use serde::{Deserialize, Serialize};

use trust_contracts::error::{TrustError, TrustResult};

/// Separates top-level rule blocks.
pub const DEFAULT_TYPES_DELIMITER: &str = "|&|";
/// Separates a block's category token from its rule body.
pub const DEFAULT_TYPE_DELIMITER: &str = ":  ";
/// Separates individual rules inside a body.
pub const DEFAULT_RULES_DELIMITER: &str = ";  ";

/// The three delimiters used to split a rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
    /// Between blocks, e.g. `UI_ALERT:  a|&|UI_ERROR:  b`.
    pub types: String,
    /// Between the category token and the body, e.g. `UI_ALERT:  a`.
    pub category: String,
    /// Between rules in one body, e.g. `a;  b`.
    pub rules: String,
}

impl Delimiters {
    /// Every delimiter must be non-empty.
    pub fn validate(&self) -> TrustResult<()> {
        for (name, value) in [
            ("types", &self.types),
            ("category", &self.category),
            ("rules", &self.rules),
        ] {
            if value.is_empty() {
                return Err(TrustError::ConfigError {
                    reason: format!("the {name} delimiter must not be empty"),
                });
            }
        }
        Ok(())
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES_DELIMITER.to_string(),
            category: DEFAULT_TYPE_DELIMITER.to_string(),
            rules: DEFAULT_RULES_DELIMITER.to_string(),
        }
    }
}
