//! Engine configuration.
//!
//! `TrustConfig` is read from TOML and can then be overridden field by field
//! from the environment. Every field has a default, so an empty document (or
//! no file at all) is a valid configuration.
//!
//! ```toml
//! libraries = ["lodash"]
//! alerts_auto_confirm = true
//!
//! [delimiters]
//! types = "|&|"
//! category = ":  "
//! rules = ";  "
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use trust_contracts::error::{TrustError, TrustResult};

use crate::grammar::Delimiters;

/// Overrides `Delimiters::types`.
pub const ENV_TYPES_DELIMITER: &str = "TRUST_VERIFICATION_TYPES_DELIMITER";
/// Overrides `Delimiters::category`.
pub const ENV_TYPE_DELIMITER: &str = "TRUST_VERIFICATION_TYPE_DELIMITER";
/// Overrides `Delimiters::rules`.
pub const ENV_RULES_DELIMITER: &str = "TRUST_VERIFICATION_RULES_DELIMITER";
/// Overrides `libraries`; identifiers separated by `;`.
pub const ENV_LOAD_SCRIPTS: &str = "TRUST_LOAD_SCRIPTS";
/// Overrides `alerts_auto_confirm`; `true` or `false`.
pub const ENV_ALERTS_AUTO_CONFIRM: &str = "TRUST_ALERTS_AUTO_CONFIRM";

const LIBRARY_SEPARATOR: char = ';';

/// Settings shared by the parser, the expression sandbox, and UI glue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Rule-definition delimiters.
    pub delimiters: Delimiters,

    /// Helper libraries loaded into the boolean expression sandbox, by name or
    /// by a URL/path containing the name. Unknown entries are skipped with a
    /// warning when the sandbox is built.
    pub libraries: Vec<String>,

    /// Whether UI glue should confirm an alert dialog after verifying it.
    pub alerts_auto_confirm: bool,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            libraries: vec!["lodash".to_string()],
            alerts_auto_confirm: true,
        }
    }
}

impl TrustConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `TrustError::ConfigError` if the TOML is malformed, does not
    /// match the expected schema, or declares an empty delimiter.
    pub fn from_toml_str(s: &str) -> TrustResult<Self> {
        let config: TrustConfig = toml::from_str(s).map_err(|e| TrustError::ConfigError {
            reason: format!("failed to parse TRUST config TOML: {}", e),
        })?;
        config.delimiters.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> TrustResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TrustError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> TrustResult<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment-variable name.
    ///
    /// `lookup` returns `None` for unset keys, which leave the field as is.
    pub fn with_overrides<F>(mut self, lookup: F) -> TrustResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(types) = lookup(ENV_TYPES_DELIMITER) {
            self.delimiters.types = types;
        }
        if let Some(category) = lookup(ENV_TYPE_DELIMITER) {
            self.delimiters.category = category;
        }
        if let Some(rules) = lookup(ENV_RULES_DELIMITER) {
            self.delimiters.rules = rules;
        }
        if let Some(scripts) = lookup(ENV_LOAD_SCRIPTS) {
            self.libraries = scripts
                .split(LIBRARY_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(confirm) = lookup(ENV_ALERTS_AUTO_CONFIRM) {
            self.alerts_auto_confirm =
                confirm.trim().parse().map_err(|_| TrustError::ConfigError {
                    reason: format!(
                        "{ENV_ALERTS_AUTO_CONFIRM} must be 'true' or 'false', got '{confirm}'"
                    ),
                })?;
        }

        self.delimiters.validate()?;
        debug!(
            types = ?self.delimiters.types,
            category = ?self.delimiters.category,
            rules = ?self.delimiters.rules,
            libraries = ?self.libraries,
            "resolved TRUST configuration"
        );
        Ok(self)
    }
}
