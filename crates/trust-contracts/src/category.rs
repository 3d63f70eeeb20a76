//! Verification categories.
//!
//! Every rule block in a rule definition starts with a category token. The
//! category decides where runtime values come from (captured UI text or an API
//! payload) and which evaluators run over the rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrustError;

/// The closed set of verification categories understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationCategory {
    /// Text of a browser alert/confirm/prompt dialog, captured as `ALERT_MSG`.
    UiAlert,
    /// Visible text of an error container, captured as `ERROR_MSG`.
    UiError,
    /// Arbitrary tester-defined values captured from the UI.
    UiCommon,
    /// An API response payload; placeholders are XPath or JSONPath queries.
    ApiResponse,
}

impl VerificationCategory {
    /// Every category, in declaration order.
    pub const ALL: [VerificationCategory; 4] = [
        VerificationCategory::UiAlert,
        VerificationCategory::UiError,
        VerificationCategory::UiCommon,
        VerificationCategory::ApiResponse,
    ];

    /// Match a rule-string category token, ignoring case and surrounding
    /// whitespace. Returns `None` for unknown tokens.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(token))
    }

    /// The canonical upper-case token, e.g. `"API_RESPONSE"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationCategory::UiAlert => "UI_ALERT",
            VerificationCategory::UiError => "UI_ERROR",
            VerificationCategory::UiCommon => "UI_COMMON",
            VerificationCategory::ApiResponse => "API_RESPONSE",
        }
    }
}

impl fmt::Display for VerificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationCategory {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TrustError::ConfigError {
            reason: format!("unknown verification category '{s}'"),
        })
    }
}
