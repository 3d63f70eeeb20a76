//! Runtime values substituted into rule placeholders.

use std::collections::HashMap;

/// Placeholder name → captured runtime value.
///
/// For UI categories the map is supplied by the caller (or captured through a
/// `RuntimeValueSource`). For `API_RESPONSE` it is built internally, keyed by
/// the literal XPath/JSONPath query found inside each placeholder.
pub type RuntimeValueMap = HashMap<String, String>;

/// Template name under which the text of a UI alert dialog is captured.
pub const ALERT_MSG: &str = "ALERT_MSG";

/// Template name under which the visible text of an error container is captured.
pub const ERROR_MSG: &str = "ERROR_MSG";
