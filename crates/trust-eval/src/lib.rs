//! # trust-eval
//!
//! Concrete evaluators for the TRUST verification engine.
//!
//! - [`ScriptSandbox`] implements
//!   [`BooleanEvaluator`](trust_core::traits::BooleanEvaluator) on top of the
//!   `evalexpr` interpreter, with loadable helper libraries (`lodash`).
//! - [`XPathEvaluator`] and [`JsonPathEvaluator`] implement
//!   [`QueryEvaluator`](trust_core::traits::QueryEvaluator) for XML and JSON
//!   API payloads.
//! - [`JsonSchemaValidator`] implements
//!   [`SchemaValidator`](trust_core::traits::SchemaValidator) with the
//!   `jsonschema` crate.
//!
//! Every evaluator folds its errors into its return value; none of them can
//! make a verification call fail other than by failing a rule.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use trust_eval::rule_verifier;
//!
//! let verifier = rule_verifier(&config.libraries);
//! verifier.verify_api_response(payload, "application/json", &entities)?;
//! ```

pub mod jsonpath;
pub mod schema;
pub mod script;
pub mod xpath;

pub use jsonpath::{evaluate_json_path_to_string, JsonPathEvaluator};
pub use schema::JsonSchemaValidator;
pub use script::ScriptSandbox;
pub use xpath::{evaluate_xpath_to_string, XPathEvaluator};

use trust_core::RuleVerifier;

/// A `RuleVerifier` wired with a `ScriptSandbox` loaded with `libraries` and
/// the XPath/JSONPath payload evaluators.
pub fn rule_verifier<S: AsRef<str>>(libraries: &[S]) -> RuleVerifier {
    RuleVerifier::new(
        Box::new(ScriptSandbox::new(libraries)),
        Box::new(XPathEvaluator),
        Box::new(JsonPathEvaluator),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use trust_contracts::{
        category::VerificationCategory,
        error::TrustError,
        values::{RuntimeValueMap, ALERT_MSG, ERROR_MSG},
    };
    use trust_rules::parse;

    use super::rule_verifier;

    const XML_CONTENT_TYPE: &str = "application/xml";
    const JSON_CONTENT_TYPE: &str = "application/json";

    const XML_RESPONSE_PAYLOAD: &str = "<Response>\n    <node1>1</node1>\n    <node2>2</node2>\n    <node3>3</node3>\n    <description>Valid response</description>\n    <node5>5</node5>\n</Response>";
    const JSON_RESPONSE_PAYLOAD: &str = "{\n    \"node1\": \"1\",\n    \"node2\": \"2\",\n    \"node3\": \"3\",\n    \"description\": \"Valid response\",\n    \"node5\": \"5\"\n}";

    const UI_COMMON_RULES: &str =
        "UI_COMMON:  _.includes(\"${Status:}\", \"DONE\");  !_.includes(\"${SomeField:}\", \"DONE\")";
    const UI_ALERT_RULES: &str = "UI_ALERT:  _.includes(\"${ALERT_MSG}\", \"TestMePlease\")";
    const XML_API_SUCCESS_RULES: &str =
        "API_RESPONSE:  _.includes(\"${/Response/description}\", \"Valid response\")";
    const JSON_API_SUCCESS_RULES: &str =
        "API_RESPONSE:  _.includes(\"${$.description}\", \"Valid response\")";
    const XML_API_FAIL_RULES: &str =
        "API_RESPONSE:  _.includes(\"${/Response/description}\", \"InValid response\")";
    const JSON_API_FAIL_RULES: &str =
        "API_RESPONSE:  _.includes(\"${$.description}\", \"InValid response\")";

    fn values(pairs: &[(&str, &str)]) -> RuntimeValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lodash() -> trust_core::RuleVerifier {
        rule_verifier(&["lodash"])
    }

    // ── UI_COMMON ─────────────────────────────────────────────────────────────

    #[test]
    fn test_ui_common_rules_pass() {
        lodash()
            .verify(
                &parse(UI_COMMON_RULES),
                &values(&[("SomeField:", "TestMe"), ("Status:", "DONE")]),
                VerificationCategory::UiCommon,
            )
            .unwrap();
    }

    #[test]
    fn test_ui_common_rules_fail_lists_failing_rule() {
        let err = lodash()
            .verify(
                &parse(UI_COMMON_RULES),
                &values(&[("SomeField:", "TestMe"), ("Status:", "QWE")]),
                VerificationCategory::UiCommon,
            )
            .unwrap_err();

        match err {
            TrustError::VerificationFailed { category, failures } => {
                assert_eq!(category, VerificationCategory::UiCommon);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].expression, "_.includes(\"QWE\", \"DONE\")");
                assert_eq!(failures[0].error, None);
            }
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_every_failing_rule_is_reported() {
        let err = lodash()
            .verify(
                &parse(UI_COMMON_RULES),
                &values(&[("SomeField:", "DONE"), ("Status:", "QWE")]),
                VerificationCategory::UiCommon,
            )
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("2 expression(s)"), "{msg}");
        assert!(msg.contains("_.includes(\"QWE\", \"DONE\")"), "{msg}");
        assert!(msg.contains("!_.includes(\"DONE\", \"DONE\")"), "{msg}");
    }

    #[test]
    fn test_multiline_captured_text_is_normalized() {
        lodash()
            .verify(
                &parse(UI_COMMON_RULES),
                &values(&[("SomeField:", "Test\n   Me"), ("Status:", "  DONE\n  ")]),
                VerificationCategory::UiCommon,
            )
            .unwrap();
    }

    #[test]
    fn test_broken_rule_fails_with_diagnostic() {
        let err = lodash()
            .verify(
                &parse("UI_COMMON:  not valid js (;  true"),
                &RuntimeValueMap::new(),
                VerificationCategory::UiCommon,
            )
            .unwrap_err();

        match err {
            TrustError::VerificationFailed { failures, .. } => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].expression, "not valid js (");
                assert!(failures[0].error.is_some());
            }
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
    }

    // ── UI_ALERT / UI_ERROR ───────────────────────────────────────────────────

    #[test]
    fn test_ui_alert_rules() {
        let verifier = lodash();
        let entities = parse(UI_ALERT_RULES);

        verifier
            .verify(&entities, &values(&[(ALERT_MSG, "TestMePlease")]), VerificationCategory::UiAlert)
            .unwrap();

        assert!(verifier
            .verify(&entities, &values(&[(ALERT_MSG, "QWE")]), VerificationCategory::UiAlert)
            .is_err());
    }

    #[test]
    fn test_category_without_rules_is_satisfied() {
        let report = lodash()
            .verify(
                &parse(UI_ALERT_RULES),
                &values(&[(ERROR_MSG, "anything")]),
                VerificationCategory::UiError,
            )
            .unwrap();
        assert!(report.outcomes.is_empty());
    }

    // ── API_RESPONSE ──────────────────────────────────────────────────────────

    #[test]
    fn test_api_response_success() {
        let verifier = lodash();

        verifier
            .verify_api_response(XML_RESPONSE_PAYLOAD, XML_CONTENT_TYPE, &parse(XML_API_SUCCESS_RULES))
            .unwrap();

        verifier
            .verify_api_response(JSON_RESPONSE_PAYLOAD, JSON_CONTENT_TYPE, &parse(JSON_API_SUCCESS_RULES))
            .unwrap();
    }

    #[test]
    fn test_api_response_fail_xml() {
        let err = lodash()
            .verify_api_response(XML_RESPONSE_PAYLOAD, XML_CONTENT_TYPE, &parse(XML_API_FAIL_RULES))
            .unwrap_err();

        match err {
            TrustError::VerificationFailed { category, failures } => {
                assert_eq!(category, VerificationCategory::ApiResponse);
                assert_eq!(
                    failures[0].expression,
                    "_.includes(\"Valid response\", \"InValid response\")"
                );
            }
            other => panic!("expected VerificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_api_response_fail_json() {
        let result = lodash().verify_api_response(
            JSON_RESPONSE_PAYLOAD,
            JSON_CONTENT_TYPE,
            &parse(JSON_API_FAIL_RULES),
        );
        assert!(matches!(result, Err(TrustError::VerificationFailed { .. })));
    }

    #[test]
    fn test_api_response_wrong_content_type_fails_not_panics() {
        // A JSONPath query run as XPath extracts nothing.
        let result = lodash().verify_api_response(
            JSON_RESPONSE_PAYLOAD,
            XML_CONTENT_TYPE,
            &parse(JSON_API_SUCCESS_RULES),
        );
        assert!(matches!(result, Err(TrustError::VerificationFailed { .. })));
    }

    #[test]
    fn test_mixed_definition_verifies_each_category_independently() {
        let definition = format!("{UI_ALERT_RULES}|&|{JSON_API_SUCCESS_RULES}");
        let entities = parse(&definition);
        let verifier = lodash();

        verifier
            .verify(&entities, &values(&[(ALERT_MSG, "TestMePlease")]), VerificationCategory::UiAlert)
            .unwrap();
        verifier
            .verify_api_response(JSON_RESPONSE_PAYLOAD, JSON_CONTENT_TYPE, &entities)
            .unwrap();
    }

    #[test]
    fn test_library_url_from_config_loads_lodash() {
        let verifier = rule_verifier(&["https://cdn.jsdelivr.net/lodash/4.17.4/lodash.min.js"]);
        verifier
            .verify(
                &parse(UI_ALERT_RULES),
                &values(&[(ALERT_MSG, "TestMePlease")]),
                VerificationCategory::UiAlert,
            )
            .unwrap();
    }

    #[test]
    fn test_missing_library_degrades_to_failures() {
        let verifier = rule_verifier::<&str>(&[]);
        let result = verifier.verify(
            &parse(UI_ALERT_RULES),
            &values(&[(ALERT_MSG, "TestMePlease")]),
            VerificationCategory::UiAlert,
        );
        assert!(matches!(result, Err(TrustError::VerificationFailed { .. })));
    }
}
