//! Reference scenarios.
//!
//! Each scenario parses a rule definition, verifies it once with values that
//! satisfy every rule and once with values that break at least one, and
//! prints what the engine reported.

use trust_contracts::{
    category::VerificationCategory,
    error::{TrustError, TrustResult},
    values::{RuntimeValueMap, ALERT_MSG},
    verify::VerificationReport,
};
use trust_core::{traits::{RuntimeValueSource, SchemaValidator}, RuleVerifier};
use trust_eval::{rule_verifier, JsonSchemaValidator};
use trust_rules::{RuleParser, TrustConfig};

/// Configuration shared by all scenarios.
pub const SCENARIO_CONFIG: &str = include_str!("../config/trust.toml");

const UI_COMMON_RULES: &str =
    "UI_COMMON:  _.includes(\"${Status:}\", \"DONE\");  !_.includes(\"${SomeField:}\", \"DONE\")";
const UI_ALERT_RULES: &str = "UI_ALERT:  _.includes(\"${ALERT_MSG}\", \"TestMePlease\")";
const API_RULES: &str = "API_RESPONSE:  _.includes(\"${/Response/description}\", \"Valid response\")";
const API_JSON_RULES: &str = "API_RESPONSE:  _.includes(\"${$.description}\", \"Valid response\");  _.eq(\"${$.node1}\", \"1\")";

const XML_PAYLOAD: &str = "<Response>\n    <node1>1</node1>\n    <description>Valid response</description>\n</Response>";
const JSON_PAYLOAD: &str = r#"{"node1": "1", "description": "Valid response"}"#;
const JSON_BROKEN_PAYLOAD: &str = r#"{"node1": "2", "description": "InValid"}"#;

const RESPONSE_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "node1": { "type": "string" },
        "description": { "type": "string" }
    },
    "required": ["node1", "description"]
}"#;

/// Stands in for the browser layer: reports a fixed alert text.
struct StaticAlert(&'static str);

impl RuntimeValueSource for StaticAlert {
    fn capture_runtime_values(&self) -> TrustResult<RuntimeValueMap> {
        Ok([(ALERT_MSG.to_string(), self.0.to_string())].into_iter().collect())
    }
}

fn setup() -> TrustResult<(TrustConfig, RuleVerifier)> {
    let config = TrustConfig::from_toml_str(SCENARIO_CONFIG)?;
    let verifier = rule_verifier(&config.libraries);
    Ok((config, verifier))
}

// ── Scenario 1 ────────────────────────────────────────────────────────────────

pub fn run_ui_common() -> TrustResult<()> {
    println!("=== Scenario 1: UI_COMMON soft assertions ===");
    println!();
    println!("  Rules: {}", UI_COMMON_RULES);

    let (config, verifier) = setup()?;
    let entities = RuleParser::new(config.delimiters).parse(UI_COMMON_RULES);

    let passing = values(&[("Status:", "DONE"), ("SomeField:", "TestMe")]);
    println!("  Values: Status: = DONE, SomeField: = TestMe");
    report(verifier.verify(&entities, &passing, VerificationCategory::UiCommon))?;

    let failing = values(&[("Status:", "QWE"), ("SomeField:", "DONE")]);
    println!("  Values: Status: = QWE, SomeField: = DONE");
    expect_failure(verifier.verify(&entities, &failing, VerificationCategory::UiCommon))?;

    println!();
    Ok(())
}

// ── Scenario 2 ────────────────────────────────────────────────────────────────

pub fn run_ui_alert() -> TrustResult<()> {
    println!("=== Scenario 2: UI_ALERT captured from the UI layer ===");
    println!();
    println!("  Rules: {}", UI_ALERT_RULES);

    let (config, verifier) = setup()?;
    let entities = RuleParser::new(config.delimiters).parse(UI_ALERT_RULES);

    println!("  Alert text: \"TestMePlease\"");
    report(verifier.verify_captured(&entities, VerificationCategory::UiAlert, &StaticAlert("TestMePlease")))?;

    println!("  Alert text: \"Something\\n   else\"");
    expect_failure(verifier.verify_captured(
        &entities,
        VerificationCategory::UiAlert,
        &StaticAlert("Something\n   else"),
    ))?;

    if config.alerts_auto_confirm {
        println!("  Alert would be confirmed by the UI layer (alerts_auto_confirm = true)");
    }

    println!();
    Ok(())
}

// ── Scenario 3 ────────────────────────────────────────────────────────────────

pub fn run_api_response() -> TrustResult<()> {
    println!("=== Scenario 3: API_RESPONSE via XPath and JSONPath ===");
    println!();

    let (config, verifier) = setup()?;
    let parser = RuleParser::new(config.delimiters);

    println!("  XML rules: {}", API_RULES);
    report(verifier.verify_api_response(XML_PAYLOAD, "application/xml", &parser.parse(API_RULES)))?;

    let json_entities = parser.parse(API_JSON_RULES);
    let schema = JsonSchemaValidator::from_json_str("demo-response-v1", RESPONSE_SCHEMA)?;

    println!("  JSON rules: {}", API_JSON_RULES);
    schema.validate(JSON_PAYLOAD)?;
    println!("  Schema:  PASS ({})", schema.schema_id());
    report(verifier.verify_api_response(JSON_PAYLOAD, "application/json", &json_entities))?;

    println!("  JSON payload: {}", JSON_BROKEN_PAYLOAD);
    schema.validate(JSON_BROKEN_PAYLOAD)?;
    expect_failure(verifier.verify_api_response(
        JSON_BROKEN_PAYLOAD,
        "application/json; charset=utf-8",
        &json_entities,
    ))?;

    println!();
    Ok(())
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn values(pairs: &[(&str, &str)]) -> RuntimeValueMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Print a passing report, or propagate the failure.
pub fn report(result: TrustResult<VerificationReport>) -> TrustResult<()> {
    let report = result?;
    println!(
        "  Verification: PASS ({} expression(s), id {})",
        report.outcomes.len(),
        report.verification_id
    );
    for outcome in &report.outcomes {
        println!("    ok  {}", outcome.expression);
    }
    Ok(())
}

/// Print an expected aggregate failure. Any other error propagates.
fn expect_failure(result: TrustResult<VerificationReport>) -> TrustResult<()> {
    match result {
        Err(TrustError::VerificationFailed { failures, .. }) => {
            println!("  Verification: FAIL (expected)");
            for failure in &failures {
                println!("    err {}", failure);
            }
            Ok(())
        }
        Err(other) => Err(other),
        Ok(report) => {
            println!("  UNEXPECTED: passed {} expression(s)", report.outcomes.len());
            Ok(())
        }
    }
}
