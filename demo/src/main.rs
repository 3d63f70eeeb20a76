//! TRUST rule engine demo CLI
//!
//! Runs the reference scenarios, or verifies ad-hoc rule definitions against
//! values given on the command line or an API payload read from a file.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- verify --rules 'UI_COMMON:  _.includes("${S}", "DONE")' --category ui_common --value S=DONE
//!   cargo run -p demo -- api --rules 'API_RESPONSE:  _.includes("${$.description}", "Valid")' \
//!       --payload response.json --content-type application/json

mod scenarios;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use trust_contracts::{
    category::VerificationCategory,
    error::{TrustError, TrustResult},
    values::RuntimeValueMap,
    verify::VerificationReport,
};
use trust_core::traits::SchemaValidator;
use trust_eval::{rule_verifier, JsonSchemaValidator};
use trust_rules::{RuleParser, TrustConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// TRUST: rule-based verification for end-to-end tests.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "TRUST rule engine demo",
    long_about = "Parses delimiter-separated rule definitions, substitutes captured values\n\
                  into ${...} placeholders, evaluates every rule, and reports all failures at once."
)]
struct Cli {
    /// TOML configuration file. Environment variables override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the verification report as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three reference scenarios in sequence.
    RunAll,
    /// Scenario 1: UI_COMMON rules with tester-defined values.
    UiCommon,
    /// Scenario 2: UI_ALERT rules with a captured alert text.
    UiAlert,
    /// Scenario 3: API_RESPONSE rules over XML and JSON payloads.
    ApiResponse,
    /// Verify a UI category against KEY=VALUE runtime values.
    Verify {
        /// The rule definition string.
        #[arg(long)]
        rules: String,
        /// UI_ALERT, UI_ERROR, or UI_COMMON (any case).
        #[arg(long)]
        category: VerificationCategory,
        /// A captured value, `KEY=VALUE`. Repeatable.
        #[arg(long = "value", value_parser = parse_key_value)]
        values: Vec<(String, String)>,
    },
    /// Verify API_RESPONSE rules against a payload file.
    Api {
        /// The rule definition string.
        #[arg(long)]
        rules: String,
        /// File holding the response payload.
        #[arg(long)]
        payload: PathBuf,
        /// Response content type; XPath is used when it contains "xml".
        #[arg(long, default_value = "application/json")]
        content_type: String,
        /// Optional JSON Schema file to validate the payload against first.
        #[arg(long)]
        json_schema: Option<PathBuf>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::UiCommon => scenarios::run_ui_common(),
        Command::UiAlert => scenarios::run_ui_alert(),
        Command::ApiResponse => scenarios::run_api_response(),
        Command::Verify {
            rules,
            category,
            values,
        } => load_config(cli.config.as_deref()).and_then(|config| {
            let values: RuntimeValueMap = values.into_iter().collect();
            let entities = RuleParser::new(config.delimiters).parse(&rules);
            let verifier = rule_verifier(&config.libraries);
            print_report(verifier.verify(&entities, &values, category), cli.json)
        }),
        Command::Api {
            rules,
            payload,
            content_type,
            json_schema,
        } => load_config(cli.config.as_deref()).and_then(|config| {
            run_api(&config, &rules, &payload, &content_type, json_schema.as_deref(), cli.json)
        }),
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

// ── Command dispatch ──────────────────────────────────────────────────────────

fn run_all() -> TrustResult<()> {
    scenarios::run_ui_common()?;
    scenarios::run_ui_alert()?;
    scenarios::run_api_response()?;
    println!("All scenarios completed successfully.");
    Ok(())
}

fn run_api(
    config: &TrustConfig,
    rules: &str,
    payload_path: &Path,
    content_type: &str,
    json_schema: Option<&Path>,
    json: bool,
) -> TrustResult<()> {
    let payload = read_file(payload_path)?;

    if let Some(schema_path) = json_schema {
        let validator = JsonSchemaValidator::from_json_str(
            schema_path.display().to_string(),
            &read_file(schema_path)?,
        )?;
        validator.validate(&payload)?;
        debug!(schema = %schema_path.display(), "payload conforms to schema");
    }

    let entities = RuleParser::new(config.delimiters.clone()).parse(rules);
    let verifier = rule_verifier(&config.libraries);
    print_report(
        verifier.verify_api_response(&payload, content_type, &entities),
        json,
    )
}

/// The file at `path` (if any) overridden by the environment.
fn load_config(path: Option<&Path>) -> TrustResult<TrustConfig> {
    match path {
        Some(path) => TrustConfig::from_file(path)?.with_overrides(|key| std::env::var(key).ok()),
        None => TrustConfig::from_env(),
    }
}

fn read_file(path: &Path) -> TrustResult<String> {
    std::fs::read_to_string(path).map_err(|e| TrustError::ConfigError {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })
}

fn print_report(result: TrustResult<VerificationReport>, json: bool) -> TrustResult<()> {
    if !json {
        return scenarios::report(result);
    }
    let report = result?;
    let rendered = serde_json::to_string_pretty(&report).map_err(|e| TrustError::ConfigError {
        reason: format!("failed to render report: {e}"),
    })?;
    println!("{rendered}");
    Ok(())
}
