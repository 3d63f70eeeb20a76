//! The verification orchestrator.
//!
//! `RuleVerifier` drives one verification call per category:
//!
//!   Entity lookup → [Query extraction] → Substitution → Boolean evaluation → Soft assertions
//!
//! UI categories start from an already-captured value map. `API_RESPONSE`
//! builds its value map first: every placeholder in its rules is an XPath or
//! JSONPath query, run against the payload and keyed by the query text. The
//! rules then read as the same boolean DSL regardless of payload shape.

use tracing::{debug, info};

use trust_contracts::{
    category::VerificationCategory,
    entity::{VerificationEntity, VerificationEntityCollection},
    error::TrustResult,
    values::RuntimeValueMap,
    verify::VerificationReport,
};

use crate::soft::verify_all;
use crate::template::placeholders;
use crate::traits::{BooleanEvaluator, QueryEvaluator, RuntimeValueSource};

/// Marker looked for (case-insensitively) in a response content type to pick
/// the XPath evaluator over JSONPath.
const XML_MARK: &str = "xml";

/// Verifies parsed rule entities against runtime values or API payloads.
///
/// Owns its evaluators; construct one per configuration and reuse it for any
/// number of verification calls.
pub struct RuleVerifier {
    boolean: Box<dyn BooleanEvaluator>,
    xml: Box<dyn QueryEvaluator>,
    json: Box<dyn QueryEvaluator>,
}

impl RuleVerifier {
    /// Create a verifier from a boolean evaluator and the two payload query
    /// evaluators.
    pub fn new(
        boolean: Box<dyn BooleanEvaluator>,
        xml: Box<dyn QueryEvaluator>,
        json: Box<dyn QueryEvaluator>,
    ) -> Self {
        Self { boolean, xml, json }
    }

    /// Verify the rules of `category` against already-captured `values`.
    ///
    /// A category without an entity has nothing to check and yields an empty,
    /// passing report. Otherwise every rule is substituted and evaluated, and
    /// all failures are reported together.
    pub fn verify(
        &self,
        entities: &VerificationEntityCollection,
        values: &RuntimeValueMap,
        category: VerificationCategory,
    ) -> TrustResult<VerificationReport> {
        let Some(entity) = entities.entity(category) else {
            debug!(%category, "no rules declared for category; nothing to verify");
            return Ok(VerificationReport::empty(category));
        };

        info!(%category, rules = entity.rules().len(), "verifying rules");
        verify_all(self.boolean.as_ref(), values, entity.rules(), category)
    }

    /// Capture runtime values from `source`, then verify `category` with them.
    ///
    /// Capture failures are returned unchanged; they are collaborator errors,
    /// not rule failures.
    pub fn verify_captured(
        &self,
        entities: &VerificationEntityCollection,
        category: VerificationCategory,
        source: &dyn RuntimeValueSource,
    ) -> TrustResult<VerificationReport> {
        if entities.entity(category).is_none() {
            debug!(%category, "no rules declared for category; skipping capture");
            return Ok(VerificationReport::empty(category));
        }

        let values = source.capture_runtime_values()?;
        debug!(%category, captured = values.len(), "captured runtime values");
        self.verify(entities, &values, category)
    }

    /// Verify the `API_RESPONSE` rules against a raw response payload.
    ///
    /// `content_type` containing `xml` (any case) selects XPath; anything
    /// else selects JSONPath.
    pub fn verify_api_response(
        &self,
        payload: &str,
        content_type: &str,
        entities: &VerificationEntityCollection,
    ) -> TrustResult<VerificationReport> {
        let category = VerificationCategory::ApiResponse;
        let Some(entity) = entities.entity(category) else {
            debug!("no API_RESPONSE rules declared; nothing to verify");
            return Ok(VerificationReport::empty(category));
        };

        info!(%content_type, rules = entity.rules().len(), "verifying API response");
        let values = self.api_values(payload, content_type, entity);
        self.verify(entities, &values, category)
    }

    /// Run every placeholder query found in `entity`'s rules against `payload`.
    ///
    /// The returned map is keyed by the literal query text, ready to be
    /// substituted back into the same rules.
    pub fn api_values(
        &self,
        payload: &str,
        content_type: &str,
        entity: &VerificationEntity,
    ) -> RuntimeValueMap {
        let evaluator = self.query_evaluator_for(content_type);

        let mut values = RuntimeValueMap::new();
        for query in entity.rules().iter().flat_map(|rule| placeholders(rule)) {
            if values.contains_key(&query) {
                continue;
            }
            let extracted = evaluator.query(&query, payload);
            debug!(%query, %extracted, "extracted payload value");
            values.insert(query, extracted);
        }
        values
    }

    fn query_evaluator_for(&self, content_type: &str) -> &dyn QueryEvaluator {
        if content_type.to_ascii_lowercase().contains(XML_MARK) {
            self.xml.as_ref()
        } else {
            self.json.as_ref()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
