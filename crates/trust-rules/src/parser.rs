//! Rule-definition parser.
//!
//! Parsing never fails. A block that does not split into exactly two
//! non-blank parts, or whose category token is unknown, is dropped: a
//! malformed block reduces coverage, it does not abort the test.

use tracing::debug;

use trust_contracts::{category::VerificationCategory, entity::VerificationEntityCollection};

use crate::grammar::Delimiters;

/// Splits rule definitions into verification entities.
#[derive(Debug, Clone, Default)]
pub struct RuleParser {
    delimiters: Delimiters,
}

impl RuleParser {
    pub fn new(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Parse `definition` into a fresh collection.
    ///
    /// Blank input yields an empty collection. Rules are appended in the
    /// order they appear; blocks repeating a category extend its entity.
    pub fn parse(&self, definition: &str) -> VerificationEntityCollection {
        let mut entities = VerificationEntityCollection::new();

        for block in definition.trim().split(self.delimiters.types.as_str()) {
            if block.trim().is_empty() {
                continue;
            }
            self.parse_block(block, &mut entities);
        }

        debug!(entities = entities.len(), "parsed rule definition");
        entities
    }

    fn parse_block(&self, block: &str, entities: &mut VerificationEntityCollection) {
        let parts: Vec<&str> = block
            .trim()
            .split(self.delimiters.category.as_str())
            .collect();

        let [token, body] = parts.as_slice() else {
            debug!(%block, parts = parts.len(), "dropping rule block: expected category and body");
            return;
        };

        let Some(category) = VerificationCategory::parse(token) else {
            debug!(%token, "dropping rule block: unknown verification category");
            return;
        };

        if body.trim().is_empty() {
            debug!(%category, "dropping rule block: empty rule body");
            return;
        }

        for rule in body.trim().split(self.delimiters.rules.as_str()) {
            let rule = rule.trim();
            if !rule.is_empty() {
                entities.append_rule(category, rule);
            }
        }
    }
}

/// Parse `definition` with the default delimiters.
pub fn parse(definition: &str) -> VerificationEntityCollection {
    RuleParser::default().parse(definition)
}
