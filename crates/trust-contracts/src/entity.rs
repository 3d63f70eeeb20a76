//! Parsed verification entities.
//!
//! A `VerificationEntityCollection` is built fresh from one rule definition
//! string and lives only for the duration of a verification call. It holds at
//! most one `VerificationEntity` per category; a second rule block for the same
//! category appends to the existing entity instead of replacing it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::VerificationCategory;

/// The rules declared for one verification category, in declaration order.
///
/// Order matters: rules are evaluated, and failures reported, in the order
/// they were appended. Duplicate rules are kept and evaluated independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntity {
    category: VerificationCategory,
    rules: Vec<String>,
}

impl VerificationEntity {
    /// Create an entity with no rules.
    pub fn new(category: VerificationCategory) -> Self {
        Self {
            category,
            rules: Vec::new(),
        }
    }

    pub fn category(&self) -> VerificationCategory {
        self.category
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Append one rule string to the end of the rule list.
    pub fn push_rule(&mut self, rule: impl Into<String>) {
        self.rules.push(rule.into());
    }
}

impl fmt::Display for VerificationEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.rules)
    }
}

/// Every entity parsed from one rule definition, keyed uniquely by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntityCollection {
    entities: Vec<VerificationEntity>,
}

impl VerificationEntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule` to the entity for `category`, creating the entity the
    /// first time the category is seen.
    pub fn append_rule(&mut self, category: VerificationCategory, rule: impl Into<String>) {
        match self.entities.iter_mut().find(|e| e.category == category) {
            Some(entity) => entity.push_rule(rule),
            None => {
                let mut entity = VerificationEntity::new(category);
                entity.push_rule(rule);
                self.entities.push(entity);
            }
        }
    }

    /// The entity for `category`, or `None` when no rule block named it.
    pub fn entity(&self, category: VerificationCategory) -> Option<&VerificationEntity> {
        self.entities.iter().find(|e| e.category == category)
    }

    /// The rules for `category`. Empty when the category has no entity.
    pub fn rules(&self, category: VerificationCategory) -> &[String] {
        self.entity(category).map(|e| e.rules()).unwrap_or(&[])
    }

    /// Entities in the order their categories were first seen.
    pub fn entities(&self) -> &[VerificationEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl fmt::Display for VerificationEntityCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Verification Entities [")?;
        for entity in &self.entities {
            writeln!(f, "  {entity}")?;
        }
        write!(f, "]")
    }
}
