//! The ordered, immutable set of diagnostic rules
//!
//! Rule order is significant: it is the tie-break order when two matching
//! rules carry the same confidence.

pub mod builtin;
mod loader;

pub use loader::load_catalog;

use crate::{Rule, RuleDescriptor, TriageError, TriageResult};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    rules: Vec<Rule>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate rule ids
    pub fn new(rules: Vec<Rule>) -> TriageResult<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(TriageError::DuplicateRuleId(rule.id.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// The five shipped computer-diagnosis rules
    pub fn builtin() -> Self {
        Self {
            rules: builtin::rules(),
        }
    }

    pub fn from_toml_str(text: &str, source_id: &str) -> TriageResult<Self> {
        Self::new(loader::parse_rules(text, source_id)?)
    }

    pub fn to_toml(&self) -> TriageResult<String> {
        loader::to_toml(&self.rules)
    }

    /// All rules in definition order
    pub fn all_rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule projected for display, confidence as a whole percentage
    pub fn describe_rules(&self) -> Vec<RuleDescriptor> {
        self.rules.iter().map(RuleDescriptor::from).collect()
    }

    /// Fact keys referenced by any rule, in first-appearance order
    pub fn fact_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.rules.iter().flat_map(|r| r.condition.fact_keys()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Values any rule compares the text fact `key` against
    pub fn text_values(&self, key: &str) -> Vec<&str> {
        let mut values: Vec<&str> = Vec::new();
        for value in self.rules.iter().flat_map(|r| r.condition.text_values(key)) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    }
}
