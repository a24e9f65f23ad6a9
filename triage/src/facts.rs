//! Observed symptoms for a single diagnostic session
//!
//! A [`FactSet`] maps symptom keys to values. Lookups never fail: an absent
//! key reads as `false` for flags and as unset for text, and a value of the
//! wrong shape never satisfies a condition, not even a negated one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The value observed for a single symptom key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Presence flag, e.g. `high_temp = true`
    Flag(bool),
    /// Categorical value, e.g. `net_state = "wired"`
    Text(String),
    /// Any other shape; never satisfies a condition
    Other(serde_json::Value),
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Flag(b) => write!(f, "{}", b),
            FactValue::Text(s) => write!(f, "\"{}\"", s),
            FactValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for FactValue {
    fn from(value: bool) -> Self {
        FactValue::Flag(value)
    }
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        FactValue::Text(value.to_string())
    }
}

impl From<String> for FactValue {
    fn from(value: String) -> Self {
        FactValue::Text(value)
    }
}

/// Symptom key to value mapping supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactSet {
    facts: BTreeMap<String, FactValue>,
}

impl FactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FactValue>) {
        self.facts.insert(key.into(), value.into());
    }

    /// Builder-style [`FactSet::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FactValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FactValue> {
        self.facts.get(key)
    }

    /// Read a presence flag.
    ///
    /// Only an explicit `true` counts; absent keys and values of any other
    /// shape read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.facts.get(key), Some(FactValue::Flag(true)))
    }

    /// Read a categorical value. `None` is the unset sentinel and never
    /// equals a valid value.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.facts.get(key) {
            Some(FactValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// A present value whose shape does not fit how it is read: anything but a
    /// boolean under a flag key, or anything but a string under a text key.
    pub fn is_malformed_flag(&self, key: &str) -> bool {
        matches!(self.facts.get(key), Some(v) if !matches!(v, FactValue::Flag(_)))
    }

    pub fn is_malformed_text(&self, key: &str) -> bool {
        matches!(self.facts.get(key), Some(v) if !matches!(v, FactValue::Text(_)))
    }

    pub fn text_equals(&self, key: &str, expected: &str) -> bool {
        self.text(key) == Some(expected)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FactValue)> {
        self.facts.iter()
    }
}

impl<K: Into<String>, V: Into<FactValue>> FromIterator<(K, V)> for FactSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut facts = FactSet::new();
        for (key, value) in iter {
            facts.insert(key, value);
        }
        facts
    }
}
