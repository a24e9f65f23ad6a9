//! Boolean conditions over a [`FactSet`]
//!
//! A condition is a small expression tree. Evaluation is pure, short-circuits,
//! and is defined for every fact set: missing or mistyped facts simply do not
//! satisfy the leaf that reads them.

use crate::FactSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a rule fires.
///
/// Serialized externally tagged, so catalogs can spell conditions as
/// `{ flag = "high_temp" }` or `{ all = [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The flag fact is present and `true`
    Flag(String),
    /// The text fact is present and equal to `value`
    Equals { key: String, value: String },
    Not(Box<Condition>),
    /// Every condition holds; `true` when empty
    All(Vec<Condition>),
    /// At least one condition holds; `false` when empty
    Any(Vec<Condition>),
}

impl Condition {
    pub fn flag(key: impl Into<String>) -> Self {
        Condition::Flag(key.into())
    }

    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Any(conditions.into_iter().collect())
    }

    pub fn evaluate(&self, facts: &FactSet) -> bool {
        match self {
            Condition::Flag(key) => facts.flag(key),
            Condition::Equals { key, value } => facts.text_equals(key, value),
            Condition::Not(inner) => !inner.reads_malformed(facts) && !inner.evaluate(facts),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(facts)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(facts)),
        }
    }

    /// True when a leaf reads a present fact of the wrong shape. Negation over
    /// such a leaf does not hold, so malformed input never turns into a match.
    fn reads_malformed(&self, facts: &FactSet) -> bool {
        match self {
            Condition::Flag(key) => facts.is_malformed_flag(key),
            Condition::Equals { key, .. } => facts.is_malformed_text(key),
            Condition::Not(inner) => inner.reads_malformed(facts),
            Condition::All(conditions) | Condition::Any(conditions) => {
                conditions.iter().any(|c| c.reads_malformed(facts))
            }
        }
    }

    /// Fact keys referenced by this condition, in first-appearance order
    pub fn fact_keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Condition::Flag(key) | Condition::Equals { key, .. } => {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
            Condition::Not(inner) => inner.collect_keys(keys),
            Condition::All(conditions) | Condition::Any(conditions) => {
                for condition in conditions {
                    condition.collect_keys(keys);
                }
            }
        }
    }

    /// Values a text fact is compared against
    pub fn text_values(&self, key: &str) -> Vec<&str> {
        match self {
            Condition::Flag(_) => Vec::new(),
            Condition::Equals { key: k, value } if k == key => vec![value.as_str()],
            Condition::Equals { .. } => Vec::new(),
            Condition::Not(inner) => inner.text_values(key),
            Condition::All(conditions) | Condition::Any(conditions) => {
                let mut values: Vec<&str> = Vec::new();
                for v in conditions.iter().flat_map(|c| c.text_values(key)) {
                    if !values.contains(&v) {
                        values.push(v);
                    }
                }
                values
            }
        }
    }

    /// True for a key compared with `==` anywhere in the tree
    pub fn is_text_key(&self, key: &str) -> bool {
        !self.text_values(key).is_empty()
    }

    fn is_compound(&self) -> bool {
        matches!(self, Condition::All(c) | Condition::Any(c) if c.len() > 1)
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compound() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn fmt_joined(
        conditions: &[Condition],
        separator: &str,
        empty: &str,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match conditions {
            [] => write!(f, "{}", empty),
            [only] => write!(f, "{}", only),
            _ => {
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", separator)?;
                    }
                    condition.fmt_operand(f)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Flag(key) => write!(f, "{}", key),
            Condition::Equals { key, value } => write!(f, "{} == \"{}\"", key, value),
            Condition::Not(inner) => {
                write!(f, "NOT ")?;
                inner.fmt_operand(f)
            }
            Condition::All(conditions) => Self::fmt_joined(conditions, "AND", "TRUE", f),
            Condition::Any(conditions) => Self::fmt_joined(conditions, "OR", "FALSE", f),
        }
    }
}
