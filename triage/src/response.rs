use crate::Rule;
use serde::{Deserialize, Serialize};

/// A fired rule, as returned by [`crate::Engine::infer`]
///
/// A plain projection of the rule's metadata; nothing is computed from the
/// facts that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub rule_id: String,
    pub rule_name: String,
    pub cause: String,
    pub explanation: String,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}

/// Read-only view of a catalog rule for documentation and inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub id: String,
    pub name: String,
    pub cause: String,
    pub explanation: String,
    pub recommendations: Vec<String>,
    /// Confidence as a whole percentage, 0..=100
    #[serde(rename = "confidence")]
    pub confidence_percent: u8,
}

impl From<&Rule> for RuleDescriptor {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.clone(),
            name: rule.name.clone(),
            cause: rule.cause.clone(),
            explanation: rule.explanation.clone(),
            recommendations: rule.recommendations.clone(),
            confidence_percent: rule.confidence.percent(),
        }
    }
}
