use crate::{Condition, Diagnosis, FactSet, TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static certainty weight of a rule, in (0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0 && value <= 1.0).then_some(Self(value))
    }

    /// Unchecked constructor for values written into the builtin catalog
    pub(crate) const fn known(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole percentage for display, rounded half away from zero
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl TryFrom<f64> for Confidence {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Confidence::new(value)
            .ok_or_else(|| format!("confidence {} is outside (0.0, 1.0]", value))
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A diagnosable condition: when it fires, and what it means
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub condition: Condition,
    pub cause: String,
    pub explanation: String,
    /// Remediation steps, in the order they should be tried
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        condition: Condition,
        cause: impl Into<String>,
        explanation: impl Into<String>,
        recommendations: impl IntoIterator<Item = impl Into<String>>,
        confidence: f64,
    ) -> TriageResult<Self> {
        let id = id.into();
        let confidence = Confidence::new(confidence).ok_or_else(|| {
            TriageError::InvalidConfidence {
                rule_id: id.clone(),
                value: confidence,
            }
        })?;

        Ok(Self {
            id,
            name: name.into(),
            condition,
            cause: cause.into(),
            explanation: explanation.into(),
            recommendations: recommendations.into_iter().map(Into::into).collect(),
            confidence,
        })
    }

    pub fn matches(&self, facts: &FactSet) -> bool {
        self.condition.evaluate(facts)
    }

    pub fn diagnose(&self) -> Diagnosis {
        Diagnosis {
            rule_id: self.id.clone(),
            rule_name: self.name.clone(),
            cause: self.cause.clone(),
            explanation: self.explanation.clone(),
            recommendations: self.recommendations.clone(),
            confidence: self.confidence.value(),
        }
    }
}
