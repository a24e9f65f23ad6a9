use std::ops::Range;
use std::sync::Arc;
use thiserror::Error;

/// Location information for an error raised while reading a catalog source
#[derive(Debug, Clone)]
pub struct SourceDetails {
    pub message: String,
    pub source_id: String,
    pub source_text: Arc<str>,
    /// Byte range into `source_text`, when the parser reported one
    pub span: Option<Range<usize>>,
}

impl SourceDetails {
    /// 1-based line of the span start, if a span is known
    pub fn line(&self) -> Option<usize> {
        let start = self.span.as_ref()?.start.min(self.source_text.len());
        Some(self.source_text[..start].matches('\n').count() + 1)
    }
}

/// Errors raised while building catalogs or reading caller-supplied facts.
///
/// Inference itself never fails; see [`crate::Engine::infer`].
#[derive(Debug, Clone, Error)]
pub enum TriageError {
    #[error("Duplicate rule id '{0}'")]
    DuplicateRuleId(String),

    #[error("Invalid confidence {value} for rule '{rule_id}': must be in (0.0, 1.0]")]
    InvalidConfidence { rule_id: String, value: f64 },

    /// Catalog source could not be parsed
    #[error("Catalog error: {} in {}", .0.message, .0.source_id)]
    Catalog(Box<SourceDetails>),

    #[error("Invalid fact '{input}': {reason}")]
    FactSyntax { input: String, reason: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    #[error("I/O error: {0}")]
    Io(String),
}

impl TriageError {
    /// Create a catalog error with source information
    pub fn catalog(
        message: impl Into<String>,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Catalog(Box::new(SourceDetails {
            message: message.into(),
            source_id: source_id.into(),
            source_text,
            span,
        }))
    }

    pub(crate) fn limit(
        limit_name: &str,
        limit_value: usize,
        actual_value: usize,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::ResourceLimitExceeded {
            limit_name: limit_name.to_string(),
            limit_value: limit_value.to_string(),
            actual_value: actual_value.to_string(),
            suggestion: suggestion.into(),
        }
    }
}

impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        TriageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        TriageError::Json(err.to_string())
    }
}
