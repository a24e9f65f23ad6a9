//! # Triage Engine
//!
//! **Rule-based diagnosis for misbehaving computers**
//!
//! Triage matches a set of observed symptoms against a catalog of diagnostic
//! rules and returns every diagnosis that applies, most confident first.
//!
//! ## Quick Start
//!
//! ```rust
//! use triage::{Engine, FactSet};
//!
//! let engine = Engine::default();
//!
//! let facts = FactSet::new()
//!     .with("high_temp", true)
//!     .with("loud_fan", true);
//!
//! let diagnoses = engine.infer(&facts);
//! assert_eq!(diagnoses[0].cause, "Overheating Detected");
//! ```
//!
//! ## Core Concepts
//!
//! ### Facts
//! A fact set maps symptom keys to a flag (`high_temp = true`) or a text value
//! (`net_state = "wired"`). Missing facts read as false or unset; they are
//! never an error.
//!
//! ### Rules
//! A rule pairs a [`Condition`] with a cause, an explanation, ordered
//! remediation steps and a fixed confidence in (0, 1].
//!
//! ### Catalog
//! An immutable, ordered list of rules. [`Catalog::builtin`] ships the
//! standard knowledge base; custom catalogs load from TOML.
//!
//! ### Inference
//! [`Engine::infer`] returns all matching rules sorted by descending
//! confidence. Ties keep catalog order.

pub mod catalog;
pub mod condition;
pub mod engine;
pub mod error;
pub mod facts;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod rule;

pub use catalog::{load_catalog, Catalog};
pub use condition::Condition;
pub use engine::Engine;
pub use error::{SourceDetails, TriageError};
pub use facts::{FactSet, FactValue};
pub use parser::{facts_from_json, merge_facts, parse_facts};
pub use resource_limits::ResourceLimits;
pub use response::{Diagnosis, RuleDescriptor};
pub use rule::{Confidence, Rule};

/// Result type for Triage operations
pub type TriageResult<T> = Result<T, TriageError>;
