use crate::{Catalog, Diagnosis, FactSet, RuleDescriptor};
use std::sync::Arc;
use tracing::{debug, trace};

/// The inference engine.
///
/// Holds a shared, read-only [`Catalog`]. Inference is a pure function of the
/// catalog and the supplied facts, so one engine can serve concurrent callers
/// without locking.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::builtin()))
    }
}

impl Engine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// A new engine over a whole replacement catalog.
    ///
    /// Catalogs are swapped by reference, never edited in place, so callers
    /// still holding the previous engine keep a consistent view.
    pub fn with_catalog(&self, catalog: Arc<Catalog>) -> Self {
        Self::new(catalog)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Diagnose a fact set.
    ///
    /// Every rule is checked in catalog order; matches are returned sorted by
    /// confidence, highest first. Rules with equal confidence keep their
    /// catalog order. No match yields an empty list.
    pub fn infer(&self, facts: &FactSet) -> Vec<Diagnosis> {
        let mut results: Vec<Diagnosis> = self
            .catalog
            .all_rules()
            .iter()
            .filter(|rule| {
                let matched = rule.matches(facts);
                trace!(rule = %rule.id, matched, "Evaluated rule");
                if matched {
                    debug!(rule = %rule.id, confidence = rule.confidence.value(), "Rule matched");
                }
                matched
            })
            .map(|rule| rule.diagnose())
            .collect();

        // Vec::sort_by is stable
        results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        debug!(
            facts = facts.len(),
            rules = self.catalog.len(),
            matches = results.len(),
            "Inference complete"
        );
        results
    }

    pub fn describe_rules(&self) -> Vec<RuleDescriptor> {
        self.catalog.describe_rules()
    }
}
