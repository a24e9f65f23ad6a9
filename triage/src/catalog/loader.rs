//! TOML catalog sources
//!
//! A catalog file is a list of `[[rules]]` tables:
//!
//! ```toml
//! [[rules]]
//! id = "R5"
//! name = "Blue Screen Error"
//! condition = { flag = "blue_screen" }
//! cause = "Blue Screen of Death (BSOD)"
//! explanation = "A critical system error occurred."
//! recommendations = ["Update system drivers."]
//! confidence = 0.82
//! ```
//!
//! A directory is read as the concatenation of its `*.toml` files in file
//! name order, so rule order (and with it tie-breaking) stays deterministic.

use super::Catalog;
use crate::{Rule, TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    rules: Vec<Rule>,
}

#[derive(Serialize)]
struct CatalogFileRef<'a> {
    rules: &'a [Rule],
}

/// Parse the rules of a single TOML source without validating the catalog
pub(crate) fn parse_rules(text: &str, source_id: &str) -> TriageResult<Vec<Rule>> {
    let file: CatalogFile = toml::from_str(text).map_err(|e| {
        TriageError::catalog(e.message(), source_id, Arc::from(text), e.span())
    })?;
    Ok(file.rules)
}

pub(crate) fn to_toml(rules: &[Rule]) -> TriageResult<String> {
    toml::to_string(&CatalogFileRef { rules })
        .map_err(|e| TriageError::catalog(e.to_string(), "<catalog>", Arc::from(""), None))
}

/// Load a catalog from a TOML file or a directory of TOML files
pub fn load_catalog(path: &Path) -> TriageResult<Catalog> {
    if path.is_dir() {
        let mut rules = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| TriageError::Io(e.to_string()))?;
            if entry.path().extension().and_then(|s| s.to_str()) == Some("toml") {
                let source_id = entry.path().to_string_lossy().to_string();
                let text = fs::read_to_string(entry.path())?;
                let file_rules = parse_rules(&text, &source_id)?;
                debug!(source = %source_id, rules = file_rules.len(), "Read catalog file");
                rules.extend(file_rules);
            }
        }
        Catalog::new(rules)
    } else {
        let text = fs::read_to_string(path)?;
        Catalog::from_toml_str(&text, &path.to_string_lossy())
    }
}
