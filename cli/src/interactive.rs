use anyhow::{Context, Result};
use inquire::{MultiSelect, Select};
use triage::{Catalog, FactSet, FactValue};

const UNSET: &str = "(not observed)";

/// Prompt for the symptoms the catalog knows about.
pub fn run_interactive(catalog: &Catalog) -> Result<FactSet> {
    let keys = catalog.fact_keys();
    if keys.is_empty() {
        anyhow::bail!("The rule catalog references no facts. Add rules to get started.");
    }

    let (text_keys, flag_keys) = split_keys(catalog, keys);
    let mut facts = FactSet::new();

    if !flag_keys.is_empty() {
        let selected = MultiSelect::new("Which symptoms do you observe?", flag_keys)
            .with_help_message("Space to toggle, Enter to confirm")
            .prompt()
            .context("Failed to get symptom selection")?;
        for key in selected {
            facts.insert(key, FactValue::Flag(true));
        }
    }

    for key in text_keys {
        let mut options = vec![UNSET];
        options.extend(catalog.text_values(key));

        let choice = Select::new(&format!("{}:", key), options)
            .with_help_message("Use arrow keys to navigate, Enter to select")
            .prompt()
            .context(format!("Failed to get value for {}", key))?;

        if choice != UNSET {
            facts.insert(key, text_fact(choice));
        }
    }

    Ok(facts)
}

/// Text keys first, flag keys second, each in catalog order
fn split_keys<'a>(catalog: &Catalog, keys: Vec<&'a str>) -> (Vec<&'a str>, Vec<&'a str>) {
    keys.into_iter()
        .partition(|key| !catalog.text_values(key).is_empty())
}

// Catalog values are taken verbatim; "yes" picked for a text key stays text.
fn text_fact(choice: &str) -> FactValue {
    FactValue::Text(choice.to_string())
}
