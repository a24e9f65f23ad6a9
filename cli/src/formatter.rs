use crate::report::NO_MATCH_MESSAGE;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use triage::{Diagnosis, FactSet, Rule, RuleDescriptor};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_diagnoses(&self, facts: &FactSet, diagnoses: &[Diagnosis]) -> String {
        let mut output = String::new();

        if !facts.is_empty() {
            output.push_str(&self.format_facts_table(facts));
            output.push('\n');
        }

        if diagnoses.is_empty() {
            output.push_str(NO_MATCH_MESSAGE);
            output.push('\n');
            return output;
        }

        for diagnosis in diagnoses {
            output.push_str(&self.format_diagnosis(diagnosis));
            output.push('\n');
        }

        output
    }

    fn format_facts_table(&self, facts: &FactSet) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Fact").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Left),
        ]));

        for (name, value) in facts.iter() {
            table.add_row(Row::from(vec![name.clone(), value.to_string()]));
        }

        table.to_string()
    }

    fn format_diagnosis(&self, diagnosis: &Diagnosis) -> String {
        let title = format!(
            "{} {} ({:.0}%)",
            diagnosis.rule_id,
            diagnosis.rule_name,
            diagnosis.confidence * 100.0
        );

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.add_row(Row::from(vec![Cell::new(&title)]));
        table.add_row(Row::from(vec![Cell::new(format!(
            "{}\n{}",
            diagnosis.cause, diagnosis.explanation
        ))]));

        if !diagnosis.recommendations.is_empty() {
            table.add_row(Row::from(vec![Cell::new(self.format_steps(
                &diagnosis.recommendations,
            ))]));
        }

        table.to_string()
    }

    fn format_steps(&self, steps: &[String]) -> String {
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_rules(&self, rules: &[RuleDescriptor]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("ID"),
            Cell::new("Name"),
            Cell::new("Cause"),
            Cell::new("Confidence").set_alignment(CellAlignment::Right),
        ]));

        for rule in rules {
            table.add_row(Row::from(vec![
                Cell::new(&rule.id),
                Cell::new(&rule.name),
                Cell::new(&rule.cause),
                Cell::new(format!("{}%", rule.confidence_percent))
                    .set_alignment(CellAlignment::Right),
            ]));
        }

        format!("Catalog contains {} rules\n\n{}\n", rules.len(), table)
    }

    pub fn format_rule(&self, rule: &Rule) -> String {
        let mut output = String::new();
        output.push_str(&format!("Rule {}: {}\n\n", rule.id, rule.name));
        output.push_str(&format!("When:        {}\n", rule.condition));
        output.push_str(&format!("Cause:       {}\n", rule.cause));
        output.push_str(&format!("Explanation: {}\n", rule.explanation));
        output.push_str(&format!(
            "Confidence:  {} ({}%)\n",
            rule.confidence,
            rule.confidence.percent()
        ));

        if !rule.recommendations.is_empty() {
            output.push_str("\nRecommendations:\n");
            for line in self.format_steps(&rule.recommendations).lines() {
                output.push_str(&format!("  {}\n", line));
            }
        }

        output
    }
}
