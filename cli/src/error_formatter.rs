use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use triage::TriageError;

/// Format a TriageError with fancy terminal output using Ariadne
pub fn format_error(error: &TriageError) -> String {
    match error {
        TriageError::Catalog(details) => {
            let Some(span) = details.span.clone() else {
                return format!("{}", error);
            };

            let mut output = Vec::new();

            let enhanced_message = match details.line() {
                Some(line) => format!(
                    "Catalog error: {} (in {}:{})",
                    details.message, details.source_id, line
                ),
                None => format!("Catalog error: {} (in {})", details.message, details.source_id),
            };

            let report = Report::build(ReportKind::Error, &details.source_id, span.start)
                .with_config(Config::default().with_index_type(IndexType::Byte))
                .with_message(enhanced_message)
                .with_label(
                    Label::new((&details.source_id, span))
                        .with_message("")
                        .with_color(Color::Red),
                )
                .with_help("Each [[rules]] table needs id, name, condition, cause, explanation and confidence");

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        TriageError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        other => format!("Error: {}", other),
    }
}
