//! Fact input for callers
//!
//! Turns command-line arguments or a JSON request body into a [`FactSet`],
//! enforcing [`ResourceLimits`]. The engine itself never validates facts; this
//! is where a caller rejects input that is too large or not a mapping.

use crate::{FactSet, FactValue, ResourceLimits, TriageError, TriageResult};

/// Parse `key`, `key=true|false|yes|no` and `key=value` arguments.
///
/// A bare key is a `true` flag. Boolean words become flags; anything else is
/// a text value, with one pair of surrounding quotes removed.
pub fn parse_facts(inputs: &[&str], limits: &ResourceLimits) -> TriageResult<FactSet> {
    check_count(inputs.len(), limits)?;

    let mut facts = FactSet::new();
    for input in inputs {
        let (key, value) = match input.split_once('=') {
            Some((key, raw)) => (key.trim(), parse_value(raw.trim())),
            None => (input.trim(), FactValue::Flag(true)),
        };

        if key.is_empty() {
            return Err(TriageError::FactSyntax {
                input: input.to_string(),
                reason: "fact name is empty".to_string(),
            });
        }

        check_entry(key, &value, limits)?;
        facts.insert(key, value);
    }

    Ok(facts)
}

fn parse_value(raw: &str) -> FactValue {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" => FactValue::Flag(true),
        "false" | "no" => FactValue::Flag(false),
        _ => {
            let unquoted = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(raw);
            FactValue::Text(unquoted.to_string())
        }
    }
}

/// Read a JSON object of facts.
///
/// Booleans become flags and strings become text; other JSON values are kept
/// but never satisfy a condition.
pub fn facts_from_json(json: &[u8], limits: &ResourceLimits) -> TriageResult<FactSet> {
    if json.len() > limits.max_request_bytes {
        return Err(TriageError::limit(
            "max_request_bytes",
            limits.max_request_bytes,
            json.len(),
            format!(
                "Reduce the request body to {} bytes or less",
                limits.max_request_bytes
            ),
        ));
    }

    let value: serde_json::Value = serde_json::from_slice(json)?;
    if !value.is_object() {
        return Err(TriageError::Json(format!(
            "Expected a JSON object of facts, got {}",
            json_kind(&value)
        )));
    }

    let facts: FactSet = serde_json::from_value(value)?;
    check_count(facts.len(), limits)?;
    for (key, value) in facts.iter() {
        check_entry(key, value, limits)?;
    }

    Ok(facts)
}

/// Fold `extra` into `facts`, later values winning, and recheck the limits on
/// the combined set.
pub fn merge_facts(
    mut facts: FactSet,
    extra: &FactSet,
    limits: &ResourceLimits,
) -> TriageResult<FactSet> {
    for (key, value) in extra.iter() {
        check_entry(key, value, limits)?;
        facts.insert(key.clone(), value.clone());
    }
    check_count(facts.len(), limits)?;
    Ok(facts)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn check_count(count: usize, limits: &ResourceLimits) -> TriageResult<()> {
    if count > limits.max_facts {
        return Err(TriageError::limit(
            "max_facts",
            limits.max_facts,
            count,
            format!("Supply at most {} facts", limits.max_facts),
        ));
    }
    Ok(())
}

fn check_entry(key: &str, value: &FactValue, limits: &ResourceLimits) -> TriageResult<()> {
    if key.len() > limits.max_key_bytes {
        return Err(TriageError::limit(
            "max_key_bytes",
            limits.max_key_bytes,
            key.len(),
            format!("Shorten fact names to {} bytes or less", limits.max_key_bytes),
        ));
    }

    let value_len = match value {
        FactValue::Flag(_) => 0,
        FactValue::Text(s) => s.len(),
        FactValue::Other(v) => v.to_string().len(),
    };
    if value_len > limits.max_value_bytes {
        return Err(TriageError::limit(
            "max_value_bytes",
            limits.max_value_bytes,
            value_len,
            format!(
                "Reduce the value of '{}' to {} bytes or less",
                key, limits.max_value_bytes
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_key_is_true_flag() {
        let facts = parse_facts(&["high_temp"], &ResourceLimits::default()).unwrap();
        assert!(facts.flag("high_temp"));
    }

    #[test]
    fn test_boolean_words() {
        let facts = parse_facts(
            &["ip_valid=false", "loud_fan=YES", "disk_full=no"],
            &ResourceLimits::default(),
        )
        .unwrap();
        assert_eq!(facts.get("ip_valid"), Some(&FactValue::Flag(false)));
        assert!(facts.flag("loud_fan"));
        assert!(!facts.flag("disk_full"));
    }

    #[test]
    fn test_text_values_and_quotes() {
        let facts = parse_facts(
            &["net_state=wired", "os = \"Windows 11\""],
            &ResourceLimits::default(),
        )
        .unwrap();
        assert!(facts.text_equals("net_state", "wired"));
        assert_eq!(facts.text("os"), Some("Windows 11"));
    }

    #[test]
    fn test_empty_key_is_error() {
        let err = parse_facts(&["=true"], &ResourceLimits::default()).unwrap_err();
        assert!(matches!(err, TriageError::FactSyntax { .. }));
    }

    #[test]
    fn test_fact_count_limit() {
        let limits = ResourceLimits {
            max_facts: 2,
            ..ResourceLimits::default()
        };
        let err = parse_facts(&["a", "b", "c"], &limits).unwrap_err();
        assert!(
            matches!(err, TriageError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_facts")
        );
    }

    #[test]
    fn test_merged_facts_respect_count_limit() {
        let limits = ResourceLimits {
            max_facts: 3,
            ..ResourceLimits::default()
        };
        let cli = parse_facts(&["a", "b"], &limits).unwrap();
        let json = facts_from_json(br#"{"c": true, "d": true}"#, &limits).unwrap();

        let err = merge_facts(cli.clone(), &json, &limits).unwrap_err();
        assert!(
            matches!(err, TriageError::ResourceLimitExceeded { ref limit_name, ref actual_value, .. } if limit_name == "max_facts" && actual_value == "4")
        );

        let overlapping = facts_from_json(br#"{"a": false, "c": true}"#, &limits).unwrap();
        let merged = merge_facts(cli, &overlapping, &limits).unwrap();
        assert_eq!(merged.len(), 3);
        assert!(!merged.flag("a"));
    }

    #[test]
    fn test_value_length_limit() {
        let limits = ResourceLimits {
            max_value_bytes: 4,
            ..ResourceLimits::default()
        };
        assert!(parse_facts(&["net_state=wired"], &limits).is_err());
        assert!(parse_facts(&["net_state=lan"], &limits).is_ok());
    }

    #[test]
    fn test_json_object() {
        let facts = facts_from_json(
            br#"{"no_internet": true, "net_state": "wired", "ip_valid": false}"#,
            &ResourceLimits::default(),
        )
        .unwrap();
        assert_eq!(facts.len(), 3);
        assert!(facts.flag("no_internet"));
        assert!(facts.text_equals("net_state", "wired"));
    }

    #[test]
    fn test_json_must_be_object() {
        let err = facts_from_json(b"[true]", &ResourceLimits::default()).unwrap_err();
        match err {
            TriageError::Json(message) => assert!(message.contains("an array")),
            other => panic!("Expected JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_syntax_error() {
        assert!(matches!(
            facts_from_json(b"{not json", &ResourceLimits::default()),
            Err(TriageError::Json(_))
        ));
    }

    #[test]
    fn test_json_body_limit() {
        let limits = ResourceLimits {
            max_request_bytes: 8,
            ..ResourceLimits::default()
        };
        let err = facts_from_json(br#"{"high_temp": true}"#, &limits).unwrap_err();
        assert!(
            matches!(err, TriageError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_request_bytes")
        );
    }
}
