use crate::corrections::{CorrectionError, CorrectionPipeline, CorrectionRule};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Load a correction table from a JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "हिल स्टेशन": "थंड हवेचे ठिकाण",
///     "\\s+([,.!?])": "$1"
/// }
/// ```
///
/// Keys are regular expressions and values their replacements. Rules keep
/// the order they have in the file.
///
/// # Errors
/// - File not found
/// - Invalid JSON
/// - A key that is not a valid regular expression
pub fn load_correction_table(path: &Path) -> Result<Vec<CorrectionRule>, CorrectionError> {
    let content = fs::read_to_string(path).map_err(|e| {
        CorrectionError::LoadError(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    parse_correction_table(&content).map_err(|e| match e {
        CorrectionError::LoadError(msg) => {
            CorrectionError::LoadError(format!("{} ('{}')", msg, path.display()))
        }
        other => other,
    })
}

/// Parse a correction table from JSON text
pub fn parse_correction_table(content: &str) -> Result<Vec<CorrectionRule>, CorrectionError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| CorrectionError::LoadError(format!("Failed to parse JSON: {}", e)))?;

    let obj = json.as_object().ok_or_else(|| {
        CorrectionError::LoadError("Invalid JSON: root must be an object".to_string())
    })?;

    let mut rules = Vec::with_capacity(obj.len());
    for (pattern, value) in obj {
        if pattern.starts_with('@') {
            continue;
        }

        if let Some(replacement) = value.as_str() {
            rules.push(CorrectionRule::table(pattern, replacement)?);
        } else {
            warn!("Correction for '{}' is not a string, skipping", pattern);
        }
    }

    Ok(rules)
}

/// Build a pipeline for `language` from a correction table file
pub fn load_pipeline(language: &str, path: &Path) -> Result<CorrectionPipeline, CorrectionError> {
    let table = load_correction_table(path)?;
    Ok(CorrectionPipeline::with_table(language, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_file_order() {
        let rules = parse_correction_table(r#"{ "b": "c", "a": "b" }"#).unwrap();
        let pipeline = CorrectionPipeline::new("mr", rules);
        // "b" -> "c" runs before "a" -> "b"
        assert_eq!(pipeline.apply("mr", "a"), "b");
    }

    #[test]
    fn test_parse_skips_metadata_and_non_strings() {
        let rules = parse_correction_table(
            r#"{ "@metadata": { "authors": ["x"] }, "फोर्ट": "किल्ला", "n": 3 }"#,
        )
        .unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].apply("फोर्ट"), "किल्ला");
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let result = parse_correction_table("[]");
        assert!(matches!(result, Err(CorrectionError::LoadError(_))));
    }

    #[test]
    fn test_parse_rejects_bad_pattern() {
        let result = parse_correction_table(r#"{ "(": "x" }"#);
        assert!(matches!(result, Err(CorrectionError::InvalidPattern(_))));
    }

    #[test]
    fn test_load_pipeline_appends_explore_phrases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mr.json");
        fs::write(&path, r#"{ "बीच": "समुद्रकिनारा" }"#).unwrap();

        let pipeline = load_pipeline("mr", &path).unwrap();
        assert_eq!(pipeline.rules().len(), 3);
        assert_eq!(
            pipeline.apply("mr", "बीच एक्सप्लोर करा"),
            "समुद्रकिनारा शोध घ्या"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_correction_table(Path::new("/definitely/not/here.json"));
        match result {
            Err(CorrectionError::LoadError(msg)) => assert!(msg.contains("Failed to read")),
            _ => panic!("Expected LoadError"),
        }
    }
}
