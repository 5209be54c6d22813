//! Fragment document parsing.
//!
//! A fragment document is one JSON file containing an array of namespace
//! partial-records. Upstream files start with `//` license headers, which
//! are stripped before parsing.

use serde_json::Value;
use thiserror::Error;

use crate::ir::Namespace;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid fragment document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blank out `//` comment lines.
///
/// Lines are blanked rather than removed so parse errors keep the original
/// line numbers.
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim_start().starts_with("//") {
                ""
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse one fragment document.
pub fn parse_fragment(text: &str) -> Result<Vec<Namespace>, ParseError> {
    Ok(serde_json::from_str(&strip_comments(text))?)
}

/// Parse a fragment already materialized as a JSON value.
pub fn parse_fragment_value(value: Value) -> Result<Vec<Namespace>, ParseError> {
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_comment_lines_and_preserves_line_count() {
        let text = "// Copyright header\n{\n  // inline full-line comment\n  \"a\": 1\n}";
        let stripped = strip_comments(text);
        assert_eq!(stripped.lines().count(), text.lines().count());
        assert!(!stripped.contains("Copyright"));
        assert!(stripped.contains("\"a\": 1"));
    }

    #[test]
    fn parses_a_commented_fragment() {
        let text = r#"
// This Source Code Form is subject to the terms of the MPL.
[
  {
    "namespace": "idle",
    "description": "Detect the user's idle state.",
    "permissions": ["idle"]
  }
]
"#;
        let fragment = parse_fragment(text).unwrap();
        assert_eq!(fragment.len(), 1);
        assert_eq!(fragment[0].namespace, "idle");
    }

    #[test]
    fn reports_malformed_documents() {
        let err = parse_fragment("[{\"namespace\": }]").unwrap_err();
        assert!(err.to_string().contains("invalid fragment document"));
    }

    #[test]
    fn parses_fragment_from_value() {
        let fragment = parse_fragment_value(json!([
            { "namespace": "alarms" },
            { "namespace": "alarms", "permissions": ["alarms"] }
        ]))
        .unwrap();
        assert_eq!(fragment.len(), 2);
    }
}
