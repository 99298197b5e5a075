//! Free-text to JSON extraction and decoding.
//!
//! Backends return prose that is expected to contain exactly one JSON
//! object. Recovery is a single extraction pass over the first balanced
//! `{...}` region (string- and escape-aware), followed by decoding into
//! the target shape. The two steps fail independently so diagnostics
//! can tell "no object at all" apart from "object but wrong shape".

use miette::Diagnostic;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::graph::Graph;

/// Failures while turning backend text into a typed payload.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The text holds no balanced JSON object.
    #[error("no JSON object found in backend output")]
    #[diagnostic(
        code(flowsmith::agent::no_json_object),
        help("The backend was asked to return exactly one JSON object.")
    )]
    NoJsonObject,

    /// The extracted region is not valid JSON.
    #[error("backend output is not valid JSON: {source}")]
    #[diagnostic(code(flowsmith::agent::invalid_json))]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// The decoded object lacks the `elements` key a workflow requires.
    #[error("decoded object is missing the 'elements' key")]
    #[diagnostic(code(flowsmith::agent::missing_elements))]
    MissingElements,

    /// The JSON object does not decode into the expected shape.
    #[error("failed to decode {what} from backend output: {source}")]
    #[diagnostic(code(flowsmith::agent::decode))]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Returns the first balanced `{...}` region of `text`, if any.
///
/// Brace counting ignores braces inside JSON strings and honors
/// escapes, so prose like `say "{hello}" then emit {"a": 1}` extracts
/// the trailing object.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts and decodes an arbitrary JSON payload from backend text.
///
/// `what` names the expected shape in error messages.
pub fn parse_json_payload<T: DeserializeOwned>(
    text: &str,
    what: &'static str,
) -> Result<T, ParseError> {
    let fragment = extract_json_object(text).ok_or(ParseError::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(fragment).map_err(|source| ParseError::InvalidJson { source })?;
    serde_json::from_value(value).map_err(|source| ParseError::Decode { what, source })
}

/// Extracts and decodes a workflow graph from backend text.
///
/// The `elements` key is checked before shape decoding so its absence
/// is reported as its own cause rather than a generic decode failure.
pub fn parse_workflow_output(text: &str) -> Result<Graph, ParseError> {
    let fragment = extract_json_object(text).ok_or(ParseError::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(fragment).map_err(|source| ParseError::InvalidJson { source })?;
    if value.get("elements").is_none() {
        return Err(ParseError::MissingElements);
    }
    serde_json::from_value(value).map_err(|source| ParseError::Decode {
        what: "workflow graph",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_balanced_object() {
        let text = "Here you go:\n{\"a\": {\"b\": 2}} and some trailing words {\"c\": 3}";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"note {"label": "curly } brace {", "n": 1} done"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"label": "curly } brace {", "n": 1}"#)
        );
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let text = r#"{"label": "a \"quoted\" } value"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_no_object_found() {
        assert_eq!(extract_json_object("nothing to see here"), None);
        assert_eq!(extract_json_object("unbalanced { forever"), None);
    }

    #[test]
    fn test_parse_workflow_missing_elements() {
        let err = parse_workflow_output(r#"{"edges": []}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingElements));
    }

    #[test]
    fn test_parse_workflow_invalid_json() {
        let err = parse_workflow_output("{not json}").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { .. }));
    }

    #[test]
    fn test_parse_workflow_complete() {
        let text = r#"Sure! {"elements": [{"id": "trigger_1", "type": "input",
            "data": {"label": "Form Submission", "nodeType": "form_submit",
                     "description": "Triggered when form is submitted"},
            "position": {"x": 100, "y": 100}, "className": "border-blue-500"}],
            "edges": []}"#;
        let graph = parse_workflow_output(text).expect("parse failed");
        assert_eq!(graph.elements.len(), 1);
        assert_eq!(graph.elements[0].data.node_type, "form_submit");
    }

    #[test]
    fn test_parse_workflow_incomplete_shape_is_decode_error() {
        // Elements present but an element lacks required fields.
        let text = r#"{"elements": [{"id": "x"}], "edges": []}"#;
        let err = parse_workflow_output(text).unwrap_err();
        assert!(matches!(err, ParseError::Decode { .. }));
    }
}
