//! Structural validation for candidate workflow graphs.
//!
//! The validator accepts candidates from any source, including raw AI
//! output, so it inspects untyped JSON rather than the typed model.
//! Findings are accumulated as data, never thrown: callers inspect the
//! `valid` flag. The only short-circuit is the hard precondition that a
//! node collection exists at all; nothing further can be checked
//! without it.

use rustc_hash::FxHashSet;
use serde_json::Value;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::registry::NodeTypeRegistry;

/// Fields every element must carry on the wire.
const REQUIRED_NODE_FIELDS: &[&str] = &["id", "type", "data", "position"];

/// Outcome of validating one candidate graph.
///
/// Invariant: `valid` is true iff `errors` is empty. `warnings` carries
/// non-fatal advisory findings and is part of the contract for forward
/// extension; no current check emits one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validates an untyped candidate graph against the registry.
///
/// Checks, each accumulating independently:
/// - the candidate exposes an `elements` array (hard precondition);
/// - every element carries `id`, `type`, `data`, and `position`;
/// - an element's `data.nodeType`, when present, names a registry entry;
/// - every edge's `source` and `target` reference an element id.
///
/// # Examples
///
/// ```
/// use flowsmith::registry::NodeTypeRegistry;
/// use flowsmith::validator::validate_candidate;
/// use serde_json::json;
///
/// let registry = NodeTypeRegistry::new();
/// let report = validate_candidate(&registry, &json!({"edges": []}));
/// assert!(!report.valid);
/// assert_eq!(report.errors.len(), 1);
/// ```
#[must_use]
pub fn validate_candidate(registry: &NodeTypeRegistry, candidate: &Value) -> ValidationResult {
    let mut errors = Vec::new();
    let warnings = Vec::new();

    let Some(elements) = candidate.get("elements").and_then(Value::as_array) else {
        errors.push("Missing 'elements' key in workflow structure".to_string());
        return ValidationResult::from_parts(errors, warnings);
    };

    for (i, element) in elements.iter().enumerate() {
        for field in REQUIRED_NODE_FIELDS {
            if element.get(field).is_none() {
                errors.push(format!("Element {i}: Missing required field '{field}'"));
            }
        }
        if let Some(node_type) = element.pointer("/data/nodeType") {
            match node_type.as_str() {
                Some(name) if registry.is_known(name) => {}
                Some(name) => errors.push(format!("Element {i}: Invalid nodeType '{name}'")),
                None => errors.push(format!("Element {i}: Invalid nodeType '{node_type}'")),
            }
        }
    }

    if let Some(edges) = candidate.get("edges").and_then(Value::as_array) {
        let ids: FxHashSet<&str> = elements
            .iter()
            .filter_map(|element| element.get("id").and_then(Value::as_str))
            .collect();
        for (i, edge) in edges.iter().enumerate() {
            if let Some(source) = edge.get("source").and_then(Value::as_str)
                && !ids.contains(source)
            {
                errors.push(format!("Edge {i}: Invalid source ID '{source}'"));
            }
            if let Some(target) = edge.get("target").and_then(Value::as_str)
                && !ids.contains(target)
            {
                errors.push(format!("Edge {i}: Invalid target ID '{target}'"));
            }
        }
    }

    ValidationResult::from_parts(errors, warnings)
}

/// Validates a typed graph by serializing it to the wire shape and
/// delegating to [`validate_candidate`].
#[must_use]
pub fn validate_graph(registry: &NodeTypeRegistry, graph: &Graph) -> ValidationResult {
    match serde_json::to_value(graph) {
        Ok(value) => validate_candidate(registry, &value),
        Err(err) => ValidationResult::from_parts(
            vec![format!("Candidate graph could not be serialized: {err}")],
            Vec::new(),
        ),
    }
}
