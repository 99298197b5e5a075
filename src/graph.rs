//! Workflow graph value objects and their wire serialization shape.
//!
//! Every producer (synthesizer, AI backend, fallback) and consumer
//! (validator, front-end canvas) shares these types. The serde shape is
//! the canvas wire contract:
//!
//! ```json
//! { "elements": [ { "id": "trigger_1", "type": "input",
//!                   "data": { "label": "...", "nodeType": "...",
//!                             "description": "...", "config": {} },
//!                   "position": { "x": 100, "y": 100 },
//!                   "className": "border-blue-500" } ],
//!   "edges":    [ { "id": "edge_1", "source": "trigger_1",
//!                   "target": "action_2", "animated": true,
//!                   "style": { "stroke": "#3b82f6" } } ] }
//! ```
//!
//! Graphs are value objects: created fresh per request, never mutated
//! in place after validation. A corrected graph is a new value.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default stroke color for workflow edges.
pub const EDGE_STROKE: &str = "#3b82f6";

/// Structural role of a node within a workflow graph.
///
/// Serializes as the wire `type` field: triggers are `"input"` nodes,
/// actions are `"default"` nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    /// The event that starts a workflow.
    #[serde(rename = "input")]
    Trigger,
    /// A step executed after the trigger fires.
    #[serde(rename = "default")]
    Action,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger => write!(f, "trigger"),
            Self::Action => write!(f, "action"),
        }
    }
}

/// Presentational tag rendered by the canvas as a border class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleClass {
    #[serde(rename = "border-blue-500")]
    Trigger,
    #[serde(rename = "border-green-500")]
    Action,
    #[serde(rename = "border-orange-500")]
    Delay,
    #[serde(rename = "border-red-500")]
    Error,
    #[serde(rename = "border-yellow-500")]
    Fallback,
}

/// 2D canvas coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Payload carried by every node: display label, registry node type,
/// description, and an opaque configuration map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(rename = "nodeType")]
    pub node_type: String,
    pub description: String,
    #[serde(default)]
    pub config: FxHashMap<String, serde_json::Value>,
}

/// A single node in a workflow graph.
///
/// Invariants (enforced by the validator, guaranteed by the
/// synthesizer): `id` is unique within the graph and `data.node_type`
/// names a registry entry matching `role`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub role: NodeRole,
    pub data: NodeData,
    pub position: Position,
    #[serde(rename = "className")]
    pub style_class: StyleClass,
}

impl GraphNode {
    /// Creates a trigger node with the trigger border class.
    #[must_use]
    pub fn trigger(
        id: impl Into<String>,
        node_type: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            role: NodeRole::Trigger,
            data: NodeData {
                label: label.into(),
                node_type: node_type.into(),
                description: description.into(),
                config: FxHashMap::default(),
            },
            position,
            style_class: StyleClass::Trigger,
        }
    }

    /// Creates an action node with the action border class.
    #[must_use]
    pub fn action(
        id: impl Into<String>,
        node_type: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            role: NodeRole::Action,
            data: NodeData {
                label: label.into(),
                node_type: node_type.into(),
                description: description.into(),
                config: FxHashMap::default(),
            },
            position,
            style_class: StyleClass::Action,
        }
    }

    /// Overrides the presentational class.
    #[must_use]
    pub fn with_style(mut self, style_class: StyleClass) -> Self {
        self.style_class = style_class;
        self
    }

    /// Attaches node configuration.
    #[must_use]
    pub fn with_config(mut self, config: FxHashMap<String, serde_json::Value>) -> Self {
        self.data.config = config;
        self
    }
}

/// Presentational edge styling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub stroke: String,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: EDGE_STROKE.to_string(),
        }
    }
}

/// A directed connection between two nodes of the same graph.
///
/// Invariant: `source` and `target` each reference an existing node id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default = "default_animated")]
    pub animated: bool,
    #[serde(default)]
    pub style: EdgeStyle,
}

fn default_animated() -> bool {
    true
}

impl GraphEdge {
    /// Creates an animated edge with the default stroke.
    #[must_use]
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            animated: true,
            style: EdgeStyle::default(),
        }
    }
}

/// An ordered sequence of nodes plus the edges connecting them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub elements: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// True when the graph holds a node with this id.
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.elements.iter().any(|node| node.id == id)
    }

    /// Number of action nodes in the graph.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|node| node.role == NodeRole::Action)
            .count()
    }
}
