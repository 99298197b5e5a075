//! Deterministic keyword-driven description→graph synthesis.
//!
//! The synthesizer is the always-available producer behind the workflow
//! orchestrator: it lower-cases the description, selects exactly one
//! trigger from an ordered rule table (first match wins, with a
//! default), then walks the action rule table in priority order and
//! appends one action node per matching rule, chained left-to-right
//! from the previously placed node. Matching is word-prefix based:
//! inflections hit ("submitted" matches "submit"), substrings inside
//! unrelated words do not ("ai" never fires inside "email").
//!
//! Every node type emitted here is registry-valid and every edge
//! references a node that was just created, so synthesizer output
//! always passes the validator.

use crate::graph::{Graph, GraphEdge, GraphNode, Position, StyleClass};
use crate::text;

/// Canvas position of the trigger node.
pub const TRIGGER_POSITION: Position = Position { x: 100, y: 100 };

/// Horizontal step between chained nodes. The source material used both
/// 300 and 250 for the same linear layout; 300 is the documented choice,
/// so the first action lands at x = 400.
pub const ACTION_X_STEP: i64 = 300;

/// How a rule's keyword group matches against the description's words.
enum KeywordGroup {
    /// Fires when any keyword hits.
    Any(&'static [&'static str]),
    /// Fires only when every keyword hits.
    All(&'static [&'static str]),
}

impl KeywordGroup {
    fn matches(&self, words: &[String]) -> bool {
        match self {
            Self::Any(keywords) => keywords.iter().any(|k| text::mentions(words, k)),
            Self::All(keywords) => keywords.iter().all(|k| text::mentions(words, k)),
        }
    }
}

struct TriggerRule {
    keywords: KeywordGroup,
    node_type: &'static str,
    label: &'static str,
    description: &'static str,
}

/// Ordered trigger table; the first matching rule wins.
const TRIGGER_RULES: &[TriggerRule] = &[
    TriggerRule {
        keywords: KeywordGroup::Any(&["form", "submit"]),
        node_type: "form_submit",
        label: "Form Submission",
        description: "Triggered when form is submitted",
    },
    TriggerRule {
        keywords: KeywordGroup::All(&["deal", "won"]),
        node_type: "deal_won",
        label: "Deal Won",
        description: "Triggered when deal is marked as won",
    },
    TriggerRule {
        keywords: KeywordGroup::Any(&[
            "time",
            "schedule",
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
            "sunday",
        ]),
        node_type: "time_trigger",
        label: "Scheduled Trigger",
        description: "Time-based trigger",
    },
];

/// Trigger emitted when no rule matches.
const DEFAULT_TRIGGER: TriggerRule = TriggerRule {
    keywords: KeywordGroup::Any(&[]),
    node_type: "form_submit",
    label: "Form Submission",
    description: "General workflow trigger",
};

struct ActionRule {
    keywords: KeywordGroup,
    node_type: &'static str,
    label: &'static str,
    /// First matching override keyword replaces the label.
    label_overrides: &'static [(&'static str, &'static str)],
    description: &'static str,
    style: StyleClass,
}

/// Ordered action table; every matching rule fires, in this order.
const ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        keywords: KeywordGroup::Any(&["score", "ai"]),
        node_type: "ai_score",
        label: "AI Score Contact",
        label_overrides: &[],
        description: "Score lead quality with AI",
        style: StyleClass::Action,
    },
    ActionRule {
        keywords: KeywordGroup::Any(&["email", "send"]),
        node_type: "send_email",
        label: "Send Email",
        label_overrides: &[
            ("welcome", "Send Welcome Email"),
            ("thank", "Send Thank You Email"),
        ],
        description: "Send personalized email",
        style: StyleClass::Action,
    },
    ActionRule {
        keywords: KeywordGroup::All(&["deal", "create"]),
        node_type: "create_deal",
        label: "Create Deal",
        label_overrides: &[],
        description: "Create new sales opportunity",
        style: StyleClass::Action,
    },
    ActionRule {
        keywords: KeywordGroup::All(&["update", "contact"]),
        node_type: "update_contact",
        label: "Update Contact",
        label_overrides: &[],
        description: "Update contact information",
        style: StyleClass::Action,
    },
    ActionRule {
        keywords: KeywordGroup::Any(&["wait", "delay"]),
        node_type: "wait_delay",
        label: "Wait Delay",
        label_overrides: &[],
        description: "Wait for specified time period",
        style: StyleClass::Delay,
    },
];

/// Synthesizes a workflow graph from a natural-language description.
///
/// Exactly one trigger node (`trigger_1`) is always emitted. Action
/// nodes continue the whole-graph node counter (`action_2`,
/// `action_3`, ...) and are chained linearly, each [`ACTION_X_STEP`]
/// units to the right of the last. Edge ids are `edge_1`, `edge_2`,
/// ... in emission order. With no matching action keywords the graph
/// holds the trigger alone and no edges, a valid but degenerate result.
///
/// # Examples
///
/// ```
/// use flowsmith::synthesizer::synthesize;
///
/// let graph = synthesize("Send welcome email when form is submitted");
/// assert_eq!(graph.elements[0].data.node_type, "form_submit");
/// assert_eq!(graph.elements[1].data.label, "Send Welcome Email");
/// assert_eq!(graph.edges.len(), 1);
/// ```
#[must_use]
pub fn synthesize(description: &str) -> Graph {
    let words = text::words(description);

    let trigger_rule = TRIGGER_RULES
        .iter()
        .find(|rule| rule.keywords.matches(&words))
        .unwrap_or(&DEFAULT_TRIGGER);

    let trigger = GraphNode::trigger(
        "trigger_1",
        trigger_rule.node_type,
        trigger_rule.label,
        trigger_rule.description,
        TRIGGER_POSITION,
    );

    let mut elements = vec![trigger];
    let mut edges: Vec<GraphEdge> = Vec::new();
    let mut last_id = String::from("trigger_1");
    let mut actions = 0i64;

    for rule in ACTION_RULES {
        if !rule.keywords.matches(&words) {
            continue;
        }
        actions += 1;
        let id = format!("action_{}", actions + 1);
        let label = rule
            .label_overrides
            .iter()
            .find(|(keyword, _)| text::mentions(&words, keyword))
            .map_or(rule.label, |(_, label)| *label);
        let position = Position::new(
            TRIGGER_POSITION.x + ACTION_X_STEP * actions,
            TRIGGER_POSITION.y,
        );
        elements.push(
            GraphNode::action(&id, rule.node_type, label, rule.description, position)
                .with_style(rule.style),
        );
        edges.push(GraphEdge::new(
            format!("edge_{}", edges.len() + 1),
            last_id.clone(),
            id.clone(),
        ));
        last_id = id;
    }

    Graph { elements, edges }
}
