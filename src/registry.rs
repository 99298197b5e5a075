//! Node type catalog for workflow graphs.
//!
//! The registry is the single source of truth for structural validity:
//! the union of its two catalogs is the only valid value domain for a
//! node's `nodeType`. Content is compiled-in configuration data, not
//! runtime-mutable; adding a node type is a registry change, not a data
//! migration. Validating persisted graphs against a newer registry may
//! retroactively invalidate them, which is accepted.

use rustc_hash::FxHashMap;

use crate::graph::NodeRole;

/// Trigger catalog: node type name → human-readable description.
pub const TRIGGER_TYPES: &[(&str, &str)] = &[
    ("form_submit", "When a form is submitted"),
    ("contact_update", "When a contact is updated"),
    ("deal_won", "When a deal is won/closed"),
    ("deal_lost", "When a deal is lost/failed"),
    ("time_trigger", "Scheduled/recurring automation"),
];

/// Action catalog: node type name → human-readable description.
pub const ACTION_TYPES: &[(&str, &str)] = &[
    ("send_email", "Send automated email"),
    ("ai_score", "Score lead quality with AI"),
    ("create_deal", "Create new deal/opportunity"),
    ("update_contact", "Modify contact information"),
    ("send_notification", "Internal team notification"),
    ("wait_delay", "Add time delay between actions"),
];

/// Static catalog of allowed trigger and action node types.
///
/// # Examples
///
/// ```
/// use flowsmith::graph::NodeRole;
/// use flowsmith::registry::NodeTypeRegistry;
///
/// let registry = NodeTypeRegistry::new();
/// assert!(registry.is_valid_node_type(NodeRole::Trigger, "form_submit"));
/// assert!(!registry.is_valid_node_type(NodeRole::Action, "form_submit"));
/// assert!(registry.is_known("send_email"));
/// ```
#[derive(Clone, Debug)]
pub struct NodeTypeRegistry {
    triggers: FxHashMap<&'static str, &'static str>,
    actions: FxHashMap<&'static str, &'static str>,
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggers: TRIGGER_TYPES.iter().copied().collect(),
            actions: ACTION_TYPES.iter().copied().collect(),
        }
    }

    /// The trigger catalog.
    #[must_use]
    pub fn triggers(&self) -> &FxHashMap<&'static str, &'static str> {
        &self.triggers
    }

    /// The action catalog.
    #[must_use]
    pub fn actions(&self) -> &FxHashMap<&'static str, &'static str> {
        &self.actions
    }

    /// True when `name` is a catalog entry for the given role.
    #[must_use]
    pub fn is_valid_node_type(&self, role: NodeRole, name: &str) -> bool {
        match role {
            NodeRole::Trigger => self.triggers.contains_key(name),
            NodeRole::Action => self.actions.contains_key(name),
        }
    }

    /// True when `name` appears in either catalog.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.triggers.contains_key(name) || self.actions.contains_key(name)
    }

    /// Description for a node type, searching both catalogs.
    #[must_use]
    pub fn describe(&self, name: &str) -> Option<&'static str> {
        self.triggers
            .get(name)
            .or_else(|| self.actions.get(name))
            .copied()
    }
}
