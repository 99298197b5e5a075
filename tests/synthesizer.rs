use flowsmith::graph::{NodeRole, Position, StyleClass};
use flowsmith::synthesizer::{synthesize, ACTION_X_STEP, TRIGGER_POSITION};

#[test]
/// End-to-end expectation for the canonical welcome-email description:
/// form trigger at (100, 100), one welcome email action one step to the
/// right, one edge between them.
fn test_welcome_email_when_form_submitted() {
    let graph = synthesize("Send welcome email when form is submitted");

    assert_eq!(graph.elements.len(), 2);
    assert_eq!(graph.edges.len(), 1);

    let trigger = &graph.elements[0];
    assert_eq!(trigger.id, "trigger_1");
    assert_eq!(trigger.role, NodeRole::Trigger);
    assert_eq!(trigger.data.node_type, "form_submit");
    assert_eq!(trigger.position, Position::new(100, 100));
    assert_eq!(trigger.style_class, StyleClass::Trigger);

    let action = &graph.elements[1];
    assert_eq!(action.id, "action_2");
    assert_eq!(action.role, NodeRole::Action);
    assert_eq!(action.data.node_type, "send_email");
    assert_eq!(action.data.label, "Send Welcome Email");
    assert_eq!(action.position, Position::new(400, 100));

    let edge = &graph.edges[0];
    assert_eq!(edge.id, "edge_1");
    assert_eq!(edge.source, "trigger_1");
    assert_eq!(edge.target, "action_2");
    assert!(edge.animated);
}

#[test]
fn test_trigger_selection_deal_won() {
    let graph = synthesize("notify me when the deal is won");
    assert_eq!(graph.elements[0].data.node_type, "deal_won");
    assert_eq!(graph.elements[0].data.label, "Deal Won");
}

#[test]
fn test_trigger_selection_schedule_and_weekdays() {
    assert_eq!(
        synthesize("run this on a schedule").elements[0].data.node_type,
        "time_trigger"
    );
    assert_eq!(
        synthesize("every monday review leads").elements[0].data.node_type,
        "time_trigger"
    );
    assert_eq!(
        synthesize("every friday review leads").elements[0].data.node_type,
        "time_trigger"
    );
}

#[test]
/// "deal" without "won" must not pick the deal trigger.
fn test_trigger_requires_full_group() {
    let graph = synthesize("when a deal changes do nothing special");
    assert_eq!(graph.elements[0].data.node_type, "form_submit");
}

#[test]
fn test_default_trigger_for_unrecognized_text() {
    let graph = synthesize("completely unrelated request");
    assert_eq!(graph.elements.len(), 1);
    let trigger = &graph.elements[0];
    assert_eq!(trigger.data.node_type, "form_submit");
    assert_eq!(trigger.data.description, "General workflow trigger");
    assert!(graph.edges.is_empty());
}

#[test]
/// Actions chain in priority order with the fixed horizontal step, the
/// whole-graph counter naming them and edges connecting consecutively.
fn test_action_chain_priority_and_layout() {
    let graph = synthesize("when form submitted, score the lead with ai, send email, then wait");

    let types: Vec<&str> = graph
        .elements
        .iter()
        .skip(1)
        .map(|node| node.data.node_type.as_str())
        .collect();
    assert_eq!(types, vec!["ai_score", "send_email", "wait_delay"]);

    let ids: Vec<&str> = graph
        .elements
        .iter()
        .skip(1)
        .map(|node| node.id.as_str())
        .collect();
    assert_eq!(ids, vec!["action_2", "action_3", "action_4"]);

    for (n, node) in graph.elements.iter().skip(1).enumerate() {
        let expected_x = TRIGGER_POSITION.x + ACTION_X_STEP * (n as i64 + 1);
        assert_eq!(node.position, Position::new(expected_x, TRIGGER_POSITION.y));
    }

    assert_eq!(graph.edges.len(), 3);
    assert_eq!(graph.edges[0].source, "trigger_1");
    assert_eq!(graph.edges[0].target, "action_2");
    assert_eq!(graph.edges[1].source, "action_2");
    assert_eq!(graph.edges[1].target, "action_3");
    assert_eq!(graph.edges[2].source, "action_3");
    assert_eq!(graph.edges[2].target, "action_4");
    assert_eq!(graph.edges[2].id, "edge_3");
}

#[test]
fn test_thank_you_label_override() {
    let graph = synthesize("send a thank you email after submit");
    let email = graph
        .elements
        .iter()
        .find(|node| node.data.node_type == "send_email")
        .expect("email action missing");
    assert_eq!(email.data.label, "Send Thank You Email");
}

#[test]
fn test_generic_email_label() {
    let graph = synthesize("send email after form submit");
    let email = graph
        .elements
        .iter()
        .find(|node| node.data.node_type == "send_email")
        .expect("email action missing");
    assert_eq!(email.data.label, "Send Email");
}

#[test]
/// "ai" must not fire as a substring of "email".
fn test_ai_keyword_is_word_scoped() {
    let graph = synthesize("send welcome email when form is submitted");
    assert!(
        graph
            .elements
            .iter()
            .all(|node| node.data.node_type != "ai_score")
    );
}

#[test]
fn test_create_deal_requires_both_keywords() {
    let with_both = synthesize("create a deal when form submitted");
    assert!(
        with_both
            .elements
            .iter()
            .any(|node| node.data.node_type == "create_deal")
    );

    let create_only = synthesize("create something when form submitted");
    assert!(
        create_only
            .elements
            .iter()
            .all(|node| node.data.node_type != "create_deal")
    );
}

#[test]
fn test_update_contact_requires_both_keywords() {
    let graph = synthesize("update the contact record after submit");
    assert!(
        graph
            .elements
            .iter()
            .any(|node| node.data.node_type == "update_contact")
    );

    let update_only = synthesize("update the record after submit");
    assert!(
        update_only
            .elements
            .iter()
            .all(|node| node.data.node_type != "update_contact")
    );
}

#[test]
fn test_wait_delay_style() {
    let graph = synthesize("wait two days after form submit");
    let delay = graph
        .elements
        .iter()
        .find(|node| node.data.node_type == "wait_delay")
        .expect("delay action missing");
    assert_eq!(delay.style_class, StyleClass::Delay);
}

#[test]
/// Inflected keywords still hit: "submitted", "scoring", "contacts".
fn test_inflected_keywords_match() {
    let graph = synthesize("after the form is submitted start scoring");
    assert_eq!(graph.elements[0].data.node_type, "form_submit");
    assert!(
        graph
            .elements
            .iter()
            .any(|node| node.data.node_type == "ai_score")
    );
}
