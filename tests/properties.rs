use proptest::prelude::*;

use flowsmith::registry::NodeTypeRegistry;
use flowsmith::scoring::{score_contact, Contact, LeadCategory};
use flowsmith::synthesizer::synthesize;
use flowsmith::validator::validate_graph;

/// Words built only from letters no keyword starts with, so a
/// description assembled from them can never match a rule.
fn keyword_free_description() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[xyzqv]{1,10}").unwrap(), 0..8)
        .prop_map(|words| words.join(" "))
}

proptest! {
    /// Descriptions without a recognized action keyword synthesize to
    /// exactly one node and zero edges.
    #[test]
    fn prop_keyword_free_descriptions_are_degenerate(description in keyword_free_description()) {
        let graph = synthesize(&description);
        prop_assert_eq!(graph.elements.len(), 1);
        prop_assert_eq!(graph.edges.len(), 0);
        prop_assert_eq!(graph.elements[0].data.node_type.as_str(), "form_submit");
    }
}

proptest! {
    /// Whatever the input text, synthesizer output passes validation
    /// and validation of it is idempotent.
    #[test]
    fn prop_synthesized_graphs_validate(description in any::<String>()) {
        let registry = NodeTypeRegistry::new();
        let graph = synthesize(&description);
        let first = validate_graph(&registry, &graph);
        prop_assert!(first.valid, "errors: {:?}", first.errors);
        let second = validate_graph(&registry, &graph);
        prop_assert_eq!(first, second);
    }
}

proptest! {
    /// Synthesized graphs are linear chains: one trigger, n actions,
    /// n edges connecting consecutive nodes left to right.
    #[test]
    fn prop_synthesized_graphs_are_chains(description in any::<String>()) {
        let graph = synthesize(&description);
        prop_assert_eq!(graph.edges.len(), graph.elements.len() - 1);
        for (i, edge) in graph.edges.iter().enumerate() {
            prop_assert_eq!(edge.source.as_str(), graph.elements[i].id.as_str());
            prop_assert_eq!(edge.target.as_str(), graph.elements[i + 1].id.as_str());
        }
        // x strictly increases along the chain.
        for pair in graph.elements.windows(2) {
            prop_assert!(pair[0].position.x < pair[1].position.x);
        }
    }
}

proptest! {
    /// Rule-engine breakdowns always sum to the score, the score stays
    /// in range, and the category is the pure banding of the score.
    #[test]
    fn prop_rule_engine_breakdown_sums(email in any::<String>(), company in any::<String>()) {
        let contact = Contact::new("P", email).with_company(company);
        let result = score_contact(&contact);
        let sum = u16::from(result.breakdown.email_quality)
            + u16::from(result.breakdown.company_fit)
            + u16::from(result.breakdown.engagement)
            + u16::from(result.breakdown.qualification);
        prop_assert_eq!(sum, u16::from(result.score));
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.category, LeadCategory::from_score(result.score));
    }
}

proptest! {
    /// Category banding over the whole score range.
    #[test]
    fn prop_category_banding(score in 0u8..=100) {
        let expected = if score >= 80 {
            LeadCategory::Hot
        } else if score >= 50 {
            LeadCategory::Warm
        } else {
            LeadCategory::Cold
        };
        prop_assert_eq!(LeadCategory::from_score(score), expected);
    }
}
