//! Advisory improvement hints for workflow descriptions.
//!
//! Each rule is evaluated independently; hints are emitted in rule
//! order and a description may collect several (or none). Hints are
//! human-readable advice only, never structural requirements.

use crate::text;

/// Descriptions longer than this many words earn a decomposition hint.
const DECOMPOSITION_WORD_LIMIT: usize = 20;

/// Suggests improvements for a workflow description.
///
/// # Examples
///
/// ```
/// use flowsmith::suggestions::suggest_improvements;
///
/// let hints = suggest_improvements("Send welcome email when form is submitted");
/// assert_eq!(hints.len(), 1);
/// assert!(hints[0].contains("delay"));
/// ```
#[must_use]
pub fn suggest_improvements(description: &str) -> Vec<String> {
    let words = text::words(description);
    let mut hints = Vec::new();

    if text::mentions(&words, "email") && !text::mentions(&words, "delay") {
        hints.push(
            "Consider adding a delay before sending emails to avoid appearing spammy".to_string(),
        );
    }
    if text::mentions(&words, "score") && !text::mentions(&words, "threshold") {
        hints.push(
            "Consider adding score thresholds for conditional logic (e.g., 'if score > 70')"
                .to_string(),
        );
    }
    if text::mentions(&words, "deal") && !text::mentions(&words, "notification") {
        hints.push("Consider notifying the sales team when deals are created or updated".to_string());
    }
    if words.len() > DECOMPOSITION_WORD_LIMIT {
        hints.push(
            "Complex workflows work better when broken into smaller, focused automations"
                .to_string(),
        );
    }

    hints
}
