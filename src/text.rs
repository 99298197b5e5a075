//! Keyword tokenization shared by the synthesizer and the suggestion
//! heuristic.
//!
//! Matching is word-prefix based rather than substring based: the
//! lower-cased input is split into alphanumeric words and a keyword
//! hits when some word starts with it. This keeps inflections matching
//! ("submitted" hits "submit", "contacts" hits "contact") without
//! short keywords firing inside unrelated words ("ai" inside "email").

/// Split a description into lower-cased alphanumeric words.
pub(crate) fn words(description: &str) -> Vec<String> {
    description
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when some word starts with `keyword`.
pub(crate) fn mentions(words: &[String], keyword: &str) -> bool {
    words.iter().any(|w| w.starts_with(keyword))
}
