//! Deterministic rule-based lead scoring.
//!
//! The rule engine is pure and total: no external calls, no state, the
//! same breakdown for the same contact every time. It scores from the
//! email domain and the company field alone; engagement and
//! qualification stay at baseline constants in the absence of
//! interaction history, and confidence is held at a conservative value
//! to signal reduced certainty versus an AI-backed result.

use chrono::Utc;

use super::{Contact, LeadCategory, ScoreBreakdown, ScoreResult};

/// `agent_used` tag for rule-engine results.
pub const RULE_ENGINE_ID: &str = "fallback_rule_engine";

/// Confidence reported by every rule-engine result.
pub const RULE_CONFIDENCE: f64 = 0.6;

/// Email domains treated as personal rather than business addresses.
pub const PERSONAL_EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com"];

const PERSONAL_EMAIL_QUALITY: u8 = 10;
const BUSINESS_EMAIL_QUALITY: u8 = 18;
const KNOWN_COMPANY_FIT: u8 = 20;
const UNKNOWN_COMPANY_FIT: u8 = 5;
const BASELINE_ENGAGEMENT: u8 = 15;
const BASELINE_QUALIFICATION: u8 = 10;

fn email_quality(email: &str) -> u8 {
    let Some((_, domain)) = email.split_once('@') else {
        return 0;
    };
    let domain = domain.to_lowercase();
    if PERSONAL_EMAIL_DOMAINS.contains(&domain.as_str()) {
        PERSONAL_EMAIL_QUALITY
    } else {
        BUSINESS_EMAIL_QUALITY
    }
}

fn company_fit(company: &str) -> u8 {
    let company = company.trim();
    if company.is_empty() || company.eq_ignore_ascii_case("unknown") {
        UNKNOWN_COMPANY_FIT
    } else {
        KNOWN_COMPANY_FIT
    }
}

/// Scores a contact with the rule engine.
///
/// The breakdown components always sum to the score, and the category
/// is derived from it.
///
/// # Examples
///
/// ```
/// use flowsmith::scoring::{score_contact, Contact, LeadCategory};
///
/// let result = score_contact(&Contact::new("", "x@gmail.com"));
/// assert_eq!(result.breakdown.email_quality, 10);
/// assert_eq!(result.breakdown.company_fit, 5);
/// assert_eq!(result.score, 40);
/// assert_eq!(result.category, LeadCategory::Cold);
/// ```
#[must_use]
pub fn score_contact(contact: &Contact) -> ScoreResult {
    let breakdown = ScoreBreakdown {
        email_quality: email_quality(&contact.email),
        company_fit: company_fit(&contact.company),
        engagement: BASELINE_ENGAGEMENT,
        qualification: BASELINE_QUALIFICATION,
    };
    let score = breakdown.total();
    ScoreResult {
        score,
        category: LeadCategory::from_score(score),
        reasoning: "Rule-based scoring from email domain and company information; \
                    no interaction history available."
            .to_string(),
        breakdown,
        confidence: RULE_CONFIDENCE,
        agent_used: RULE_ENGINE_ID.to_string(),
        tools_available: Vec::new(),
        scored_at: Utc::now(),
    }
}
