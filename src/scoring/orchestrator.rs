//! AI-first lead scoring with deterministic fallback.
//!
//! The orchestrator prompts the configured backend with the contact's
//! fields, extracts and decodes the score payload from its free-text
//! answer, clamps every component into its documented range, and
//! re-derives the category from the clamped score. Any call failure,
//! timeout, or parse failure falls back to the rule engine; both paths
//! produce the identical [`ScoreResult`] shape.

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::agent::extract::parse_json_payload;
use crate::agent::{AgentBackend, BackendConfig, BackendError, FallbackCause, SCORING_CAPABILITIES};

use super::rules::score_contact;
use super::{Contact, LeadCategory, ScoreBreakdown, ScoreResult};

/// The only caller-visible failure of the scoring orchestrator.
#[derive(Debug, Error, Diagnostic)]
pub enum ScoringError {
    #[error("contact must carry a name or an email address")]
    #[diagnostic(
        code(flowsmith::scoring::empty_contact),
        help("Populate at least one of the contact's name or email fields.")
    )]
    EmptyContact,
}

/// Shape the backend is asked to answer with. `category` is accepted
/// but ignored: the category is always re-derived from the score.
#[derive(Debug, Deserialize)]
struct ScorePayload {
    score: i64,
    #[serde(default)]
    #[allow(dead_code)]
    category: Option<String>,
    reasoning: String,
    breakdown: BreakdownPayload,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct BreakdownPayload {
    email_quality: i64,
    company_fit: i64,
    engagement: i64,
    qualification: i64,
}

fn clamp_component(value: i64, max: u8) -> u8 {
    value.clamp(0, i64::from(max)) as u8
}

/// Attempts AI-backed scoring first, falling back to the rule engine on
/// any call or parse failure.
///
/// # Examples
///
/// ```
/// use flowsmith::agent::BackendConfig;
/// use flowsmith::scoring::{Contact, ScoringOrchestrator};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let orchestrator = ScoringOrchestrator::new(BackendConfig::disabled());
/// let result = orchestrator
///     .score(&Contact::new("Ada", "ada@gmail.com"))
///     .await
///     .unwrap();
/// assert_eq!(result.score, 40);
/// # });
/// ```
#[derive(Debug)]
pub struct ScoringOrchestrator {
    config: BackendConfig,
}

impl ScoringOrchestrator {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    /// Scores a contact.
    ///
    /// # Errors
    ///
    /// Only [`ScoringError::EmptyContact`]; backend and parse failures
    /// are absorbed into the rule-engine fallback.
    #[instrument(skip(self, contact), fields(configured = self.config.is_configured()))]
    pub async fn score(&self, contact: &Contact) -> Result<ScoreResult, ScoringError> {
        if contact.name.trim().is_empty() && contact.email.trim().is_empty() {
            return Err(ScoringError::EmptyContact);
        }

        let Some(backend) = self.config.backend.clone() else {
            debug!("no backend configured; answering with the rule engine");
            return Ok(score_contact(contact));
        };

        match self.attempt_backend(backend.as_ref(), contact).await {
            Ok(result) => Ok(result),
            Err(cause) => {
                warn!(cause = %cause, "lead scoring degraded to rule engine");
                Ok(score_contact(contact))
            }
        }
    }

    async fn attempt_backend(
        &self,
        backend: &dyn AgentBackend,
        contact: &Contact,
    ) -> Result<ScoreResult, FallbackCause> {
        let prompt = build_scoring_prompt(contact);
        let raw = tokio::time::timeout(
            self.config.call_timeout,
            backend.run(&prompt, SCORING_CAPABILITIES),
        )
        .await
        .map_err(|_| BackendError::TimedOut {
            timeout_ms: self.config.call_timeout.as_millis() as u64,
        })??;
        debug!(output_len = raw.len(), "backend answered; parsing payload");
        let payload: ScorePayload = parse_json_payload(&raw, "score payload")?;

        let breakdown = ScoreBreakdown {
            email_quality: clamp_component(payload.breakdown.email_quality, 20),
            company_fit: clamp_component(payload.breakdown.company_fit, 30),
            engagement: clamp_component(payload.breakdown.engagement, 30),
            qualification: clamp_component(payload.breakdown.qualification, 20),
        };
        let score = clamp_component(payload.score, 100);
        Ok(ScoreResult {
            score,
            category: LeadCategory::from_score(score),
            reasoning: payload.reasoning,
            breakdown,
            confidence: payload.confidence.clamp(0.0, 1.0),
            agent_used: backend.id().to_string(),
            tools_available: SCORING_CAPABILITIES
                .iter()
                .map(|capability| capability.name.to_string())
                .collect(),
            scored_at: chrono::Utc::now(),
        })
    }
}

fn build_scoring_prompt(contact: &Contact) -> String {
    let company = if contact.company.trim().is_empty() {
        "Not specified"
    } else {
        contact.company.as_str()
    };
    let phone = if contact.phone.trim().is_empty() {
        "N/A"
    } else {
        contact.phone.as_str()
    };
    format!(
        "Analyze this contact and provide a lead score from 0 to 100.\n\n\
         Name: {name}\nEmail: {email}\nCompany: {company}\nPhone: {phone}\n\n\
         Scoring criteria: email quality and domain 0-20, company size and \
         industry fit 0-30, interaction history and engagement 0-30, overall \
         qualification and buying signals 0-20.\n\n\
         Return ONLY one JSON object of the form {{\"score\": <0-100>, \
         \"category\": \"hot|warm|cold\", \"reasoning\": \"<2-3 sentences>\", \
         \"breakdown\": {{\"email_quality\": <0-20>, \"company_fit\": <0-30>, \
         \"engagement\": <0-30>, \"qualification\": <0-20>}}, \
         \"confidence\": <0.0-1.0>}}.",
        name = contact.name,
        email = contact.email,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_component_bounds() {
        assert_eq!(clamp_component(-5, 20), 0);
        assert_eq!(clamp_component(12, 20), 12);
        assert_eq!(clamp_component(250, 20), 20);
    }

    #[test]
    fn test_prompt_carries_contact_fields() {
        let prompt = build_scoring_prompt(
            &Contact::new("Maria Rossi", "maria@techsolution.it").with_company("TechSolution"),
        );
        assert!(prompt.contains("Maria Rossi"));
        assert!(prompt.contains("maria@techsolution.it"));
        assert!(prompt.contains("TechSolution"));
        assert!(prompt.contains("N/A"));
    }
}
