//! Lead scoring model and engines.
//!
//! Two producers share one result shape: the AI-backed orchestrator
//! ([`orchestrator::ScoringOrchestrator`]) and the pure rule engine
//! ([`rules::score_contact`]). Callers never special-case which engine
//! answered; the producer is identified by `agent_used` metadata only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod orchestrator;
pub mod rules;

pub use orchestrator::{ScoringError, ScoringOrchestrator};
pub use rules::score_contact;

/// Contact attributes considered by both scoring engines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
}

impl Contact {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

/// Hot/warm/cold banding, always derived from the numeric score.
///
/// # Examples
///
/// ```
/// use flowsmith::scoring::LeadCategory;
///
/// assert_eq!(LeadCategory::from_score(85), LeadCategory::Hot);
/// assert_eq!(LeadCategory::from_score(79), LeadCategory::Warm);
/// assert_eq!(LeadCategory::from_score(49), LeadCategory::Cold);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadCategory {
    Hot,
    Warm,
    Cold,
}

impl LeadCategory {
    /// Scores at or above this are hot.
    pub const HOT_THRESHOLD: u8 = 80;
    /// Scores at or above this (and below hot) are warm.
    pub const WARM_THRESHOLD: u8 = 50;

    /// Bands a score. Category is a pure function of score and is never
    /// stored independently of it.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= Self::HOT_THRESHOLD {
            Self::Hot
        } else if score >= Self::WARM_THRESHOLD {
            Self::Warm
        } else {
            Self::Cold
        }
    }
}

impl fmt::Display for LeadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hot => write!(f, "hot"),
            Self::Warm => write!(f, "warm"),
            Self::Cold => write!(f, "cold"),
        }
    }
}

/// Per-criterion score components. Bounds: email quality 0–20, company
/// fit 0–30, engagement 0–30, qualification 0–20.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub email_quality: u8,
    pub company_fit: u8,
    pub engagement: u8,
    pub qualification: u8,
}

impl ScoreBreakdown {
    /// Sum of the components, clamped to the 0–100 score range.
    #[must_use]
    pub fn total(&self) -> u8 {
        let sum = u16::from(self.email_quality)
            + u16::from(self.company_fit)
            + u16::from(self.engagement)
            + u16::from(self.qualification);
        sum.min(100) as u8
    }
}

/// A complete scoring answer from either engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub category: LeadCategory,
    pub reasoning: String,
    pub breakdown: ScoreBreakdown,
    pub confidence: f64,
    pub agent_used: String,
    pub tools_available: Vec<String>,
    #[serde(rename = "timestamp")]
    pub scored_at: DateTime<Utc>,
}
