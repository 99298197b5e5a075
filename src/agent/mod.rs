//! AI backend boundary.
//!
//! The generative agent is an external collaborator: it accepts a
//! prompt plus a set of named callable capabilities and returns free
//! text expected to contain exactly one JSON object. It may fail, time
//! out, or return malformed text; the orchestrators treat all three
//! identically, falling back to a deterministic engine. This module
//! holds the trait at that seam, the capability descriptors, the
//! explicit backend configuration, and the error/cause taxonomy.

use async_trait::async_trait;
use miette::Diagnostic;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod extract;

pub use extract::ParseError;

/// A named callable capability advertised to the backend alongside a
/// prompt. The backend may invoke any of them while composing its
/// answer; their names are echoed back as `tools_available` metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capability {
    pub name: &'static str,
    pub description: &'static str,
}

/// Capabilities offered during workflow generation: the two read-only
/// registry queries plus validation and suggestion hooks.
pub const WORKFLOW_CAPABILITIES: &[Capability] = &[
    Capability {
        name: "get_available_triggers",
        description: "List the trigger node types a workflow may start from",
    },
    Capability {
        name: "get_available_actions",
        description: "List the action node types a workflow may chain",
    },
    Capability {
        name: "validate_workflow_structure",
        description: "Structurally validate a candidate workflow graph",
    },
    Capability {
        name: "suggest_workflow_improvements",
        description: "Advise on improving a workflow description",
    },
];

/// Capabilities offered during lead scoring.
pub const SCORING_CAPABILITIES: &[Capability] = &[
    Capability {
        name: "get_contact_history",
        description: "Fetch interaction history for a contact",
    },
    Capability {
        name: "get_company_info",
        description: "Look up company size, industry, and revenue signals",
    },
    Capability {
        name: "analyze_email_quality",
        description: "Classify an email address by domain quality",
    },
];

/// The generative AI collaborator behind both orchestrators.
///
/// Implementations wrap whatever model or service answers prompts; the
/// orchestrators only see free text and the error taxonomy below.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Stable identifier reported to callers as `agent_used`.
    fn id(&self) -> &str;

    /// Runs the prompt with the advertised capabilities and returns the
    /// raw textual output.
    async fn run(&self, prompt: &str, capabilities: &[Capability]) -> Result<String, BackendError>;
}

/// Failures at the backend boundary. All variants are recovered locally
/// by the orchestrators; none reaches a caller as an error.
#[derive(Debug, Error, Diagnostic)]
pub enum BackendError {
    /// The backend exists but cannot currently serve requests.
    #[error("backend unavailable: {message}")]
    #[diagnostic(
        code(flowsmith::agent::unavailable),
        help("The deterministic engine answers while the backend is down.")
    )]
    Unavailable { message: String },

    /// The call itself failed (transport, provider, quota).
    #[error("backend call failed: {message}")]
    #[diagnostic(code(flowsmith::agent::call_failed))]
    CallFailed { message: String },

    /// The call exceeded the configured bound and was abandoned.
    #[error("backend call timed out after {timeout_ms} ms")]
    #[diagnostic(code(flowsmith::agent::timeout))]
    TimedOut { timeout_ms: u64 },
}

/// Why an orchestrator degraded to its deterministic fallback.
///
/// The external contract collapses every cause into one fallback path;
/// this tag keeps the causes distinct for logging and diagnostics.
#[derive(Debug, Error)]
pub enum FallbackCause {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("backend output unusable: {0}")]
    Parse(#[from] ParseError),
}

/// Explicit backend configuration handed to each orchestrator at
/// construction. Whether an AI backend participates is decided here,
/// once, never via process-wide globals; an absent backend routes every
/// request straight to the deterministic engine.
#[derive(Clone)]
pub struct BackendConfig {
    pub backend: Option<Arc<dyn AgentBackend>>,
    pub call_timeout: Duration,
}

impl BackendConfig {
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

    /// Configuration with no AI backend at all.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            backend: None,
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Configuration around a concrete backend.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn AgentBackend>) -> Self {
        Self {
            backend: Some(backend),
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout bound.
    #[must_use]
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Resolves the call timeout from the environment
    /// (`FLOWSMITH_AGENT_TIMEOUT_MS`), falling back to the default.
    pub fn from_env(backend: Option<Arc<dyn AgentBackend>>) -> Self {
        dotenvy::dotenv().ok();
        let call_timeout = std::env::var("FLOWSMITH_AGENT_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(Self::DEFAULT_CALL_TIMEOUT, Duration::from_millis);
        Self {
            backend,
            call_timeout,
        }
    }

    /// True when a backend is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("backend", &self.backend.as_ref().map(|b| b.id().to_string()))
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}
