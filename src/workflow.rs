//! Workflow orchestration: AI attempt, parse, validate, deterministic
//! fallback.
//!
//! The degradation state machine is `ai_attempt → parse → {validated,
//! fallback}`. With no backend configured the AI attempt is bypassed
//! entirely and the keyword synthesizer answers. With a backend, its
//! output goes through extraction and decoding; any call failure,
//! timeout, or parse failure degrades to a placeholder advisory graph
//! with a descriptive error message. Validity of an AI-produced graph
//! is reported, not enforced: a decodable graph is returned together
//! with its validation result either way.
//!
//! The orchestrator never raises an unrecoverable failure: apart from
//! the empty-description input error, every path terminates in a
//! structurally well-formed [`WorkflowResponse`].

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::agent::extract::parse_workflow_output;
use crate::agent::{AgentBackend, BackendConfig, BackendError, FallbackCause, WORKFLOW_CAPABILITIES};
use crate::graph::{Graph, GraphEdge, GraphNode, Position, StyleClass};
use crate::registry::{ACTION_TYPES, NodeTypeRegistry, TRIGGER_TYPES};
use crate::suggestions::suggest_improvements;
use crate::synthesizer::synthesize;
use crate::validator::{ValidationResult, validate_graph};

/// `agent_used` tag for the deterministic synthesizer path.
pub const SYNTHESIZER_AGENT_ID: &str = "keyword_synthesizer";

/// `agent_used` tag for the placeholder emitted after a failed backend
/// attempt.
pub const PLACEHOLDER_AGENT_ID: &str = "workflow_placeholder";

const AI_CONFIDENCE: f64 = 0.9;
const SYNTHESIZER_CONFIDENCE: f64 = 0.5;
const SYNTHESIZER_MULTI_ACTION_CONFIDENCE: f64 = 0.7;

/// Which engine produced a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    Ai,
    Fallback,
}

/// The structurally-guaranteed answer to a workflow generation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub success: bool,
    pub elements: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub agent_used: String,
    pub method: GenerationMethod,
    pub validation: ValidationResult,
    pub suggestions: Vec<String>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The only caller-visible failure of the workflow orchestrator.
#[derive(Debug, Error, Diagnostic)]
pub enum WorkflowError {
    #[error("description must not be empty")]
    #[diagnostic(
        code(flowsmith::workflow::empty_description),
        help("Provide a natural-language description of the workflow to build.")
    )]
    EmptyDescription,
}

/// Composes synthesizer, validator, and suggestion heuristic, and
/// arbitrates between an AI-produced graph and the deterministic
/// synthesizer.
///
/// # Examples
///
/// ```
/// use flowsmith::agent::BackendConfig;
/// use flowsmith::workflow::WorkflowOrchestrator;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let orchestrator = WorkflowOrchestrator::new(BackendConfig::disabled());
/// let response = orchestrator
///     .generate("Send welcome email when form is submitted")
///     .await
///     .unwrap();
/// assert!(response.success);
/// assert!(response.validation.valid);
/// # });
/// ```
#[derive(Debug)]
pub struct WorkflowOrchestrator {
    registry: NodeTypeRegistry,
    config: BackendConfig,
}

impl WorkflowOrchestrator {
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            registry: NodeTypeRegistry::new(),
            config,
        }
    }

    /// The registry backing validation and prompt construction.
    #[must_use]
    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    /// Generates a workflow graph for the description.
    ///
    /// # Errors
    ///
    /// Only [`WorkflowError::EmptyDescription`]; backend and parse
    /// failures are absorbed into the fallback response.
    #[instrument(skip(self, description), fields(configured = self.config.is_configured()))]
    pub async fn generate(&self, description: &str) -> Result<WorkflowResponse, WorkflowError> {
        if description.trim().is_empty() {
            return Err(WorkflowError::EmptyDescription);
        }

        let Some(backend) = self.config.backend.clone() else {
            debug!("no backend configured; answering with the synthesizer");
            return Ok(self.synthesizer_response(description));
        };

        match self.attempt_backend(backend.as_ref(), description).await {
            Ok(graph) => Ok(self.ai_response(backend.id(), description, graph)),
            Err(cause) => {
                warn!(cause = %cause, "workflow generation degraded to placeholder");
                Ok(self.placeholder_response(cause))
            }
        }
    }

    async fn attempt_backend(
        &self,
        backend: &dyn AgentBackend,
        description: &str,
    ) -> Result<Graph, FallbackCause> {
        let prompt = build_workflow_prompt(description);
        let raw = tokio::time::timeout(
            self.config.call_timeout,
            backend.run(&prompt, WORKFLOW_CAPABILITIES),
        )
        .await
        .map_err(|_| BackendError::TimedOut {
            timeout_ms: self.config.call_timeout.as_millis() as u64,
        })??;
        debug!(output_len = raw.len(), "backend answered; parsing output");
        Ok(parse_workflow_output(&raw)?)
    }

    fn ai_response(&self, agent_id: &str, description: &str, graph: Graph) -> WorkflowResponse {
        let validation = validate_graph(&self.registry, &graph);
        WorkflowResponse {
            success: true,
            elements: graph.elements,
            edges: graph.edges,
            agent_used: agent_id.to_string(),
            method: GenerationMethod::Ai,
            validation,
            suggestions: suggest_improvements(description),
            confidence: AI_CONFIDENCE,
            error: None,
        }
    }

    fn synthesizer_response(&self, description: &str) -> WorkflowResponse {
        let graph = synthesize(description);
        let confidence = if graph.action_count() > 1 {
            SYNTHESIZER_MULTI_ACTION_CONFIDENCE
        } else {
            SYNTHESIZER_CONFIDENCE
        };
        let validation = validate_graph(&self.registry, &graph);
        WorkflowResponse {
            success: true,
            elements: graph.elements,
            edges: graph.edges,
            agent_used: SYNTHESIZER_AGENT_ID.to_string(),
            method: GenerationMethod::Fallback,
            validation,
            suggestions: suggest_improvements(description),
            confidence,
            error: None,
        }
    }

    fn placeholder_response(&self, cause: FallbackCause) -> WorkflowResponse {
        let graph = placeholder_graph();
        let validation = validate_graph(&self.registry, &graph);
        WorkflowResponse {
            success: false,
            elements: graph.elements,
            edges: graph.edges,
            agent_used: PLACEHOLDER_AGENT_ID.to_string(),
            method: GenerationMethod::Fallback,
            validation,
            suggestions: Vec::new(),
            confidence: 0.0,
            error: Some(cause.to_string()),
        }
    }
}

/// The deterministic placeholder emitted when a configured backend
/// cannot produce a usable graph: a single advisory node, no edges.
#[must_use]
pub fn placeholder_graph() -> Graph {
    Graph {
        elements: vec![
            GraphNode::trigger(
                "fallback_1",
                "form_submit",
                "Manual Configuration Required",
                "Please configure this workflow manually",
                Position::new(100, 100),
            )
            .with_style(StyleClass::Fallback),
        ],
        edges: Vec::new(),
    }
}

fn build_workflow_prompt(description: &str) -> String {
    let mut prompt = String::from(
        "Convert this workflow description into a workflow graph.\n\nUser Request: \"",
    );
    prompt.push_str(description);
    prompt.push_str("\"\n\nAvailable triggers:\n");
    for (name, about) in TRIGGER_TYPES {
        prompt.push_str(&format!("- {name}: {about}\n"));
    }
    prompt.push_str("\nAvailable actions:\n");
    for (name, about) in ACTION_TYPES {
        prompt.push_str(&format!("- {name}: {about}\n"));
    }
    prompt.push_str(
        "\nReturn ONLY one JSON object of the form \
         {\"elements\": [{\"id\", \"type\", \"data\": {\"label\", \"nodeType\", \
         \"description\", \"config\"}, \"position\": {\"x\", \"y\"}, \"className\"}], \
         \"edges\": [{\"id\", \"source\", \"target\", \"animated\", \"style\"}]}. \
         Use only the node types listed above, \"input\" for triggers and \
         \"default\" for actions, and connect nodes left to right.",
    );
    prompt
}
