use async_trait::async_trait;
use std::time::Duration;

use flowsmith::agent::{AgentBackend, BackendError, Capability};

/// Backend that answers every prompt with a canned reply.
#[derive(Debug, Clone)]
pub struct CannedBackend {
    pub id: &'static str,
    pub reply: String,
}

impl CannedBackend {
    pub fn new(id: &'static str, reply: impl Into<String>) -> Self {
        Self {
            id,
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl AgentBackend for CannedBackend {
    fn id(&self) -> &str {
        self.id
    }

    async fn run(
        &self,
        _prompt: &str,
        _capabilities: &[Capability],
    ) -> Result<String, BackendError> {
        Ok(self.reply.clone())
    }
}

/// Backend whose every call fails.
#[derive(Debug, Clone)]
pub struct FailingBackend;

#[async_trait]
impl AgentBackend for FailingBackend {
    fn id(&self) -> &str {
        "failing_backend"
    }

    async fn run(
        &self,
        _prompt: &str,
        _capabilities: &[Capability],
    ) -> Result<String, BackendError> {
        Err(BackendError::CallFailed {
            message: "connection refused".to_string(),
        })
    }
}

/// Backend that sleeps past any reasonable test timeout before replying.
#[derive(Debug, Clone)]
pub struct SlowBackend {
    pub delay: Duration,
}

#[async_trait]
impl AgentBackend for SlowBackend {
    fn id(&self) -> &str {
        "slow_backend"
    }

    async fn run(
        &self,
        _prompt: &str,
        _capabilities: &[Capability],
    ) -> Result<String, BackendError> {
        tokio::time::sleep(self.delay).await;
        Ok("{\"elements\": [], \"edges\": []}".to_string())
    }
}

/// Installs a test tracing subscriber once per binary.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
