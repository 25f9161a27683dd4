use crate::definition::WorkflowDefinition;
use anyhow::{Result, anyhow, Context as AnyhowContext};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::info;

/// Where serialized definitions go. Submission is fire-and-forget: one
/// request, no retry, no idempotency guarantee; retry policy belongs to
/// the caller.
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    /// Submit a definition and return the identifier the service stored
    /// it under.
    async fn submit(&self, definition: &WorkflowDefinition) -> Result<String>;
}

/// HTTP persistence endpoint accepting the definition as a JSON POST body.
pub struct HttpDefinitionStore {
    client: Client,
    endpoint: String,
}

impl HttpDefinitionStore {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl DefinitionStore for HttpDefinitionStore {
    async fn submit(&self, definition: &WorkflowDefinition) -> Result<String> {
        info!(workflow = %definition.id, endpoint = %self.endpoint, "Submitting workflow definition");

        let response = self
            .client
            .post(&self.endpoint)
            .json(definition)
            .send()
            .await
            .with_context(|| format!("Failed to reach persistence endpoint {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Persistence service rejected the definition: HTTP {}", status));
        }

        // The service echoes the stored id as { "id": "..." }. If the body
        // is not JSON or carries no id, fall back to the id we generated.
        let body = match response.json::<Value>().await {
            Ok(json) => json,
            Err(_) => Value::Null,
        };
        let stored_id = body
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or(&definition.id)
            .to_string();

        info!(workflow = %stored_id, "Workflow definition stored");
        Ok(stored_id)
    }
}
