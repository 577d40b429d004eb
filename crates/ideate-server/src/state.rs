use std::sync::Arc;

use thiserror::Error;

use ideate_config::IdeateConfig;
use ideate_db::error::DatabaseError;
use ideate_db::service::RecordStore;
use ideate_relay::{AssistantClient, RelayError, WorkflowClient};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    /// `None` when no webhook is configured; submissions then fail with 500.
    pub workflow: Option<Arc<WorkflowClient>>,
    /// `None` when no API key is configured; chat then fails with 500.
    pub assistant: Option<Arc<AssistantClient>>,
    pub context_max_chars: usize,
}

impl AppState {
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(store),
            workflow: None,
            assistant: None,
            context_max_chars: ideate_config::AssistantConfig::default().context_max_chars,
        }
    }

    #[must_use]
    pub fn with_workflow(mut self, client: WorkflowClient) -> Self {
        self.workflow = Some(Arc::new(client));
        self
    }

    #[must_use]
    pub fn with_assistant(mut self, client: AssistantClient, context_max_chars: usize) -> Self {
        self.assistant = Some(Arc::new(client));
        self.context_max_chars = context_max_chars;
        self
    }

    /// Open the store and build whichever clients are configured.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened or an HTTP client cannot be built.
    pub async fn from_config(config: &IdeateConfig) -> Result<Self, StartupError> {
        if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
            if !config.database.is_in_memory() && !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Migration(format!("cannot create {}: {e}", parent.display()))
                })?;
            }
        }
        let mut state = Self::new(RecordStore::new_local(&config.database.path).await?);

        if config.workflow.is_configured() {
            state = state.with_workflow(WorkflowClient::new(&config.workflow)?);
        } else {
            tracing::warn!("workflow webhook not configured; submissions will fail");
        }
        if config.assistant.is_configured() {
            state = state.with_assistant(
                AssistantClient::new(&config.assistant)?,
                config.assistant.context_max_chars,
            );
        } else {
            tracing::warn!("assistant API key not configured; chat will fail");
        }
        Ok(state)
    }
}
