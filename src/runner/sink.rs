use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use aws_smithy_types::error::display::DisplayErrorContext;
use tracing::info;

use crate::core::models::BlockEvent;
use crate::errors::BlockError;

/// Downstream consumer of block events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: &BlockEvent) -> Result<(), BlockError>;
}

/// Keeps emitted events in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<BlockEvent>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<BlockEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn emit(&self, event: &BlockEvent) -> Result<(), BlockError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

/// Forwards events to an SQS queue using the runtime's own credentials.
#[derive(Debug, Clone)]
pub struct SqsSink {
    client: SqsClient,
    queue_url: String,
}

impl SqsSink {
    pub fn new(client: SqsClient, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    pub async fn from_env(queue_url: impl Into<String>) -> Self {
        let shared_config = aws_config::from_env().load().await;
        Self::new(SqsClient::new(&shared_config), queue_url)
    }
}

#[async_trait]
impl EventSink for SqsSink {
    async fn emit(&self, event: &BlockEvent) -> Result<(), BlockError> {
        let message_body = serde_json::to_string(event)
            .map_err(|e| BlockError::Serialization(format!("Failed to serialize event: {e}")))?;

        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(message_body)
            .send()
            .await
            .map_err(|e| {
                BlockError::Aws(format!(
                    "Failed to send event to SQS: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        info!(request_id = %event.request_id, "Forwarded block event to SQS");
        Ok(())
    }
}
