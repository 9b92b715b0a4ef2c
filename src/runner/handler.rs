use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use super::invoker::Invoker;
use super::sink::{EventSink, MemorySink, SqsSink};
use crate::blocks::{BUILTIN, BlockRegistry};
use crate::core::config::AppConfig;
use crate::core::models::BlockEvent;
use crate::errors::BlockError;

pub use self::function_handler as handler;

/// Payload accepted by the runner Lambda.
#[derive(Debug, Clone, Deserialize)]
pub struct RunRequest {
    pub block: String,
    #[serde(default)]
    pub config: Value,
}

/// Runs one block request against `registry`.
///
/// # Errors
///
/// Whatever [`Invoker::invoke_by_id`] returns.
pub async fn run(
    invoker: &Invoker,
    registry: &BlockRegistry,
    request: RunRequest,
) -> Result<BlockEvent, BlockError> {
    info!(block = %request.block, "Received block request");
    invoker
        .invoke_by_id(registry, &request.block, request.config)
        .await
}

/// Lambda handler for the runner entrypoint. Returns the emitted event.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    let request: RunRequest = serde_json::from_value(event.payload)
        .map_err(|e| Error::from(format!("Failed to parse block request: {e}")))?;

    let sink: Arc<dyn EventSink> = match &config.result_queue_url {
        Some(queue_url) => Arc::new(SqsSink::from_env(queue_url.clone()).await),
        None => Arc::new(MemorySink::new()),
    };
    let invoker = Invoker::from_config(&config, sink);

    let emitted = run(&invoker, &BUILTIN, request).await.map_err(|e| {
        error!("Block invocation failed: {}", e);
        Error::from(e)
    })?;

    serde_json::to_value(emitted).map_err(|e| Error::from(format!("Failed to serialize event: {e}")))
}
