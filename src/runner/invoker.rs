use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::sink::EventSink;
use crate::blocks::{Block, BlockRegistry};
use crate::core::config::AppConfig;
use crate::core::models::{BlockEvent, InvocationRequest};
use crate::credentials::{ClientContext, CredentialResolver};
use crate::errors::BlockError;

/// Runs blocks: validate, resolve credentials, call, emit.
#[derive(Clone)]
pub struct Invoker {
    resolver: CredentialResolver,
    sink: Arc<dyn EventSink>,
    default_endpoint: Option<String>,
}

impl Invoker {
    pub fn new(resolver: CredentialResolver, sink: Arc<dyn EventSink>) -> Self {
        Self {
            resolver,
            sink,
            default_endpoint: None,
        }
    }

    /// Invoker with STS-backed credential resolution and the configured default endpoint.
    #[must_use]
    pub fn from_config(config: &AppConfig, sink: Arc<dyn EventSink>) -> Self {
        Self::new(CredentialResolver::from_config(config), sink)
            .with_default_endpoint(config.endpoint_url.clone())
    }

    /// Endpoint used when a request does not name its own.
    #[must_use]
    pub fn with_default_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.default_endpoint = endpoint;
        self
    }

    /// Invokes `block` with the caller-supplied `config` and emits exactly one event.
    ///
    /// # Errors
    ///
    /// Schema violations are returned before any network call. Credential and
    /// service errors are forwarded as they come; nothing is emitted then.
    #[tracing::instrument(level = "info", skip(self, block, config), fields(block = %block.definition().id))]
    pub async fn invoke(&self, block: &dyn Block, config: Value) -> Result<BlockEvent, BlockError> {
        let definition = block.definition();
        let request = InvocationRequest::from_config(&definition.config, config)?;
        let request_id = Uuid::new_v4().to_string();

        info!(
            request_id = %request_id,
            region = %request.region,
            assume_role = request.assume_role_arn.is_some(),
            "Invoking block"
        );

        let endpoint = request
            .endpoint
            .clone()
            .or_else(|| self.default_endpoint.clone());
        if let Some(endpoint) = &endpoint {
            debug!(endpoint = %endpoint, "Using custom endpoint");
        }

        let credentials = self
            .resolver
            .resolve(
                &request.region,
                request.assume_role_arn.as_deref(),
                endpoint.as_deref(),
            )
            .await
            .inspect_err(|e| error!(request_id = %request_id, "Credential resolution failed: {}", e))?;

        let ctx = ClientContext::new(credentials, request.region.clone(), endpoint);
        let output = block
            .call(&ctx, &request.params)
            .await
            .inspect_err(|e| error!(request_id = %request_id, "Block call failed: {}", e))?;

        let event = BlockEvent::new(definition.id.clone(), request_id, output);
        self.sink.emit(&event).await?;

        info!(request_id = %event.request_id, "Block event emitted");
        Ok(event)
    }

    /// Looks `id` up in `registry` and invokes it.
    ///
    /// # Errors
    ///
    /// `UnknownBlock` when the id is not registered, otherwise as [`Invoker::invoke`].
    pub async fn invoke_by_id(
        &self,
        registry: &BlockRegistry,
        id: &str,
        config: Value,
    ) -> Result<BlockEvent, BlockError> {
        let block = registry.get(id)?;
        self.invoke(block.as_ref(), config).await
    }
}
