//! The block catalogue.
//!
//! A block exposes one AWS operation: it declares the configuration it
//! accepts, the shape of what it emits, and how to call the operation with a
//! resolved [`ClientContext`]. Credential handling lives in the runner, so a
//! block only builds its request and serializes the response.

pub mod cloudformation;
pub mod cloudwatch;
pub mod convert;
pub mod dynamodb;
pub mod params;
pub mod sqs;
pub mod ssm;
pub mod sts;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{Value, json};

use crate::core::models::Params;
use crate::core::schema::{ConfigSchema, FieldSchema};
use crate::credentials::ClientContext;
use crate::errors::BlockError;

/// Static description of a block: identity, accepted configuration and output shape.
#[derive(Debug, Clone)]
pub struct BlockDefinition {
    pub id: String,
    pub service: &'static str,
    pub operation: &'static str,
    pub description: &'static str,
    pub config: ConfigSchema,
    pub output: Value,
}

impl BlockDefinition {
    pub fn new(
        service: &'static str,
        operation: &'static str,
        description: &'static str,
        fields: Vec<FieldSchema>,
        output: Value,
    ) -> Self {
        Self {
            id: format!("{service}.{operation}"),
            service,
            operation,
            description,
            config: ConfigSchema::new(fields),
            output,
        }
    }

    #[must_use]
    pub fn catalogue_entry(&self) -> Value {
        json!({
            "id": self.id,
            "service": self.service,
            "operation": self.operation,
            "description": self.description,
            "config": self.config.to_json_schema(),
            "output": self.output,
        })
    }
}

#[async_trait]
pub trait Block: Send + Sync {
    fn definition(&self) -> &BlockDefinition;

    /// Sends the operation and returns its serialized response.
    ///
    /// `params` has already been validated against the definition's config schema.
    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError>;
}

#[derive(Default, Clone)]
pub struct BlockRegistry {
    blocks: BTreeMap<String, Arc<dyn Block>>,
}

/// Registry holding every block shipped with the crate.
pub static BUILTIN: Lazy<BlockRegistry> = Lazy::new(BlockRegistry::builtin);

impl BlockRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(cloudformation::DescribeStackSetOperation::new())
            .register(cloudformation::DescribeStacks::new())
            .register(cloudwatch::PutMetricData::new())
            .register(cloudwatch::DescribeAlarms::new())
            .register(dynamodb::GetItem::new())
            .register(dynamodb::PutItem::new())
            .register(dynamodb::DeleteItem::new())
            .register(sqs::SendMessage::new())
            .register(ssm::GetParameter::new())
            .register(ssm::PutParameter::new())
            .register(sts::GetCallerIdentity::new());
        registry
    }

    /// Adds `block`, replacing any block registered under the same id.
    pub fn register(&mut self, block: impl Block + 'static) -> &mut Self {
        let id = block.definition().id.clone();
        self.blocks.insert(id, Arc::new(block));
        self
    }

    /// # Errors
    ///
    /// `UnknownBlock` when nothing is registered under `id`.
    pub fn get(&self, id: &str) -> Result<Arc<dyn Block>, BlockError> {
        self.blocks
            .get(id)
            .cloned()
            .ok_or_else(|| BlockError::UnknownBlock(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// JSON catalogue of every registered block, ordered by id.
    #[must_use]
    pub fn catalogue(&self) -> Value {
        Value::Array(
            self.blocks
                .values()
                .map(|block| block.definition().catalogue_entry())
                .collect(),
        )
    }
}
