#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_blocks::blocks::{Block, BlockDefinition};
use aws_blocks::core::models::{Credentials, Params};
use aws_blocks::core::schema::{FieldSchema, FieldType};
use aws_blocks::credentials::{AssumeRoleRequest, ClientContext, RoleAssumer};
use aws_blocks::errors::BlockError;
use serde_json::{Value, json};

pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/workflow-reader";

pub fn base_credentials() -> Credentials {
    Credentials::new("AKIDBASE", "base-secret", None)
}

pub fn temporary_credentials() -> Credentials {
    Credentials::new("ASIATEMP", "temp-secret", Some("temp-token".to_string()))
}

/// Role assumer that records its calls instead of talking to STS.
#[derive(Default)]
pub struct FakeAssumer {
    pub calls: Mutex<Vec<(Credentials, AssumeRoleRequest)>>,
    pub fail: bool,
}

impl FakeAssumer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(Credentials, AssumeRoleRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RoleAssumer for FakeAssumer {
    async fn assume_role(
        &self,
        base: &Credentials,
        request: &AssumeRoleRequest,
    ) -> Result<Credentials, BlockError> {
        self.calls
            .lock()
            .unwrap()
            .push((base.clone(), request.clone()));
        if self.fail {
            return Err(BlockError::Credentials(
                "AccessDenied: not authorized to perform sts:AssumeRole".to_string(),
            ));
        }
        Ok(temporary_credentials())
    }
}

/// What a [`RecordingBlock`] was called with.
#[derive(Debug, Clone)]
pub struct Seen {
    pub credentials: Credentials,
    pub region: String,
    pub endpoint: Option<String>,
    pub params: Params,
}

/// Block that records its context and answers with a fixed output.
#[derive(Clone)]
pub struct RecordingBlock {
    definition: BlockDefinition,
    output: Value,
    fail: bool,
    pub seen: Arc<Mutex<Vec<Seen>>>,
}

impl RecordingBlock {
    pub fn new(output: Value) -> Self {
        Self {
            definition: BlockDefinition::new(
                "test",
                "Record",
                "Records its invocations",
                vec![FieldSchema::required(
                    "Name",
                    FieldType::String,
                    "Anything",
                )],
                json!({ "type": "object" }),
            ),
            output,
            fail: false,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Value::Null)
        }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Block for RecordingBlock {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        self.seen.lock().unwrap().push(Seen {
            credentials: ctx.credentials().clone(),
            region: ctx.region().to_string(),
            endpoint: ctx.endpoint().map(str::to_string),
            params: params.clone(),
        });
        if self.fail {
            return Err(BlockError::Aws(
                "ResourceNotFoundException: Requested resource not found".to_string(),
            ));
        }
        Ok(self.output.clone())
    }
}
