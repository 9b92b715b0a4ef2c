use async_trait::async_trait;
use aws_sdk_sts::Client as StsClient;
use serde_json::{Value, json};

use super::convert::JsonObject;
use super::{Block, BlockDefinition};
use crate::core::models::Params;
use crate::credentials::ClientContext;
use crate::errors::BlockError;

const SERVICE: &str = "sts";

/// Reports the identity behind the resolved credentials; handy to check a role assumption.
pub struct GetCallerIdentity {
    definition: BlockDefinition,
}

impl GetCallerIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "GetCallerIdentity",
                "Returns details about the IAM identity whose credentials are used to call the operation",
                Vec::new(),
                json!({
                    "type": "object",
                    "properties": {
                        "UserId": { "type": "string" },
                        "Account": { "type": "string" },
                        "Arn": { "type": "string" }
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for GetCallerIdentity {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, _params: &Params) -> Result<Value, BlockError> {
        let client = StsClient::new(&ctx.sdk_config().await);
        let output = client.get_caller_identity().send().await?;

        Ok(JsonObject::new()
            .field("UserId", output.user_id())
            .field("Account", output.account())
            .field("Arn", output.arn())
            .build())
    }
}
