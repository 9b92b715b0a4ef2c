use async_trait::async_trait;
use aws_sdk_sqs::Client as SqsClient;
use serde_json::{Value, json};

use super::convert::JsonObject;
use super::params::{optional_i32, optional_string, required_str};
use super::{Block, BlockDefinition};
use crate::core::models::Params;
use crate::core::schema::{FieldSchema, FieldType};
use crate::credentials::ClientContext;
use crate::errors::BlockError;

const SERVICE: &str = "sqs";

pub struct SendMessage {
    definition: BlockDefinition,
}

impl SendMessage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "SendMessage",
                "Delivers a message to the specified queue",
                vec![
                    FieldSchema::required("QueueUrl", FieldType::String, "URL of the queue"),
                    FieldSchema::required("MessageBody", FieldType::String, "Message to send"),
                    FieldSchema::optional(
                        "DelaySeconds",
                        FieldType::Integer,
                        "Seconds to delay delivery of the message",
                    ),
                    FieldSchema::optional(
                        "MessageGroupId",
                        FieldType::String,
                        "Message group, for FIFO queues",
                    ),
                    FieldSchema::optional(
                        "MessageDeduplicationId",
                        FieldType::String,
                        "Deduplication token, for FIFO queues",
                    ),
                ],
                json!({
                    "type": "object",
                    "properties": {
                        "MessageId": { "type": "string" },
                        "MD5OfMessageBody": { "type": "string" },
                        "MD5OfMessageAttributes": { "type": "string" },
                        "SequenceNumber": { "type": "string" }
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for SendMessage {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let client = SqsClient::new(&ctx.sdk_config().await);
        let output = client
            .send_message()
            .queue_url(required_str(params, "QueueUrl")?)
            .message_body(required_str(params, "MessageBody")?)
            .set_delay_seconds(optional_i32(params, "DelaySeconds")?)
            .set_message_group_id(optional_string(params, "MessageGroupId")?)
            .set_message_deduplication_id(optional_string(params, "MessageDeduplicationId")?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .field("MessageId", output.message_id())
            .field("MD5OfMessageBody", output.md5_of_message_body())
            .field("MD5OfMessageAttributes", output.md5_of_message_attributes())
            .field("SequenceNumber", output.sequence_number())
            .build())
    }
}
