//! Systems Manager Parameter Store blocks.

use async_trait::async_trait;
use aws_sdk_ssm::Client as SsmClient;
use aws_sdk_ssm::types::{Parameter, ParameterTier, ParameterType};
use serde_json::{Value, json};

use super::convert::{JsonObject, enum_to_json};
use super::params::{optional_bool, optional_string, required_str};
use super::{Block, BlockDefinition};
use crate::core::models::Params;
use crate::core::schema::{FieldSchema, FieldType};
use crate::credentials::ClientContext;
use crate::errors::BlockError;

const SERVICE: &str = "ssm";

enum_to_json!(ParameterTier, ParameterType);

async fn client(ctx: &ClientContext) -> SsmClient {
    SsmClient::new(&ctx.sdk_config().await)
}

fn parameter_to_json(parameter: &Parameter) -> Value {
    JsonObject::new()
        .field("Name", parameter.name())
        .field("Type", parameter.r#type())
        .field("Value", parameter.value())
        .field("Version", parameter.version())
        .field("Selector", parameter.selector())
        .field("LastModifiedDate", parameter.last_modified_date())
        .field("ARN", parameter.arn())
        .field("DataType", parameter.data_type())
        .build()
}

pub struct GetParameter {
    definition: BlockDefinition,
}

impl GetParameter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "GetParameter",
                "Returns information about a single parameter",
                vec![
                    FieldSchema::required("Name", FieldType::String, "Name or ARN of the parameter"),
                    FieldSchema::optional(
                        "WithDecryption",
                        FieldType::Boolean,
                        "Decrypt SecureString values",
                    ),
                ],
                json!({
                    "type": "object",
                    "properties": {
                        "Parameter": {
                            "type": "object",
                            "properties": {
                                "Name": { "type": "string" },
                                "Type": { "type": "string" },
                                "Value": { "type": "string" },
                                "Version": { "type": "integer" },
                                "Selector": { "type": "string" },
                                "LastModifiedDate": { "type": "string", "format": "date-time" },
                                "ARN": { "type": "string" },
                                "DataType": { "type": "string" }
                            }
                        }
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for GetParameter {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .get_parameter()
            .name(required_str(params, "Name")?)
            .set_with_decryption(optional_bool(params, "WithDecryption")?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .field("Parameter", output.parameter().map(parameter_to_json))
            .build())
    }
}

pub struct PutParameter {
    definition: BlockDefinition,
}

impl PutParameter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "PutParameter",
                "Adds a parameter to the system, or updates an existing one",
                vec![
                    FieldSchema::required("Name", FieldType::String, "Fully qualified parameter name"),
                    FieldSchema::required("Value", FieldType::String, "Parameter value"),
                    FieldSchema::optional(
                        "Type",
                        FieldType::String,
                        "String | StringList | SecureString",
                    ),
                    FieldSchema::optional(
                        "Description",
                        FieldType::String,
                        "Information about the parameter",
                    ),
                    FieldSchema::optional(
                        "Overwrite",
                        FieldType::Boolean,
                        "Overwrite an existing parameter",
                    ),
                    FieldSchema::optional(
                        "Tier",
                        FieldType::String,
                        "Standard | Advanced | Intelligent-Tiering",
                    ),
                    FieldSchema::optional(
                        "KeyId",
                        FieldType::String,
                        "KMS key used to encrypt a SecureString",
                    ),
                    FieldSchema::optional(
                        "DataType",
                        FieldType::String,
                        "text | aws:ec2:image | aws:ssm:integration",
                    ),
                ],
                json!({
                    "type": "object",
                    "properties": {
                        "Version": { "type": "integer" },
                        "Tier": { "type": "string" }
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for PutParameter {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .put_parameter()
            .name(required_str(params, "Name")?)
            .value(required_str(params, "Value")?)
            .set_type(optional_string(params, "Type")?.map(|t| ParameterType::from(t.as_str())))
            .set_description(optional_string(params, "Description")?)
            .set_overwrite(optional_bool(params, "Overwrite")?)
            .set_tier(optional_string(params, "Tier")?.map(|t| ParameterTier::from(t.as_str())))
            .set_key_id(optional_string(params, "KeyId")?)
            .set_data_type(optional_string(params, "DataType")?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .field("Version", output.version())
            .field("Tier", output.tier())
            .build())
    }
}
