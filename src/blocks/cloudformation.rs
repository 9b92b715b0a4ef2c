//! CloudFormation stack and stack set blocks.

use async_trait::async_trait;
use aws_sdk_cloudformation::Client as CloudFormationClient;
use aws_sdk_cloudformation::types::{
    CallAs, Capability, RegionConcurrencyType, Stack, StackSetOperation, StackSetOperationAction,
    StackSetOperationStatus, StackStatus,
};
use serde_json::{Value, json};

use super::convert::{JsonObject, ToJson, enum_to_json};
use super::params::{optional_string, required_str};
use super::{Block, BlockDefinition};
use crate::core::models::Params;
use crate::core::schema::{FieldSchema, FieldType};
use crate::credentials::ClientContext;
use crate::errors::BlockError;

const SERVICE: &str = "cloudformation";

enum_to_json!(
    Capability,
    RegionConcurrencyType,
    StackSetOperationAction,
    StackSetOperationStatus,
    StackStatus,
);

async fn client(ctx: &ClientContext) -> CloudFormationClient {
    CloudFormationClient::new(&ctx.sdk_config().await)
}

fn stack_set_operation_to_json(operation: &StackSetOperation) -> Value {
    let preferences = operation.operation_preferences().map(|p| {
        JsonObject::new()
            .field("RegionConcurrencyType", p.region_concurrency_type())
            .list("RegionOrder", p.region_order(), |r| json!(r))
            .field("FailureToleranceCount", p.failure_tolerance_count())
            .field("FailureTolerancePercentage", p.failure_tolerance_percentage())
            .field("MaxConcurrentCount", p.max_concurrent_count())
            .field("MaxConcurrentPercentage", p.max_concurrent_percentage())
            .build()
    });

    JsonObject::new()
        .field("OperationId", operation.operation_id())
        .field("StackSetId", operation.stack_set_id())
        .field("Action", operation.action())
        .field("Status", operation.status())
        .field("OperationPreferences", preferences)
        .field("RetainStacks", operation.retain_stacks())
        .field("AdministrationRoleARN", operation.administration_role_arn())
        .field("ExecutionRoleName", operation.execution_role_name())
        .field("CreationTimestamp", operation.creation_timestamp())
        .field("EndTimestamp", operation.end_timestamp())
        .field("StatusReason", operation.status_reason())
        .build()
}

fn stack_to_json(stack: &Stack) -> Value {
    JsonObject::new()
        .field("StackId", stack.stack_id())
        .field("StackName", stack.stack_name())
        .field("Description", stack.description())
        .field("CreationTime", stack.creation_time())
        .field("LastUpdatedTime", stack.last_updated_time())
        .field("StackStatus", stack.stack_status())
        .field("StackStatusReason", stack.stack_status_reason())
        .field("EnableTerminationProtection", stack.enable_termination_protection())
        .field("RoleARN", stack.role_arn())
        .field("ParentId", stack.parent_id())
        .field("RootId", stack.root_id())
        .list("Capabilities", stack.capabilities(), |c| c.to_json())
        .list("Parameters", stack.parameters(), |p| {
            JsonObject::new()
                .field("ParameterKey", p.parameter_key())
                .field("ParameterValue", p.parameter_value())
                .build()
        })
        .list("Outputs", stack.outputs(), |o| {
            JsonObject::new()
                .field("OutputKey", o.output_key())
                .field("OutputValue", o.output_value())
                .field("Description", o.description())
                .field("ExportName", o.export_name())
                .build()
        })
        .build()
}

pub struct DescribeStackSetOperation {
    definition: BlockDefinition,
}

impl DescribeStackSetOperation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "DescribeStackSetOperation",
                "Returns the description of the specified stack set operation",
                vec![
                    FieldSchema::required(
                        "StackSetName",
                        FieldType::String,
                        "Name or unique ID of the stack set",
                    ),
                    FieldSchema::required(
                        "OperationId",
                        FieldType::String,
                        "Unique ID of the stack set operation",
                    ),
                    FieldSchema::optional(
                        "CallAs",
                        FieldType::String,
                        "SELF | DELEGATED_ADMIN",
                    ),
                ],
                json!({
                    "type": "object",
                    "properties": {
                        "StackSetOperation": {
                            "type": "object",
                            "properties": {
                                "OperationId": { "type": "string" },
                                "StackSetId": { "type": "string" },
                                "Action": { "type": "string" },
                                "Status": { "type": "string" },
                                "OperationPreferences": { "type": "object" },
                                "RetainStacks": { "type": "boolean" },
                                "AdministrationRoleARN": { "type": "string" },
                                "ExecutionRoleName": { "type": "string" },
                                "CreationTimestamp": { "type": "string", "format": "date-time" },
                                "EndTimestamp": { "type": "string", "format": "date-time" },
                                "StatusReason": { "type": "string" }
                            }
                        }
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for DescribeStackSetOperation {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .describe_stack_set_operation()
            .stack_set_name(required_str(params, "StackSetName")?)
            .operation_id(required_str(params, "OperationId")?)
            .set_call_as(optional_string(params, "CallAs")?.map(|v| CallAs::from(v.as_str())))
            .send()
            .await?;

        Ok(JsonObject::new()
            .field(
                "StackSetOperation",
                output.stack_set_operation().map(stack_set_operation_to_json),
            )
            .build())
    }
}

pub struct DescribeStacks {
    definition: BlockDefinition,
}

impl DescribeStacks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "DescribeStacks",
                "Returns the description of one stack, or of all stacks when no name is given",
                vec![
                    FieldSchema::optional(
                        "StackName",
                        FieldType::String,
                        "Name or unique stack ID",
                    ),
                    FieldSchema::optional(
                        "NextToken",
                        FieldType::String,
                        "Token from a previous page of results",
                    ),
                ],
                json!({
                    "type": "object",
                    "properties": {
                        "Stacks": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "StackId": { "type": "string" },
                                    "StackName": { "type": "string" },
                                    "StackStatus": { "type": "string" },
                                    "CreationTime": { "type": "string", "format": "date-time" },
                                    "Outputs": { "type": "array" },
                                    "Parameters": { "type": "array" }
                                }
                            }
                        },
                        "NextToken": { "type": "string" }
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for DescribeStacks {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .describe_stacks()
            .set_stack_name(optional_string(params, "StackName")?)
            .set_next_token(optional_string(params, "NextToken")?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .list("Stacks", output.stacks(), stack_to_json)
            .field("NextToken", output.next_token())
            .build())
    }
}
