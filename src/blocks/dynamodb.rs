//! DynamoDB item blocks.
//!
//! Items are exchanged in DynamoDB JSON, the same typed representation the
//! service uses on the wire: `{"id": {"S": "42"}, "count": {"N": "3"}}`.
//! Binary values are base64 strings.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::{AttributeValue, ConsumedCapacity, ReturnConsumedCapacity, ReturnValue};
use serde_json::{Map, Value, json};

use super::convert::{JsonObject, blob_from_json, blob_to_json};
use super::params::{
    as_object, optional_bool, optional_string, optional_string_map, required, required_str,
};
use super::{Block, BlockDefinition};
use crate::core::models::Params;
use crate::core::schema::{FieldSchema, FieldType};
use crate::credentials::ClientContext;
use crate::errors::BlockError;

const SERVICE: &str = "dynamodb";

/// Converts one DynamoDB JSON attribute (`{"S": "x"}`) into an [`AttributeValue`].
///
/// # Errors
///
/// `InvalidField` naming `path` when the value is not a single known type descriptor.
pub fn attribute_from_json(path: &str, value: &Value) -> Result<AttributeValue, BlockError> {
    let object = as_object(path, value)?;
    let mut entries = object.iter();
    let (Some((tag, inner)), None) = (entries.next(), entries.next()) else {
        return Err(BlockError::invalid(
            path,
            "expected exactly one type descriptor",
        ));
    };

    let attribute = match tag.as_str() {
        "S" => AttributeValue::S(string(path, inner)?),
        "N" => AttributeValue::N(number(path, inner)?),
        "B" => AttributeValue::B(blob_from_json(path, inner)?),
        "BOOL" => AttributeValue::Bool(boolean(path, inner)?),
        "NULL" => AttributeValue::Null(boolean(path, inner)?),
        "SS" => AttributeValue::Ss(
            array(path, inner)?
                .iter()
                .map(|v| string(path, v))
                .collect::<Result<_, _>>()?,
        ),
        "NS" => AttributeValue::Ns(
            array(path, inner)?
                .iter()
                .map(|v| number(path, v))
                .collect::<Result<_, _>>()?,
        ),
        "BS" => AttributeValue::Bs(
            array(path, inner)?
                .iter()
                .map(|v| blob_from_json(path, v))
                .collect::<Result<_, _>>()?,
        ),
        "L" => AttributeValue::L(
            array(path, inner)?
                .iter()
                .enumerate()
                .map(|(i, v)| attribute_from_json(&format!("{path}[{i}]"), v))
                .collect::<Result<_, _>>()?,
        ),
        "M" => AttributeValue::M(item_from_json(path, inner)?),
        other => {
            return Err(BlockError::invalid(
                path,
                format!("unknown type descriptor `{other}`"),
            ));
        }
    };

    Ok(attribute)
}

/// Converts a DynamoDB JSON object (attribute name to typed value) into an SDK item.
///
/// # Errors
///
/// `InvalidField` when `value` is not an object or any attribute is malformed.
pub fn item_from_json(
    path: &str,
    value: &Value,
) -> Result<HashMap<String, AttributeValue>, BlockError> {
    as_object(path, value)?
        .iter()
        .map(|(name, v)| {
            attribute_from_json(&format!("{path}.{name}"), v).map(|attr| (name.clone(), attr))
        })
        .collect()
}

/// Renders an SDK attribute as DynamoDB JSON. `None` for variants this SDK build does not know.
#[must_use]
pub fn attribute_to_json(value: &AttributeValue) -> Option<Value> {
    let rendered = match value {
        AttributeValue::S(s) => json!({ "S": s }),
        AttributeValue::N(n) => json!({ "N": n }),
        AttributeValue::B(b) => json!({ "B": blob_to_json(b) }),
        AttributeValue::Bool(b) => json!({ "BOOL": b }),
        AttributeValue::Null(b) => json!({ "NULL": b }),
        AttributeValue::Ss(values) => json!({ "SS": values }),
        AttributeValue::Ns(values) => json!({ "NS": values }),
        AttributeValue::Bs(values) => {
            json!({ "BS": values.iter().map(blob_to_json).collect::<Vec<_>>() })
        }
        AttributeValue::L(values) => {
            json!({ "L": values.iter().filter_map(attribute_to_json).collect::<Vec<_>>() })
        }
        AttributeValue::M(item) => json!({ "M": item_to_json(item) }),
        _ => return None,
    };
    Some(rendered)
}

/// Renders an SDK item as DynamoDB JSON, leaving out attributes of unknown type.
#[must_use]
pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Value {
    Value::Object(
        item.iter()
            .filter_map(|(name, value)| attribute_to_json(value).map(|v| (name.clone(), v)))
            .collect::<Map<_, _>>(),
    )
}

fn string(path: &str, value: &Value) -> Result<String, BlockError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BlockError::invalid(path, "expected a string"))
}

// Numbers travel as strings to keep their precision; bare JSON numbers are accepted too.
fn number(path: &str, value: &Value) -> Result<String, BlockError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(BlockError::invalid(path, "expected a number")),
    }
}

fn boolean(path: &str, value: &Value) -> Result<bool, BlockError> {
    value
        .as_bool()
        .ok_or_else(|| BlockError::invalid(path, "expected a boolean"))
}

fn array<'a>(path: &str, value: &'a Value) -> Result<&'a Vec<Value>, BlockError> {
    value
        .as_array()
        .ok_or_else(|| BlockError::invalid(path, "expected an array"))
}

fn optional_item(
    params: &Params,
    key: &str,
) -> Result<Option<HashMap<String, AttributeValue>>, BlockError> {
    params
        .get(key)
        .filter(|v| !v.is_null())
        .map(|v| item_from_json(key, v))
        .transpose()
}

fn consumed_capacity(capacity: Option<&ConsumedCapacity>) -> Option<Value> {
    capacity.map(|c| {
        JsonObject::new()
            .field("TableName", c.table_name())
            .field("CapacityUnits", c.capacity_units())
            .field("ReadCapacityUnits", c.read_capacity_units())
            .field("WriteCapacityUnits", c.write_capacity_units())
            .build()
    })
}

fn return_values(params: &Params) -> Result<Option<ReturnValue>, BlockError> {
    Ok(optional_string(params, "ReturnValues")?.map(|v| ReturnValue::from(v.as_str())))
}

fn return_consumed_capacity(params: &Params) -> Result<Option<ReturnConsumedCapacity>, BlockError> {
    Ok(optional_string(params, "ReturnConsumedCapacity")?
        .map(|v| ReturnConsumedCapacity::from(v.as_str())))
}

async fn client(ctx: &ClientContext) -> DynamoDbClient {
    DynamoDbClient::new(&ctx.sdk_config().await)
}

fn table_name_field() -> FieldSchema {
    FieldSchema::required("TableName", FieldType::String, "Name of the table")
}

fn key_field() -> FieldSchema {
    FieldSchema::required(
        "Key",
        FieldType::Object,
        "Primary key of the item, in DynamoDB JSON",
    )
}

fn expression_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::optional(
            "ConditionExpression",
            FieldType::String,
            "Condition that must hold for the write to succeed",
        ),
        FieldSchema::optional(
            "ExpressionAttributeNames",
            FieldType::Object,
            "Substitution tokens for attribute names",
        ),
        FieldSchema::optional(
            "ExpressionAttributeValues",
            FieldType::Object,
            "Substitution values for expressions, in DynamoDB JSON",
        ),
        FieldSchema::optional(
            "ReturnValues",
            FieldType::String,
            "NONE | ALL_OLD | UPDATED_OLD | ALL_NEW | UPDATED_NEW",
        ),
        FieldSchema::optional(
            "ReturnConsumedCapacity",
            FieldType::String,
            "INDEXES | TOTAL | NONE",
        ),
    ]
}

fn consumed_capacity_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "TableName": { "type": "string" },
            "CapacityUnits": { "type": "number" },
            "ReadCapacityUnits": { "type": "number" },
            "WriteCapacityUnits": { "type": "number" }
        }
    })
}

fn write_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "Attributes": { "type": "object", "description": "Item attributes as requested by ReturnValues" },
            "ConsumedCapacity": consumed_capacity_schema()
        }
    })
}

pub struct GetItem {
    definition: BlockDefinition,
}

impl GetItem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "GetItem",
                "Returns the attributes of the item with the given primary key",
                vec![
                    table_name_field(),
                    key_field(),
                    FieldSchema::optional(
                        "ConsistentRead",
                        FieldType::Boolean,
                        "Use a strongly consistent read",
                    ),
                    FieldSchema::optional(
                        "ProjectionExpression",
                        FieldType::String,
                        "Attributes to retrieve",
                    ),
                    FieldSchema::optional(
                        "ExpressionAttributeNames",
                        FieldType::Object,
                        "Substitution tokens for attribute names",
                    ),
                    FieldSchema::optional(
                        "ReturnConsumedCapacity",
                        FieldType::String,
                        "INDEXES | TOTAL | NONE",
                    ),
                ],
                json!({
                    "type": "object",
                    "properties": {
                        "Item": { "type": "object", "description": "The item, in DynamoDB JSON" },
                        "ConsumedCapacity": consumed_capacity_schema()
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for GetItem {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .get_item()
            .table_name(required_str(params, "TableName")?)
            .set_key(Some(item_from_json("Key", required(params, "Key")?)?))
            .set_consistent_read(optional_bool(params, "ConsistentRead")?)
            .set_projection_expression(optional_string(params, "ProjectionExpression")?)
            .set_expression_attribute_names(optional_string_map(params, "ExpressionAttributeNames")?)
            .set_return_consumed_capacity(return_consumed_capacity(params)?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .field("Item", output.item.as_ref().map(item_to_json))
            .field("ConsumedCapacity", consumed_capacity(output.consumed_capacity.as_ref()))
            .build())
    }
}

pub struct PutItem {
    definition: BlockDefinition,
}

impl PutItem {
    #[must_use]
    pub fn new() -> Self {
        let mut fields = vec![
            table_name_field(),
            FieldSchema::required(
                "Item",
                FieldType::Object,
                "The item to write, in DynamoDB JSON",
            ),
        ];
        fields.extend(expression_fields());

        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "PutItem",
                "Creates a new item, or replaces an old item with a new one",
                fields,
                write_output_schema(),
            ),
        }
    }
}

#[async_trait]
impl Block for PutItem {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .put_item()
            .table_name(required_str(params, "TableName")?)
            .set_item(Some(item_from_json("Item", required(params, "Item")?)?))
            .set_condition_expression(optional_string(params, "ConditionExpression")?)
            .set_expression_attribute_names(optional_string_map(params, "ExpressionAttributeNames")?)
            .set_expression_attribute_values(optional_item(params, "ExpressionAttributeValues")?)
            .set_return_values(return_values(params)?)
            .set_return_consumed_capacity(return_consumed_capacity(params)?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .field("Attributes", output.attributes.as_ref().map(item_to_json))
            .field("ConsumedCapacity", consumed_capacity(output.consumed_capacity.as_ref()))
            .build())
    }
}

pub struct DeleteItem {
    definition: BlockDefinition,
}

impl DeleteItem {
    #[must_use]
    pub fn new() -> Self {
        let mut fields = vec![table_name_field(), key_field()];
        fields.extend(expression_fields());

        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "DeleteItem",
                "Deletes a single item in a table by primary key",
                fields,
                write_output_schema(),
            ),
        }
    }
}

#[async_trait]
impl Block for DeleteItem {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .delete_item()
            .table_name(required_str(params, "TableName")?)
            .set_key(Some(item_from_json("Key", required(params, "Key")?)?))
            .set_condition_expression(optional_string(params, "ConditionExpression")?)
            .set_expression_attribute_names(optional_string_map(params, "ExpressionAttributeNames")?)
            .set_expression_attribute_values(optional_item(params, "ExpressionAttributeValues")?)
            .set_return_values(return_values(params)?)
            .set_return_consumed_capacity(return_consumed_capacity(params)?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .field("Attributes", output.attributes.as_ref().map(item_to_json))
            .field("ConsumedCapacity", consumed_capacity(output.consumed_capacity.as_ref()))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_accepts_strings_and_numbers() {
        assert_eq!(number("N", &json!("1.50")).unwrap(), "1.50");
        assert_eq!(number("N", &json!(7)).unwrap(), "7");
        assert!(number("N", &json!(true)).is_err());
    }

    #[test]
    fn test_optional_item_ignores_null() {
        let params = json!({ "ExpressionAttributeValues": null });
        let params = params.as_object().unwrap();
        assert!(optional_item(params, "ExpressionAttributeValues").unwrap().is_none());
    }
}
