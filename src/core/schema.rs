//! Declared configuration schemas for blocks.
//!
//! Every block accepts the common fields `region`, `assumeRoleArn` and `endpoint`
//! followed by the named parameters of its AWS operation.

use serde::Serialize;
use serde_json::{Map, Value, json};
use url::Url;

use crate::core::models::Params;
use crate::errors::BlockError;

pub const REGION: &str = "region";
pub const ASSUME_ROLE_ARN: &str = "assumeRoleArn";
pub const ENDPOINT: &str = "endpoint";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub description: &'static str,
}

impl FieldSchema {
    #[must_use]
    pub fn required(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            required: true,
            description,
        }
    }

    #[must_use]
    pub fn optional(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            required: false,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSchema {
    fields: Vec<FieldSchema>,
}

impl ConfigSchema {
    /// Schema made of the common block fields followed by `fields`.
    #[must_use]
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        let mut all = vec![
            FieldSchema::required(
                REGION,
                FieldType::String,
                "AWS region the request is sent to",
            ),
            FieldSchema::optional(
                ASSUME_ROLE_ARN,
                FieldType::String,
                "ARN of a role to assume before calling the service",
            ),
            FieldSchema::optional(
                ENDPOINT,
                FieldType::String,
                "Custom endpoint URL, e.g. a LocalStack instance",
            ),
        ];
        all.extend(fields);
        Self { fields: all }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks `config` against the declared fields and returns it as a map.
    ///
    /// Null values count as absent. Keys the schema does not declare are kept.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent required field, `InvalidField` for a type
    /// mismatch, a malformed endpoint, or a non-object configuration.
    pub fn validate(&self, config: Value) -> Result<Params, BlockError> {
        let mut map = match config {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(BlockError::invalid(
                    "config",
                    format!("expected an object, got {}", json_type_name(&other)),
                ));
            }
        };
        map.retain(|_, v| !v.is_null());

        for field in &self.fields {
            match map.get(field.name) {
                None if field.required => {
                    return Err(BlockError::MissingField(field.name.to_string()));
                }
                None => {}
                Some(value) if !field.field_type.matches(value) => {
                    return Err(BlockError::invalid(
                        field.name,
                        format!(
                            "expected {}, got {}",
                            field.field_type.as_str(),
                            json_type_name(value)
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        if let Some(endpoint) = map.get(ENDPOINT).and_then(Value::as_str) {
            validate_endpoint(endpoint)?;
        }

        Ok(map)
    }

    /// JSON-schema rendering of the declared fields.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| {
                (
                    f.name.to_string(),
                    json!({ "type": f.field_type.as_str(), "description": f.description }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), BlockError> {
    if endpoint.trim().is_empty() {
        return Ok(());
    }
    let url = Url::parse(endpoint).map_err(|e| BlockError::invalid(ENDPOINT, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(BlockError::invalid(
            ENDPOINT,
            format!("unsupported scheme `{scheme}`"),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
