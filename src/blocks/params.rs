//! Typed accessors over a block's parameter bag.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::errors::BlockError;

pub fn required<'a>(params: &'a Map<String, Value>, key: &str) -> Result<&'a Value, BlockError> {
    params
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| BlockError::MissingField(key.to_string()))
}

fn optional<'a>(params: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    params.get(key).filter(|v| !v.is_null())
}

pub fn required_str<'a>(params: &'a Map<String, Value>, key: &str) -> Result<&'a str, BlockError> {
    required(params, key)?
        .as_str()
        .ok_or_else(|| BlockError::invalid(key, "expected a string"))
}

pub fn optional_string(params: &Map<String, Value>, key: &str) -> Result<Option<String>, BlockError> {
    optional(params, key)
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| BlockError::invalid(key, "expected a string"))
        })
        .transpose()
}

pub fn optional_bool(params: &Map<String, Value>, key: &str) -> Result<Option<bool>, BlockError> {
    optional(params, key)
        .map(|v| {
            v.as_bool()
                .ok_or_else(|| BlockError::invalid(key, "expected a boolean"))
        })
        .transpose()
}

pub fn optional_i32(params: &Map<String, Value>, key: &str) -> Result<Option<i32>, BlockError> {
    optional(params, key)
        .map(|v| {
            v.as_i64()
                .ok_or_else(|| BlockError::invalid(key, "expected an integer"))
                .and_then(|n| {
                    i32::try_from(n).map_err(|_| BlockError::invalid(key, "integer out of range"))
                })
        })
        .transpose()
}

pub fn optional_f64(params: &Map<String, Value>, key: &str) -> Result<Option<f64>, BlockError> {
    optional(params, key)
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| BlockError::invalid(key, "expected a number"))
        })
        .transpose()
}

pub fn optional_array<'a>(
    params: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Vec<Value>>, BlockError> {
    optional(params, key)
        .map(|v| {
            v.as_array()
                .ok_or_else(|| BlockError::invalid(key, "expected an array"))
        })
        .transpose()
}

pub fn required_array<'a>(
    params: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Vec<Value>, BlockError> {
    required(params, key)?
        .as_array()
        .ok_or_else(|| BlockError::invalid(key, "expected an array"))
}

pub fn as_object<'a>(key: &str, value: &'a Value) -> Result<&'a Map<String, Value>, BlockError> {
    value
        .as_object()
        .ok_or_else(|| BlockError::invalid(key, "expected an object"))
}

pub fn optional_string_list(
    params: &Map<String, Value>,
    key: &str,
) -> Result<Option<Vec<String>>, BlockError> {
    optional_array(params, key)?
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| BlockError::invalid(key, "expected an array of strings"))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
}

pub fn optional_string_map(
    params: &Map<String, Value>,
    key: &str,
) -> Result<Option<HashMap<String, String>>, BlockError> {
    optional(params, key)
        .map(|v| {
            as_object(key, v)?
                .iter()
                .map(|(k, v)| {
                    v.as_str()
                        .map(|s| (k.clone(), s.to_string()))
                        .ok_or_else(|| {
                            BlockError::invalid(format!("{key}.{k}"), "expected a string")
                        })
                })
                .collect::<Result<HashMap<_, _>, _>>()
        })
        .transpose()
}

/// Prefixes the field name of a validation error with `path`, for nested parameters.
pub fn within(path: &str, error: BlockError) -> BlockError {
    match error {
        BlockError::MissingField(field) => BlockError::MissingField(format!("{path}.{field}")),
        BlockError::InvalidField { field, reason } => BlockError::InvalidField {
            field: format!("{path}.{field}"),
            reason,
        },
        other => other,
    }
}
