//! Response serialization helpers.
//!
//! SDK output shapes are not `Serialize`, so each block maps the fields it
//! exposes into a JSON object. Absent fields are left out, timestamps become
//! RFC 3339 strings and blobs become base64.

use aws_smithy_types::date_time::Format;
use aws_smithy_types::error::operation::BuildError;
use aws_smithy_types::{Blob, DateTime};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use crate::errors::BlockError;

/// Conversion of an SDK accessor result into a JSON value; `Null` means "omit".
pub trait ToJson {
    fn to_json(self) -> Value;
}

impl ToJson for Value {
    fn to_json(self) -> Value {
        self
    }
}

impl ToJson for Option<Value> {
    fn to_json(self) -> Value {
        self.unwrap_or(Value::Null)
    }
}

impl ToJson for &str {
    fn to_json(self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToJson for Option<&str> {
    fn to_json(self) -> Value {
        self.map_or(Value::Null, ToJson::to_json)
    }
}

impl ToJson for String {
    fn to_json(self) -> Value {
        Value::String(self)
    }
}

impl ToJson for &DateTime {
    fn to_json(self) -> Value {
        timestamp(self)
    }
}

impl ToJson for Option<&DateTime> {
    fn to_json(self) -> Value {
        self.map_or(Value::Null, timestamp)
    }
}

macro_rules! primitive_to_json {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToJson for $ty {
                fn to_json(self) -> Value {
                    Value::from(self)
                }
            }

            impl ToJson for Option<$ty> {
                fn to_json(self) -> Value {
                    self.map_or(Value::Null, Value::from)
                }
            }
        )*
    };
}

primitive_to_json!(bool, i32, i64, f64);

/// Implements [`ToJson`] for SDK enums through their wire name.
macro_rules! enum_to_json {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::blocks::convert::ToJson for &$ty {
                fn to_json(self) -> ::serde_json::Value {
                    ::serde_json::Value::String(self.as_str().to_string())
                }
            }

            impl $crate::blocks::convert::ToJson for Option<&$ty> {
                fn to_json(self) -> ::serde_json::Value {
                    self.map_or(::serde_json::Value::Null, $crate::blocks::convert::ToJson::to_json)
                }
            }
        )*
    };
}

pub(crate) use enum_to_json;

/// Normalizes builder results: only shapes with required members return `Result`.
pub trait Built<T> {
    fn built(self) -> Result<T, BlockError>;
}

impl<T> Built<T> for Result<T, BuildError> {
    fn built(self) -> Result<T, BlockError> {
        self.map_err(BlockError::from)
    }
}

macro_rules! infallible_build {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::blocks::convert::Built<$ty> for $ty {
                fn built(self) -> Result<$ty, $crate::errors::BlockError> {
                    Ok(self)
                }
            }
        )*
    };
}

pub(crate) use infallible_build;

/// JSON object builder that drops null fields and empty lists.
#[derive(Debug, Default)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, key: &str, value: impl ToJson) -> Self {
        let value = value.to_json();
        if !value.is_null() {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    #[must_use]
    pub fn list<T>(mut self, key: &str, items: &[T], map: impl Fn(&T) -> Value) -> Self {
        if !items.is_empty() {
            self.0
                .insert(key.to_string(), Value::Array(items.iter().map(map).collect()));
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Value {
        Value::Object(self.0)
    }

    /// Like [`JsonObject::build`], but `Null` when no field was set.
    #[must_use]
    pub fn build_non_empty(self) -> Value {
        if self.0.is_empty() {
            Value::Null
        } else {
            Value::Object(self.0)
        }
    }
}

#[must_use]
pub fn timestamp(value: &DateTime) -> Value {
    value
        .fmt(Format::DateTime)
        .map_or_else(|_| Value::from(value.secs()), Value::String)
}

/// Parses an RFC 3339 string or epoch seconds into a [`DateTime`].
///
/// # Errors
///
/// `InvalidField` when the value is neither.
pub fn parse_timestamp(field: &str, value: &Value) -> Result<DateTime, BlockError> {
    match value {
        Value::String(s) => DateTime::from_str(s, Format::DateTime)
            .map_err(|e| BlockError::invalid(field, format!("invalid timestamp: {e}"))),
        Value::Number(n) => n
            .as_f64()
            .map(DateTime::from_secs_f64)
            .ok_or_else(|| BlockError::invalid(field, "invalid epoch seconds")),
        _ => Err(BlockError::invalid(
            field,
            "expected an RFC 3339 string or epoch seconds",
        )),
    }
}

#[must_use]
pub fn blob_to_json(blob: &Blob) -> Value {
    Value::String(STANDARD.encode(blob.as_ref()))
}

/// # Errors
///
/// `InvalidField` when `value` is not a base64 string.
pub fn blob_from_json(field: &str, value: &Value) -> Result<Blob, BlockError> {
    let encoded = value
        .as_str()
        .ok_or_else(|| BlockError::invalid(field, "expected a base64 string"))?;
    STANDARD
        .decode(encoded)
        .map(Blob::new)
        .map_err(|e| BlockError::invalid(field, format!("invalid base64: {e}")))
}
