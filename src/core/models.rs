use std::fmt;
use std::time::SystemTime;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::schema::{ASSUME_ROLE_ARN, ConfigSchema, ENDPOINT, REGION};
use crate::errors::BlockError;

/// Operation parameters left over once the common block fields are taken out.
pub type Params = Map<String, Value>;

const PROVIDER_NAME: &str = "aws-blocks";

/// AWS credentials used for a single invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub expiration: Option<SystemTime>,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
            expiration: None,
        }
    }

    #[must_use]
    pub fn with_expiration(mut self, expiration: SystemTime) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Static SDK credentials carrying the same key triple.
    #[must_use]
    pub fn to_sdk(&self) -> aws_credential_types::Credentials {
        aws_credential_types::Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            self.session_token.clone(),
            self.expiration,
            PROVIDER_NAME,
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// A validated block configuration, split into the common fields and the operation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub region: String,
    pub assume_role_arn: Option<String>,
    pub endpoint: Option<String>,
    pub params: Params,
}

impl InvocationRequest {
    /// Validates `config` against `schema` and splits off the common fields.
    ///
    /// # Errors
    ///
    /// Returns `MissingField`/`InvalidField` when the configuration does not match the schema.
    pub fn from_config(schema: &ConfigSchema, config: Value) -> Result<Self, BlockError> {
        let mut params = schema.validate(config)?;

        let region = take_string(&mut params, REGION)
            .ok_or_else(|| BlockError::MissingField(REGION.to_string()))?;
        if region.trim().is_empty() {
            return Err(BlockError::invalid(REGION, "must not be empty"));
        }

        let assume_role_arn =
            take_string(&mut params, ASSUME_ROLE_ARN).filter(|arn| !arn.trim().is_empty());
        let endpoint = take_string(&mut params, ENDPOINT).filter(|e| !e.trim().is_empty());

        Ok(Self {
            region,
            assume_role_arn,
            endpoint,
            params,
        })
    }
}

fn take_string(params: &mut Params, key: &str) -> Option<String> {
    match params.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// The single event emitted for a successful invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEvent {
    pub block: String,
    pub request_id: String,
    pub emitted_at: String,
    pub output: Value,
}

impl BlockEvent {
    pub fn new(block: impl Into<String>, request_id: impl Into<String>, output: Value) -> Self {
        Self {
            block: block.into(),
            request_id: request_id.into(),
            emitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            output: normalize_output(output),
        }
    }
}

/// Services that answer with an empty body still produce an event; null becomes `{}`.
#[must_use]
pub fn normalize_output(output: Value) -> Value {
    match output {
        Value::Null => Value::Object(Map::new()),
        other => other,
    }
}
