use aws_sdk_sts::error::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::operation::BuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockError {
    #[error("Invalid runtime configuration: {0}")]
    ConfigError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown block: {0}")]
    UnknownBlock(String),

    #[error("Failed to resolve AWS credentials: {0}")]
    Credentials(String),

    #[error("Failed to build AWS request: {0}")]
    Request(String),

    #[error("Failed to interact with AWS services: {0}")]
    Aws(String),

    #[error("Failed to serialize block data: {0}")]
    Serialization(String),
}

impl BlockError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BlockError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// Every aws-sdk-* crate re-exports the same SdkError, so this covers all services.
impl<E, R> From<SdkError<E, R>> for BlockError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: SdkError<E, R>) -> Self {
        BlockError::Aws(DisplayErrorContext(&error).to_string())
    }
}

impl From<BuildError> for BlockError {
    fn from(error: BuildError) -> Self {
        BlockError::Request(error.to_string())
    }
}

impl From<serde_json::Error> for BlockError {
    fn from(error: serde_json::Error) -> Self {
        BlockError::Serialization(error.to_string())
    }
}

impl From<anyhow::Error> for BlockError {
    fn from(error: anyhow::Error) -> Self {
        BlockError::ConfigError(error.to_string())
    }
}
