//! Credential resolution and SDK client configuration.
//!
//! Blocks never load credentials themselves: the runner resolves them once per
//! invocation (optionally through STS AssumeRole) and hands the result to the
//! block through a [`ClientContext`].

pub mod resolver;
pub mod sts;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::core::models::Credentials;

pub use resolver::CredentialResolver;
pub use sts::{AssumeRoleRequest, RoleAssumer, StsRoleAssumer};

/// Builds an SDK config pinned to the given credentials, region and optional endpoint.
pub async fn sdk_config(
    credentials: &Credentials,
    region: &str,
    endpoint: Option<&str>,
) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .credentials_provider(credentials.to_sdk());

    if let Some(endpoint) = endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

/// Everything a block needs to construct its service client for one call.
#[derive(Debug, Clone)]
pub struct ClientContext {
    credentials: Credentials,
    region: String,
    endpoint: Option<String>,
}

impl ClientContext {
    pub fn new(credentials: Credentials, region: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            credentials,
            region: region.into(),
            endpoint,
        }
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub async fn sdk_config(&self) -> SdkConfig {
        sdk_config(&self.credentials, &self.region, self.endpoint()).await
    }
}
