use std::time::SystemTime;

use async_trait::async_trait;
use aws_sdk_sts::Client as StsClient;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::models::Credentials;
use crate::errors::BlockError;

/// STS limits role session names to 64 characters.
pub const MAX_SESSION_NAME_LEN: usize = 64;

// Room left for the prefix once `-{uuid}` is appended.
const MAX_SESSION_PREFIX_LEN: usize = MAX_SESSION_NAME_LEN - 37;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub session_name: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub external_id: Option<String>,
    pub duration_seconds: Option<i32>,
}

/// Exchanges base credentials for role-scoped temporary credentials.
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    async fn assume_role(
        &self,
        base: &Credentials,
        request: &AssumeRoleRequest,
    ) -> Result<Credentials, BlockError>;
}

/// [`RoleAssumer`] backed by the STS AssumeRole API.
///
/// Without a client, one is built per call from the base credentials and the
/// request's region and endpoint.
#[derive(Debug, Default, Clone)]
pub struct StsRoleAssumer {
    client: Option<StsClient>,
}

impl StsRoleAssumer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `client` for every call instead of building one from the base credentials.
    #[must_use]
    pub fn with_client(client: StsClient) -> Self {
        Self {
            client: Some(client),
        }
    }
}

#[async_trait]
impl RoleAssumer for StsRoleAssumer {
    async fn assume_role(
        &self,
        base: &Credentials,
        request: &AssumeRoleRequest,
    ) -> Result<Credentials, BlockError> {
        info!("Calling AWS STS AssumeRole");
        debug!(role_arn = %request.role_arn, session_name = %request.session_name, region = %request.region);

        let client = match &self.client {
            Some(client) => client.clone(),
            None => StsClient::new(
                &super::sdk_config(base, &request.region, request.endpoint.as_deref()).await,
            ),
        };

        let response = client
            .assume_role()
            .role_arn(&request.role_arn)
            .role_session_name(&request.session_name)
            .set_external_id(request.external_id.clone())
            .set_duration_seconds(request.duration_seconds)
            .send()
            .await?;

        let sts_creds = response
            .credentials()
            .ok_or_else(|| BlockError::Credentials("AWS STS returned no credentials".into()))?;

        let mut credentials = Credentials::new(
            sts_creds.access_key_id(),
            sts_creds.secret_access_key(),
            Some(sts_creds.session_token().to_string()),
        );
        if let Ok(expiration) = SystemTime::try_from(*sts_creds.expiration()) {
            credentials = credentials.with_expiration(expiration);
        }

        info!("Successfully obtained temporary AWS credentials");
        Ok(credentials)
    }
}

/// Generates a unique role session name with the given prefix.
///
/// Characters STS rejects are replaced with `-`; long prefixes are shortened so
/// the UUID always survives.
#[must_use]
pub fn session_name(prefix: &str) -> String {
    let prefix: String = prefix
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "_+=,.@-".contains(c) {
                c
            } else {
                '-'
            }
        })
        .take(MAX_SESSION_PREFIX_LEN)
        .collect();

    format!("{prefix}-{}", Uuid::new_v4())
}
