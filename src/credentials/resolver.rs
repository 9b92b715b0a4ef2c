use std::sync::Arc;

use tracing::{debug, info};

use super::sts::{AssumeRoleRequest, RoleAssumer, StsRoleAssumer, session_name};
use crate::core::config::{AppConfig, DEFAULT_ROLE_SESSION_PREFIX};
use crate::core::models::Credentials;
use crate::errors::BlockError;

/// Produces the effective credentials for one invocation.
#[derive(Clone)]
pub struct CredentialResolver {
    base: Credentials,
    assumer: Arc<dyn RoleAssumer>,
    session_prefix: String,
    external_id: Option<String>,
    duration_seconds: Option<i32>,
}

impl CredentialResolver {
    pub fn new(base: Credentials, assumer: Arc<dyn RoleAssumer>) -> Self {
        Self {
            base,
            assumer,
            session_prefix: DEFAULT_ROLE_SESSION_PREFIX.to_string(),
            external_id: None,
            duration_seconds: None,
        }
    }

    /// Resolver using the configured base credentials and STS.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_assumer(config, Arc::new(StsRoleAssumer::new()))
    }

    #[must_use]
    pub fn with_assumer(config: &AppConfig, assumer: Arc<dyn RoleAssumer>) -> Self {
        Self {
            base: config.base_credentials.clone(),
            assumer,
            session_prefix: config.role_session_prefix.clone(),
            external_id: config.assume_role_external_id.clone(),
            duration_seconds: config.assume_role_duration_seconds,
        }
    }

    #[must_use]
    pub fn base(&self) -> &Credentials {
        &self.base
    }

    /// Returns the base credentials, or temporary ones for `assume_role_arn` when given.
    ///
    /// # Errors
    ///
    /// STS failures are returned as they come; there is no fallback to the base credentials.
    pub async fn resolve(
        &self,
        region: &str,
        assume_role_arn: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<Credentials, BlockError> {
        let Some(role_arn) = assume_role_arn.filter(|arn| !arn.trim().is_empty()) else {
            debug!("No role to assume, using base credentials");
            return Ok(self.base.clone());
        };

        let request = AssumeRoleRequest {
            role_arn: role_arn.to_string(),
            session_name: session_name(&self.session_prefix),
            region: region.to_string(),
            endpoint: endpoint.map(str::to_string),
            external_id: self.external_id.clone(),
            duration_seconds: self.duration_seconds,
        };

        info!(role_arn = %request.role_arn, session_name = %request.session_name, "Assuming role");
        self.assumer.assume_role(&self.base, &request).await
    }
}
