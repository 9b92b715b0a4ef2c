use std::env;

use crate::core::models::Credentials;

pub const DEFAULT_ROLE_SESSION_PREFIX: &str = "aws-blocks";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_credentials: Credentials,
    pub endpoint_url: Option<String>,
    pub role_session_prefix: String,
    pub assume_role_external_id: Option<String>,
    pub assume_role_duration_seconds: Option<i32>,
    pub result_queue_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| var(name).ok_or_else(|| format!("{name}: not set"));

        let assume_role_duration_seconds = var("ASSUME_ROLE_DURATION_SECONDS")
            .map(|v| {
                v.parse::<i32>()
                    .map_err(|e| format!("ASSUME_ROLE_DURATION_SECONDS: {e}"))
            })
            .transpose()?;

        Ok(Self {
            base_credentials: Credentials::new(
                required("AWS_ACCESS_KEY_ID")?,
                required("AWS_SECRET_ACCESS_KEY")?,
                var("AWS_SESSION_TOKEN"),
            ),
            endpoint_url: var("AWS_ENDPOINT_URL"),
            role_session_prefix: var("ROLE_SESSION_PREFIX")
                .unwrap_or_else(|| DEFAULT_ROLE_SESSION_PREFIX.to_string()),
            assume_role_external_id: var("ASSUME_ROLE_EXTERNAL_ID"),
            assume_role_duration_seconds,
            result_queue_url: var("RESULT_QUEUE_URL"),
        })
    }
}
