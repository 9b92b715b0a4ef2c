/// AWS blocks - workflow building blocks that call AWS service operations.
///
/// Each block wraps one service operation. An invocation:
/// 1. Validates the caller's configuration against the block's schema
/// 2. Resolves credentials, assuming an IAM role through STS when requested
/// 3. Builds a client for the requested region and endpoint and sends the request
/// 4. Emits exactly one result event carrying the operation's output
///
/// # Architecture
///
/// The crate uses:
/// - aws-config and the aws-sdk-* crates for service calls
/// - AWS Lambda as the runner entrypoint
/// - SQS for forwarding result events downstream
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use aws_blocks::blocks::BUILTIN;
/// use aws_blocks::core::config::AppConfig;
/// use aws_blocks::runner::{Invoker, MemorySink};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     aws_blocks::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let sink = MemorySink::new();
///     let invoker = Invoker::from_config(&config, Arc::new(sink.clone()));
///
///     let event = invoker
///         .invoke_by_id(
///             &BUILTIN,
///             "sts.GetCallerIdentity",
///             serde_json::json!({ "region": "us-east-1" }),
///         )
///         .await?;
///
///     println!("{}", serde_json::to_string_pretty(&event)?);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod blocks;
pub mod core;
pub mod credentials;
pub mod errors;
pub mod runner;

pub use errors::BlockError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. The level comes from `RUST_LOG` and defaults to `info`. Calling it
/// more than once is harmless.
///
/// # Example
///
/// ```
/// aws_blocks::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
