use std::time::{Duration, UNIX_EPOCH};

use aws_blocks::core::models::Credentials;
use aws_blocks::credentials::{AssumeRoleRequest, RoleAssumer, StsRoleAssumer};
use aws_blocks::errors::BlockError;
use aws_sdk_sts::Client;
use aws_sdk_sts::operation::assume_role::{AssumeRoleError, AssumeRoleOutput};
use aws_sdk_sts::primitives::DateTime;
use aws_sdk_sts::types::Credentials as StsCredentials;
use aws_sdk_sts::types::error::MalformedPolicyDocumentException;
use aws_smithy_mocks::{mock, mock_client};

const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/workflow-reader";

fn base() -> Credentials {
    Credentials::new("AKIDBASE", "base-secret", None)
}

fn request() -> AssumeRoleRequest {
    AssumeRoleRequest {
        role_arn: ROLE_ARN.to_string(),
        session_name: "aws-blocks-test".to_string(),
        region: "us-east-1".to_string(),
        endpoint: None,
        external_id: Some("ext-123".to_string()),
        duration_seconds: Some(900),
    }
}

#[tokio::test]
async fn test_assume_role_maps_temporary_credentials() {
    let rule = mock!(Client::assume_role)
        .match_requests(|req| {
            req.role_arn() == Some(ROLE_ARN)
                && req.role_session_name() == Some("aws-blocks-test")
                && req.external_id() == Some("ext-123")
                && req.duration_seconds() == Some(900)
        })
        .then_output(|| {
            AssumeRoleOutput::builder()
                .credentials(
                    StsCredentials::builder()
                        .access_key_id("ASIATEMP")
                        .secret_access_key("temp-secret")
                        .session_token("temp-token")
                        .expiration(DateTime::from_secs(1_700_000_000))
                        .build()
                        .unwrap(),
                )
                .build()
        });
    let assumer = StsRoleAssumer::with_client(mock_client!(aws_sdk_sts, [&rule]));

    let credentials = assumer.assume_role(&base(), &request()).await.unwrap();

    assert_eq!(credentials.access_key_id, "ASIATEMP");
    assert_eq!(credentials.secret_access_key, "temp-secret");
    assert_eq!(credentials.session_token.as_deref(), Some("temp-token"));
    assert_eq!(
        credentials.expiration,
        Some(UNIX_EPOCH + Duration::from_secs(1_700_000_000))
    );
    assert_eq!(rule.num_calls(), 1);
}

#[tokio::test]
async fn test_assume_role_without_credentials_is_an_error() {
    let rule = mock!(Client::assume_role).then_output(|| AssumeRoleOutput::builder().build());
    let assumer = StsRoleAssumer::with_client(mock_client!(aws_sdk_sts, [&rule]));

    let err = assumer.assume_role(&base(), &request()).await.unwrap_err();
    match err {
        BlockError::Credentials(msg) => assert!(msg.contains("no credentials")),
        other => panic!("Unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_assume_role_service_error() {
    let rule = mock!(Client::assume_role).then_error(|| {
        AssumeRoleError::MalformedPolicyDocumentException(
            MalformedPolicyDocumentException::builder()
                .message("policy is not valid JSON")
                .build(),
        )
    });
    let assumer = StsRoleAssumer::with_client(mock_client!(aws_sdk_sts, [&rule]));

    let err = assumer.assume_role(&base(), &request()).await.unwrap_err();
    match err {
        BlockError::Aws(msg) => assert!(msg.contains("policy is not valid JSON")),
        other => panic!("Unexpected error: {other}"),
    }
}
