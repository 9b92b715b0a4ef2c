use std::error::Error;

use aws_blocks::errors::BlockError;
use aws_smithy_types::error::operation::BuildError;

#[test]
fn test_block_error_implements_error_trait() {
    // Verify BlockError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = BlockError::UnknownBlock("s3.GetObject".to_string());
    assert_error(&error);
}

#[test]
fn test_block_error_display() {
    let error = BlockError::MissingField("TableName".to_string());
    assert_eq!(format!("{error}"), "Missing required field: TableName");

    let error = BlockError::invalid("Key", "expected object, got string");
    assert_eq!(
        format!("{error}"),
        "Invalid field `Key`: expected object, got string"
    );

    let error = BlockError::Credentials("AccessDenied".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to resolve AWS credentials: AccessDenied"
    );

    let error = BlockError::Aws("ResourceNotFoundException".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to interact with AWS services: ResourceNotFoundException"
    );
}

#[test]
fn test_block_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let block_err: BlockError = err.into();
    match block_err {
        BlockError::ConfigError(msg) => assert!(msg.contains("test error")),
        _ => panic!("Unexpected error type"),
    }

    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let block_err: BlockError = err.into();
    assert!(matches!(block_err, BlockError::Serialization(_)));

    let err = BuildError::missing_field("table_name", "table_name was not specified");
    let block_err: BlockError = err.into();
    match block_err {
        BlockError::Request(msg) => assert!(msg.contains("table_name")),
        _ => panic!("Unexpected error type"),
    }
}
