use aws_blocks::core::models::{InvocationRequest, normalize_output};
use aws_blocks::core::schema::{ConfigSchema, FieldSchema, FieldType};
use aws_blocks::errors::BlockError;
use serde_json::json;

fn table_schema() -> ConfigSchema {
    ConfigSchema::new(vec![
        FieldSchema::required("TableName", FieldType::String, "Table to read"),
        FieldSchema::optional("Limit", FieldType::Integer, "Maximum items"),
        FieldSchema::optional("ConsistentRead", FieldType::Boolean, "Strong reads"),
    ])
}

#[test]
fn test_schema_prepends_common_fields() {
    let schema = table_schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        vec!["region", "assumeRoleArn", "endpoint", "TableName", "Limit", "ConsistentRead"]
    );
    assert!(schema.field("region").unwrap().required);
    assert!(!schema.field("assumeRoleArn").unwrap().required);
    assert!(schema.field("Missing").is_none());
}

#[test]
fn test_validate_missing_required_field() {
    let err = table_schema()
        .validate(json!({ "region": "us-east-1" }))
        .unwrap_err();
    match err {
        BlockError::MissingField(name) => assert_eq!(name, "TableName"),
        other => panic!("Unexpected error: {other}"),
    }

    let err = table_schema()
        .validate(json!({ "TableName": "orders" }))
        .unwrap_err();
    assert!(matches!(err, BlockError::MissingField(ref name) if name == "region"));
}

#[test]
fn test_validate_null_counts_as_absent() {
    let err = table_schema()
        .validate(json!({ "region": "us-east-1", "TableName": null }))
        .unwrap_err();
    assert!(matches!(err, BlockError::MissingField(ref name) if name == "TableName"));

    let params = table_schema()
        .validate(json!({ "region": "us-east-1", "TableName": "orders", "Limit": null }))
        .unwrap();
    assert!(!params.contains_key("Limit"));
}

#[test]
fn test_validate_type_mismatch() {
    let err = table_schema()
        .validate(json!({ "region": "us-east-1", "TableName": "orders", "Limit": 2.5 }))
        .unwrap_err();
    match err {
        BlockError::InvalidField { field, reason } => {
            assert_eq!(field, "Limit");
            assert_eq!(reason, "expected integer, got number");
        }
        other => panic!("Unexpected error: {other}"),
    }

    let err = table_schema()
        .validate(json!({ "region": "us-east-1", "TableName": 42 }))
        .unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { ref field, .. } if field == "TableName"));
}

#[test]
fn test_validate_rejects_non_object_config() {
    let err = table_schema().validate(json!(["us-east-1"])).unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { ref field, .. } if field == "config"));

    let err = table_schema().validate(serde_json::Value::Null).unwrap_err();
    assert!(matches!(err, BlockError::MissingField(_)));
}

#[test]
fn test_validate_rejects_bad_endpoint() {
    let err = table_schema()
        .validate(json!({
            "region": "us-east-1",
            "TableName": "orders",
            "endpoint": "ftp://localhost:21"
        }))
        .unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { ref field, .. } if field == "endpoint"));
}

#[test]
fn test_validate_keeps_undeclared_keys() {
    let params = table_schema()
        .validate(json!({ "region": "us-east-1", "TableName": "orders", "Extra": 1 }))
        .unwrap();
    assert_eq!(params.get("Extra"), Some(&json!(1)));
}

#[test]
fn test_invocation_request_splits_common_fields() {
    let request = InvocationRequest::from_config(
        &table_schema(),
        json!({
            "region": "eu-west-1",
            "assumeRoleArn": "arn:aws:iam::123456789012:role/reader",
            "endpoint": "http://localhost:4566",
            "TableName": "orders",
            "ConsistentRead": true
        }),
    )
    .unwrap();

    assert_eq!(request.region, "eu-west-1");
    assert_eq!(
        request.assume_role_arn.as_deref(),
        Some("arn:aws:iam::123456789012:role/reader")
    );
    assert_eq!(request.endpoint.as_deref(), Some("http://localhost:4566"));
    assert_eq!(request.params.len(), 2);
    assert_eq!(request.params.get("TableName"), Some(&json!("orders")));
    assert!(!request.params.contains_key("region"));
}

#[test]
fn test_invocation_request_empty_values() {
    let request = InvocationRequest::from_config(
        &table_schema(),
        json!({ "region": "us-east-1", "assumeRoleArn": "", "TableName": "orders" }),
    )
    .unwrap();
    assert!(request.assume_role_arn.is_none());
    assert!(request.endpoint.is_none());

    let err = InvocationRequest::from_config(
        &table_schema(),
        json!({ "region": " ", "TableName": "orders" }),
    )
    .unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { ref field, .. } if field == "region"));
}

#[test]
fn test_json_schema_rendering() {
    let rendered = table_schema().to_json_schema();
    assert_eq!(rendered["type"], "object");
    assert_eq!(rendered["properties"]["Limit"]["type"], "integer");
    assert_eq!(rendered["required"], json!(["region", "TableName"]));
}

#[test]
fn test_normalize_output() {
    assert_eq!(normalize_output(serde_json::Value::Null), json!({}));
    assert_eq!(normalize_output(json!({ "a": 1 })), json!({ "a": 1 }));
}
