use aws_blocks::blocks::{BUILTIN, BlockRegistry};
use aws_blocks::errors::BlockError;
use serde_json::json;

#[test]
fn test_builtin_registry_ids() {
    let ids: Vec<&str> = BUILTIN.ids().collect();
    assert_eq!(
        ids,
        vec![
            "cloudformation.DescribeStackSetOperation",
            "cloudformation.DescribeStacks",
            "cloudwatch.DescribeAlarms",
            "cloudwatch.PutMetricData",
            "dynamodb.DeleteItem",
            "dynamodb.GetItem",
            "dynamodb.PutItem",
            "sqs.SendMessage",
            "ssm.GetParameter",
            "ssm.PutParameter",
            "sts.GetCallerIdentity",
        ]
    );
    assert_eq!(BUILTIN.len(), 11);
    assert!(!BUILTIN.is_empty());
}

#[test]
fn test_registry_unknown_block() {
    let err = BUILTIN.get("s3.GetObject").err().unwrap();
    assert!(matches!(err, BlockError::UnknownBlock(ref id) if id == "s3.GetObject"));
    assert!(BlockRegistry::new().is_empty());
}

#[test]
fn test_every_block_requires_region() {
    for id in BUILTIN.ids() {
        let block = BUILTIN.get(id).unwrap();
        let definition = block.definition();
        assert_eq!(definition.id, id);
        assert_eq!(id, format!("{}.{}", definition.service, definition.operation));

        let region = definition.config.field("region").unwrap();
        assert!(region.required, "{id} should require region");
        assert!(definition.config.field("assumeRoleArn").is_some());
        assert!(definition.config.field("endpoint").is_some());
    }
}

#[test]
fn test_catalogue_entries() {
    let catalogue = BUILTIN.catalogue();
    let entries = catalogue.as_array().unwrap();
    assert_eq!(entries.len(), 11);

    let get_item = entries
        .iter()
        .find(|e| e["id"] == "dynamodb.GetItem")
        .unwrap();
    assert_eq!(get_item["service"], "dynamodb");
    assert_eq!(get_item["operation"], "GetItem");
    assert_eq!(get_item["config"]["type"], "object");
    assert_eq!(
        get_item["config"]["required"],
        json!(["region", "TableName", "Key"])
    );
    assert_eq!(get_item["output"]["type"], "object");
}

#[test]
fn test_stack_set_operation_requires_ids() {
    let block = BUILTIN
        .get("cloudformation.DescribeStackSetOperation")
        .unwrap();
    let config = &block.definition().config;
    assert!(config.field("StackSetName").unwrap().required);
    assert!(config.field("OperationId").unwrap().required);
    assert!(!config.field("CallAs").unwrap().required);
}
