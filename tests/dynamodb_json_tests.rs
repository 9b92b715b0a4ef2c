use aws_blocks::blocks::dynamodb::{attribute_from_json, attribute_to_json, item_from_json, item_to_json};
use aws_blocks::errors::BlockError;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::json;

#[test]
fn test_scalar_attributes() {
    assert_eq!(
        attribute_from_json("Key.id", &json!({ "S": "order-1" })).unwrap(),
        AttributeValue::S("order-1".to_string())
    );
    assert_eq!(
        attribute_from_json("Key.total", &json!({ "N": "12.50" })).unwrap(),
        AttributeValue::N("12.50".to_string())
    );
    assert_eq!(
        attribute_from_json("Key.total", &json!({ "N": 3 })).unwrap(),
        AttributeValue::N("3".to_string())
    );
    assert_eq!(
        attribute_from_json("Key.paid", &json!({ "BOOL": true })).unwrap(),
        AttributeValue::Bool(true)
    );
    assert_eq!(
        attribute_from_json("Key.note", &json!({ "NULL": true })).unwrap(),
        AttributeValue::Null(true)
    );
    assert_eq!(
        attribute_from_json("Key.raw", &json!({ "B": "aGVsbG8=" })).unwrap(),
        AttributeValue::B(Blob::new(b"hello".to_vec()))
    );
}

#[test]
fn test_nested_item() {
    let item = item_from_json(
        "Item",
        &json!({
            "id": { "S": "order-1" },
            "tags": { "SS": ["new", "priority"] },
            "lines": { "L": [
                { "M": { "sku": { "S": "A-1" }, "qty": { "N": "2" } } }
            ]}
        }),
    )
    .unwrap();

    assert_eq!(item.len(), 3);
    assert_eq!(
        item.get("tags"),
        Some(&AttributeValue::Ss(vec![
            "new".to_string(),
            "priority".to_string()
        ]))
    );

    let rendered = item_to_json(&item);
    assert_eq!(rendered["id"], json!({ "S": "order-1" }));
    assert_eq!(rendered["lines"]["L"][0]["M"]["qty"], json!({ "N": "2" }));
}

#[test]
fn test_binary_renders_as_base64() {
    let value = AttributeValue::Bs(vec![Blob::new(b"hello".to_vec())]);
    assert_eq!(attribute_to_json(&value), Some(json!({ "BS": ["aGVsbG8="] })));
}

#[test]
fn test_invalid_descriptors() {
    let err = attribute_from_json("Key.id", &json!({ "S": "a", "N": "1" })).unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { ref field, .. } if field == "Key.id"));

    let err = attribute_from_json("Key.id", &json!({ "X": "a" })).unwrap_err();
    match err {
        BlockError::InvalidField { field, reason } => {
            assert_eq!(field, "Key.id");
            assert!(reason.contains("`X`"));
        }
        other => panic!("Unexpected error: {other}"),
    }

    let err = attribute_from_json("Key.id", &json!("order-1")).unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { .. }));
}

#[test]
fn test_item_error_names_the_attribute() {
    let err = item_from_json("Key", &json!({ "id": { "S": 5 } })).unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { ref field, .. } if field == "Key.id"));

    let err = item_from_json(
        "Item",
        &json!({ "lines": { "L": [{ "S": "ok" }, { "BOOL": "yes" }] } }),
    )
    .unwrap_err();
    assert!(matches!(err, BlockError::InvalidField { ref field, .. } if field == "Item.lines[1]"));
}

#[test]
fn test_rendered_item_has_only_typed_attributes() {
    let item = item_from_json(
        "Item",
        &json!({
            "id": { "S": "order-1" },
            "total": { "N": "9" },
            "note": { "NULL": true },
            "raw": { "BS": ["aGVsbG8="] },
            "lines": { "L": [{ "BOOL": false }, { "NS": ["1", "2"] }] }
        }),
    )
    .unwrap();

    let rendered = item_to_json(&item);
    let rendered = rendered.as_object().unwrap();
    assert_eq!(rendered.len(), 5);
    for (name, value) in rendered {
        let descriptor = value.as_object().unwrap();
        assert_eq!(descriptor.len(), 1, "{name} should carry one type descriptor");
    }
    assert_eq!(rendered["note"], json!({ "NULL": true }));
    assert_eq!(rendered["lines"]["L"].as_array().unwrap().len(), 2);
}
