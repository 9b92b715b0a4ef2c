//! CloudWatch metric and alarm blocks.

use async_trait::async_trait;
use aws_sdk_cloudwatch::Client as CloudWatchClient;
use aws_sdk_cloudwatch::types::{
    ComparisonOperator, Dimension, MetricAlarm, MetricDatum, StandardUnit, StateValue, Statistic,
};
use serde_json::{Value, json};

use super::convert::{Built, JsonObject, enum_to_json, infallible_build, parse_timestamp};
use super::params::{
    as_object, optional_array, optional_f64, optional_i32, optional_string, optional_string_list,
    required_array, required_str, within,
};
use super::{Block, BlockDefinition};
use crate::core::models::Params;
use crate::core::schema::{FieldSchema, FieldType};
use crate::credentials::ClientContext;
use crate::errors::BlockError;

const SERVICE: &str = "cloudwatch";

enum_to_json!(ComparisonOperator, StateValue, Statistic);
infallible_build!(Dimension, MetricDatum);

async fn client(ctx: &ClientContext) -> CloudWatchClient {
    CloudWatchClient::new(&ctx.sdk_config().await)
}

fn dimension(path: &str, value: &Value) -> Result<Dimension, BlockError> {
    let at = |e| within(path, e);
    let dimension = as_object(path, value)?;

    Dimension::builder()
        .name(required_str(dimension, "Name").map_err(at)?)
        .value(required_str(dimension, "Value").map_err(at)?)
        .build()
        .built()
}

/// Builds a [`MetricDatum`] from its JSON form, reporting errors under `path`.
pub fn metric_datum(path: &str, value: &Value) -> Result<MetricDatum, BlockError> {
    let at = |e| within(path, e);
    let datum = as_object(path, value)?;

    let dimensions = optional_array(datum, "Dimensions")
        .map_err(at)?
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(i, item)| dimension(&format!("{path}.Dimensions[{i}]"), item))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let timestamp = datum
        .get("Timestamp")
        .filter(|v| !v.is_null())
        .map(|v| parse_timestamp(&format!("{path}.Timestamp"), v))
        .transpose()?;

    MetricDatum::builder()
        .metric_name(required_str(datum, "MetricName").map_err(at)?)
        .set_value(optional_f64(datum, "Value").map_err(at)?)
        .set_unit(
            optional_string(datum, "Unit")
                .map_err(at)?
                .map(|unit| StandardUnit::from(unit.as_str())),
        )
        .set_timestamp(timestamp)
        .set_dimensions(dimensions)
        .set_storage_resolution(optional_i32(datum, "StorageResolution").map_err(at)?)
        .build()
        .built()
}

fn metric_alarm_to_json(alarm: &MetricAlarm) -> Value {
    JsonObject::new()
        .field("AlarmName", alarm.alarm_name())
        .field("AlarmArn", alarm.alarm_arn())
        .field("AlarmDescription", alarm.alarm_description())
        .field("ActionsEnabled", alarm.actions_enabled())
        .list("AlarmActions", alarm.alarm_actions(), |a| json!(a))
        .field("StateValue", alarm.state_value())
        .field("StateReason", alarm.state_reason())
        .field("StateUpdatedTimestamp", alarm.state_updated_timestamp())
        .field("MetricName", alarm.metric_name())
        .field("Namespace", alarm.namespace())
        .field("Statistic", alarm.statistic())
        .field("Period", alarm.period())
        .field("EvaluationPeriods", alarm.evaluation_periods())
        .field("Threshold", alarm.threshold())
        .field("ComparisonOperator", alarm.comparison_operator())
        .build()
}

pub struct PutMetricData {
    definition: BlockDefinition,
}

impl PutMetricData {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "PutMetricData",
                "Publishes metric data points to CloudWatch",
                vec![
                    FieldSchema::required(
                        "Namespace",
                        FieldType::String,
                        "Namespace for the metric data",
                    ),
                    FieldSchema::required(
                        "MetricData",
                        FieldType::Array,
                        "Data points: MetricName, Value, Unit, Timestamp, Dimensions, StorageResolution",
                    ),
                ],
                json!({ "type": "object", "properties": {} }),
            ),
        }
    }
}

#[async_trait]
impl Block for PutMetricData {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let metric_data = required_array(params, "MetricData")?
            .iter()
            .enumerate()
            .map(|(i, datum)| metric_datum(&format!("MetricData[{i}]"), datum))
            .collect::<Result<Vec<_>, _>>()?;

        client(ctx)
            .await
            .put_metric_data()
            .namespace(required_str(params, "Namespace")?)
            .set_metric_data(Some(metric_data))
            .send()
            .await?;

        // The service answers with an empty body.
        Ok(Value::Null)
    }
}

pub struct DescribeAlarms {
    definition: BlockDefinition,
}

impl DescribeAlarms {
    #[must_use]
    pub fn new() -> Self {
        Self {
            definition: BlockDefinition::new(
                SERVICE,
                "DescribeAlarms",
                "Retrieves metric alarms by name, name prefix or state",
                vec![
                    FieldSchema::optional(
                        "AlarmNames",
                        FieldType::Array,
                        "Names of the alarms to retrieve",
                    ),
                    FieldSchema::optional(
                        "AlarmNamePrefix",
                        FieldType::String,
                        "Retrieve alarms whose names start with this prefix",
                    ),
                    FieldSchema::optional(
                        "StateValue",
                        FieldType::String,
                        "OK | ALARM | INSUFFICIENT_DATA",
                    ),
                    FieldSchema::optional(
                        "MaxRecords",
                        FieldType::Integer,
                        "Maximum number of alarms to return",
                    ),
                    FieldSchema::optional(
                        "NextToken",
                        FieldType::String,
                        "Token from a previous page of results",
                    ),
                ],
                json!({
                    "type": "object",
                    "properties": {
                        "MetricAlarms": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "AlarmName": { "type": "string" },
                                    "AlarmArn": { "type": "string" },
                                    "StateValue": { "type": "string" },
                                    "StateReason": { "type": "string" },
                                    "MetricName": { "type": "string" },
                                    "Namespace": { "type": "string" },
                                    "Threshold": { "type": "number" }
                                }
                            }
                        },
                        "NextToken": { "type": "string" }
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl Block for DescribeAlarms {
    fn definition(&self) -> &BlockDefinition {
        &self.definition
    }

    async fn call(&self, ctx: &ClientContext, params: &Params) -> Result<Value, BlockError> {
        let output = client(ctx)
            .await
            .describe_alarms()
            .set_alarm_names(optional_string_list(params, "AlarmNames")?)
            .set_alarm_name_prefix(optional_string(params, "AlarmNamePrefix")?)
            .set_state_value(
                optional_string(params, "StateValue")?.map(|v| StateValue::from(v.as_str())),
            )
            .set_max_records(optional_i32(params, "MaxRecords")?)
            .set_next_token(optional_string(params, "NextToken")?)
            .send()
            .await?;

        Ok(JsonObject::new()
            .list("MetricAlarms", output.metric_alarms(), metric_alarm_to_json)
            .field("NextToken", output.next_token())
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_datum_from_json() {
        let datum = metric_datum(
            "MetricData[0]",
            &json!({
                "MetricName": "Invocations",
                "Value": 3,
                "Unit": "Count",
                "Timestamp": "2024-05-01T12:00:00Z",
                "Dimensions": [{ "Name": "Block", "Value": "dynamodb.DeleteItem" }]
            }),
        )
        .unwrap();

        assert!(format!("{datum:?}").contains("Invocations"));
        assert_eq!(datum.value(), Some(3.0));
        assert_eq!(datum.unit(), Some(&StandardUnit::Count));
        assert_eq!(datum.dimensions().len(), 1);
    }

    #[test]
    fn test_metric_datum_reports_nested_path() {
        let err = metric_datum(
            "MetricData[2]",
            &json!({ "MetricName": "Latency", "Dimensions": [{ "Name": "Block" }] }),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required field: MetricData[2].Dimensions[0].Value"
        );
    }

    #[test]
    fn test_metric_datum_requires_metric_name() {
        let err = metric_datum("MetricData[0]", &json!({ "Value": 1 })).unwrap_err();
        assert!(matches!(err, BlockError::MissingField(f) if f == "MetricData[0].MetricName"));
    }
}
