// SPDX-License-Identifier: MIT OR Apache-2.0
//! Metric filter operations: `PutMetricFilter`, `DescribeMetricFilters`,
//! `DeleteMetricFilter`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// How matching log events are turned into a metric data point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTransformation {
    /// Name of the emitted metric.
    pub metric_name: String,
    /// Namespace of the emitted metric.
    pub metric_namespace: String,
    /// Value template published per match, e.g. `"1"` or `"$.latency"`.
    pub metric_value: String,
    /// Value published when no event matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    /// Dimension name to value (or field selector).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<BTreeMap<String, String>>,
    /// Standard unit of the metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A metric filter as the service stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricFilter {
    /// Filter name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_name: Option<String>,
    /// Owning log group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_group_name: Option<String>,
    /// Pattern; the service reports an empty pattern as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_pattern: Option<String>,
    /// Transformations attached to the filter; absent and `null` both read
    /// as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metric_transformations: Vec<MetricTransformation>,
    /// Creation time in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,
}

/// Create or replace a metric filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutMetricFilterRequest {
    /// Owning log group.
    pub log_group_name: String,
    /// Filter name.
    pub filter_name: String,
    /// Pattern to match; `Some("")` is sent as an explicit empty pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_pattern: Option<String>,
    /// Transformations to attach.
    pub metric_transformations: Vec<MetricTransformation>,
}

/// `PutMetricFilter` returns no payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutMetricFilterResponse {}

/// Page through metric filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeMetricFiltersRequest {
    /// Restrict to one log group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_group_name: Option<String>,
    /// Restrict to filters whose name starts with this prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_name_prefix: Option<String>,
    /// Continuation token from a previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

/// One page of metric filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeMetricFiltersResponse {
    /// Filters on this page; the service may omit the field entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_filters: Option<Vec<MetricFilter>>,
    /// Token for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Remove a metric filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMetricFilterRequest {
    /// Owning log group.
    pub log_group_name: String,
    /// Filter name.
    pub filter_name: String,
}

/// `DeleteMetricFilter` returns no payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMetricFilterResponse {}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_request_uses_wire_names() {
        let req = PutMetricFilterRequest {
            log_group_name: "lg".into(),
            filter_name: "f".into(),
            filter_pattern: Some(String::new()),
            metric_transformations: vec![MetricTransformation {
                metric_name: "m".into(),
                metric_namespace: "ns".into(),
                metric_value: "1".into(),
                ..Default::default()
            }],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "logGroupName": "lg",
                "filterName": "f",
                "filterPattern": "",
                "metricTransformations": [
                    {"metricName": "m", "metricNamespace": "ns", "metricValue": "1"}
                ]
            })
        );
    }

    #[test]
    fn describe_response_tolerates_missing_collection() {
        let resp: DescribeMetricFiltersResponse = serde_json::from_value(json!({})).unwrap();
        assert!(resp.metric_filters.is_none());
        assert!(resp.next_token.is_none());
    }

    #[test]
    fn null_pattern_deserialises_as_none() {
        let filter: MetricFilter = serde_json::from_value(json!({
            "filterName": "f",
            "logGroupName": "lg",
            "filterPattern": null,
            "metricTransformations": []
        }))
        .unwrap();
        assert!(filter.filter_pattern.is_none());
    }

    #[test]
    fn null_or_missing_transformations_read_as_empty() {
        for body in [
            json!({"filterName": "f", "metricTransformations": null}),
            json!({"filterName": "f"}),
        ] {
            let filter: MetricFilter = serde_json::from_value(body).unwrap();
            assert!(filter.metric_transformations.is_empty());
        }
        let resp: DescribeMetricFiltersResponse = serde_json::from_value(json!({
            "metricFilters": [{"filterName": "f", "metricTransformations": null}]
        }))
        .unwrap();
        assert_eq!(resp.metric_filters.unwrap()[0].filter_name.as_deref(), Some("f"));
    }
}
