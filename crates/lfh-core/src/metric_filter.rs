// SPDX-License-Identifier: MIT OR Apache-2.0
//! `AWS::Logs::MetricFilter` resource model.

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Resource type name reported to the orchestration engine.
pub const TYPE_NAME: &str = "AWS::Logs::MetricFilter";

/// One metric dimension: a name and the value (or field selector) it takes.
///
/// Dimensions are held in a set so serialisation is stable; two dimensions
/// are equal only when both key and value match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    /// Dimension name.
    pub key: String,
    /// Dimension value or `$.field` selector.
    pub value: String,
}

impl Dimension {
    /// Create a dimension.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// How matching events become a metric data point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct MetricTransformation {
    /// Metric name.
    pub metric_name: String,
    /// Metric namespace.
    pub metric_namespace: String,
    /// Value template published per match.
    pub metric_value: String,
    /// Value published when nothing matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    /// Standard unit name, e.g. `Seconds` or `Count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Dimensions attached to the metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<BTreeSet<Dimension>>,
}

impl MetricTransformation {
    /// Create a transformation with no default value, unit or dimensions.
    pub fn new(
        metric_name: impl Into<String>,
        metric_namespace: impl Into<String>,
        metric_value: impl Into<String>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            metric_namespace: metric_namespace.into(),
            metric_value: metric_value.into(),
            ..Default::default()
        }
    }

    /// Set the default value.
    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Add one dimension.
    pub fn with_dimension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions
            .get_or_insert_with(BTreeSet::new)
            .insert(Dimension::new(key, value));
        self
    }
}

/// Declared state of one metric filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceModel {
    /// Owning log group; part of the identity.
    pub log_group_name: String,
    /// Filter name; part of the identity.
    pub filter_name: String,
    /// Pattern to match. `Some("")` matches every event and is not the same
    /// as `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_pattern: Option<String>,
    /// Transformations, in declared order.
    #[serde(default)]
    pub metric_transformations: Vec<MetricTransformation>,
}

impl ResourceModel {
    /// Create a model with the given identity and nothing else set.
    pub fn new(log_group_name: impl Into<String>, filter_name: impl Into<String>) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            filter_name: filter_name.into(),
            ..Default::default()
        }
    }

    /// Set the filter pattern.
    pub fn with_filter_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.filter_pattern = Some(pattern.into());
        self
    }

    /// Append a transformation.
    pub fn with_transformation(mut self, transformation: MetricTransformation) -> Self {
        self.metric_transformations.push(transformation);
        self
    }

    /// `{"/properties/LogGroupName": .., "/properties/FilterName": ..}`.
    pub fn primary_identifier(&self) -> Value {
        crate::primary_identifier(&self.log_group_name, &self.filter_name)
    }
}

/// Declared JSON schema of the resource.
pub fn resource_schema() -> Schema {
    schema_for!(ResourceModel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_with_schema_property_names() {
        let model = ResourceModel::new("lg", "f")
            .with_filter_pattern("")
            .with_transformation(
                MetricTransformation::new("m", "ns", "1")
                    .with_unit("Count")
                    .with_dimension("Env", "$.env"),
            );
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "LogGroupName": "lg",
                "FilterName": "f",
                "FilterPattern": "",
                "MetricTransformations": [{
                    "MetricName": "m",
                    "MetricNamespace": "ns",
                    "MetricValue": "1",
                    "Unit": "Count",
                    "Dimensions": [{"Key": "Env", "Value": "$.env"}]
                }]
            })
        );
    }

    #[test]
    fn absent_pattern_is_not_serialised() {
        let json = serde_json::to_value(ResourceModel::new("lg", "f")).unwrap();
        assert!(json.get("FilterPattern").is_none());
    }

    #[test]
    fn dimensions_with_same_key_and_value_collapse() {
        let t = MetricTransformation::new("m", "ns", "1")
            .with_dimension("a", "1")
            .with_dimension("a", "1");
        assert_eq!(t.dimensions.unwrap().len(), 1);
    }

    #[test]
    fn primary_identifier_shape() {
        let id = ResourceModel::new("lg", "f").primary_identifier();
        assert_eq!(
            id,
            json!({"/properties/LogGroupName": "lg", "/properties/FilterName": "f"})
        );
    }

    #[test]
    fn schema_lists_properties() {
        let schema = serde_json::to_value(resource_schema()).unwrap();
        let props = schema["properties"].as_object().unwrap();
        assert!(props.contains_key("LogGroupName"));
        assert!(props.contains_key("MetricTransformations"));
    }
}
