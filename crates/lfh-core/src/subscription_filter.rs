// SPDX-License-Identifier: MIT OR Apache-2.0
//! `AWS::Logs::SubscriptionFilter` resource model.

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resource type name reported to the orchestration engine.
pub const TYPE_NAME: &str = "AWS::Logs::SubscriptionFilter";

/// Distribution values the declared schema accepts.
pub const DISTRIBUTIONS: &[&str] = &["Random", "ByLogStream"];

/// Declared state of one subscription filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceModel {
    /// Owning log group; part of the identity.
    pub log_group_name: String,
    /// Filter name; part of the identity.
    pub filter_name: String,
    /// Pattern to match. `Some("")` forwards every event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_pattern: Option<String>,
    /// Where matching events go.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_arn: Option<String>,
    /// Role the service assumes to deliver events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    /// `Random` or `ByLogStream`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
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

    /// Set the destination ARN.
    pub fn with_destination_arn(mut self, arn: impl Into<String>) -> Self {
        self.destination_arn = Some(arn.into());
        self
    }

    /// Set the role ARN.
    pub fn with_role_arn(mut self, arn: impl Into<String>) -> Self {
        self.role_arn = Some(arn.into());
        self
    }

    /// Set the distribution.
    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        self.distribution = Some(distribution.into());
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
