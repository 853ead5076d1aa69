// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! The seam between handlers and the remote log-filter API.
//!
//! A [`LogsClient`] sends exactly one request and returns exactly one
//! response or a [`ServiceError`]. Credential injection, signing and backoff
//! belong to the implementation; handlers never retry.

use std::sync::Arc;

use async_trait::async_trait;
use lfh_sdk_types::{
    DeleteMetricFilterRequest, DeleteMetricFilterResponse, DeleteSubscriptionFilterRequest,
    DeleteSubscriptionFilterResponse, DescribeMetricFiltersRequest, DescribeMetricFiltersResponse,
    DescribeSubscriptionFiltersRequest, DescribeSubscriptionFiltersResponse,
    PutMetricFilterRequest, PutMetricFilterResponse, PutSubscriptionFilterRequest,
    PutSubscriptionFilterResponse, ServiceError,
};

/// One-request, one-response access to the log-filter API.
#[async_trait]
pub trait LogsClient: Send + Sync {
    /// Create or replace a metric filter.
    async fn put_metric_filter(
        &self,
        request: PutMetricFilterRequest,
    ) -> Result<PutMetricFilterResponse, ServiceError>;

    /// Describe one page of metric filters.
    async fn describe_metric_filters(
        &self,
        request: DescribeMetricFiltersRequest,
    ) -> Result<DescribeMetricFiltersResponse, ServiceError>;

    /// Delete a metric filter.
    async fn delete_metric_filter(
        &self,
        request: DeleteMetricFilterRequest,
    ) -> Result<DeleteMetricFilterResponse, ServiceError>;

    /// Create or replace a subscription filter.
    async fn put_subscription_filter(
        &self,
        request: PutSubscriptionFilterRequest,
    ) -> Result<PutSubscriptionFilterResponse, ServiceError>;

    /// Describe one page of a log group's subscription filters.
    async fn describe_subscription_filters(
        &self,
        request: DescribeSubscriptionFiltersRequest,
    ) -> Result<DescribeSubscriptionFiltersResponse, ServiceError>;

    /// Delete a subscription filter.
    async fn delete_subscription_filter(
        &self,
        request: DeleteSubscriptionFilterRequest,
    ) -> Result<DeleteSubscriptionFilterResponse, ServiceError>;
}

/// Shared client handle as handlers hold it.
pub type SharedLogsClient = Arc<dyn LogsClient>;
