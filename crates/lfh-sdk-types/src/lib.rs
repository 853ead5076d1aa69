// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wire shapes of the remote log-filter API.
//!
//! These types mirror the JSON protocol of the log-management service: field
//! names serialise as `camelCase` and optional fields are omitted when unset.
//! Nothing here knows about the declared resource model; translation lives in
//! `lfh-translator`.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod metric;
pub mod subscription;

pub use error::{ServiceError, ServiceErrorKind};
pub use metric::{
    DeleteMetricFilterRequest, DeleteMetricFilterResponse, DescribeMetricFiltersRequest,
    DescribeMetricFiltersResponse, MetricFilter, MetricTransformation, PutMetricFilterRequest,
    PutMetricFilterResponse,
};
pub use subscription::{
    DeleteSubscriptionFilterRequest, DeleteSubscriptionFilterResponse,
    DescribeSubscriptionFiltersRequest, DescribeSubscriptionFiltersResponse, Distribution,
    PutSubscriptionFilterRequest, PutSubscriptionFilterResponse, SubscriptionFilter,
};

/// Largest page the describe operations accept.
pub const MAX_DESCRIBE_LIMIT: i32 = 50;
