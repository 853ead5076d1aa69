// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory log-filter API for local development and tests.
//!
//! [`InMemoryLogsClient`] keeps filters per log group and reproduces the
//! service behaviours the handlers depend on: empty patterns are stored as
//! absent, describe pages by name with opaque tokens, puts replace, and
//! deleting a filter that is already gone succeeds. Errors can be queued
//! with [`InMemoryLogsClient::fail_next`] and every call is recorded.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use lfh_client::LogsClient;
use lfh_sdk_types::{
    DeleteMetricFilterRequest, DeleteMetricFilterResponse, DeleteSubscriptionFilterRequest,
    DeleteSubscriptionFilterResponse, DescribeMetricFiltersRequest, DescribeMetricFiltersResponse,
    DescribeSubscriptionFiltersRequest, DescribeSubscriptionFiltersResponse, MAX_DESCRIBE_LIMIT,
    MetricFilter, PutMetricFilterRequest, PutMetricFilterResponse, PutSubscriptionFilterRequest,
    PutSubscriptionFilterResponse, ServiceError, ServiceErrorKind, SubscriptionFilter,
};
use tracing::debug;

/// Metric filters allowed per log group.
pub const METRIC_FILTERS_PER_LOG_GROUP: usize = 100;
/// Subscription filters allowed per log group.
pub const SUBSCRIPTION_FILTERS_PER_LOG_GROUP: usize = 2;

type FilterKey = (String, String);

/// A request the client received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// `PutMetricFilter`.
    PutMetricFilter(PutMetricFilterRequest),
    /// `DescribeMetricFilters`.
    DescribeMetricFilters(DescribeMetricFiltersRequest),
    /// `DeleteMetricFilter`.
    DeleteMetricFilter(DeleteMetricFilterRequest),
    /// `PutSubscriptionFilter`.
    PutSubscriptionFilter(PutSubscriptionFilterRequest),
    /// `DescribeSubscriptionFilters`.
    DescribeSubscriptionFilters(DescribeSubscriptionFiltersRequest),
    /// `DeleteSubscriptionFilter`.
    DeleteSubscriptionFilter(DeleteSubscriptionFilterRequest),
}

#[derive(Debug, Default)]
struct State {
    log_groups: BTreeSet<String>,
    metric_filters: BTreeMap<FilterKey, MetricFilter>,
    subscription_filters: BTreeMap<FilterKey, SubscriptionFilter>,
    failures: VecDeque<ServiceError>,
    calls: Vec<RecordedCall>,
    clock: i64,
}

impl State {
    fn require_log_group(&self, name: &str) -> Result<(), ServiceError> {
        if self.log_groups.contains(name) {
            Ok(())
        } else {
            Err(ServiceError::new(
                ServiceErrorKind::ResourceNotFound,
                "The specified log group does not exist.",
            ))
        }
    }

    fn tick(&mut self) -> i64 {
        self.clock += 1;
        self.clock
    }
}

/// A log-filter API held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLogsClient {
    state: Mutex<State>,
}

impl InMemoryLogsClient {
    /// An empty service with no log groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`InMemoryLogsClient::create_log_group`].
    pub fn with_log_group(self, name: impl Into<String>) -> Self {
        self.create_log_group(name);
        self
    }

    /// Register a log group filters can attach to.
    pub fn create_log_group(&self, name: impl Into<String>) {
        self.lock().log_groups.insert(name.into());
    }

    /// Make the next call fail with `err` instead of running.
    ///
    /// Queued failures are consumed in order, one per call.
    pub fn fail_next(&self, err: ServiceError) {
        self.lock().failures.push_back(err);
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Stored metric filter, as the service would report it.
    pub fn metric_filter(&self, log_group: &str, name: &str) -> Option<MetricFilter> {
        self.lock()
            .metric_filters
            .get(&(log_group.to_string(), name.to_string()))
            .cloned()
    }

    /// Stored subscription filter, as the service would report it.
    pub fn subscription_filter(&self, log_group: &str, name: &str) -> Option<SubscriptionFilter> {
        self.lock()
            .subscription_filters
            .get(&(log_group.to_string(), name.to_string()))
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and pop any queued failure.
    fn begin(&self, call: RecordedCall) -> Result<MutexGuard<'_, State>, ServiceError> {
        let mut state = self.lock();
        debug!(target: "lfh.mock", ?call, "remote call");
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl LogsClient for InMemoryLogsClient {
    async fn put_metric_filter(
        &self,
        request: PutMetricFilterRequest,
    ) -> Result<PutMetricFilterResponse, ServiceError> {
        let mut state = self.begin(RecordedCall::PutMetricFilter(request.clone()))?;
        state.require_log_group(&request.log_group_name)?;
        if request.metric_transformations.is_empty() {
            return Err(invalid_parameter(
                "metricTransformations must contain at least one entry",
            ));
        }

        let key = (request.log_group_name.clone(), request.filter_name.clone());
        if !state.metric_filters.contains_key(&key) {
            let in_group = count_in_group(&state.metric_filters, &request.log_group_name);
            if in_group >= METRIC_FILTERS_PER_LOG_GROUP {
                return Err(ServiceError::new(
                    ServiceErrorKind::LimitExceeded,
                    "Resource limit exceeded.",
                ));
            }
        }

        let creation_time = state.tick();
        state.metric_filters.insert(
            key,
            MetricFilter {
                filter_name: Some(request.filter_name),
                log_group_name: Some(request.log_group_name),
                filter_pattern: stored_pattern(request.filter_pattern),
                metric_transformations: request.metric_transformations,
                creation_time: Some(creation_time),
            },
        );
        Ok(PutMetricFilterResponse {})
    }

    async fn describe_metric_filters(
        &self,
        request: DescribeMetricFiltersRequest,
    ) -> Result<DescribeMetricFiltersResponse, ServiceError> {
        let state = self.begin(RecordedCall::DescribeMetricFilters(request.clone()))?;
        if request.filter_name_prefix.is_some() && request.log_group_name.is_none() {
            return Err(invalid_parameter(
                "logGroupName is required when filterNamePrefix is set",
            ));
        }
        if let Some(ref group) = request.log_group_name {
            state.require_log_group(group)?;
        }

        let matching: Vec<MetricFilter> = state
            .metric_filters
            .iter()
            .filter(|((group, name), _)| {
                request.log_group_name.as_ref().is_none_or(|g| g == group)
                    && request
                        .filter_name_prefix
                        .as_ref()
                        .is_none_or(|p| name.starts_with(p.as_str()))
            })
            .map(|(_, f)| f.clone())
            .collect();

        let (page, next_token) = paginate(matching, request.next_token.as_deref(), request.limit)?;
        Ok(DescribeMetricFiltersResponse {
            metric_filters: Some(page),
            next_token,
        })
    }

    async fn delete_metric_filter(
        &self,
        request: DeleteMetricFilterRequest,
    ) -> Result<DeleteMetricFilterResponse, ServiceError> {
        let mut state = self.begin(RecordedCall::DeleteMetricFilter(request.clone()))?;
        state.require_log_group(&request.log_group_name)?;
        state
            .metric_filters
            .remove(&(request.log_group_name, request.filter_name));
        Ok(DeleteMetricFilterResponse {})
    }

    async fn put_subscription_filter(
        &self,
        request: PutSubscriptionFilterRequest,
    ) -> Result<PutSubscriptionFilterResponse, ServiceError> {
        let mut state = self.begin(RecordedCall::PutSubscriptionFilter(request.clone()))?;
        state.require_log_group(&request.log_group_name)?;
        if request.destination_arn.as_deref().is_none_or(str::is_empty) {
            return Err(invalid_parameter("destinationArn is required"));
        }

        let key = (request.log_group_name.clone(), request.filter_name.clone());
        if !state.subscription_filters.contains_key(&key) {
            let in_group = count_in_group(&state.subscription_filters, &request.log_group_name);
            if in_group >= SUBSCRIPTION_FILTERS_PER_LOG_GROUP {
                return Err(ServiceError::new(
                    ServiceErrorKind::LimitExceeded,
                    "Resource limit exceeded.",
                ));
            }
        }

        let creation_time = state.tick();
        state.subscription_filters.insert(
            key,
            SubscriptionFilter {
                filter_name: Some(request.filter_name),
                log_group_name: Some(request.log_group_name),
                filter_pattern: stored_pattern(request.filter_pattern),
                destination_arn: request.destination_arn,
                role_arn: request.role_arn,
                distribution: request.distribution,
                creation_time: Some(creation_time),
            },
        );
        Ok(PutSubscriptionFilterResponse {})
    }

    async fn describe_subscription_filters(
        &self,
        request: DescribeSubscriptionFiltersRequest,
    ) -> Result<DescribeSubscriptionFiltersResponse, ServiceError> {
        let state = self.begin(RecordedCall::DescribeSubscriptionFilters(request.clone()))?;
        state.require_log_group(&request.log_group_name)?;

        let matching: Vec<SubscriptionFilter> = state
            .subscription_filters
            .iter()
            .filter(|((group, name), _)| {
                *group == request.log_group_name
                    && request
                        .filter_name_prefix
                        .as_ref()
                        .is_none_or(|p| name.starts_with(p.as_str()))
            })
            .map(|(_, f)| f.clone())
            .collect();

        let (page, next_token) = paginate(matching, request.next_token.as_deref(), request.limit)?;
        Ok(DescribeSubscriptionFiltersResponse {
            subscription_filters: Some(page),
            next_token,
        })
    }

    async fn delete_subscription_filter(
        &self,
        request: DeleteSubscriptionFilterRequest,
    ) -> Result<DeleteSubscriptionFilterResponse, ServiceError> {
        let mut state = self.begin(RecordedCall::DeleteSubscriptionFilter(request.clone()))?;
        state.require_log_group(&request.log_group_name)?;
        state
            .subscription_filters
            .remove(&(request.log_group_name, request.filter_name));
        Ok(DeleteSubscriptionFilterResponse {})
    }
}

fn invalid_parameter(message: &str) -> ServiceError {
    ServiceError::new(ServiceErrorKind::InvalidParameter, message)
}

/// The service drops empty patterns on write.
fn stored_pattern(pattern: Option<String>) -> Option<String> {
    pattern.filter(|p| !p.is_empty())
}

fn count_in_group<V>(filters: &BTreeMap<FilterKey, V>, log_group: &str) -> usize {
    filters.keys().filter(|(g, _)| g == log_group).count()
}

/// Slice `items` into one page. Tokens are decimal offsets into the
/// name-ordered result set.
fn paginate<T>(
    items: Vec<T>,
    token: Option<&str>,
    limit: Option<i32>,
) -> Result<(Vec<T>, Option<String>), ServiceError> {
    let limit = limit.unwrap_or(MAX_DESCRIBE_LIMIT);
    if !(1..=MAX_DESCRIBE_LIMIT).contains(&limit) {
        return Err(invalid_parameter("limit must be between 1 and 50"));
    }
    let start = match token {
        Some(t) => t
            .parse::<usize>()
            .ok()
            .filter(|&offset| offset <= items.len())
            .ok_or_else(|| invalid_parameter("The specified nextToken is invalid."))?,
        None => 0,
    };
    let end = start.saturating_add(limit as usize).min(items.len());
    let next_token = (end < items.len()).then(|| end.to_string());
    let page = items.into_iter().skip(start).take(end - start).collect();
    Ok((page, next_token))
}
