// SPDX-License-Identifier: MIT OR Apache-2.0
//! Handlers for `AWS::Logs::MetricFilter`.

use async_trait::async_trait;
use lfh_client::SharedLogsClient;
use lfh_config::HandlerConfig;
use lfh_core::metric_filter::{ResourceModel, TYPE_NAME};
use lfh_core::validate::validate_metric_filter;
use lfh_core::{Action, CallbackContext, HandlerRequest, ProgressEvent};
use lfh_error::HandlerError;
use lfh_translator::metric_filter as translate;
use tracing::{debug, info, trace};

use crate::{ResourceHandler, remote_failure, validation_failure};

/// Reconciles metric filters through a [`LogsClient`](lfh_client::LogsClient).
#[derive(Clone)]
pub struct MetricFilterHandler {
    client: SharedLogsClient,
    config: HandlerConfig,
}

impl std::fmt::Debug for MetricFilterHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricFilterHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MetricFilterHandler {
    /// Handler with default configuration.
    pub fn new(client: SharedLogsClient) -> Self {
        Self::with_config(client, HandlerConfig::default())
    }

    /// Handler with explicit configuration.
    pub fn with_config(client: SharedLogsClient, config: HandlerConfig) -> Self {
        Self { client, config }
    }

    /// Create and update are the same full-replacement put.
    async fn put(&self, action: Action, model: &ResourceModel) -> ProgressEvent<ResourceModel> {
        if let Err(errors) = validate_metric_filter(model) {
            return validation_failure(TYPE_NAME, action, &errors);
        }

        let request = match action {
            Action::Update => translate::to_update_request(model),
            _ => translate::to_create_request(model),
        };
        trace!(target: "lfh.handler", ?request, "PutMetricFilter");

        match self.client.put_metric_filter(request).await {
            Ok(_) => {
                info!(
                    target: "lfh.handler",
                    type_name = TYPE_NAME,
                    %action,
                    log_group = %model.log_group_name,
                    filter = %model.filter_name,
                    transformations = model.metric_transformations.len(),
                    "metric filter written"
                );
                ProgressEvent::success()
            }
            Err(err) => remote_failure(TYPE_NAME, action, err),
        }
    }
}

#[async_trait]
impl ResourceHandler for MetricFilterHandler {
    type Model = ResourceModel;

    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    async fn create(
        &self,
        request: &HandlerRequest<ResourceModel>,
        _context: &CallbackContext,
    ) -> ProgressEvent<ResourceModel> {
        self.put(Action::Create, &request.desired_resource_state).await
    }

    async fn read(
        &self,
        request: &HandlerRequest<ResourceModel>,
        _context: &CallbackContext,
    ) -> ProgressEvent<ResourceModel> {
        let model = &request.desired_resource_state;
        let describe = translate::to_read_request(model);
        trace!(target: "lfh.handler", request = ?describe, "DescribeMetricFilters");

        let response = match self.client.describe_metric_filters(describe).await {
            Ok(response) => response,
            Err(err) => return remote_failure(TYPE_NAME, Action::Read, err),
        };

        // Describe matches by prefix; only the exact name is this resource.
        // A filter without transformations is not a usable metric filter.
        match translate::from_read_response(&response) {
            Some(found)
                if found.filter_name == model.filter_name
                    && !found.metric_transformations.is_empty() =>
            {
                debug!(
                    target: "lfh.handler",
                    log_group = %found.log_group_name,
                    filter = %found.filter_name,
                    "metric filter found"
                );
                ProgressEvent::success_with_model(found)
            }
            _ => {
                let err = HandlerError::not_found(TYPE_NAME, model.primary_identifier());
                info!(
                    target: "lfh.handler",
                    log_group = %model.log_group_name,
                    filter = %model.filter_name,
                    "metric filter does not exist"
                );
                ProgressEvent::failed(&err)
            }
        }
    }

    async fn update(
        &self,
        request: &HandlerRequest<ResourceModel>,
        _context: &CallbackContext,
    ) -> ProgressEvent<ResourceModel> {
        self.put(Action::Update, &request.desired_resource_state).await
    }

    async fn delete(
        &self,
        request: &HandlerRequest<ResourceModel>,
        _context: &CallbackContext,
    ) -> ProgressEvent<ResourceModel> {
        let model = &request.desired_resource_state;
        let delete = translate::to_delete_request(model);
        trace!(target: "lfh.handler", request = ?delete, "DeleteMetricFilter");

        match self.client.delete_metric_filter(delete).await {
            Ok(_) => {
                info!(
                    target: "lfh.handler",
                    log_group = %model.log_group_name,
                    filter = %model.filter_name,
                    "metric filter deleted"
                );
                ProgressEvent::success()
            }
            Err(err) => remote_failure(TYPE_NAME, Action::Delete, err),
        }
    }

    async fn list(
        &self,
        request: &HandlerRequest<ResourceModel>,
        _context: &CallbackContext,
    ) -> ProgressEvent<ResourceModel> {
        let describe = translate::to_list_request_with_limit(
            request.next_token.as_deref(),
            self.config.effective_list_page_size(),
        );
        trace!(target: "lfh.handler", request = ?describe, "DescribeMetricFilters");

        match self.client.describe_metric_filters(describe).await {
            Ok(response) => {
                let models = translate::from_list_response(&response);
                debug!(
                    target: "lfh.handler",
                    count = models.len(),
                    more = response.next_token.is_some(),
                    "metric filters listed"
                );
                ProgressEvent::success_with_models(models, response.next_token)
            }
            Err(err) => remote_failure(TYPE_NAME, Action::List, err),
        }
    }
}
