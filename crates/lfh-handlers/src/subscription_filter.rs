// SPDX-License-Identifier: MIT OR Apache-2.0
//! Handlers for `AWS::Logs::SubscriptionFilter`.

use async_trait::async_trait;
use lfh_client::SharedLogsClient;
use lfh_config::HandlerConfig;
use lfh_core::subscription_filter::{ResourceModel, TYPE_NAME};
use lfh_core::validate::validate_subscription_filter;
use lfh_core::{Action, CallbackContext, HandlerRequest, ProgressEvent};
use lfh_error::HandlerError;
use lfh_translator::subscription_filter as translate;
use tracing::{debug, info, trace};

use crate::{ResourceHandler, remote_failure, validation_failure};

/// Reconciles subscription filters through a [`LogsClient`](lfh_client::LogsClient).
#[derive(Clone)]
pub struct SubscriptionFilterHandler {
    client: SharedLogsClient,
    config: HandlerConfig,
}

impl std::fmt::Debug for SubscriptionFilterHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionFilterHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SubscriptionFilterHandler {
    /// Handler with default configuration.
    pub fn new(client: SharedLogsClient) -> Self {
        Self::with_config(client, HandlerConfig::default())
    }

    /// Handler with explicit configuration.
    pub fn with_config(client: SharedLogsClient, config: HandlerConfig) -> Self {
        Self { client, config }
    }

    async fn put(&self, action: Action, model: &ResourceModel) -> ProgressEvent<ResourceModel> {
        if let Err(errors) = validate_subscription_filter(model) {
            return validation_failure(TYPE_NAME, action, &errors);
        }

        let request = match action {
            Action::Update => translate::to_update_request(model),
            _ => translate::to_create_request(model),
        };
        trace!(target: "lfh.handler", ?request, "PutSubscriptionFilter");

        match self.client.put_subscription_filter(request).await {
            Ok(_) => {
                info!(
                    target: "lfh.handler",
                    type_name = TYPE_NAME,
                    %action,
                    log_group = %model.log_group_name,
                    filter = %model.filter_name,
                    destination = model.destination_arn.as_deref().unwrap_or(""),
                    "subscription filter written"
                );
                ProgressEvent::success()
            }
            Err(err) => remote_failure(TYPE_NAME, action, err),
        }
    }
}

#[async_trait]
impl ResourceHandler for SubscriptionFilterHandler {
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
        trace!(target: "lfh.handler", request = ?describe, "DescribeSubscriptionFilters");

        let response = match self.client.describe_subscription_filters(describe).await {
            Ok(response) => response,
            Err(err) => return remote_failure(TYPE_NAME, Action::Read, err),
        };

        // Describe matches by prefix; only the exact name is this resource.
        match translate::from_read_response(&response) {
            Some(found) if found.filter_name == model.filter_name => {
                debug!(
                    target: "lfh.handler",
                    log_group = %found.log_group_name,
                    filter = %found.filter_name,
                    "subscription filter found"
                );
                ProgressEvent::success_with_model(found)
            }
            _ => {
                let err = HandlerError::not_found(TYPE_NAME, model.primary_identifier());
                info!(
                    target: "lfh.handler",
                    log_group = %model.log_group_name,
                    filter = %model.filter_name,
                    "subscription filter does not exist"
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
        trace!(target: "lfh.handler", request = ?delete, "DeleteSubscriptionFilter");

        match self.client.delete_subscription_filter(delete).await {
            Ok(_) => {
                info!(
                    target: "lfh.handler",
                    log_group = %model.log_group_name,
                    filter = %model.filter_name,
                    stack_id = request.stack_id.as_deref().unwrap_or(""),
                    "subscription filter deleted"
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
            &request.desired_resource_state,
            request.next_token.as_deref(),
            self.config.effective_list_page_size(),
        );
        trace!(target: "lfh.handler", request = ?describe, "DescribeSubscriptionFilters");

        match self.client.describe_subscription_filters(describe).await {
            Ok(response) => {
                let models = translate::from_list_response(&response);
                debug!(
                    target: "lfh.handler",
                    count = models.len(),
                    more = response.next_token.is_some(),
                    "subscription filters listed"
                );
                ProgressEvent::success_with_models(models, response.next_token)
            }
            Err(err) => remote_failure(TYPE_NAME, Action::List, err),
        }
    }
}
