// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Lifecycle handlers for metric and subscription filters.
//!
//! Each handler operation is one reconciliation step: translate the declared
//! model, make exactly one call through the injected [`LogsClient`], then
//! translate the response or classify the failure. The result is always a
//! terminal [`ProgressEvent`]; nothing here waits, polls or retries.
//!
//! [`LogsClient`]: lfh_client::LogsClient

pub mod logging;
pub mod metric_filter;
pub mod subscription_filter;

pub use metric_filter::MetricFilterHandler;
pub use subscription_filter::SubscriptionFilterHandler;

use async_trait::async_trait;
use lfh_core::{Action, CallbackContext, HandlerRequest, ModelValidationError, ProgressEvent};
use lfh_error::HandlerError;
use lfh_sdk_types::ServiceError;
use tracing::{info, warn};

/// The five lifecycle operations of one resource type.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Declared model this handler reconciles.
    type Model: Send + Sync;

    /// Resource type name, e.g. `AWS::Logs::MetricFilter`.
    fn type_name(&self) -> &'static str;

    /// Create the declared resource.
    async fn create(
        &self,
        request: &HandlerRequest<Self::Model>,
        context: &CallbackContext,
    ) -> ProgressEvent<Self::Model>;

    /// Read the resource identified by the declared model.
    async fn read(
        &self,
        request: &HandlerRequest<Self::Model>,
        context: &CallbackContext,
    ) -> ProgressEvent<Self::Model>;

    /// Replace the resource with the declared model.
    async fn update(
        &self,
        request: &HandlerRequest<Self::Model>,
        context: &CallbackContext,
    ) -> ProgressEvent<Self::Model>;

    /// Delete the resource identified by the declared model.
    async fn delete(
        &self,
        request: &HandlerRequest<Self::Model>,
        context: &CallbackContext,
    ) -> ProgressEvent<Self::Model>;

    /// List one page of resources starting at `request.next_token`.
    async fn list(
        &self,
        request: &HandlerRequest<Self::Model>,
        context: &CallbackContext,
    ) -> ProgressEvent<Self::Model>;
}

/// Route one engine invocation to the matching operation.
pub async fn dispatch<H>(
    handler: &H,
    action: Action,
    request: &HandlerRequest<H::Model>,
    context: &CallbackContext,
) -> ProgressEvent<H::Model>
where
    H: ResourceHandler + ?Sized,
{
    info!(
        target: "lfh.handler",
        type_name = handler.type_name(),
        %action,
        stack_id = request.stack_id.as_deref().unwrap_or(""),
        "handling request"
    );
    let event = match action {
        Action::Create => handler.create(request, context).await,
        Action::Read => handler.read(request, context).await,
        Action::Update => handler.update(request, context).await,
        Action::Delete => handler.delete(request, context).await,
        Action::List => handler.list(request, context).await,
    };
    info!(
        target: "lfh.handler",
        type_name = handler.type_name(),
        %action,
        status = ?event.status,
        error_code = event.error_code.map(|c| c.as_str()).unwrap_or(""),
        "request handled"
    );
    event
}

/// Classify a remote failure and turn it into a failed event.
pub(crate) fn remote_failure<M>(type_name: &str, action: Action, err: ServiceError) -> ProgressEvent<M> {
    let err = HandlerError::from_service_error(type_name, err);
    warn!(
        target: "lfh.handler",
        type_name,
        %action,
        error_code = err.code.as_str(),
        error = %err,
        "remote call failed"
    );
    ProgressEvent::failed(&err)
}

/// Reject a declared model before anything is sent.
pub(crate) fn validation_failure<M>(
    type_name: &str,
    action: Action,
    errors: &[ModelValidationError],
) -> ProgressEvent<M> {
    let reasons = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    let err = HandlerError::invalid_request(type_name, reasons);
    warn!(
        target: "lfh.handler",
        type_name,
        %action,
        problems = errors.len(),
        error = %err,
        "declared model rejected"
    );
    ProgressEvent::failed(&err)
}
