// SPDX-License-Identifier: MIT OR Apache-2.0
//! Declared resource models and the handler progress contract.
//!
//! Two resource types are modelled: [`metric_filter::ResourceModel`] and
//! [`subscription_filter::ResourceModel`]. Both are identified by
//! `(log_group_name, filter_name)` and serialise with the declared schema's
//! `PascalCase` property names.
//!
//! A handler receives a [`HandlerRequest`] plus an opaque [`CallbackContext`]
//! and answers with exactly one [`ProgressEvent`], either
//! [`OperationStatus::Success`] or [`OperationStatus::Failed`].
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod metric_filter;
pub mod progress;
pub mod subscription_filter;
pub mod validate;

pub use progress::{Action, CallbackContext, HandlerRequest, OperationStatus, ProgressEvent};
pub use validate::ModelValidationError;

use serde_json::{Map, Value};

/// JSON pointer of the log group property in the primary identifier.
pub const LOG_GROUP_NAME_PROPERTY: &str = "/properties/LogGroupName";
/// JSON pointer of the filter name property in the primary identifier.
pub const FILTER_NAME_PROPERTY: &str = "/properties/FilterName";

/// Primary identifier object shared by both filter types.
pub(crate) fn primary_identifier(log_group_name: &str, filter_name: &str) -> Value {
    let mut id = Map::new();
    id.insert(
        LOG_GROUP_NAME_PROPERTY.to_string(),
        Value::String(log_group_name.to_string()),
    );
    id.insert(
        FILTER_NAME_PROPERTY.to_string(),
        Value::String(filter_name.to_string()),
    );
    Value::Object(id)
}
