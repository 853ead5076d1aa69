// SPDX-License-Identifier: MIT OR Apache-2.0
//! `AWS::Logs::MetricFilter` ↔ metric filter API.

use std::collections::{BTreeMap, BTreeSet};

use lfh_core::metric_filter::{Dimension, MetricTransformation, ResourceModel};
use lfh_sdk_types as sdk;

use crate::{LIST_LIMIT, READ_LIMIT, normalize_filter_pattern};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Build the put request for a create.
pub fn to_create_request(model: &ResourceModel) -> sdk::PutMetricFilterRequest {
    sdk::PutMetricFilterRequest {
        log_group_name: model.log_group_name.clone(),
        filter_name: model.filter_name.clone(),
        filter_pattern: model.filter_pattern.clone(),
        metric_transformations: model
            .metric_transformations
            .iter()
            .map(transformation_to_sdk)
            .collect(),
    }
}

/// Build the put request for an update; put is a full replace.
pub fn to_update_request(model: &ResourceModel) -> sdk::PutMetricFilterRequest {
    to_create_request(model)
}

/// Describe the filters of the model's log group whose name starts with the
/// model's filter name, one at a time.
pub fn to_read_request(model: &ResourceModel) -> sdk::DescribeMetricFiltersRequest {
    sdk::DescribeMetricFiltersRequest {
        log_group_name: Some(model.log_group_name.clone()),
        filter_name_prefix: Some(model.filter_name.clone()),
        next_token: None,
        limit: Some(READ_LIMIT),
    }
}

/// Build the delete request from the identity alone.
pub fn to_delete_request(model: &ResourceModel) -> sdk::DeleteMetricFilterRequest {
    sdk::DeleteMetricFilterRequest {
        log_group_name: model.log_group_name.clone(),
        filter_name: model.filter_name.clone(),
    }
}

/// Describe one page of metric filters starting at `next_token`.
pub fn to_list_request(next_token: Option<&str>) -> sdk::DescribeMetricFiltersRequest {
    to_list_request_with_limit(next_token, LIST_LIMIT)
}

/// [`to_list_request`] with an explicit page size.
pub fn to_list_request_with_limit(
    next_token: Option<&str>,
    limit: i32,
) -> sdk::DescribeMetricFiltersRequest {
    sdk::DescribeMetricFiltersRequest {
        log_group_name: None,
        filter_name_prefix: None,
        next_token: next_token.map(str::to_string),
        limit: Some(limit),
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// First filter of a describe response, or `None` when the page is empty.
///
/// Callers check existence before relying on the result.
pub fn from_read_response(response: &sdk::DescribeMetricFiltersResponse) -> Option<ResourceModel> {
    response
        .metric_filters
        .as_deref()
        .and_then(<[_]>::first)
        .map(model_from_sdk)
}

/// Every filter of a describe response; an absent collection yields nothing.
pub fn from_list_response(response: &sdk::DescribeMetricFiltersResponse) -> Vec<ResourceModel> {
    response
        .metric_filters
        .iter()
        .flatten()
        .map(model_from_sdk)
        .collect()
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// Translate one service filter into the declared model.
pub fn model_from_sdk(filter: &sdk::MetricFilter) -> ResourceModel {
    ResourceModel {
        log_group_name: filter.log_group_name.clone().unwrap_or_default(),
        filter_name: filter.filter_name.clone().unwrap_or_default(),
        filter_pattern: normalize_filter_pattern(filter.filter_pattern.clone()),
        metric_transformations: filter
            .metric_transformations
            .iter()
            .map(transformation_from_sdk)
            .collect(),
    }
}

/// Declared transformation → service transformation.
pub fn transformation_to_sdk(t: &MetricTransformation) -> sdk::MetricTransformation {
    sdk::MetricTransformation {
        metric_name: t.metric_name.clone(),
        metric_namespace: t.metric_namespace.clone(),
        metric_value: t.metric_value.clone(),
        default_value: t.default_value,
        dimensions: dimensions_to_sdk(t.dimensions.as_ref()),
        unit: t.unit.clone(),
    }
}

/// Service transformation → declared transformation.
pub fn transformation_from_sdk(t: &sdk::MetricTransformation) -> MetricTransformation {
    MetricTransformation {
        metric_name: t.metric_name.clone(),
        metric_namespace: t.metric_namespace.clone(),
        metric_value: t.metric_value.clone(),
        default_value: t.default_value,
        unit: t.unit.clone(),
        dimensions: dimensions_from_sdk(t.dimensions.as_ref()),
    }
}

/// Dimension set → service dimension map.
///
/// Absent and empty sets both yield `None` so the field is left off the
/// wire. Declared models are validated for unique keys before any write; if
/// a key still repeats, the entry that sorts last wins.
pub fn dimensions_to_sdk(dims: Option<&BTreeSet<Dimension>>) -> Option<BTreeMap<String, String>> {
    let dims = dims.filter(|d| !d.is_empty())?;
    Some(
        dims.iter()
            .map(|d| (d.key.clone(), d.value.clone()))
            .collect(),
    )
}

/// Service dimension map → dimension set; empty maps yield `None`.
pub fn dimensions_from_sdk(
    dims: Option<&BTreeMap<String, String>>,
) -> Option<BTreeSet<Dimension>> {
    let dims = dims.filter(|d| !d.is_empty())?;
    Some(
        dims.iter()
            .map(|(key, value)| Dimension::new(key.clone(), value.clone()))
            .collect(),
    )
}
