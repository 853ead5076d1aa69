// SPDX-License-Identifier: MIT OR Apache-2.0
//! `AWS::Logs::SubscriptionFilter` ↔ subscription filter API.

use lfh_core::subscription_filter::ResourceModel;
use lfh_sdk_types as sdk;

use crate::{LIST_LIMIT, READ_LIMIT, normalize_filter_pattern};

/// Build the put request for a create.
pub fn to_create_request(model: &ResourceModel) -> sdk::PutSubscriptionFilterRequest {
    sdk::PutSubscriptionFilterRequest {
        log_group_name: model.log_group_name.clone(),
        filter_name: model.filter_name.clone(),
        filter_pattern: model.filter_pattern.clone(),
        destination_arn: model.destination_arn.clone(),
        role_arn: model.role_arn.clone(),
        distribution: model.distribution.as_deref().map(sdk::Distribution::from),
    }
}

/// Build the put request for an update; put is a full replace.
pub fn to_update_request(model: &ResourceModel) -> sdk::PutSubscriptionFilterRequest {
    to_create_request(model)
}

/// Describe by name prefix within the model's log group, one at a time.
pub fn to_read_request(model: &ResourceModel) -> sdk::DescribeSubscriptionFiltersRequest {
    sdk::DescribeSubscriptionFiltersRequest {
        log_group_name: model.log_group_name.clone(),
        filter_name_prefix: Some(model.filter_name.clone()),
        next_token: None,
        limit: Some(READ_LIMIT),
    }
}

/// Build the delete request from the identity alone.
pub fn to_delete_request(model: &ResourceModel) -> sdk::DeleteSubscriptionFilterRequest {
    sdk::DeleteSubscriptionFilterRequest {
        log_group_name: model.log_group_name.clone(),
        filter_name: model.filter_name.clone(),
    }
}

/// Describe one page of the model's log group starting at `next_token`.
///
/// The service only lists subscription filters per log group, so the model
/// supplies the log group.
pub fn to_list_request(
    model: &ResourceModel,
    next_token: Option<&str>,
) -> sdk::DescribeSubscriptionFiltersRequest {
    to_list_request_with_limit(model, next_token, LIST_LIMIT)
}

/// [`to_list_request`] with an explicit page size.
pub fn to_list_request_with_limit(
    model: &ResourceModel,
    next_token: Option<&str>,
    limit: i32,
) -> sdk::DescribeSubscriptionFiltersRequest {
    sdk::DescribeSubscriptionFiltersRequest {
        log_group_name: model.log_group_name.clone(),
        filter_name_prefix: None,
        next_token: next_token.map(str::to_string),
        limit: Some(limit),
    }
}

/// First filter of a describe response, or `None` when the page is empty.
pub fn from_read_response(
    response: &sdk::DescribeSubscriptionFiltersResponse,
) -> Option<ResourceModel> {
    response
        .subscription_filters
        .as_deref()
        .and_then(<[_]>::first)
        .map(model_from_sdk)
}

/// Every filter of a describe response; an absent collection yields nothing.
pub fn from_list_response(response: &sdk::DescribeSubscriptionFiltersResponse) -> Vec<ResourceModel> {
    response
        .subscription_filters
        .iter()
        .flatten()
        .map(model_from_sdk)
        .collect()
}

/// Translate one service filter into the declared model.
pub fn model_from_sdk(filter: &sdk::SubscriptionFilter) -> ResourceModel {
    ResourceModel {
        log_group_name: filter.log_group_name.clone().unwrap_or_default(),
        filter_name: filter.filter_name.clone().unwrap_or_default(),
        filter_pattern: normalize_filter_pattern(filter.filter_pattern.clone()),
        destination_arn: filter.destination_arn.clone(),
        role_arn: filter.role_arn.clone(),
        distribution: filter.distribution.as_ref().map(|d| d.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> sdk::SubscriptionFilter {
        sdk::SubscriptionFilter {
            filter_name: Some("FilterName".into()),
            log_group_name: Some("LogGroup".into()),
            filter_pattern: Some("Pattern".into()),
            destination_arn: Some("DestinationArn".into()),
            role_arn: Some("RoleArn".into()),
            distribution: Some(sdk::Distribution::Random),
            creation_time: None,
        }
    }

    fn model() -> ResourceModel {
        ResourceModel::new("LogGroup", "FilterName")
            .with_filter_pattern("Pattern")
            .with_destination_arn("DestinationArn")
            .with_role_arn("RoleArn")
            .with_distribution("Random")
    }

    #[test]
    fn list_translates_every_filter() {
        let resp = sdk::DescribeSubscriptionFiltersResponse {
            subscription_filters: Some(vec![filter()]),
            next_token: None,
        };
        assert_eq!(from_list_response(&resp), vec![model()]);
    }

    #[test]
    fn null_pattern_lists_as_empty() {
        let resp = sdk::DescribeSubscriptionFiltersResponse {
            subscription_filters: Some(vec![sdk::SubscriptionFilter {
                filter_pattern: None,
                ..filter()
            }]),
            next_token: None,
        };
        assert_eq!(
            from_list_response(&resp),
            vec![ResourceModel {
                filter_pattern: Some(String::new()),
                ..model()
            }]
        );
    }

    #[test]
    fn no_filters_lists_nothing() {
        let resp = sdk::DescribeSubscriptionFiltersResponse {
            subscription_filters: Some(vec![]),
            next_token: None,
        };
        assert!(from_list_response(&resp).is_empty());
    }

    #[test]
    fn put_request_maps_every_field() {
        assert_eq!(
            to_create_request(&model()),
            sdk::PutSubscriptionFilterRequest {
                log_group_name: "LogGroup".into(),
                filter_name: "FilterName".into(),
                filter_pattern: Some("Pattern".into()),
                destination_arn: Some("DestinationArn".into()),
                role_arn: Some("RoleArn".into()),
                distribution: Some(sdk::Distribution::Random),
            }
        );
    }

    #[test]
    fn delete_request_uses_identity_only() {
        assert_eq!(
            to_delete_request(&model()),
            sdk::DeleteSubscriptionFilterRequest {
                log_group_name: "LogGroup".into(),
                filter_name: "FilterName".into(),
            }
        );
    }

    #[test]
    fn read_request_is_prefix_with_limit_one() {
        assert_eq!(
            to_read_request(&model()),
            sdk::DescribeSubscriptionFiltersRequest {
                log_group_name: "LogGroup".into(),
                filter_name_prefix: Some("FilterName".into()),
                next_token: None,
                limit: Some(1),
            }
        );
    }

    #[test]
    fn list_request_scoped_to_log_group() {
        assert_eq!(
            to_list_request(&model(), Some("token")),
            sdk::DescribeSubscriptionFiltersRequest {
                log_group_name: "LogGroup".into(),
                filter_name_prefix: None,
                next_token: Some("token".into()),
                limit: Some(50),
            }
        );
    }

    #[test]
    fn read_takes_first_filter() {
        let second = sdk::SubscriptionFilter {
            filter_name: Some("FilterName2".into()),
            ..filter()
        };
        let resp = sdk::DescribeSubscriptionFiltersResponse {
            subscription_filters: Some(vec![filter(), second]),
            next_token: Some("more".into()),
        };
        assert_eq!(from_read_response(&resp), Some(model()));
    }
}
