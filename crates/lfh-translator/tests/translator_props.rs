// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for filter translation.

use std::collections::BTreeMap;

use lfh_core::metric_filter::{Dimension, MetricTransformation, ResourceModel as MetricModel};
use lfh_core::subscription_filter::ResourceModel as SubscriptionModel;
use lfh_sdk_types as sdk;
use lfh_translator::{metric_filter, subscription_filter};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./-]{1,24}"
}

fn arb_pattern() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[ -~]{1,40}"]
}

fn arb_unit() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Count".to_string())),
        Just(Some("Seconds".to_string())),
        Just(Some("Bytes/Second".to_string())),
    ]
}

/// Unique-key dimensions, as a validated model would carry them.
fn arb_dimensions() -> impl Strategy<Value = Option<std::collections::BTreeSet<Dimension>>> {
    prop_oneof![
        Just(None),
        btree_map(arb_name(), arb_name(), 1..4).prop_map(|m| {
            Some(m.into_iter().map(|(k, v)| Dimension::new(k, v)).collect())
        }),
    ]
}

fn arb_transformation() -> impl Strategy<Value = MetricTransformation> {
    (
        arb_name(),
        arb_name(),
        arb_name(),
        proptest::option::of(-1.0e6f64..1.0e6),
        arb_unit(),
        arb_dimensions(),
    )
        .prop_map(
            |(metric_name, metric_namespace, metric_value, default_value, unit, dimensions)| {
                MetricTransformation {
                    metric_name,
                    metric_namespace,
                    metric_value,
                    default_value,
                    unit,
                    dimensions,
                }
            },
        )
}

fn arb_metric_model() -> impl Strategy<Value = MetricModel> {
    (arb_name(), arb_name(), arb_pattern(), vec(arb_transformation(), 1..4)).prop_map(
        |(log_group_name, filter_name, pattern, metric_transformations)| MetricModel {
            log_group_name,
            filter_name,
            filter_pattern: Some(pattern),
            metric_transformations,
        },
    )
}

fn arb_subscription_model() -> impl Strategy<Value = SubscriptionModel> {
    (
        arb_name(),
        arb_name(),
        arb_pattern(),
        arb_name(),
        proptest::option::of(arb_name()),
        proptest::option::of(prop_oneof![Just("Random"), Just("ByLogStream")]),
    )
        .prop_map(
            |(lg, name, pattern, dest, role, dist)| SubscriptionModel {
                log_group_name: lg,
                filter_name: name,
                filter_pattern: Some(pattern),
                destination_arn: Some(dest),
                role_arn: role,
                distribution: dist.map(str::to_string),
            },
        )
}

// ── Service stand-ins ───────────────────────────────────────────────

/// What the service stores for a put: empty patterns come back absent.
fn stored_metric_filter(req: sdk::PutMetricFilterRequest) -> sdk::MetricFilter {
    sdk::MetricFilter {
        filter_name: Some(req.filter_name),
        log_group_name: Some(req.log_group_name),
        filter_pattern: req.filter_pattern.filter(|p| !p.is_empty()),
        metric_transformations: req.metric_transformations,
        creation_time: Some(0),
    }
}

fn stored_subscription_filter(req: sdk::PutSubscriptionFilterRequest) -> sdk::SubscriptionFilter {
    sdk::SubscriptionFilter {
        filter_name: Some(req.filter_name),
        log_group_name: Some(req.log_group_name),
        filter_pattern: req.filter_pattern.filter(|p| !p.is_empty()),
        destination_arn: req.destination_arn,
        role_arn: req.role_arn,
        distribution: req.distribution,
        creation_time: Some(0),
    }
}

// ── Properties ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn metric_read_round_trip(model in arb_metric_model()) {
        let stored = stored_metric_filter(metric_filter::to_create_request(&model));
        let resp = sdk::DescribeMetricFiltersResponse {
            metric_filters: Some(vec![stored]),
            next_token: None,
        };
        prop_assert_eq!(metric_filter::from_read_response(&resp), Some(model));
    }

    #[test]
    fn subscription_read_round_trip(model in arb_subscription_model()) {
        let stored = stored_subscription_filter(subscription_filter::to_create_request(&model));
        let resp = sdk::DescribeSubscriptionFiltersResponse {
            subscription_filters: Some(vec![stored]),
            next_token: None,
        };
        prop_assert_eq!(subscription_filter::from_read_response(&resp), Some(model));
    }

    #[test]
    fn list_is_elementwise_read(models in vec(arb_metric_model(), 0..6)) {
        let filters: Vec<_> = models
            .iter()
            .map(|m| stored_metric_filter(metric_filter::to_create_request(m)))
            .collect();
        let listed = metric_filter::from_list_response(&sdk::DescribeMetricFiltersResponse {
            metric_filters: Some(filters.clone()),
            next_token: None,
        });
        let one_by_one: Vec<_> = filters
            .into_iter()
            .filter_map(|f| {
                metric_filter::from_read_response(&sdk::DescribeMetricFiltersResponse {
                    metric_filters: Some(vec![f]),
                    next_token: None,
                })
            })
            .collect();
        prop_assert_eq!(&listed, &one_by_one);
        prop_assert_eq!(listed, models);
    }

    #[test]
    fn dimension_mapping_settles_after_one_trip(
        raw in btree_map(arb_name(), arb_name(), 0..6)
    ) {
        let dims: std::collections::BTreeSet<Dimension> =
            raw.iter().map(|(k, v)| Dimension::new(k.clone(), v.clone())).collect();
        let once = metric_filter::dimensions_to_sdk(Some(&dims));
        let back = metric_filter::dimensions_from_sdk(once.as_ref());
        let twice = metric_filter::dimensions_to_sdk(back.as_ref());
        prop_assert_eq!(&once, &twice);
        if raw.is_empty() {
            prop_assert!(once.is_none());
        } else {
            prop_assert_eq!(once, Some(raw));
        }
    }

    #[test]
    fn absent_pattern_always_reads_as_empty(name in arb_name(), lg in arb_name()) {
        let resp = sdk::DescribeSubscriptionFiltersResponse {
            subscription_filters: Some(vec![sdk::SubscriptionFilter {
                filter_name: Some(name),
                log_group_name: Some(lg),
                ..Default::default()
            }]),
            next_token: None,
        };
        let model = subscription_filter::from_read_response(&resp).unwrap();
        prop_assert_eq!(model.filter_pattern.as_deref(), Some(""));
    }
}

#[test]
fn dimension_map_order_does_not_matter() {
    let a: BTreeMap<String, String> = [("b", "2"), ("a", "1")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let b: BTreeMap<String, String> = [("a", "1"), ("b", "2")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(
        metric_filter::dimensions_from_sdk(Some(&a)),
        metric_filter::dimensions_from_sdk(Some(&b))
    );
}
