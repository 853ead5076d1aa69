// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]

//! Declared-model validation run before any write reaches the service.

use std::collections::BTreeSet;
use std::fmt;

use crate::{metric_filter, subscription_filter};

/// One problem found in a declared model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required field is missing or empty.
    MissingField {
        /// Schema name of the field.
        field: &'static str,
    },
    /// A metric filter declared no transformations.
    NoTransformations,
    /// A required field of one transformation is empty.
    EmptyTransformationField {
        /// Position of the transformation.
        index: usize,
        /// Schema name of the field.
        field: &'static str,
    },
    /// Two dimensions of one transformation share a key.
    DuplicateDimensionKey {
        /// Position of the transformation.
        index: usize,
        /// The repeated key.
        key: String,
    },
    /// The distribution is not one the service accepts.
    UnknownDistribution {
        /// The declared value.
        value: String,
    },
}

impl fmt::Display for ModelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::NoTransformations => {
                write!(f, "MetricTransformations must contain at least one entry")
            }
            Self::EmptyTransformationField { index, field } => {
                write!(f, "MetricTransformations[{index}].{field} must not be empty")
            }
            Self::DuplicateDimensionKey { index, key } => {
                write!(f, "MetricTransformations[{index}] has duplicate dimension key '{key}'")
            }
            Self::UnknownDistribution { value } => write!(
                f,
                "Distribution '{value}' is not one of {}",
                subscription_filter::DISTRIBUTIONS.join(", ")
            ),
        }
    }
}

impl std::error::Error for ModelValidationError {}

/// Validate a declared metric filter.
///
/// Every problem is collected; `Err` holds at least one entry.
///
/// ```
/// use lfh_core::metric_filter::{MetricTransformation, ResourceModel};
/// use lfh_core::validate::{validate_metric_filter, ModelValidationError};
///
/// let model = ResourceModel::new("lg", "f")
///     .with_transformation(
///         MetricTransformation::new("m", "ns", "1")
///             .with_dimension("Env", "prod")
///             .with_dimension("Env", "dev"),
///     );
/// let errs = validate_metric_filter(&model).unwrap_err();
/// assert!(matches!(errs[0], ModelValidationError::DuplicateDimensionKey { .. }));
/// ```
pub fn validate_metric_filter(
    model: &metric_filter::ResourceModel,
) -> Result<(), Vec<ModelValidationError>> {
    let mut errors = identity_errors(&model.log_group_name, &model.filter_name);

    if model.metric_transformations.is_empty() {
        errors.push(ModelValidationError::NoTransformations);
    }

    for (index, t) in model.metric_transformations.iter().enumerate() {
        for (field, value) in [
            ("MetricName", &t.metric_name),
            ("MetricNamespace", &t.metric_namespace),
            ("MetricValue", &t.metric_value),
        ] {
            if value.is_empty() {
                errors.push(ModelValidationError::EmptyTransformationField { index, field });
            }
        }

        let mut seen = BTreeSet::new();
        for dim in t.dimensions.iter().flatten() {
            if !seen.insert(dim.key.as_str()) {
                errors.push(ModelValidationError::DuplicateDimensionKey {
                    index,
                    key: dim.key.clone(),
                });
            }
        }
    }

    into_result(errors)
}

/// Validate a declared subscription filter.
pub fn validate_subscription_filter(
    model: &subscription_filter::ResourceModel,
) -> Result<(), Vec<ModelValidationError>> {
    let mut errors = identity_errors(&model.log_group_name, &model.filter_name);

    if model.destination_arn.as_deref().is_none_or(str::is_empty) {
        errors.push(ModelValidationError::MissingField {
            field: "DestinationArn",
        });
    }

    if let Some(ref value) = model.distribution {
        if !subscription_filter::DISTRIBUTIONS.contains(&value.as_str()) {
            errors.push(ModelValidationError::UnknownDistribution {
                value: value.clone(),
            });
        }
    }

    into_result(errors)
}

fn identity_errors(log_group_name: &str, filter_name: &str) -> Vec<ModelValidationError> {
    let mut errors = Vec::new();
    if log_group_name.is_empty() {
        errors.push(ModelValidationError::MissingField {
            field: "LogGroupName",
        });
    }
    if filter_name.is_empty() {
        errors.push(ModelValidationError::MissingField {
            field: "FilterName",
        });
    }
    errors
}

fn into_result(errors: Vec<ModelValidationError>) -> Result<(), Vec<ModelValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
