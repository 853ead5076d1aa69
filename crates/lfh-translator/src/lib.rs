// SPDX-License-Identifier: MIT OR Apache-2.0
//! Translation between declared filter models and remote API shapes.
//!
//! Every function here is pure. Two rules hold across both resource types:
//!
//! * A `filterPattern` the service reports as absent is translated to
//!   `Some("")`, because the service drops empty patterns on write and an
//!   empty pattern is a meaningful declaration.
//! * Read and List share one element translation, so a filter looks the same
//!   whichever operation returned it.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod metric_filter;
pub mod subscription_filter;

/// Page size used when reading a single filter by name.
pub const READ_LIMIT: i32 = 1;

/// Page size used when listing filters.
pub const LIST_LIMIT: i32 = 50;

/// Service-absent pattern → declared empty pattern.
pub(crate) fn normalize_filter_pattern(pattern: Option<String>) -> Option<String> {
    Some(pattern.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_pattern_becomes_empty() {
        assert_eq!(normalize_filter_pattern(None), Some(String::new()));
    }

    #[test]
    fn present_pattern_passes_through() {
        assert_eq!(
            normalize_filter_pattern(Some("{ $.level = \"ERROR\" }".into())),
            Some("{ $.level = \"ERROR\" }".into())
        );
        assert_eq!(
            normalize_filter_pattern(Some(String::new())),
            Some(String::new())
        );
    }
}
