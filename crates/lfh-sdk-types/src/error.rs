// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised by the remote log-filter API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of error kinds the remote API reports by name.
///
/// Anything the service returns that is not one of the named kinds is kept
/// verbatim in [`ServiceErrorKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceErrorKind {
    /// A request parameter was rejected.
    InvalidParameter,
    /// An account or log-group quota was hit.
    LimitExceeded,
    /// Another operation on the same resource was in flight.
    OperationAborted,
    /// The log group or filter does not exist.
    ResourceNotFound,
    /// The service is temporarily unable to serve the request.
    ServiceUnavailable,
    /// The resource already exists.
    ResourceAlreadyExists,
    /// Any other error code, e.g. throttling or access denied.
    Other(String),
}

impl ServiceErrorKind {
    /// Parse a wire error code such as `"InvalidParameterException"`.
    ///
    /// The `Exception` suffix is optional.
    pub fn from_code(code: &str) -> Self {
        match code.strip_suffix("Exception").unwrap_or(code) {
            "InvalidParameter" => Self::InvalidParameter,
            "LimitExceeded" => Self::LimitExceeded,
            "OperationAborted" => Self::OperationAborted,
            "ResourceNotFound" => Self::ResourceNotFound,
            "ServiceUnavailable" => Self::ServiceUnavailable,
            "ResourceAlreadyExists" => Self::ResourceAlreadyExists,
            _ => Self::Other(code.to_string()),
        }
    }

    /// Wire error code for this kind.
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidParameter => "InvalidParameterException",
            Self::LimitExceeded => "LimitExceededException",
            Self::OperationAborted => "OperationAbortedException",
            Self::ResourceNotFound => "ResourceNotFoundException",
            Self::ServiceUnavailable => "ServiceUnavailableException",
            Self::ResourceAlreadyExists => "ResourceAlreadyExistsException",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A failed call to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    /// Which named error the service reported.
    pub kind: ServiceErrorKind,
    /// Service-provided message.
    pub message: String,
    /// Request id echoed by the service, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ServiceError {
    /// Create an error of the given kind.
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            request_id: None,
        }
    }

    /// Build an error from a raw wire code and message.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::from_code(code), message)
    }

    /// Attach the service request id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMED: &[ServiceErrorKind] = &[
        ServiceErrorKind::InvalidParameter,
        ServiceErrorKind::LimitExceeded,
        ServiceErrorKind::OperationAborted,
        ServiceErrorKind::ResourceNotFound,
        ServiceErrorKind::ServiceUnavailable,
        ServiceErrorKind::ResourceAlreadyExists,
    ];

    #[test]
    fn named_codes_parse_back() {
        for kind in NAMED {
            assert_eq!(&ServiceErrorKind::from_code(kind.code()), kind);
        }
    }

    #[test]
    fn suffix_is_optional() {
        assert_eq!(
            ServiceErrorKind::from_code("LimitExceeded"),
            ServiceErrorKind::LimitExceeded
        );
    }

    #[test]
    fn unknown_code_is_kept() {
        let kind = ServiceErrorKind::from_code("ThrottlingException");
        assert_eq!(kind, ServiceErrorKind::Other("ThrottlingException".into()));
        assert_eq!(kind.code(), "ThrottlingException");
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = ServiceError::new(ServiceErrorKind::ResourceNotFound, "log group missing");
        assert_eq!(
            err.to_string(),
            "ResourceNotFoundException: log group missing"
        );
    }

    #[test]
    fn request_id_skipped_when_unset() {
        let err = ServiceError::from_code("OperationAbortedException", "busy");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("requestId").is_none());
        let json = serde_json::to_value(err.with_request_id("r-1")).unwrap();
        assert_eq!(json["requestId"], "r-1");
    }
}
