// SPDX-License-Identifier: MIT OR Apache-2.0
//! Stable error taxonomy for log filter handlers.
//!
//! Every handler failure carries a [`HandlerErrorCode`] (one of a fixed set
//! the orchestration engine understands), a human-readable message, an
//! optional cause, and key-value context. Remote API failures are mapped onto
//! the taxonomy by [`classify`]; use [`HandlerError::from_service_error`] at
//! the call site so no remote error escapes unclassified.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod classify;

pub use classify::classify;

use lfh_sdk_types::ServiceError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// HandlerErrorCode
// ---------------------------------------------------------------------------

/// Machine-readable failure kind reported back to the orchestration engine.
///
/// Each variant serialises to its `PascalCase` name, which is also what
/// [`HandlerErrorCode::as_str`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum HandlerErrorCode {
    /// The request was malformed or rejected as invalid.
    InvalidRequest,
    /// A service quota was exceeded.
    ServiceLimitExceeded,
    /// A concurrent operation conflicted with this one.
    ResourceConflict,
    /// The resource does not exist.
    NotFound,
    /// The remote service failed internally or was unavailable.
    ServiceInternalError,
    /// The resource already exists.
    AlreadyExists,
    /// Any other remote failure.
    GeneralServiceError,
}

impl HandlerErrorCode {
    /// Stable `&'static str` representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "InvalidRequest",
            Self::ServiceLimitExceeded => "ServiceLimitExceeded",
            Self::ResourceConflict => "ResourceConflict",
            Self::NotFound => "NotFound",
            Self::ServiceInternalError => "ServiceInternalError",
            Self::AlreadyExists => "AlreadyExists",
            Self::GeneralServiceError => "GeneralServiceError",
        }
    }
}

impl fmt::Display for HandlerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HandlerError
// ---------------------------------------------------------------------------

/// A classified handler failure.
///
/// # Builder usage
///
/// ```
/// use lfh_error::{HandlerError, HandlerErrorCode};
///
/// let err = HandlerError::new(HandlerErrorCode::NotFound, "no such filter")
///     .with_context("log_group", "app-logs")
///     .with_context("filter", "errors");
/// assert_eq!(err.code, HandlerErrorCode::NotFound);
/// ```
pub struct HandlerError {
    /// Classified failure kind.
    pub code: HandlerErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Optional underlying cause.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Structured diagnostics.
    pub context: BTreeMap<String, serde_json::Value>,
}

impl HandlerError {
    /// Create a new error with the given code and message.
    pub fn new(code: HandlerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
            context: BTreeMap::new(),
        }
    }

    /// Classify a remote failure for a resource of type `type_name`.
    ///
    /// The remote error is kept as the source. Invalid-request messages are
    /// prefixed with the type name so the caller can tell which resource the
    /// service rejected.
    pub fn from_service_error(type_name: &str, err: ServiceError) -> Self {
        let code = classify(&err.kind);
        let message = match code {
            HandlerErrorCode::InvalidRequest => format!("{type_name}. {}", err.message),
            _ => err.message.clone(),
        };
        let mut out = Self::new(code, message).with_context("remote_error", err.kind.code());
        if let Some(ref request_id) = err.request_id {
            out = out.with_context("request_id", request_id);
        }
        out.with_source(err)
    }

    /// A `NotFound` error for a resource identified by `identifier`.
    pub fn not_found(type_name: &str, identifier: impl fmt::Display) -> Self {
        Self::new(
            HandlerErrorCode::NotFound,
            format!("Resource of type '{type_name}' with identifier '{identifier}' was not found."),
        )
    }

    /// An `InvalidRequest` error for a resource of type `type_name`.
    pub fn invalid_request(type_name: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            HandlerErrorCode::InvalidRequest,
            format!("Invalid request provided: {type_name}. {reason}"),
        )
    }

    /// Attach a key-value pair to the diagnostic context.
    ///
    /// Values that fail to serialise are skipped.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Debug for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("HandlerError");
        d.field("code", &self.code);
        d.field("message", &self.message);
        if let Some(ref src) = self.source {
            d.field("source", &src.to_string());
        }
        if !self.context.is_empty() {
            d.field("context", &self.context);
        }
        d.finish()
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)?;
        if !self.context.is_empty() {
            if let Ok(ctx) = serde_json::to_string(&self.context) {
                write!(f, " {ctx}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// ---------------------------------------------------------------------------
// Serialization support
// ---------------------------------------------------------------------------

/// Serialisable snapshot of a [`HandlerError`] (without the opaque source).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandlerErrorDto {
    /// Error code.
    pub code: HandlerErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Structured context.
    pub context: BTreeMap<String, serde_json::Value>,
    /// String form of the source error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_message: Option<String>,
}

impl From<&HandlerError> for HandlerErrorDto {
    fn from(err: &HandlerError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            context: err.context.clone(),
            source_message: err.source.as_ref().map(|s| s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lfh_sdk_types::ServiceErrorKind;
    use std::collections::HashSet;

    const ALL_CODES: &[HandlerErrorCode] = &[
        HandlerErrorCode::InvalidRequest,
        HandlerErrorCode::ServiceLimitExceeded,
        HandlerErrorCode::ResourceConflict,
        HandlerErrorCode::NotFound,
        HandlerErrorCode::ServiceInternalError,
        HandlerErrorCode::AlreadyExists,
        HandlerErrorCode::GeneralServiceError,
    ];

    #[test]
    fn display_without_context() {
        let err = HandlerError::new(HandlerErrorCode::NotFound, "gone");
        assert_eq!(err.to_string(), "[NotFound] gone");
    }

    #[test]
    fn display_with_context() {
        let err = HandlerError::new(HandlerErrorCode::ResourceConflict, "busy")
            .with_context("filter", "f");
        let s = err.to_string();
        assert!(s.starts_with("[ResourceConflict] busy"));
        assert!(s.contains("\"filter\":\"f\""));
    }

    #[test]
    fn invalid_parameter_message_is_prefixed() {
        let remote = ServiceError::new(ServiceErrorKind::InvalidParameter, "bad pattern");
        let err = HandlerError::from_service_error("AWS::Logs::MetricFilter", remote);
        assert_eq!(err.code, HandlerErrorCode::InvalidRequest);
        assert_eq!(err.message, "AWS::Logs::MetricFilter. bad pattern");
    }

    #[test]
    fn other_messages_pass_through() {
        let remote = ServiceError::new(ServiceErrorKind::LimitExceeded, "too many filters");
        let err = HandlerError::from_service_error("AWS::Logs::MetricFilter", remote);
        assert_eq!(err.code, HandlerErrorCode::ServiceLimitExceeded);
        assert_eq!(err.message, "too many filters");
    }

    #[test]
    fn remote_error_kept_as_source() {
        let remote = ServiceError::new(ServiceErrorKind::ServiceUnavailable, "try later")
            .with_request_id("req-9");
        let err = HandlerError::from_service_error("AWS::Logs::SubscriptionFilter", remote);
        let src = std::error::Error::source(&err).unwrap();
        assert_eq!(src.to_string(), "ServiceUnavailableException: try later");
        assert_eq!(
            err.context["remote_error"],
            serde_json::json!("ServiceUnavailableException")
        );
        assert_eq!(err.context["request_id"], serde_json::json!("req-9"));
    }

    #[test]
    fn not_found_message_names_identifier() {
        let err = HandlerError::not_found("AWS::Logs::MetricFilter", "lg|f");
        assert_eq!(err.code, HandlerErrorCode::NotFound);
        assert_eq!(
            err.message,
            "Resource of type 'AWS::Logs::MetricFilter' with identifier 'lg|f' was not found."
        );
    }

    #[test]
    fn debug_shows_source() {
        let remote = ServiceError::new(ServiceErrorKind::Other("Throttling".into()), "slow down");
        let err = HandlerError::from_service_error("T", remote);
        let dbg = format!("{err:?}");
        assert!(dbg.contains("GeneralServiceError"));
        assert!(dbg.contains("slow down"));
    }

    #[test]
    fn dto_keeps_source_message() {
        let remote = ServiceError::new(ServiceErrorKind::ResourceNotFound, "no log group");
        let err = HandlerError::from_service_error("T", remote);
        let dto = HandlerErrorDto::from(&err);
        assert_eq!(dto.code, HandlerErrorCode::NotFound);
        assert_eq!(
            dto.source_message.as_deref(),
            Some("ResourceNotFoundException: no log group")
        );
        let back: HandlerErrorDto =
            serde_json::from_str(&serde_json::to_string(&dto).unwrap()).unwrap();
        assert_eq!(back, dto);
    }

    #[test]
    fn codes_serialise_to_as_str() {
        let mut seen = HashSet::new();
        for code in ALL_CODES {
            let json = serde_json::to_string(code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
            assert!(seen.insert(code.as_str()));
        }
        assert_eq!(seen.len(), 7);
    }
}
