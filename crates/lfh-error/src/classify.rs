// SPDX-License-Identifier: MIT OR Apache-2.0
//! Remote error kind → [`HandlerErrorCode`].

use crate::HandlerErrorCode;
use lfh_sdk_types::ServiceErrorKind;

/// Map a remote error kind onto the handler taxonomy.
///
/// Total over [`ServiceErrorKind`]: every kind outside the six named ones
/// becomes [`HandlerErrorCode::GeneralServiceError`].
pub fn classify(kind: &ServiceErrorKind) -> HandlerErrorCode {
    match kind {
        ServiceErrorKind::InvalidParameter => HandlerErrorCode::InvalidRequest,
        ServiceErrorKind::LimitExceeded => HandlerErrorCode::ServiceLimitExceeded,
        ServiceErrorKind::OperationAborted => HandlerErrorCode::ResourceConflict,
        ServiceErrorKind::ResourceNotFound => HandlerErrorCode::NotFound,
        ServiceErrorKind::ServiceUnavailable => HandlerErrorCode::ServiceInternalError,
        ServiceErrorKind::ResourceAlreadyExists => HandlerErrorCode::AlreadyExists,
        ServiceErrorKind::Other(_) => HandlerErrorCode::GeneralServiceError,
    }
}
