//! Errors reported by a `LambdaApi` backend.

use crate::errors::PruneError;

/// Broad failure category, used for error codes and default retry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Throttled,
    Transport,
    Service,
    NotFound,
    AccessDenied,
    InvalidRequest,
}

impl ApiErrorKind {
    /// Whether failures of this kind are usually transient.
    pub fn default_retryable(self) -> bool {
        matches!(
            self,
            ApiErrorKind::Throttled | ApiErrorKind::Transport | ApiErrorKind::Service
        )
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ApiErrorKind::Throttled => "throttled",
            ApiErrorKind::Transport => "transport",
            ApiErrorKind::Service => "service",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::AccessDenied => "access denied",
            ApiErrorKind::InvalidRequest => "invalid request",
        };
        f.write_str(label)
    }
}

/// A failed backend call.
///
/// `retryable` is the backend's verdict and is the only thing the retry
/// wrapper looks at.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{operation} failed ({kind}): {message}")]
pub struct ApiError {
    pub operation: &'static str,
    pub kind: ApiErrorKind,
    pub code: Option<String>,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    pub fn new(operation: &'static str, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            code: None,
            message: message.into(),
            retryable: kind.default_retryable(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl PruneError for ApiError {
    fn error_code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::Throttled => "API_THROTTLED",
            ApiErrorKind::Transport => "API_TRANSPORT",
            ApiErrorKind::Service => "API_SERVICE",
            ApiErrorKind::NotFound => "API_NOT_FOUND",
            ApiErrorKind::AccessDenied => "API_ACCESS_DENIED",
            ApiErrorKind::InvalidRequest => "API_INVALID_REQUEST",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::AccessDenied | ApiErrorKind::InvalidRequest
        )
    }
}
