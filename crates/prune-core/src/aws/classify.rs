//! Map SDK failures onto `ApiError` with a retryable verdict.

use aws_sdk_lambda::config::http::HttpResponse;
use aws_sdk_lambda::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::api::{ApiError, ApiErrorKind};

pub(crate) fn classify<E>(operation: &'static str, err: SdkError<E, HttpResponse>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let message = DisplayErrorContext(&err).to_string();

    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            ApiError::new(operation, ApiErrorKind::Transport, message)
        }
        SdkError::ServiceError(service) => {
            let code = err.code().map(str::to_string);
            let kind = kind_for(code.as_deref(), service.raw().status().as_u16());
            let api_error = ApiError::new(operation, kind, message);
            match code {
                Some(code) => api_error.with_code(code),
                None => api_error,
            }
        }
        // Request could not be built; sending it again will not help.
        _ => ApiError::new(operation, ApiErrorKind::InvalidRequest, message),
    }
}

/// Error kind for a service error code, falling back to the HTTP status.
pub(crate) fn kind_for(code: Option<&str>, status: u16) -> ApiErrorKind {
    match code {
        Some("TooManyRequestsException" | "ThrottlingException" | "EC2ThrottledException") => {
            ApiErrorKind::Throttled
        }
        Some("ServiceException" | "ResourceConflictException") => ApiErrorKind::Service,
        Some("ResourceNotFoundException") => ApiErrorKind::NotFound,
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "ExpiredTokenException"
            | "InvalidSignatureException",
        ) => ApiErrorKind::AccessDenied,
        _ if status == 429 => ApiErrorKind::Throttled,
        _ if status >= 500 => ApiErrorKind::Service,
        _ if status == 403 => ApiErrorKind::AccessDenied,
        _ if status == 404 => ApiErrorKind::NotFound,
        _ => ApiErrorKind::InvalidRequest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttling_codes_are_retryable() {
        for code in ["TooManyRequestsException", "ThrottlingException"] {
            let kind = kind_for(Some(code), 400);
            assert_eq!(kind, ApiErrorKind::Throttled);
            assert!(kind.default_retryable());
        }
    }

    #[test]
    fn test_not_found_is_fatal() {
        let kind = kind_for(Some("ResourceNotFoundException"), 404);
        assert_eq!(kind, ApiErrorKind::NotFound);
        assert!(!kind.default_retryable());
    }

    #[test]
    fn test_invalid_parameter_is_fatal() {
        let kind = kind_for(Some("InvalidParameterValueException"), 400);
        assert_eq!(kind, ApiErrorKind::InvalidRequest);
        assert!(!kind.default_retryable());
    }

    #[test]
    fn test_unknown_server_error_is_retryable() {
        assert_eq!(kind_for(None, 503), ApiErrorKind::Service);
        assert_eq!(kind_for(Some("SomethingNew"), 500), ApiErrorKind::Service);
    }

    #[test]
    fn test_status_fallbacks() {
        assert_eq!(kind_for(None, 429), ApiErrorKind::Throttled);
        assert_eq!(kind_for(None, 403), ApiErrorKind::AccessDenied);
        assert_eq!(kind_for(None, 404), ApiErrorKind::NotFound);
        assert_eq!(kind_for(None, 400), ApiErrorKind::InvalidRequest);
    }
}
