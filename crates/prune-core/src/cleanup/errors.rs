use crate::api::ApiError;
use crate::errors::PruneError;

#[derive(Debug, thiserror::Error)]
pub enum CleanupError {
    #[error("Failed to list functions: {source}")]
    ListFunctionsFailed { source: ApiError },

    #[error("Failed to list versions of {function}: {source}")]
    ListVersionsFailed { function: String, source: ApiError },

    #[error("Failed to list aliases of {function}: {source}")]
    ListAliasesFailed { function: String, source: ApiError },

    #[error("Failed to delete {function}:{version}: {source}")]
    DeleteFailed {
        function: String,
        version: String,
        source: ApiError,
    },
}

impl CleanupError {
    /// The backend error underneath.
    pub fn api_error(&self) -> &ApiError {
        match self {
            CleanupError::ListFunctionsFailed { source }
            | CleanupError::ListVersionsFailed { source, .. }
            | CleanupError::ListAliasesFailed { source, .. }
            | CleanupError::DeleteFailed { source, .. } => source,
        }
    }
}

impl PruneError for CleanupError {
    fn error_code(&self) -> &'static str {
        match self {
            CleanupError::ListFunctionsFailed { .. } => "CLEANUP_LIST_FUNCTIONS_FAILED",
            CleanupError::ListVersionsFailed { .. } => "CLEANUP_LIST_VERSIONS_FAILED",
            CleanupError::ListAliasesFailed { .. } => "CLEANUP_LIST_ALIASES_FAILED",
            CleanupError::DeleteFailed { .. } => "CLEANUP_DELETE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        self.api_error().is_user_error()
    }
}
