//! Lambda management API trait definition.

use async_trait::async_trait;

use crate::api::errors::ApiError;
use crate::api::types::{AliasSummary, FunctionSummary, Page, PageRequest, VersionSummary};

/// Trait defining the operations the pruner needs from the Lambda API.
///
/// Implementations make exactly one remote call per method invocation; paging
/// and retry are layered on top by `Pruner`. Every error must carry the
/// backend's retryable classification.
#[async_trait]
pub trait LambdaApi: Send + Sync {
    /// Short backend name for logs (e.g., "aws", "mock").
    fn name(&self) -> &'static str;

    /// One page of `ListFunctions`.
    async fn list_functions(&self, request: &PageRequest)
    -> Result<Page<FunctionSummary>, ApiError>;

    /// One page of `ListVersionsByFunction`, `$LATEST` included as returned.
    async fn list_versions(
        &self,
        function: &str,
        request: &PageRequest,
    ) -> Result<Page<VersionSummary>, ApiError>;

    /// One page of `ListAliases`.
    async fn list_aliases(
        &self,
        function: &str,
        request: &PageRequest,
    ) -> Result<Page<AliasSummary>, ApiError>;

    /// Delete one published version.
    ///
    /// # Arguments
    /// * `function` - Function name or ARN
    /// * `version` - The version qualifier to delete
    async fn delete_version(&self, function: &str, version: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ApiErrorKind;

    struct EmptyBackend;

    #[async_trait]
    impl LambdaApi for EmptyBackend {
        fn name(&self) -> &'static str {
            "empty"
        }

        async fn list_functions(
            &self,
            _request: &PageRequest,
        ) -> Result<Page<FunctionSummary>, ApiError> {
            Ok(Page::last(Vec::new()))
        }

        async fn list_versions(
            &self,
            _function: &str,
            _request: &PageRequest,
        ) -> Result<Page<VersionSummary>, ApiError> {
            Ok(Page::last(vec![VersionSummary::new("$LATEST")]))
        }

        async fn list_aliases(
            &self,
            _function: &str,
            _request: &PageRequest,
        ) -> Result<Page<AliasSummary>, ApiError> {
            Ok(Page::last(Vec::new()))
        }

        async fn delete_version(&self, function: &str, _version: &str) -> Result<(), ApiError> {
            Err(ApiError::new(
                "DeleteFunction",
                ApiErrorKind::NotFound,
                format!("{} not found", function),
            ))
        }
    }

    #[tokio::test]
    async fn test_backend_usable_as_trait_object() {
        let backend: Box<dyn LambdaApi> = Box::new(EmptyBackend);
        assert_eq!(backend.name(), "empty");

        let request = PageRequest::new(None, 50);
        let page = backend.list_functions(&request).await.unwrap();
        assert!(page.items.is_empty());

        let err = backend.delete_version("f1", "1").await.unwrap_err();
        assert!(!err.is_retryable());
    }
}
