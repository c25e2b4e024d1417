//! Find and delete AWS Lambda versions that no alias references.
//!
//! [`Pruner`] wraps a [`LambdaApi`] backend with paging and retry and exposes
//! the four building blocks (list functions, list versions, list aliased
//! versions, delete one version). The [`cleanup`] module strings them together
//! into a full pass.

pub mod api;
pub mod aws;
pub mod cleanup;
pub mod errors;
pub mod events;
pub mod logging;
pub mod retry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod versions;

// Re-export commonly used types
pub use api::{
    AliasRouting, AliasSummary, ApiError, ApiErrorKind, FunctionSummary, LATEST_VERSION,
    LambdaApi, Page, PageRequest, VersionSummary,
};
pub use aws::AwsLambdaClient;
pub use cleanup::{
    CleanupError, FunctionFailure, FunctionReport, PruneSummary, plan_function, prune_all,
    prune_function,
};
pub use errors::PruneError;
pub use logging::init_logging;
pub use prune_config::PruneConfig;
pub use retry::RetryPolicy;
pub use versions::{DeletionOutcome, Pruner};
