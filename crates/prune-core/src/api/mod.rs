//! The seam between the pruning logic and the Lambda management API.

pub mod errors;
pub mod traits;
pub mod types;

pub use errors::{ApiError, ApiErrorKind};
pub use traits::LambdaApi;
pub use types::{
    AliasRouting, AliasSummary, FunctionSummary, LATEST_VERSION, Page, PageRequest, VersionSummary,
};
