pub mod errors;
pub mod handler;
pub mod types;

// Public API exports
pub use errors::CleanupError;
pub use handler::{plan_function, prune_all, prune_function};
pub use types::{FunctionFailure, FunctionReport, PruneSummary};
