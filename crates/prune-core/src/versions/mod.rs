pub mod handler;
pub mod operations;
pub mod types;

// Public API exports
pub use handler::Pruner;
pub use operations::deletion_set;
pub use types::DeletionOutcome;
