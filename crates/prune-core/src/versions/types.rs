use serde::Serialize;

/// What `Pruner::delete_version` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionOutcome {
    Deleted,
    /// Dry run: logged, no API call made.
    WouldDelete,
}

