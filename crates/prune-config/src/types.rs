use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_TIMEOUT_MS, DEFAULT_MIN_TIMEOUT_MS, DEFAULT_PAGE_DELAY_MS,
    DEFAULT_PAGE_SIZE, DEFAULT_RETRIES,
};

/// Settings for one cleanup pass.
///
/// Passed explicitly into `prune_core::Pruner::new`; nothing reads process-wide
/// state after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Case-sensitive function name prefix. `None` or empty processes every function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    pub retry: RetryConfig,

    pub page_delay_ms: u64,

    pub page_size: u32,

    pub dry_run: bool,

    /// Record per-function failures and continue instead of aborting the run.
    pub keep_going: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub retries: u32,
    pub min_timeout_ms: u64,
    pub max_timeout_ms: u64,
    pub factor: f64,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            filter: None,
            retry: RetryConfig::default(),
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            page_size: DEFAULT_PAGE_SIZE,
            dry_run: true,
            keep_going: false,
            region: None,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            min_timeout_ms: DEFAULT_MIN_TIMEOUT_MS,
            max_timeout_ms: DEFAULT_MAX_TIMEOUT_MS,
            factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl PruneConfig {
    /// The name prefix to filter on, treating an empty string as no filter.
    pub fn name_prefix(&self) -> Option<&str> {
        self.filter.as_deref().filter(|prefix| !prefix.is_empty())
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

impl RetryConfig {
    pub fn min_timeout(&self) -> Duration {
        Duration::from_millis(self.min_timeout_ms)
    }

    pub fn max_timeout(&self) -> Duration {
        Duration::from_millis(self.max_timeout_ms)
    }
}
