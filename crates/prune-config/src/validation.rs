//! Configuration validation logic.
//!
//! Runs once after every layer (files, environment, CLI flags) has been applied.

use crate::defaults::MAX_PAGE_SIZE;
use crate::errors::ConfigError;
use crate::types::PruneConfig;

/// Validate a PruneConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `retry.min_timeout_ms` must not exceed `retry.max_timeout_ms`
/// - `retry.factor` must be finite and at least 1
/// - `page_size` must be between 1 and the API maximum
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` naming the offending value.
pub fn validate_config(config: &PruneConfig) -> Result<(), ConfigError> {
    let retry = &config.retry;

    if retry.min_timeout_ms > retry.max_timeout_ms {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "retry min timeout ({} ms) exceeds max timeout ({} ms)",
                retry.min_timeout_ms, retry.max_timeout_ms
            ),
        });
    }

    if !retry.factor.is_finite() || retry.factor < 1.0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("retry factor must be >= 1, got {}", retry.factor),
        });
    }

    if config.page_size == 0 || config.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, config.page_size
            ),
        });
    }

    Ok(())
}
