//! Built-in fallback values.

/// Retries after the first attempt.
pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_MIN_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

/// Wait before each version/alias page request.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 10;

/// `MaxItems` sent with every list request.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound accepted by the Lambda list APIs.
pub const MAX_PAGE_SIZE: u32 = 10_000;

pub const ENV_FILTER: &str = "FILTER";
pub const ENV_RETRIES: &str = "RETRIES";
pub const ENV_RETRY_MIN_TIMEOUT: &str = "RETRY_MIN_TIMEOUT";
pub const ENV_RETRY_MAX_TIMEOUT: &str = "RETRY_MAX_TIMEOUT";
pub const ENV_PAGE_DELAY: &str = "PAGE_DELAY";
