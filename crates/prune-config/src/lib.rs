//! # Configuration System
//!
//! Hierarchical configuration for lambda-prune.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.lambda-prune/config.toml` (optional)
//! 3. **Explicit config** - the file passed with `--config`
//! 4. **Environment** - `FILTER`, `RETRIES`, `RETRY_MIN_TIMEOUT`, `RETRY_MAX_TIMEOUT`, `PAGE_DELAY`
//! 5. **CLI arguments** - Command-line flags (highest priority, applied by the CLI)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.lambda-prune/config.toml
//! filter = "dev-"
//! page_delay_ms = 25
//!
//! [retry]
//! retries = 3
//! min_timeout_ms = 1000
//! max_timeout_ms = 30000
//! ```

pub mod defaults;
pub mod errors;
pub mod loading;
pub mod types;
pub mod validation;

// Public API exports
pub use errors::ConfigError;
pub use loading::{apply_env_overrides, load_file, load_hierarchy, user_config_path};
pub use types::{PruneConfig, RetryConfig};
pub use validation::validate_config;
