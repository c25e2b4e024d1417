//! Configuration loading: files, then environment.
//!
//! Files are merged at the TOML table level so a file that only sets
//! `[retry] retries` leaves every other value at whatever the previous layer
//! chose.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::defaults::{
    ENV_FILTER, ENV_PAGE_DELAY, ENV_RETRIES, ENV_RETRY_MAX_TIMEOUT, ENV_RETRY_MIN_TIMEOUT,
};
use crate::errors::ConfigError;
use crate::types::PruneConfig;

/// `~/.lambda-prune/config.toml`, or `None` when no home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lambda-prune").join("config.toml"))
}

/// Load defaults, the user config, an optional explicit file, then the environment.
///
/// A missing user config is skipped. A missing explicit file is an error.
pub fn load_hierarchy(explicit: Option<&Path>) -> Result<PruneConfig, ConfigError> {
    let mut merged = to_table(&PruneConfig::default())?;

    if let Some(user_path) = user_config_path() {
        if user_path.exists() {
            merge_values(&mut merged, read_table(&user_path)?);
            debug!(
                event = "config.user_file_loaded",
                path = %user_path.display()
            );
        } else {
            debug!(
                event = "config.user_file_missing",
                path = %user_path.display()
            );
        }
    }

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        merge_values(&mut merged, read_table(path)?);
        debug!(event = "config.explicit_file_loaded", path = %path.display());
    }

    let mut config: PruneConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ConfigParseError {
            message: e.to_string(),
        })?;

    apply_env_overrides(&mut config)?;

    Ok(config)
}

/// Load a single config file on top of the defaults.
pub fn load_file(path: &Path) -> Result<PruneConfig, ConfigError> {
    let mut merged = to_table(&PruneConfig::default())?;
    merge_values(&mut merged, read_table(path)?);
    merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::ConfigParseError {
            message: e.to_string(),
        })
}

/// Overlay the recognized environment variables onto `config`.
///
/// An empty `FILTER` clears the prefix filter. Timeouts accept fractional
/// milliseconds and are truncated.
pub fn apply_env_overrides(config: &mut PruneConfig) -> Result<(), ConfigError> {
    if let Some(filter) = env_var(ENV_FILTER) {
        config.filter = if filter.is_empty() { None } else { Some(filter) };
    }

    if let Some(value) = env_var(ENV_RETRIES) {
        config.retry.retries = parse_env(ENV_RETRIES, &value)?;
    }

    if let Some(value) = env_var(ENV_RETRY_MIN_TIMEOUT) {
        config.retry.min_timeout_ms = parse_millis(ENV_RETRY_MIN_TIMEOUT, &value)?;
    }

    if let Some(value) = env_var(ENV_RETRY_MAX_TIMEOUT) {
        config.retry.max_timeout_ms = parse_millis(ENV_RETRY_MAX_TIMEOUT, &value)?;
    }

    if let Some(value) = env_var(ENV_PAGE_DELAY) {
        config.page_delay_ms = parse_millis(ENV_PAGE_DELAY, &value)?;
    }

    Ok(())
}

fn env_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            warn!(event = "config.env_not_unicode", var = name);
            None
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            value: value.to_string(),
        })
}

fn parse_millis(var: &str, value: &str) -> Result<u64, ConfigError> {
    let millis: f64 = parse_env(var, value)?;
    if !millis.is_finite() || millis < 0.0 {
        return Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            value: value.to_string(),
        });
    }
    Ok(millis as u64)
}

fn to_table(config: &PruneConfig) -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(config).map_err(|e| ConfigError::InvalidConfiguration {
        message: format!("failed to encode defaults: {}", e),
    })
}

fn read_table(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| {
        ConfigError::ConfigParseError {
            message: format!("{}: {}", path.display(), e),
        }
    })?;
    Ok(toml::Value::Table(table))
}

fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ALL_VARS: [&str; 5] = [
        ENV_FILTER,
        ENV_RETRIES,
        ENV_RETRY_MIN_TIMEOUT,
        ENV_RETRY_MAX_TIMEOUT,
        ENV_PAGE_DELAY,
    ];

    /// Run `f` with HOME pointed at `home` and every config var unset except
    /// the given overrides.
    fn with_isolated_env(home: &Path, overrides: &[(&str, &str)], f: impl FnOnce()) {
        let mut vars: Vec<(&str, Option<String>)> =
            vec![("HOME", Some(home.to_string_lossy().into_owned()))];
        for var in ALL_VARS {
            let value = overrides
                .iter()
                .find(|(name, _)| *name == var)
                .map(|(_, value)| value.to_string());
            vars.push((var, value));
        }
        temp_env::with_vars(vars, f);
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_env_overrides_applied() {
        temp_env::with_vars(
            [
                (ENV_FILTER, Some("prod-")),
                (ENV_RETRIES, Some("3")),
                (ENV_RETRY_MIN_TIMEOUT, Some("250.5")),
                (ENV_RETRY_MAX_TIMEOUT, Some("1000")),
                (ENV_PAGE_DELAY, Some("0")),
            ],
            || {
                let mut config = PruneConfig::default();
                apply_env_overrides(&mut config).unwrap();
                assert_eq!(config.name_prefix(), Some("prod-"));
                assert_eq!(config.retry.retries, 3);
                assert_eq!(config.retry.min_timeout_ms, 250);
                assert_eq!(config.retry.max_timeout_ms, 1000);
                assert_eq!(config.page_delay_ms, 0);
            },
        );
    }

    #[test]
    fn test_empty_filter_env_clears_prefix() {
        temp_env::with_var(ENV_FILTER, Some(""), || {
            let mut config = PruneConfig {
                filter: Some("dev-".to_string()),
                ..Default::default()
            };
            apply_env_overrides(&mut config).unwrap();
            assert_eq!(config.filter, None);
        });
    }

    #[test]
    fn test_invalid_retries_env_rejected() {
        temp_env::with_var(ENV_RETRIES, Some("lots"), || {
            let mut config = PruneConfig::default();
            let err = apply_env_overrides(&mut config).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvValue { ref var, .. } if var == ENV_RETRIES));
        });
    }

    #[test]
    fn test_negative_timeout_env_rejected() {
        temp_env::with_var(ENV_RETRY_MIN_TIMEOUT, Some("-5"), || {
            let mut config = PruneConfig::default();
            assert!(apply_env_overrides(&mut config).is_err());
        });
    }

    #[test]
    fn test_explicit_file_merges_over_defaults() {
        let file = write_config(
            r#"
            page_delay_ms = 40

            [retry]
            max_timeout_ms = 9000
            "#,
        );

        let home = tempfile::tempdir().unwrap();

        with_isolated_env(home.path(), &[], || {
            let config = load_hierarchy(Some(file.path())).unwrap();
            assert_eq!(config.page_delay_ms, 40);
            assert_eq!(config.retry.max_timeout_ms, 9000);
            assert_eq!(config.retry.min_timeout_ms, 5000);
            assert!(config.dry_run);
        });
    }

    #[test]
    fn test_user_file_sits_between_defaults_and_explicit_file() {
        let home = tempfile::tempdir().unwrap();
        let user_dir = home.path().join(".lambda-prune");
        std::fs::create_dir_all(&user_dir).unwrap();
        std::fs::write(
            user_dir.join("config.toml"),
            "page_delay_ms = 70\nfilter = \"team-\"\n",
        )
        .unwrap();
        let explicit = write_config("page_delay_ms = 40\n");

        with_isolated_env(home.path(), &[], || {
            let config = load_hierarchy(Some(explicit.path())).unwrap();
            assert_eq!(config.page_delay_ms, 40);
            assert_eq!(config.name_prefix(), Some("team-"));
        });
    }

    #[test]
    fn test_env_wins_over_file() {
        let file = write_config("[retry]\nretries = 1\n");
        let home = tempfile::tempdir().unwrap();

        with_isolated_env(home.path(), &[(ENV_RETRIES, "7")], || {
            let config = load_hierarchy(Some(file.path())).unwrap();
            assert_eq!(config.retry.retries, 7);
        });
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        with_isolated_env(dir.path(), &[], || {
            let err = load_hierarchy(Some(&missing)).unwrap_err();
            assert!(matches!(err, ConfigError::ConfigNotFound { .. }));
        });
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("retry = [not toml");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_merge_values_is_deep() {
        let mut base: toml::Value = toml::from_str::<toml::Table>(
            "[retry]\nretries = 5\nfactor = 2.0\n",
        )
        .map(toml::Value::Table)
        .unwrap();
        let overlay = toml::from_str::<toml::Table>("[retry]\nretries = 1\n")
            .map(toml::Value::Table)
            .unwrap();

        merge_values(&mut base, overlay);

        let retry = base.get("retry").unwrap();
        assert_eq!(retry.get("retries").unwrap().as_integer(), Some(1));
        assert_eq!(retry.get("factor").unwrap().as_float(), Some(2.0));
    }
}
