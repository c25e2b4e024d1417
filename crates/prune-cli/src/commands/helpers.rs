use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use prune_config::{ConfigError, PruneConfig, load_hierarchy, validate_config};
use prune_core::{AwsLambdaClient, Pruner, events};

use crate::color;

/// Load the config hierarchy, layer CLI flags on top, and validate the result.
///
/// Runs before any AWS client exists, so a bad config never reaches the API.
pub(crate) fn load_config(matches: &ArgMatches) -> Result<PruneConfig, ConfigError> {
    let explicit = matches.get_one::<PathBuf>("config");

    let result = load_hierarchy(explicit.map(PathBuf::as_path)).and_then(|mut config| {
        apply_cli_overrides(&mut config, matches);
        validate_config(&config)?;
        Ok(config)
    });

    match result {
        Ok(config) => {
            info!(
                event = "cli.config_loaded",
                filter = config.name_prefix().unwrap_or(""),
                retries = config.retry.retries,
                page_delay_ms = config.page_delay_ms
            );
            Ok(config)
        }
        Err(e) => {
            eprintln!("{}", color::error(&e.to_string()));
            error!(event = "cli.config_failed", error = %e);
            events::log_app_error(&e);
            Err(e)
        }
    }
}

fn apply_cli_overrides(config: &mut PruneConfig, matches: &ArgMatches) {
    if let Some(prefix) = matches.get_one::<String>("prefix") {
        config.filter = Some(prefix.clone());
    }
    if let Some(region) = matches.get_one::<String>("region") {
        config.region = Some(region.clone());
    }
    if let Some(retries) = matches.get_one::<u32>("retries") {
        config.retry.retries = *retries;
    }
    if let Some(ms) = matches.get_one::<u64>("retry-min-timeout") {
        config.retry.min_timeout_ms = *ms;
    }
    if let Some(ms) = matches.get_one::<u64>("retry-max-timeout") {
        config.retry.max_timeout_ms = *ms;
    }
    if let Some(ms) = matches.get_one::<u64>("page-delay") {
        config.page_delay_ms = *ms;
    }
}

/// Build a pruner backed by the real Lambda API.
pub(crate) async fn aws_pruner(config: PruneConfig) -> Pruner<AwsLambdaClient> {
    let client = AwsLambdaClient::from_env(config.region.as_deref()).await;
    Pruner::new(client, config)
}
