use clap::ArgMatches;
use tracing::{error, info};

use prune_core::events;

mod functions;
mod helpers;
mod prune;
mod versions;

pub async fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    if let Some((command, _)) = matches.subcommand() {
        info!(event = "cli.command_started", command = command);
    }

    match matches.subcommand() {
        Some(("prune", sub_matches)) => prune::handle_prune_command(matches, sub_matches).await,
        Some(("functions", sub_matches)) => {
            functions::handle_functions_command(matches, sub_matches).await
        }
        Some(("versions", sub_matches)) => {
            versions::handle_versions_command(matches, sub_matches).await
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
