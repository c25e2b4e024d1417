use clap::ArgMatches;
use tracing::{error, info};

use prune_core::{events, plan_function};

use super::helpers::{aws_pruner, load_config};
use crate::color;
use crate::table::print_version_breakdown;

pub(crate) async fn handle_versions_command(
    matches: &ArgMatches,
    sub_matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let function = sub_matches
        .get_one::<String>("function")
        .ok_or("Function argument is required")?;
    let config = load_config(matches)?;
    let json_output = sub_matches.get_flag("json");

    info!(event = "cli.versions_started", function = function.as_str());

    let pruner = aws_pruner(config).await;

    match plan_function(&pruner, function).await {
        Ok(report) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_version_breakdown(&report);
            }

            info!(
                event = "cli.versions_completed",
                function = function.as_str(),
                orphaned = report.orphaned.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                color::error(&format!("Failed to inspect '{}':", function)),
                e
            );
            error!(
                event = "cli.versions_failed",
                function = function.as_str(),
                error = %e
            );
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
