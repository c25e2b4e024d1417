use clap::ArgMatches;
use tracing::{error, info};

use prune_core::events;

use super::helpers::{aws_pruner, load_config};
use crate::color;
use crate::table::function_name;

pub(crate) async fn handle_functions_command(
    matches: &ArgMatches,
    sub_matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(matches)?;
    let json_output = sub_matches.get_flag("json");

    info!(event = "cli.functions_started");

    let pruner = aws_pruner(config).await;

    match pruner.list_functions().await {
        Ok(mut arns) => {
            // Enumeration order is shuffled; listing reads better sorted.
            arns.sort();

            if json_output {
                println!("{}", serde_json::to_string_pretty(&arns)?);
            } else if arns.is_empty() {
                println!("No functions matched.");
            } else {
                for arn in &arns {
                    println!("{}  {}", color::ice(function_name(arn)), color::muted(arn));
                }
                println!("\nTotal: {} function(s)", arns.len());
            }

            info!(event = "cli.functions_completed", count = arns.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", color::error("Failed to list functions:"), e);
            error!(event = "cli.functions_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
