use clap::ArgMatches;
use tracing::{error, info};

use prune_core::{PruneError, PruneSummary, events, prune_all};

use super::helpers::{aws_pruner, load_config};
use crate::color;
use crate::table::{function_name, print_prune_table};

pub(crate) async fn handle_prune_command(
    matches: &ArgMatches,
    sub_matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(matches)?;
    config.dry_run = !sub_matches.get_flag("execute");
    if sub_matches.get_flag("keep-going") {
        config.keep_going = true;
    }
    let json_output = sub_matches.get_flag("json");

    info!(
        event = "cli.prune_started",
        dry_run = config.dry_run,
        keep_going = config.keep_going,
        filter = config.name_prefix().unwrap_or("")
    );

    let pruner = aws_pruner(config).await;

    match prune_all(&pruner).await {
        Ok(summary) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }

            info!(
                event = "cli.prune_completed",
                dry_run = summary.dry_run,
                orphaned = summary.total_orphaned,
                deleted = summary.total_deleted,
                failures = summary.failures.len()
            );

            if summary.has_failures() {
                return Err(format!("{} function(s) failed", summary.failures.len()).into());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", color::error("Prune failed:"), e);
            let api_error = e.api_error();
            if api_error.is_retryable() {
                eprintln!(
                    "{}",
                    color::hint(&format!(
                        "{} kept failing after retries; try raising --retries or --page-delay",
                        api_error.operation
                    ))
                );
            }

            error!(
                event = "cli.prune_failed",
                error_code = e.error_code(),
                error = %e
            );
            events::log_app_error(&e);

            Err(e.into())
        }
    }
}

fn print_summary(summary: &PruneSummary) {
    if summary.functions.is_empty() && summary.failures.is_empty() {
        println!("No functions matched.");
        return;
    }

    if !summary.functions.is_empty() {
        print_prune_table(&summary.functions, summary.dry_run);
    }

    println!(
        "\nTotal: {} orphaned version(s) across {} function(s)",
        summary.total_orphaned,
        summary.functions.len()
    );

    if summary.dry_run {
        if summary.total_orphaned > 0 {
            println!(
                "{}",
                color::copper("Dry run: nothing was deleted. Re-run with --execute to delete.")
            );
        }
    } else {
        println!(
            "{}",
            color::aurora(&format!("Deleted {} version(s).", summary.total_deleted))
        );
    }

    if !summary.failures.is_empty() {
        eprintln!(
            "\n{}",
            color::warning(&format!("{} function(s) failed:", summary.failures.len()))
        );
        for failure in &summary.failures {
            eprintln!(
                "  - {} [{}] {}",
                function_name(&failure.function),
                failure.error_code,
                failure.error
            );
        }
    }
}
