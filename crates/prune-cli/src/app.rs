use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("lambda-prune")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Delete AWS Lambda versions that no alias references")
        .long_about("lambda-prune walks every Lambda function in the account, collects the versions referenced by its aliases (including weighted routing targets), and deletes every other published version. $LATEST is never touched. Runs are dry runs unless --execute is given.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable log output on stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Config file (overrides ~/.lambda-prune/config.toml)")
                .value_parser(value_parser!(std::path::PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("region")
                .long("region")
                .help("AWS region (defaults to the SDK region chain)")
                .global(true),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .short('p')
                .help("Only process functions whose name starts with this prefix (overrides FILTER)")
                .global(true),
        )
        .arg(
            Arg::new("retries")
                .long("retries")
                .help("Retries per API call after the first attempt (overrides RETRIES)")
                .value_parser(value_parser!(u32))
                .global(true),
        )
        .arg(
            Arg::new("retry-min-timeout")
                .long("retry-min-timeout")
                .help("First retry backoff in milliseconds (overrides RETRY_MIN_TIMEOUT)")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("retry-max-timeout")
                .long("retry-max-timeout")
                .help("Backoff cap in milliseconds (overrides RETRY_MAX_TIMEOUT)")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("page-delay")
                .long("page-delay")
                .help("Delay before each version/alias page request in milliseconds (overrides PAGE_DELAY)")
                .value_parser(value_parser!(u64))
                .global(true),
        )
        .subcommand(
            Command::new("prune")
                .about("Delete (or with no --execute, list) every unreferenced version")
                .arg(
                    Arg::new("execute")
                        .long("execute")
                        .help("Actually delete versions. Without this flag nothing is deleted")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("keep-going")
                        .long("keep-going")
                        .help("Record a failing function and continue with the next one")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output the run summary as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("functions")
                .about("List the functions a prune run would process")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("versions")
                .about("Show published, aliased, and orphaned versions of one function")
                .arg(
                    Arg::new("function")
                        .help("Function name or ARN")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_cli() {
        let app = build_cli();
        assert_eq!(app.get_name(), "lambda-prune");
        app.debug_assert();
    }

    #[test]
    fn test_prune_defaults_to_dry_run() {
        let matches = build_cli()
            .try_get_matches_from(vec!["lambda-prune", "prune"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "prune");
        assert!(!sub.get_flag("execute"));
        assert!(!sub.get_flag("keep-going"));
    }

    #[test]
    fn test_global_overrides_parse_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "lambda-prune",
                "prune",
                "--execute",
                "--prefix",
                "dev-",
                "--retries",
                "2",
            ])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("prefix").map(String::as_str),
            Some("dev-")
        );
        assert_eq!(matches.get_one::<u32>("retries").copied(), Some(2));
    }

    #[test]
    fn test_versions_requires_function() {
        let result = build_cli().try_get_matches_from(vec!["lambda-prune", "versions"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_retries_rejected() {
        let result = build_cli().try_get_matches_from(vec![
            "lambda-prune",
            "--retries",
            "lots",
            "functions",
        ]);
        assert!(result.is_err());
    }
}
