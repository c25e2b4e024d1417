use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Targets whose events reach the subscriber: the library crates share the
/// `prune` prefix, the binary logs under `lambda_prune`.
const LOG_TARGETS: [&str; 2] = ["prune", "lambda_prune"];

/// Install the JSON stderr subscriber.
///
/// Quiet mode only lets errors through for our crates; `RUST_LOG` still applies on top.
pub fn init_logging(quiet: bool) {
    let filter = directives(quiet)
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}

fn directives(quiet: bool) -> Vec<String> {
    let level = if quiet { "error" } else { "info" };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect()
}
