use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Env var checked before `RUST_LOG` for the log filter.
pub const LOG_ENV_VAR: &str = "WILDFIRE_REPLAY_LOG";

fn resolve_filter(verbose: bool, interactive: bool) -> EnvFilter {
    let fallback = match (verbose, interactive) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    };
    std::env::var(LOG_ENV_VAR)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(fallback),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
}

/// Installs the global `tracing` subscriber.
///
/// Log lines go to stderr so they never interleave with the metrics table
/// printed on stdout. While the dashboard owns the terminal only warnings
/// are shown unless `verbose` is set. Calling this again keeps the first
/// subscriber.
pub fn init_logging(verbose: bool, no_color: bool, interactive: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(resolve_filter(verbose, interactive))
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
