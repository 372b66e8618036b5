//! Diagnostic logging to stderr

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive that overrides `--verbose`
pub const LOG_ENV: &str = "FLEETDASH_LOG";

/// Filter directive for the given verbosity, unless `FLEETDASH_LOG` says otherwise
pub fn filter_directive(verbose: bool, env_value: Option<String>) -> String {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(directive) => directive,
        None if verbose => "fleetdash=debug".to_string(),
        None => "warn".to_string(),
    }
}

/// Install the global subscriber; repeated calls are ignored
pub fn init_logging(verbose: bool) {
    let directive = filter_directive(verbose, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .try_init();
}
