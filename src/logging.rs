//! Logging configuration and initialization

use crate::cli::Verbosity;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the bot process.
///
/// `RUST_LOG` takes precedence; otherwise the level follows the CLI
/// verbosity flags.
pub fn init(verbosity: Verbosity) {
    let default_filter = match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
        Verbosity::VeryVerbose => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(matches!(verbosity, Verbosity::VeryVerbose))
        .init();
}
