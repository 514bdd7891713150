use tracing_subscriber::EnvFilter;

use crate::AuditError;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "VIGIL_LOG";

/// Install the global `fmt` subscriber.
///
/// `VIGIL_LOG` wins when set. Otherwise the level is `error` when quiet,
/// `debug` when verbose and `warn` by default.
///
/// # Errors
///
/// Returns [`AuditError::Telemetry`] if a global subscriber is already set.
pub fn init_tracing(quiet: bool, verbose: bool) -> Result<(), AuditError> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AuditError::Telemetry(e.to_string()))
}
