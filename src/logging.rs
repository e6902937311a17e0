//! Diagnostic logging.
//!
//! Logs go to stderr so they never mix with command output.  `RUST_LOG`
//! overrides the default level; `--verbose` lowers it to `debug`.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.  Safe to call more than once.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
