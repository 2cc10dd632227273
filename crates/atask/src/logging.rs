//! Diagnostic logging setup.
//!
//! Library and command diagnostics go through `tracing` and are written to
//! stderr, keeping stdout for command output.

use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

/// Environment variable holding a filter directive (e.g. `atask_core_rs=debug`).
pub const LOG_ENV: &str = "ATASK_LOG";

/// Returns the default filter directive for the CLI verbosity flags.
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the global subscriber.
///
/// Filter precedence: `ATASK_LOG`, then `RUST_LOG`, then the verbosity flags.
pub fn init(cli: &Cli) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(cli.verbose, cli.quiet)));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .without_time();

    // A subscriber may already be set when running under a test harness.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
