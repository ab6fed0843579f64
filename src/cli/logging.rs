//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through a `tracing-subscriber` fmt layer so that
//! rendered controls on stdout stay clean. `RUST_LOG` overrides the level.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use super::args::{CommonArgs, LogFormat};

pub fn init_logging(common: Option<&CommonArgs>) {
    let verbose = common.is_some_and(|c| c.verbose);
    let format = common.map(|c| c.log_format).unwrap_or_default();

    let default_directive = if verbose { "negcov=debug" } else { "negcov=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed when running inside tests.
    let _ = match format {
        LogFormat::Text => builder.without_time().with_ansi(ansi).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
