//! Diagnostic logging setup.
//!
//! Events go to stderr through a `tracing-subscriber` fmt layer. The filter
//! comes from `CLOUD_MANUS_LOG` (standard `EnvFilter` directives); without it
//! the level is `warn`, or `debug` for this crate when `--verbose` is set.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CLOUD_MANUS_LOG";

static INIT: OnceCell<()> = OnceCell::new();

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,cloud_manus=debug"
    } else {
        "warn"
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(v) if !v.trim().is_empty() => EnvFilter::try_new(v.trim())
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose))),
        _ => EnvFilter::new(default_directive(verbose)),
    }
}

/// Install the global subscriber once; later calls are no-ops.
pub fn telemetry_init(verbose: bool) {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(build_filter(verbose))
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    });
}
