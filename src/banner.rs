//! Startup line and configuration summaries (stderr, color-aware).

use crate::color::{color_enabled_stderr, paint};
use crate::config::{BuildConfig, RunConfig};

/// One-line banner naming the tool, version and host platform.
pub fn print_startup_banner(tool: &str, verbose: bool) {
    let version = env!("CARGO_PKG_VERSION");
    let use_err = color_enabled_stderr();
    eprintln!(
        "{}",
        paint(
            use_err,
            "\x1b[34;1m",
            &format!(
                "{tool} v{version} ({} / {})",
                std::env::consts::OS,
                std::env::consts::ARCH
            )
        )
    );
    if verbose {
        eprintln!(
            "  build: {} {} {}",
            env!("CLOUD_MANUS_BUILD_DATE"),
            env!("CLOUD_MANUS_BUILD_TARGET"),
            env!("CLOUD_MANUS_BUILD_PROFILE")
        );
    }
}

fn value(use_color: bool, v: &str) -> String {
    paint(use_color, "\x1b[34;1m", v)
}

pub fn print_build_summary(cfg: &BuildConfig) {
    let use_err = color_enabled_stderr();
    eprintln!("Build configuration:");
    eprintln!("  architecture: {}", value(use_err, cfg.arch.as_str()));
    eprintln!("  platform:     {}", value(use_err, &cfg.arch.platform()));
    eprintln!("  tag:          {}", value(use_err, &cfg.tag));
    eprintln!("  image:        {}", value(use_err, &cfg.image()));
    eprintln!();
}

/// The API key is never echoed.
pub fn print_run_summary(cfg: &RunConfig) {
    let use_err = color_enabled_stderr();
    eprintln!("Run configuration:");
    eprintln!("  model:     {}", value(use_err, &cfg.model));
    eprintln!("  base URL:  {}", value(use_err, &cfg.base_url));
    eprintln!("  port:      {}", value(use_err, &cfg.port.to_string()));
    eprintln!("  tag:       {}", value(use_err, &cfg.tag));
    eprintln!("  container: {}", value(use_err, &cfg.container_name));
    eprintln!();
}
