//! Entry-point flows for the two binaries.
//!
//! Each flow is strictly linear: parse, validate, report, invoke the engine
//! once, report the result. Nothing is retried.

pub mod build;
pub mod run;

use std::process::ExitCode;

use crate::cli::{CommonArgs, Parsed};
use crate::color::{color_enabled_stderr, log_error_stderr, set_color_mode};
use crate::errors::{exit_code_for_launch_error, LaunchError};
use crate::telemetry::telemetry_init;

pub use build::{build_main, execute_build, resolve_build_config, BuildOutcome};
pub use run::{execute_run, run_main, RunOutcome};

/// Apply the shared ambient options before any output.
fn apply_common(common: &CommonArgs) {
    if let Some(mode) = common.color {
        set_color_mode(mode);
    }
    telemetry_init(common.verbose);
}

/// Print a fatal error (plus usage help for usage errors) and map it to an exit code.
fn report_failure(tool: &str, err: &LaunchError, usage: impl FnOnce() -> String) -> ExitCode {
    let use_err = color_enabled_stderr();
    log_error_stderr(use_err, &format!("{tool}: error: {err}"));
    if err.wants_usage() {
        eprintln!();
        eprintln!("{}", usage());
    }
    tracing::debug!(error = ?err, "exiting with failure");
    ExitCode::from(exit_code_for_launch_error(err))
}

/// Handle the non-argument outcomes of parsing: help/version and clap usage errors.
fn unwrap_parsed<T>(parsed: Parsed<T>, usage: impl FnOnce() -> String) -> Result<T, ExitCode> {
    match parsed {
        Parsed::Args(a) => Ok(a),
        Parsed::Info(text) => {
            print!("{text}");
            Err(ExitCode::SUCCESS)
        }
        Parsed::Usage(text) => {
            let use_err = color_enabled_stderr();
            log_error_stderr(use_err, text.trim_end());
            eprintln!();
            eprintln!("{}", usage());
            Err(ExitCode::from(1))
        }
    }
}
