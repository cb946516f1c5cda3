//! `cloud-manus-run`: merge flags with legacy positionals, run the pre-flight
//! checks and start the service container.

use std::ffi::OsString;
use std::process::ExitCode;

use crate::banner::{print_run_summary, print_startup_banner};
use crate::cli::{parse_from, usage_help, RunArgs};
use crate::color::{color_enabled_stderr, log_info_stderr, log_success_stderr, log_warn_stderr};
use crate::config::{merge_run_config, MissingFields, RunConfig};
use crate::docker::{
    logs_hint, remove_container_args, run_container_args, run_preview, ContainerEngine,
    DockerEngine,
};
use crate::errors::LaunchError;
use crate::util::command_preview;

const TOOL: &str = "cloud-manus-run";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub url: String,
    pub logs_command: String,
}

/// Container collision check: refuse without `--restart`, force-remove with it.
fn ensure_name_free(cfg: &RunConfig, engine: &dyn ContainerEngine) -> Result<(), LaunchError> {
    if !engine.container_exists(&cfg.container_name)? {
        return Ok(());
    }
    if !cfg.restart {
        return Err(LaunchError::Precondition(format!(
            "container '{}' already exists; pass -r/--restart to remove it and start a new one",
            cfg.container_name
        )));
    }
    let use_err = color_enabled_stderr();
    log_warn_stderr(
        use_err,
        &format!("Removing existing container '{}' (--restart)", cfg.container_name),
    );
    engine.remove_container(&cfg.container_name)
}

/// Image check: local only, never pulls or builds.
fn ensure_image_present(cfg: &RunConfig, engine: &dyn ContainerEngine) -> Result<(), LaunchError> {
    let image = cfg.image();
    if engine.image_exists(&image)? {
        return Ok(());
    }
    Err(LaunchError::Precondition(format!(
        "image {image} not found locally; build it first with: cloud-manus-build --tag {}",
        cfg.tag
    )))
}

/// Missing required fields are a usage error; the per-field report rides along.
fn missing_fields_error(missing: &MissingFields) -> LaunchError {
    LaunchError::Usage(format!("{missing}\n{}", missing.report()))
}

/// Pre-flight checks, summary, then exactly one run invocation.
#[tracing::instrument(level = "info", skip(engine), err)]
pub fn execute_run(
    cfg: &RunConfig,
    engine: &dyn ContainerEngine,
    verbose: bool,
) -> Result<RunOutcome, LaunchError> {
    ensure_name_free(cfg, engine)?;
    ensure_image_present(cfg, engine)?;

    print_run_summary(cfg);
    let use_err = color_enabled_stderr();
    if verbose {
        log_info_stderr(
            use_err,
            &format!("{TOOL}: docker: {}", run_preview(&engine.program(), cfg)),
        );
    }
    log_info_stderr(
        use_err,
        &format!("Starting container '{}' from {} ...", cfg.container_name, cfg.image()),
    );
    if !engine.execute(&run_container_args(cfg))? {
        return Err(LaunchError::External(format!(
            "failed to start container '{}'; check the docker output above and `{}`",
            cfg.container_name,
            logs_hint(&cfg.container_name)
        )));
    }
    Ok(RunOutcome {
        url: cfg.service_url(),
        logs_command: logs_hint(&cfg.container_name),
    })
}

fn print_dry_run(cfg: &RunConfig) {
    print_run_summary(cfg);
    let use_err = color_enabled_stderr();
    if cfg.restart {
        log_info_stderr(
            use_err,
            &format!(
                "{TOOL}: docker (if the container exists): {}",
                command_preview("docker", &remove_container_args(&cfg.container_name))
            ),
        );
    }
    log_info_stderr(use_err, &format!("{TOOL}: docker: {}", run_preview("docker", cfg)));
    log_info_stderr(use_err, &format!("{TOOL}: dry-run requested; not executing Docker."));
}

pub fn run_main<I, S>(argv: I) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let args = match super::unwrap_parsed(parse_from::<RunArgs, _, _>(argv), usage_help::<RunArgs>) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let (flags, positional, common) = args.into_parts();
    super::apply_common(&common);
    print_startup_banner(TOOL, common.verbose);

    let cfg = match merge_run_config(flags, &positional) {
        Ok(c) => c,
        Err(missing) => {
            let err = missing_fields_error(&missing);
            return super::report_failure(TOOL, &err, usage_help::<RunArgs>);
        }
    };
    tracing::debug!(?cfg, legacy_positionals = positional.len(), "resolved run configuration");

    if common.dry_run {
        print_dry_run(&cfg);
        return ExitCode::SUCCESS;
    }

    let engine = match DockerEngine::locate() {
        Ok(e) => e,
        Err(e) => return super::report_failure(TOOL, &e, usage_help::<RunArgs>),
    };

    match execute_run(&cfg, &engine, common.verbose) {
        Ok(outcome) => {
            let use_err = color_enabled_stderr();
            log_success_stderr(
                use_err,
                &format!("Container '{}' started.", cfg.container_name),
            );
            eprintln!("  service: {}", outcome.url);
            eprintln!("  logs:    {}", outcome.logs_command);
            println!("{}", outcome.url);
            ExitCode::SUCCESS
        }
        Err(e) => super::report_failure(TOOL, &e, usage_help::<RunArgs>),
    }
}
