//! `cloud-manus-build`: resolve the target architecture and build the image.

use std::ffi::OsString;
use std::process::ExitCode;

use crate::arch::resolve_arch;
use crate::banner::{print_build_summary, print_startup_banner};
use crate::cli::{parse_from, usage_help, BuildArgs};
use crate::color::{color_enabled_stderr, log_error_stderr, log_info_stderr, log_success_stderr};
use crate::config::BuildConfig;
use crate::docker::{build_image_args, ContainerEngine, DockerEngine};
use crate::errors::LaunchError;
use crate::util::{command_preview, ExecService};

const TOOL: &str = "cloud-manus-build";

/// Build context directory override.
pub const BUILD_CONTEXT_ENV: &str = "CLOUD_MANUS_BUILD_CONTEXT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub image: String,
    pub image_id: Option<String>,
}

fn build_context() -> String {
    std::env::var(BUILD_CONTEXT_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ".".to_string())
}

/// Turn parsed flags into a BuildConfig, detecting the host architecture when needed.
pub fn resolve_build_config(args: &BuildArgs, exec: &ExecService) -> Result<BuildConfig, LaunchError> {
    let arch = resolve_arch(args.arch, exec)?;
    Ok(BuildConfig {
        arch,
        tag: args.tag.clone(),
    })
}

/// Print the summary and issue exactly one build invocation.
#[tracing::instrument(level = "info", skip(engine), err)]
pub fn execute_build(
    cfg: &BuildConfig,
    context: &str,
    engine: &dyn ContainerEngine,
    verbose: bool,
) -> Result<BuildOutcome, LaunchError> {
    print_build_summary(cfg);
    let args = build_image_args(cfg, context);
    let use_err = color_enabled_stderr();
    if verbose {
        log_info_stderr(
            use_err,
            &format!("{TOOL}: docker: {}", command_preview(&engine.program(), &args)),
        );
    }
    log_info_stderr(use_err, &format!("Building image {} ...", cfg.image()));
    if !engine.execute(&args)? {
        return Err(LaunchError::External(
            "image build failed; check the docker build output above".to_string(),
        ));
    }
    let image = cfg.image();
    let image_id = engine.image_id(&image);
    Ok(BuildOutcome { image, image_id })
}

pub fn build_main<I, S>(argv: I) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let args = match super::unwrap_parsed(parse_from::<BuildArgs, _, _>(argv), usage_help::<BuildArgs>) {
        Ok(a) => a,
        Err(code) => return code,
    };
    super::apply_common(&args.common);
    print_startup_banner(TOOL, args.common.verbose);

    let cfg = match resolve_build_config(&args, &ExecService::default()) {
        Ok(c) => c,
        Err(e) => return super::report_failure(TOOL, &e, usage_help::<BuildArgs>),
    };
    let context = build_context();
    tracing::debug!(?cfg, %context, "resolved build configuration");

    if args.common.dry_run {
        print_build_summary(&cfg);
        let use_err = color_enabled_stderr();
        log_info_stderr(
            use_err,
            &format!(
                "{TOOL}: docker: {}",
                command_preview("docker", &build_image_args(&cfg, &context))
            ),
        );
        log_info_stderr(use_err, &format!("{TOOL}: dry-run requested; not executing Docker."));
        return ExitCode::SUCCESS;
    }

    let engine = match DockerEngine::locate() {
        Ok(e) => e,
        Err(e) => return super::report_failure(TOOL, &e, usage_help::<BuildArgs>),
    };

    match execute_build(&cfg, &context, &engine, args.common.verbose) {
        Ok(outcome) => {
            let use_err = color_enabled_stderr();
            log_success_stderr(use_err, &format!("Image built successfully: {}", outcome.image));
            if let Some(id) = &outcome.image_id {
                eprintln!("  image id: {id}");
            }
            println!("{}", outcome.image);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let use_err = color_enabled_stderr();
            log_error_stderr(use_err, &format!("Build failed for {}", cfg.image()));
            super::report_failure(TOOL, &e, usage_help::<BuildArgs>)
        }
    }
}
