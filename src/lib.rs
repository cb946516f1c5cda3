//! cloud-manus launcher library.
//!
//! Two entry points share this crate:
//! - `cloud-manus-build` resolves the target architecture (explicit or from
//!   `uname -m`) and issues one `docker build`.
//! - `cloud-manus-run` merges named flags with legacy positional arguments,
//!   checks for a name collision and for the local image, then issues one
//!   `docker run`.

pub mod arch;
mod banner;
pub mod cli;
mod color;
pub mod commands;
pub mod config;
pub mod docker;
mod errors;
mod telemetry;
pub mod util;

pub use arch::{parse_arch, resolve_arch, Arch, HOST_MACHINE_ENV};
pub use banner::{print_build_summary, print_run_summary, print_startup_banner};
pub use cli::{parse_from, usage_help, BuildArgs, CommonArgs, Parsed, RunArgs};
pub use color::{
    color_enabled_stderr, log_error_stderr, log_info_stderr, log_success_stderr,
    log_warn_stderr, paint, set_color_mode, ColorMode,
};
pub use commands::{build_main, execute_build, execute_run, run_main, BuildOutcome, RunOutcome};
pub use config::{
    image_ref, merge_run_config, BuildConfig, MissingFields, RunConfig, RunFlags,
    DEFAULT_CONTAINER_NAME, DEFAULT_PORT, DEFAULT_TAG, IMAGE_REPO,
};
pub use docker::{container_runtime_path, ContainerEngine, DockerEngine};
pub use errors::{exit_code_for_launch_error, LaunchError};
pub use telemetry::telemetry_init;
pub use util::{shell_escape, shell_join, ExecRequest, ExecService};
