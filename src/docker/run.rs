#![allow(clippy::module_name_repetitions)]
//! Docker `run` command construction and preview rendering.

use std::ffi::OsString;

use crate::config::{RunConfig, API_KEY_ENV, BASE_URL_ENV, CONTAINER_PORT, MODEL_ENV};
use crate::docker::env::{push_env_kv, redact_env_values};
use crate::util::command_preview;

/// Service entry command inside the image.
const ENTRY_COMMAND: &[&str] = &["python", "app.py", "--host", "0.0.0.0", "--port"];

/// Arguments after `docker` for starting the service container.
pub fn run_container_args(cfg: &RunConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        OsString::from("run"),
        OsString::from("-d"),
        OsString::from("--name"),
        OsString::from(&cfg.container_name),
        OsString::from("-p"),
        OsString::from(format!("{}:{}", cfg.port, CONTAINER_PORT)),
    ];
    push_env_kv(&mut args, MODEL_ENV, &cfg.model);
    push_env_kv(&mut args, BASE_URL_ENV, &cfg.base_url);
    push_env_kv(&mut args, API_KEY_ENV, &cfg.api_key);
    args.push(OsString::from(cfg.image()));
    args.extend(ENTRY_COMMAND.iter().map(OsString::from));
    args.push(OsString::from(CONTAINER_PORT.to_string()));
    args
}

pub fn remove_container_args(name: &str) -> Vec<OsString> {
    vec![
        OsString::from("rm"),
        OsString::from("-f"),
        OsString::from(name),
    ]
}

/// Preview of the run command with the API key masked.
pub fn run_preview(program: &str, cfg: &RunConfig) -> String {
    let args = redact_env_values(&run_container_args(cfg), &[API_KEY_ENV]);
    command_preview(program, &args)
}

/// Command an operator uses to follow the service logs.
pub fn logs_hint(name: &str) -> String {
    format!("docker logs -f {name}")
}
