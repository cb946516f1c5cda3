#![allow(clippy::module_name_repetitions)]
//! Docker `build` command construction.

use std::ffi::OsString;

use crate::config::{BuildConfig, ARCH_BUILD_ARG};

/// Arguments after `docker` for building the image described by `cfg`.
///
/// `docker build --platform linux/<arch> -t cloud-manus:<tag> --build-arg ARCH=<arch> <context>`
pub fn build_image_args(cfg: &BuildConfig, context: &str) -> Vec<OsString> {
    vec![
        OsString::from("build"),
        OsString::from("--platform"),
        OsString::from(cfg.arch.platform()),
        OsString::from("-t"),
        OsString::from(cfg.image()),
        OsString::from("--build-arg"),
        OsString::from(format!("{ARCH_BUILD_ARG}={}", cfg.arch.as_str())),
        OsString::from(context),
    ]
}
