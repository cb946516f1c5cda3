#![allow(clippy::module_name_repetitions)]
//! Docker command construction, runtime discovery and engine access.
//!
//! Submodules are organized by responsibility; stable entry points are
//! re-exported here.

pub(crate) mod build;
pub(crate) mod engine;
pub(crate) mod env;
pub(crate) mod run;
pub(crate) mod runtime;

pub use build::build_image_args;
pub use engine::{ContainerEngine, DockerEngine};
pub use run::{logs_hint, remove_container_args, run_container_args, run_preview};
pub use runtime::container_runtime_path;
