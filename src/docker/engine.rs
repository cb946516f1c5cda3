#![allow(clippy::module_name_repetitions)]
//! Access to the container engine.
//!
//! The launch flows only talk to the engine through [`ContainerEngine`], so
//! they can be exercised against an in-memory engine in tests.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::docker::run::remove_container_args;
use crate::docker::runtime::container_runtime_path;
use crate::errors::LaunchError;
use crate::util::{ExecRequest, ExecService};

pub trait ContainerEngine {
    /// Program name shown in previews.
    fn program(&self) -> String;

    /// True when a container (running or stopped) has exactly this name.
    fn container_exists(&self, name: &str) -> Result<bool, LaunchError>;

    /// Force-remove a container.
    fn remove_container(&self, name: &str) -> Result<(), LaunchError>;

    /// True when the image reference resolves locally (never pulls).
    fn image_exists(&self, image: &str) -> Result<bool, LaunchError>;

    /// Local image id for a reference, best effort.
    fn image_id(&self, image: &str) -> Option<String>;

    /// Run the engine with inherited stdio until it exits; true on exit status 0.
    fn execute(&self, args: &[OsString]) -> Result<bool, LaunchError>;
}

/// The `docker` CLI found on PATH.
#[derive(Debug, Clone)]
pub struct DockerEngine {
    runtime: PathBuf,
    exec: ExecService,
}

impl DockerEngine {
    pub fn new(runtime: PathBuf, exec: ExecService) -> Self {
        Self { runtime, exec }
    }

    /// Locate `docker` on PATH.
    pub fn locate() -> Result<Self, LaunchError> {
        let runtime = container_runtime_path()?;
        tracing::debug!(runtime = %runtime.display(), "using container runtime");
        Ok(Self::new(runtime, ExecService::default()))
    }

    fn query<I, S>(&self, args: I) -> Result<crate::util::ExecOutput, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let out = self.exec.run(
            ExecRequest::new(&self.runtime)
                .args(args)
                .capture_output(true),
        )?;
        tracing::debug!(
            status = %out.status,
            elapsed_ms = out.duration.as_millis() as u64,
            "engine query finished"
        );
        Ok(out)
    }
}

impl ContainerEngine for DockerEngine {
    fn program(&self) -> String {
        "docker".to_string()
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    fn container_exists(&self, name: &str) -> Result<bool, LaunchError> {
        let filter = format!("name=^/?{name}$");
        let out = self.query(["ps", "-a", "--filter", filter.as_str(), "--format", "{{.Names}}"])?;
        if !out.status.success() {
            return Err(LaunchError::Precondition(format!(
                "failed to list containers (docker ps exited with {}): {}",
                out.status,
                out.stderr.trim()
            )));
        }
        // The filter is a regex on the engine side; compare exactly here as well.
        Ok(out.stdout.lines().any(|l| l.trim() == name))
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    fn remove_container(&self, name: &str) -> Result<(), LaunchError> {
        let out = self.query(remove_container_args(name))?;
        if out.status.success() {
            Ok(())
        } else {
            Err(LaunchError::Precondition(format!(
                "failed to remove existing container '{name}': {}",
                out.stderr.trim()
            )))
        }
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    fn image_exists(&self, image: &str) -> Result<bool, LaunchError> {
        let out = self.query(["image", "inspect", image])?;
        Ok(out.status.success())
    }

    fn image_id(&self, image: &str) -> Option<String> {
        let out = self
            .query(["image", "inspect", "--format", "{{.Id}}", image])
            .ok()?;
        let id = out.stdout.trim();
        if out.status.success() && !id.is_empty() {
            Some(id.to_string())
        } else {
            None
        }
    }

    fn execute(&self, args: &[OsString]) -> Result<bool, LaunchError> {
        tracing::info!(args = ?args.first(), "invoking container engine");
        let out = self.exec.run(
            ExecRequest::new(&self.runtime)
                .args(args.iter().cloned())
                .timeout(Duration::ZERO),
        )?;
        tracing::info!(status = %out.status, elapsed_ms = out.duration.as_millis() as u64, "container engine exited");
        Ok(out.status.success())
    }
}
