#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Stand-in `docker` that logs its argv and answers from env vars:
/// - FAKE_DOCKER_CONTAINERS: space-separated existing container names
/// - FAKE_DOCKER_IMAGES: space-separated existing image references
/// - FAKE_DOCKER_{RM,BUILD,RUN}_EXIT: exit status of those subcommands
const FAKE_DOCKER: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_DOCKER_LOG"
case "$1" in
  ps)
    for c in $FAKE_DOCKER_CONTAINERS; do echo "$c"; done
    exit 0
    ;;
  image)
    for last in "$@"; do :; done
    for i in $FAKE_DOCKER_IMAGES; do
      if [ "$i" = "$last" ]; then
        [ "$3" = "--format" ] && echo "sha256:0123abcd"
        exit 0
      fi
    done
    exit 1
    ;;
  rm) exit "${FAKE_DOCKER_RM_EXIT:-0}" ;;
  build) exit "${FAKE_DOCKER_BUILD_EXIT:-0}" ;;
  run) exit "${FAKE_DOCKER_RUN_EXIT:-0}" ;;
esac
exit 0
"#;

pub struct FakeDocker {
    dir: tempfile::TempDir,
    log: PathBuf,
}

impl FakeDocker {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tmpdir");
        let script = dir.path().join("docker");
        fs::write(&script, FAKE_DOCKER).expect("write fake docker");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
        let log = dir.path().join("calls.log");
        fs::write(&log, "").expect("create log");
        Self { dir, log }
    }

    /// Command for one of the crate binaries with the fake docker first on PATH.
    pub fn command(&self, bin: &str) -> Command {
        let path = format!(
            "{}:{}",
            self.dir.path().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let mut cmd = Command::new(bin);
        cmd.env("PATH", path)
            .env("FAKE_DOCKER_LOG", &self.log)
            .env("NO_COLOR", "1")
            .env_remove("CLOUD_MANUS_SKIP_DOCKER")
            .env_remove("CLOUD_MANUS_BUILD_CONTEXT")
            .env_remove("CLOUD_MANUS_HOST_MACHINE")
            .env_remove("CLOUD_MANUS_LOG")
            .env_remove("FAKE_DOCKER_CONTAINERS")
            .env_remove("FAKE_DOCKER_IMAGES");
        cmd
    }

    /// Every docker invocation so far, one argv line each.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn output_text(out: &Output) -> (String, String) {
    (
        String::from_utf8_lossy(&out.stdout).to_string(),
        String::from_utf8_lossy(&out.stderr).to_string(),
    )
}
