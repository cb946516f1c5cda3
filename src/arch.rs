#![allow(clippy::module_name_repetitions)]
//! Target architecture for image builds and host architecture detection.

use std::env;
use std::fmt;

use crate::errors::LaunchError;
use crate::util::{ExecRequest, ExecService};

/// Environment override for the host machine identifier normally read from `uname -m`.
pub const HOST_MACHINE_ENV: &str = "CLOUD_MANUS_HOST_MACHINE";

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Arch {
    Arm64,
    Amd64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm64 => "arm64",
            Arch::Amd64 => "amd64",
        }
    }

    /// Docker `--platform` value.
    pub fn platform(&self) -> String {
        format!("linux/{}", self.as_str())
    }

    /// Map a host hardware identifier as printed by `uname -m`.
    ///
    /// Only `x86_64` and `arm64` are recognized; `aarch64` and friends are
    /// rejected so operators on those hosts pass `--arch` explicitly.
    pub fn from_host_machine(machine: &str) -> Result<Arch, LaunchError> {
        match machine.trim() {
            "x86_64" => Ok(Arch::Amd64),
            "arm64" => Ok(Arch::Arm64),
            other => Err(LaunchError::UnsupportedHost(format!(
                "unsupported architecture: {other} (supported hosts: x86_64, arm64; pass --arch to override)"
            ))),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// clap value parser for `-a/--arch`: exact, case-sensitive match.
pub fn parse_arch(s: &str) -> Result<Arch, String> {
    match s {
        "arm64" => Ok(Arch::Arm64),
        "amd64" => Ok(Arch::Amd64),
        _ => Err(format!("invalid architecture '{s}': must be one of arm64, amd64")),
    }
}

/// Read the host machine identifier, honoring the environment override.
#[tracing::instrument(level = "debug", skip(exec), err)]
pub fn host_machine(exec: &ExecService) -> Result<String, LaunchError> {
    if let Ok(v) = env::var(HOST_MACHINE_ENV) {
        if !v.trim().is_empty() {
            tracing::debug!(machine = %v.trim(), "host machine taken from environment");
            return Ok(v.trim().to_string());
        }
    }
    let out = exec.run(ExecRequest::new("uname").arg("-m").capture_output(true))?;
    if !out.status.success() {
        return Err(LaunchError::UnsupportedHost(format!(
            "failed to detect host architecture: uname -m exited with {}",
            out.status
        )));
    }
    Ok(out.stdout.trim().to_string())
}

/// Use the explicit architecture when given, otherwise detect it from the host.
pub fn resolve_arch(explicit: Option<Arch>, exec: &ExecService) -> Result<Arch, LaunchError> {
    match explicit {
        Some(a) => Ok(a),
        None => {
            let machine = host_machine(exec)?;
            let arch = Arch::from_host_machine(&machine)?;
            tracing::debug!(%machine, %arch, "detected target architecture");
            Ok(arch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_machine_mapping() {
        assert_eq!(Arch::from_host_machine("x86_64").unwrap(), Arch::Amd64);
        assert_eq!(Arch::from_host_machine("arm64").unwrap(), Arch::Arm64);
        assert_eq!(Arch::from_host_machine("x86_64\n").unwrap(), Arch::Amd64);
    }

    #[test]
    fn test_other_host_machines_rejected() {
        for m in ["aarch64", "i686", "armv7l", "riscv64", "ppc64le", "s390x", "", "AMD64"] {
            let err = Arch::from_host_machine(m).expect_err(m);
            assert!(matches!(err, LaunchError::UnsupportedHost(_)), "{m}: {err:?}");
            assert!(err.to_string().contains("unsupported architecture"));
        }
    }

    #[test]
    fn test_parse_arch_exact_match_only() {
        assert_eq!(parse_arch("arm64"), Ok(Arch::Arm64));
        assert_eq!(parse_arch("amd64"), Ok(Arch::Amd64));
        for bad in ["ARM64", "Amd64", "x86_64", "aarch64", " arm64", ""] {
            let err = parse_arch(bad).expect_err(bad);
            assert!(err.contains("invalid architecture"), "{bad}: {err}");
        }
    }

    #[test]
    fn test_platform_string() {
        assert_eq!(Arch::Arm64.platform(), "linux/arm64");
        assert_eq!(Arch::Amd64.platform(), "linux/amd64");
    }

    #[test]
    fn test_resolve_arch_prefers_explicit() {
        let exec = ExecService::default();
        assert_eq!(resolve_arch(Some(Arch::Arm64), &exec).unwrap(), Arch::Arm64);
    }
}
