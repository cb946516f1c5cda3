//! Error mapping guide:
//! - Every failure exits 1, including a missing container engine binary.
//! - Usage and unsupported-host errors are printed together with the usage help.
//! - Keep user-visible strings stable; integration tests match on them.
use std::fmt;
use std::io;

/// Failure taxonomy of both entry points.
#[derive(Debug)]
pub enum LaunchError {
    /// Bad command-line input: unknown flag, invalid value, missing required field.
    Usage(String),
    /// Host machine identifier outside the supported set.
    UnsupportedHost(String),
    /// Engine state prevents the launch: name collision, failed removal, missing image.
    Precondition(String),
    /// The build or run invocation itself exited non-zero.
    External(String),
    Io(io::Error),
}

impl LaunchError {
    /// True when the binaries should follow the message with usage help.
    pub fn wants_usage(&self) -> bool {
        matches!(self, LaunchError::Usage(_) | LaunchError::UnsupportedHost(_))
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::Usage(s)
            | LaunchError::UnsupportedHost(s)
            | LaunchError::Precondition(s)
            | LaunchError::External(s) => f.write_str(s),
            LaunchError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LaunchError {
    fn from(e: io::Error) -> Self {
        LaunchError::Io(e)
    }
}

impl From<anyhow::Error> for LaunchError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<io::Error>() {
            Ok(ioe) => LaunchError::Io(ioe),
            Err(other) => LaunchError::External(format!("{other:#}")),
        }
    }
}

/// Process exit code for a failed launch. The contract is 0 or 1 only.
pub fn exit_code_for_launch_error(_e: &LaunchError) -> u8 {
    1
}
