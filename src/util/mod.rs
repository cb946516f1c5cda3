#![allow(clippy::module_name_repetitions)]
//! Small utilities: shell escaping for command previews, process execution.

pub mod exec;

use std::ffi::OsString;

pub use exec::{ExecOutput, ExecRequest, ExecService};

pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

/// Render `program args...` as a copy-pasteable shell line.
pub fn command_preview(program: &str, args: &[OsString]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push(program.to_string());
    words.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    shell_join(&words)
}
