#![allow(clippy::module_name_repetitions)]
//! Docker `-e` argument helpers.

use std::ffi::OsString;

pub(crate) fn push_env_kv(args: &mut Vec<OsString>, key: &str, val: &str) {
    args.push(OsString::from("-e"));
    args.push(OsString::from(format!("{key}={val}")));
}

/// Mask the value of `-e KEY=...` for the given keys so previews can be printed.
pub(crate) fn redact_env_values(args: &[OsString], secret_keys: &[&str]) -> Vec<OsString> {
    let mut out = Vec::with_capacity(args.len());
    let mut after_e = false;
    for a in args {
        let s = a.to_string_lossy();
        if after_e {
            if let Some((k, _)) = s.split_once('=') {
                if secret_keys.contains(&k) {
                    out.push(OsString::from(format!("{k}=***")));
                    after_e = false;
                    continue;
                }
            }
        }
        after_e = s == "-e";
        out.push(a.clone());
    }
    out
}
