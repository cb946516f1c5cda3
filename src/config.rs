#![allow(clippy::module_name_repetitions)]
//! Resolved launch configuration and the flag/positional merge.

use std::fmt;

use crate::arch::Arch;

/// Image repository both entry points agree on.
pub const IMAGE_REPO: &str = "cloud-manus";
pub const DEFAULT_TAG: &str = "latest";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CONTAINER_NAME: &str = "openmanus";
/// Port the service listens on inside the container.
pub const CONTAINER_PORT: u16 = 8000;
/// Build-time variable carrying the target architecture.
pub const ARCH_BUILD_ARG: &str = "ARCH";

pub const MODEL_ENV: &str = "LLM_MODEL";
pub const BASE_URL_ENV: &str = "LLM_BASE_URL";
pub const API_KEY_ENV: &str = "LLM_API_KEY";

/// Full image reference for a tag, e.g. `cloud-manus:latest`.
pub fn image_ref(tag: &str) -> String {
    format!("{IMAGE_REPO}:{tag}")
}

/// clap value parser for image tags (Docker tag grammar).
pub fn validate_tag(s: &str) -> Result<String, String> {
    let mut chars = s.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "_.-".contains(c));
    if first_ok && rest_ok && s.len() <= 128 {
        Ok(s.to_string())
    } else {
        Err(format!(
            "invalid tag '{s}': use letters, digits, '_', '.', '-' (max 128, not starting with '.' or '-')"
        ))
    }
}

/// clap value parser for container names (Docker name grammar).
pub fn validate_container_name(s: &str) -> Result<String, String> {
    let mut chars = s.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "_.-".contains(c));
    if first_ok && rest_ok {
        Ok(s.to_string())
    } else {
        Err(format!(
            "invalid container name '{s}': must start with a letter or digit and contain only letters, digits, '_', '.', '-'"
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    pub arch: Arch,
    pub tag: String,
}

impl BuildConfig {
    pub fn image(&self) -> String {
        image_ref(&self.tag)
    }
}

/// Raw run-side parse result before the positional merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunFlags {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub port: u16,
    pub tag: String,
    pub container_name: String,
    pub restart: bool,
}

impl Default for RunFlags {
    fn default() -> Self {
        Self {
            model: None,
            base_url: None,
            api_key: None,
            port: DEFAULT_PORT,
            tag: DEFAULT_TAG.to_string(),
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            restart: false,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub port: u16,
    pub tag: String,
    pub container_name: String,
    pub restart: bool,
}

impl RunConfig {
    pub fn image(&self) -> String {
        image_ref(&self.tag)
    }

    pub fn service_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

// Hand-written so the API key never lands in logs or panic messages.
impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("tag", &self.tag)
            .field("container_name", &self.container_name)
            .field("restart", &self.restart)
            .finish()
    }
}

/// Which required run fields stayed empty after the merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingFields {
    pub model: bool,
    pub base_url: bool,
    pub api_key: bool,
}

impl MissingFields {
    pub fn names(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.model {
            out.push("model");
        }
        if self.base_url {
            out.push("base URL");
        }
        if self.api_key {
            out.push("API key");
        }
        out
    }

    /// One line per field, e.g. `  model (-m/--model): missing`.
    pub fn report(&self) -> String {
        let line = |label: &str, missing: bool| {
            format!("  {label}: {}", if missing { "missing" } else { "provided" })
        };
        [
            line("model (-m/--model)", self.model),
            line("base URL (-u/--url)", self.base_url),
            line("API key (-k/--key)", self.api_key),
        ]
        .join("\n")
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required arguments: {}", self.names().join(", "))
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

/// Merge named flags with legacy positional values.
///
/// Positional index 0, 1, 2 fill model, base URL, API key only when the
/// corresponding flag left the field empty. Extra positionals are ignored.
pub fn merge_run_config(flags: RunFlags, positional: &[String]) -> Result<RunConfig, MissingFields> {
    let pick = |flag: Option<String>, idx: usize| {
        non_empty(flag).or_else(|| non_empty(positional.get(idx).cloned()))
    };
    let model = pick(flags.model, 0);
    let base_url = pick(flags.base_url, 1);
    let api_key = pick(flags.api_key, 2);

    match (model, base_url, api_key) {
        (Some(model), Some(base_url), Some(api_key)) => Ok(RunConfig {
            model,
            base_url,
            api_key,
            port: flags.port,
            tag: flags.tag,
            container_name: flags.container_name,
            restart: flags.restart,
        }),
        (m, u, k) => Err(MissingFields {
            model: m.is_none(),
            base_url: u.is_none(),
            api_key: k.is_none(),
        }),
    }
}
