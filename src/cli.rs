use std::ffi::OsString;

use clap::{Args, CommandFactory, Parser};

use crate::arch::{parse_arch, Arch};
use crate::color::ColorMode;
use crate::config::{
    validate_container_name, validate_tag, RunFlags, DEFAULT_CONTAINER_NAME, DEFAULT_PORT,
    DEFAULT_TAG,
};

/// Options shared by both entry points.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Print the docker command before running it and enable debug logs
    #[arg(long)]
    pub verbose: bool,

    /// Resolve and validate, print the docker command(s), but do not execute
    #[arg(long)]
    pub dry_run: bool,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub color: Option<ColorMode>,
}

#[derive(Parser, Debug)]
#[command(
    name = "cloud-manus-build",
    version,
    about = "Build the cloud-manus Docker image for arm64 or amd64.",
    after_long_help = "Examples:\n  cloud-manus-build\n  cloud-manus-build --arch amd64 --tag v1.0\n  cloud-manus-build -a arm64 -t dev --dry-run\n"
)]
pub struct BuildArgs {
    /// Target architecture: arm64 or amd64 (default: detected from the host)
    #[arg(short = 'a', long = "arch", value_parser = parse_arch, value_name = "ARCH", overrides_with = "arch")]
    pub arch: Option<Arch>,

    /// Image tag
    #[arg(short = 't', long = "tag", default_value = DEFAULT_TAG, value_parser = validate_tag, overrides_with = "tag")]
    pub tag: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "cloud-manus-run",
    version,
    about = "Start a cloud-manus container from a previously built image.",
    override_usage = "cloud-manus-run [OPTIONS] -m <MODEL> -u <URL> -k <KEY>\n       cloud-manus-run [OPTIONS] <MODEL> <BASE_URL> <API_KEY>",
    after_long_help = "Examples:\n  cloud-manus-run -m gpt-4o -u https://api.openai.com/v1 -k sk-...\n  cloud-manus-run -p 9000 -t v1.0 -n manus-dev -r -m gpt-4o -u https://api.openai.com/v1 -k sk-...\n  cloud-manus-run gpt-4o https://api.openai.com/v1 sk-...   (legacy positional form)\n"
)]
pub struct RunArgs {
    /// Host port published to the service port 8000
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..), overrides_with = "port")]
    pub port: u16,

    /// Image tag to start
    #[arg(short = 't', long = "tag", default_value = DEFAULT_TAG, value_parser = validate_tag, overrides_with = "tag")]
    pub tag: String,

    /// Container name
    #[arg(short = 'n', long = "name", default_value = DEFAULT_CONTAINER_NAME, value_parser = validate_container_name, overrides_with = "name")]
    pub name: String,

    /// Remove an existing container with the same name before starting
    /// (removal happens before the image check)
    #[arg(short = 'r', long = "restart", overrides_with = "restart")]
    pub restart: bool,

    /// Model name passed to the service
    #[arg(short = 'm', long = "model", overrides_with = "model")]
    pub model: Option<String>,

    /// Base URL of the model API
    #[arg(short = 'u', long = "url", overrides_with = "url")]
    pub url: Option<String>,

    /// API key for the model API
    #[arg(short = 'k', long = "key", overrides_with = "key")]
    pub key: Option<String>,

    /// Legacy positional form: MODEL BASE_URL API_KEY (named flags win)
    #[arg(value_name = "LEGACY")]
    pub positional: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RunArgs {
    /// Split into the flag record and the positional list for the merge.
    pub fn into_parts(self) -> (RunFlags, Vec<String>, CommonArgs) {
        let flags = RunFlags {
            model: self.model,
            base_url: self.url,
            api_key: self.key,
            port: self.port,
            tag: self.tag,
            container_name: self.name,
            restart: self.restart,
        };
        (flags, self.positional, self.common)
    }
}

/// Outcome of parsing one entry point's argv.
#[derive(Debug)]
pub enum Parsed<T> {
    Args(T),
    /// Help or version was requested; print this text and exit 0.
    Info(String),
    /// Usage error; print this text and the usage help, exit 1.
    Usage(String),
}

/// Parse argv without letting clap exit the process (clap would use exit code 2).
pub fn parse_from<T, I, S>(argv: I) -> Parsed<T>
where
    T: Parser,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    match T::try_parse_from(argv) {
        Ok(args) => Parsed::Args(args),
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                Parsed::Info(e.render().to_string())
            }
            clap::error::ErrorKind::UnknownArgument => {
                let rendered = e.render().to_string();
                match e.get(clap::error::ContextKind::InvalidArg) {
                    Some(clap::error::ContextValue::String(arg)) => {
                        Parsed::Usage(format!("unknown option: {arg}\n{rendered}"))
                    }
                    _ => Parsed::Usage(rendered),
                }
            }
            _ => Parsed::Usage(e.render().to_string()),
        },
    }
}

/// Full help text for an entry point.
pub fn usage_help<T: CommandFactory>() -> String {
    T::command().render_help().to_string()
}
