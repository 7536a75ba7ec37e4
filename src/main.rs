//! `pr-commenters` CLI entrypoint.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pr_commenters::{CommentersConfig, IntakeError};
use tracing_subscriber::EnvFilter;

mod cli;

/// Flags whose value is the following argument.
const VALUE_FLAGS: [&str; 13] = [
    "--input",
    "-i",
    "--token",
    "-t",
    "--output",
    "-o",
    "--api-url",
    "-A",
    "--debug-log",
    "-D",
    "--requests-per-pull-request",
    "-r",
    "--config-path",
];

/// Enables the debug trace; deliberately absent from `--help`.
const DEBUG_FLAG: &str = "--debug";

/// Exit code for command-line usage errors.
const USAGE_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let code = if error.is_usage_error() {
                ExitCode::from(USAGE_ERROR)
            } else {
                ExitCode::FAILURE
            };
            if writeln!(io::stderr().lock(), "Error: {error}").is_err() {
                return ExitCode::FAILURE;
            }
            code
        }
    }
}

/// Default diagnostics filter. Octocrab logs every failed request itself;
/// those failures are already reported through the returned error.
const DEFAULT_LOG_FILTER: &str = "warn,octocrab=off";

/// Installs the stderr diagnostics subscriber; `RUST_LOG` overrides
/// [`DEFAULT_LOG_FILTER`].
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .unwrap_or_default();
}

async fn run() -> Result<(), IntakeError> {
    let config = load_config(std::env::args_os())?;
    cli::commenters::run(&config).await
}

/// Loads configuration from CLI, environment, and files, then validates it.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files, and the validation error when the
/// input file is missing or settings are inconsistent.
fn load_config<I>(args: I) -> Result<CommentersConfig, IntakeError>
where
    I: IntoIterator<Item = OsString>,
{
    let (debug, without_debug) = extract_debug_flag(args);
    let (input, filtered) = extract_positional_input(without_debug);
    let mut config =
        CommentersConfig::load_from_iter(filtered).map_err(|error| IntakeError::Configuration {
            message: error.to_string(),
        })?;
    config.set_input(input);
    config.debug |= debug;
    config.validate()?;
    Ok(config)
}

/// Removes every [`DEBUG_FLAG`] occurrence that is neither a flag value nor
/// after `--`.
fn extract_debug_flag<I>(args: I) -> (bool, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut enabled = false;
    let mut remaining = Vec::new();
    let mut after_separator = false;
    let mut expects_value = false;

    for arg in args {
        let text = arg.to_string_lossy();
        if !after_separator && !expects_value && text == DEBUG_FLAG {
            enabled = true;
            continue;
        }

        after_separator = after_separator || (!expects_value && text == "--");
        expects_value = !after_separator && !expects_value && VALUE_FLAGS.contains(&&*text);
        remaining.push(arg);
    }

    (enabled, remaining)
}

/// Splits the first positional argument (the input CSV) from the flags.
///
/// Values following a flag listed in [`VALUE_FLAGS`] are not positional.
/// Everything after `--` is positional; the separator itself is dropped.
fn extract_positional_input<I>(args: I) -> (Option<String>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let mut remaining: Vec<OsString> = iter.next().into_iter().collect();
    let mut positional = None;
    let mut after_separator = false;
    let mut expects_value = false;

    for arg in iter {
        let text = arg.to_string_lossy();
        let is_candidate = after_separator || (!expects_value && !text.starts_with('-'));

        if !after_separator && !expects_value && text == "--" {
            after_separator = true;
            continue;
        }

        if is_candidate && positional.is_none() {
            positional = Some(text.into_owned());
            continue;
        }

        expects_value = !after_separator && !expects_value && VALUE_FLAGS.contains(&&*text);
        remaining.push(arg);
    }

    (positional, remaining)
}
