use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{HeaderSet, PingArgs, PositiveU64, PositiveUsize};
use crate::args::parsers::normalize_methods;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values given explicitly on
/// the command line win over the config file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(args: &mut PingArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_cli(matches, "input")
        && let Some(input) = config.input.clone()
    {
        args.input = Some(input);
    }

    if !is_cli(matches, "base")
        && let Some(base) = config.base.clone()
    {
        args.base = Some(base);
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output
    {
        args.output = output;
    }

    if !is_cli(matches, "out_dir")
        && let Some(out_dir) = config.out_dir.clone()
    {
        args.out_dir = out_dir;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.clone()
    {
        args.headers = HeaderSet(headers);
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = ensure_positive_usize(workers, "workers")?;
    }

    if !is_cli(matches, "timeout_secs")
        && let Some(timeout) = config.timeout
    {
        args.timeout_secs = ensure_positive_u64(timeout, "timeout")?;
    }

    if !is_cli(matches, "rounds")
        && let Some(rounds) = config.rounds
    {
        args.rounds = ensure_positive_usize(rounds, "rounds")?;
    }

    if !is_cli(matches, "capture_response")
        && let Some(capture) = config.capture_response
    {
        args.capture_response = capture;
    }

    if !is_cli(matches, "methods")
        && let Some(methods) = config.methods.clone()
    {
        args.methods = normalize_methods(methods).map_err(AppError::validation)?;
    }

    if !is_cli(matches, "filter")
        && let Some(filter) = config.filter.clone()
    {
        args.filter = Some(filter);
    }

    if !is_cli(matches, "threshold")
        && let Some(threshold) = config.threshold
    {
        args.threshold = Some(threshold);
    }

    if !is_cli(matches, "no_progress")
        && let Some(no_progress) = config.no_progress
    {
        args.no_progress = no_progress;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
