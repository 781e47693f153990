//! Entry points for the `fuzz/` targets.
use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::PingArgs;
use crate::args::parsers::{parse_header_json, parse_methods_json};
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::error::{AppError, AppResult};
use crate::http::{EndpointResolver, Resolution, ValueSynthesizer};
use crate::openapi::{ApiSpec, parse_spec};

thread_local! {
    static BASE_MATCHES: ArgMatches = PingArgs::command().get_matches_from(["apiping"]);
}

/// Parses a `--header` JSON object.
///
/// # Errors
///
/// Returns an error when the input is not a JSON object of strings.
pub fn parse_header_json_input(input: &str) -> AppResult<Vec<(String, String)>> {
    parse_header_json(input)
        .map(|headers| headers.0.into_iter().collect())
        .map_err(AppError::from)
}

/// Parses a `--methods` JSON array.
///
/// # Errors
///
/// Returns an error when the list is malformed, empty, or names an unknown method.
pub fn parse_methods_json_input(input: &str) -> AppResult<Vec<String>> {
    parse_methods_json(input)
        .map(|methods| methods.0)
        .map_err(AppError::from)
}

/// Parses a positive `u64` the way `--timeout` does.
///
/// # Errors
///
/// Returns an error when the value is not a positive integer.
pub fn parse_positive_u64_input(input: &str) -> AppResult<u64> {
    input
        .parse::<crate::args::PositiveU64>()
        .map(crate::args::PositiveU64::get)
        .map_err(AppError::from)
}

/// Parses a positive `usize` the way `--worker` and `--loop` do.
///
/// # Errors
///
/// Returns an error when the value is not a positive integer.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    input
        .parse::<crate::args::PositiveUsize>()
        .map(crate::args::PositiveUsize::get)
        .map_err(AppError::from)
}

fn apply_config_file(config: &ConfigFile) -> AppResult<PingArgs> {
    BASE_MATCHES.with(|matches| {
        let mut args = PingArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)?;
        Ok(args)
    })
}

/// Parses a TOML config and applies it on top of default arguments.
///
/// # Errors
///
/// Returns an error when the config fails to parse or holds invalid values.
pub fn apply_config_from_toml(input: &str) -> AppResult<PingArgs> {
    let config: ConfigFile = toml::from_str(input)?;
    apply_config_file(&config)
}

/// Parses a JSON config and applies it on top of default arguments.
///
/// # Errors
///
/// Returns an error when the config fails to parse or holds invalid values.
pub fn apply_config_from_json(input: &str) -> AppResult<PingArgs> {
    let config: ConfigFile = serde_json::from_str(input)?;
    apply_config_file(&config)
}

/// Parses an API description document.
///
/// # Errors
///
/// Returns an error when the document is malformed or of an unsupported version.
pub fn parse_spec_input(input: &str) -> AppResult<ApiSpec> {
    parse_spec("fuzz", input)
}

/// Resolves every operation of `spec` against `http://fuzz.local`, pairing
/// each resolution with the pre-pass prediction for it.
#[must_use]
pub fn resolve_all(spec: &ApiSpec, seed: u64) -> Vec<(bool, Resolution)> {
    let resolver = EndpointResolver::new("http://fuzz.local", None);
    let mut synthesizer = ValueSynthesizer::seeded(seed);
    spec.operations()
        .map(|(path, operation)| {
            (
                resolver.is_resolvable(path, operation),
                resolver.resolve(&mut synthesizer, path, operation),
            )
        })
        .collect()
}
