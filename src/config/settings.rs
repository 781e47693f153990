use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::args::{MethodSet, OutputFormat, PingArgs, default_headers};
use crate::error::{AppError, AppResult, ValidationError};

/// Validated run settings derived from [`PingArgs`] after config merging.
#[derive(Debug, Clone)]
pub struct PingSettings {
    pub output: OutputFormat,
    pub out_dir: PathBuf,
    pub headers: Arc<HeaderMap>,
    pub methods: MethodSet,
    pub filter: Option<Regex>,
    pub workers: usize,
    pub timeout: Duration,
    pub rounds: usize,
    pub capture_response: bool,
    pub threshold_ms: Option<u64>,
    pub show_progress: bool,
}

impl PingSettings {
    /// Builds settings from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when a header or the path filter is invalid.
    pub fn from_args(args: &PingArgs) -> AppResult<Self> {
        let headers = build_headers(&args.headers.0)?;
        let filter = args
            .filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| {
                    AppError::validation(ValidationError::InvalidFilter {
                        pattern: pattern.to_owned(),
                        source: err,
                    })
                })
            })
            .transpose()?;

        Ok(Self {
            output: args.output,
            out_dir: PathBuf::from(&args.out_dir),
            headers: Arc::new(headers),
            methods: args.methods.clone(),
            filter,
            workers: args.workers.get(),
            timeout: Duration::from_secs(args.timeout_secs.get()),
            rounds: args.rounds.get(),
            capture_response: args.capture_response,
            threshold_ms: args.threshold,
            show_progress: !args.no_progress,
        })
    }
}

/// Default headers overlaid with user-supplied ones. Header names compare
/// case-insensitively, so `user-agent` replaces the default `User-Agent`.
pub(crate) fn build_headers(
    overrides: &std::collections::BTreeMap<String, String>,
) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in default_headers().iter().chain(overrides.iter()) {
        let header_name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|err| {
            AppError::validation(ValidationError::InvalidHeaderName {
                header: name.clone(),
                source: err,
            })
        })?;
        let header_value = HeaderValue::from_str(value.trim()).map_err(|err| {
            AppError::validation(ValidationError::InvalidHeaderValue {
                header: name.clone(),
                source: err,
            })
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Checks that a base URL is absolute and has a host, returning it without a
/// trailing slash.
///
/// # Errors
///
/// Returns an error when the URL does not parse or lacks a host.
pub fn validate_base_url(base: &str) -> AppResult<String> {
    let trimmed = base.trim();
    let url = Url::parse(trimmed).map_err(|err| {
        AppError::validation(ValidationError::InvalidBaseUrl {
            url: trimmed.to_owned(),
            source: err,
        })
    })?;
    if url.host_str().is_none() {
        return Err(AppError::validation(ValidationError::BaseUrlMissingHost {
            url: trimmed.to_owned(),
        }));
    }
    Ok(trimmed.trim_end_matches('/').to_owned())
}
