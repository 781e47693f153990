use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header JSON '{value}': {source}")]
    InvalidHeaderJson {
        value: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid header name '{header}': {source}")]
    InvalidHeaderName {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{header}': {source}")]
    InvalidHeaderValue {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Invalid method list '{value}'. Expected a JSON array such as '[\"GET\", \"POST\"]': {source}")]
    InvalidMethodsJson {
        value: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Method list must not be empty.")]
    EmptyMethods,
    #[error("Unsupported HTTP method '{method}'.")]
    UnsupportedMethod { method: String },
    #[error("Invalid path filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Missing input (set --input or provide it in config).")]
    MissingInput,
    #[error("Missing base URL (set --base) and the API description lists no servers.")]
    MissingBase,
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Base URL '{url}' is missing a host.")]
    BaseUrlMissingHost { url: String },
    #[error("No valid server picked after {attempts} attempts.")]
    InvalidServerSelection { attempts: usize },
    #[error("Failed to read server selection: {source}")]
    ReadServerSelection {
        #[source]
        source: std::io::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
