use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Failed to read API description '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to fetch API description '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Fetching API description '{url}' returned status {status}.")]
    FetchStatus { url: String, status: u16 },
    #[error("Failed to parse API description: {source}")]
    ParseJson {
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "The input '{input}' does not define its version as Swagger 2.0 or OpenAPI 3.x."
    )]
    UnsupportedVersion { input: String },
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
