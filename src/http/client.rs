use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, AppResult, HttpError};

/// Builds the client shared by every worker. `timeout` bounds each call.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
