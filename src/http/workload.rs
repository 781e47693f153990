use std::sync::Arc;

use reqwest::header::HeaderMap;

use crate::openapi::HttpMethod;

/// Text recorded as the response of a call whose body was not captured.
pub const UNCAPTURED_RESPONSE: &str = "-";

/// One call to make in the current round.
#[derive(Debug, Clone)]
pub struct WorkUnit {
    pub method: HttpMethod,
    pub path: Arc<str>,
    pub url: String,
    pub headers: Arc<HeaderMap>,
}

/// The timed result of one [`WorkUnit`]. Exactly one is produced per unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub path: Arc<str>,
    pub method: HttpMethod,
    pub url: String,
    pub elapsed_ms: u64,
    pub response: Option<String>,
    pub failed: bool,
    pub error: Option<String>,
}

impl Outcome {
    #[must_use]
    pub fn succeeded(unit: WorkUnit, elapsed_ms: u64, response: Option<String>) -> Self {
        Self {
            path: unit.path,
            method: unit.method,
            url: unit.url,
            elapsed_ms,
            response,
            failed: false,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(unit: WorkUnit, elapsed_ms: u64, error: String) -> Self {
        Self {
            path: unit.path,
            method: unit.method,
            url: unit.url,
            elapsed_ms,
            response: None,
            failed: true,
            error: Some(error),
        }
    }

    /// What the report shows in the response column for this call.
    #[must_use]
    pub fn response_text(&self) -> String {
        if let Some(error) = self.error.as_deref() {
            return format!("[apiping] The HTTP request failed with error {}", error);
        }
        self.response
            .clone()
            .unwrap_or_else(|| UNCAPTURED_RESPONSE.to_owned())
    }
}
