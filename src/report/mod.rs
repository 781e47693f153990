//! Finalised run results and their console/file renderings.
mod format;
mod render;
mod writers;


use serde::Serialize;

use crate::openapi::HttpMethod;

pub use render::{render_console, render_csv, render_html, render_json, render_markdown};
pub use writers::write_report;

/// Read-only result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Units dispatched per round.
    pub routes: usize,
    pub rounds: usize,
    /// Sorted by path, then method.
    pub entries: Vec<PathReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    pub path: String,
    pub method: HttpMethod,
    #[serde(rename = "time")]
    pub avg_ms: u64,
    pub urls: Vec<String>,
    pub responses: Vec<String>,
}
