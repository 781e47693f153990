use std::collections::BTreeMap;

use serde::Deserialize;

use crate::args::OutputFormat;

/// Values accepted in `apiping.toml` / `apiping.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<String>,
    pub base: Option<String>,
    #[serde(alias = "out")]
    pub output: Option<OutputFormat>,
    pub out_dir: Option<String>,
    #[serde(alias = "header")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(alias = "worker")]
    pub workers: Option<usize>,
    pub timeout: Option<u64>,
    #[serde(alias = "loop")]
    pub rounds: Option<usize>,
    #[serde(alias = "response")]
    pub capture_response: Option<bool>,
    pub methods: Option<Vec<String>>,
    pub filter: Option<String>,
    pub threshold: Option<u64>,
    pub no_progress: Option<bool>,
}
