use std::collections::BTreeMap;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apiping/", env!("CARGO_PKG_VERSION"));

/// Default config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["apiping.toml", "apiping.json"];

/// Header set sent with every call before user overrides are applied.
pub(crate) fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_owned(), "*/*".to_owned());
    headers.insert("Connection".to_owned(), "Keep-Alive".to_owned());
    headers.insert("Content-Type".to_owned(), "application/json".to_owned());
    headers.insert("User-Agent".to_owned(), DEFAULT_USER_AGENT.to_owned());
    headers
}
