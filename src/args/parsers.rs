use std::collections::BTreeMap;

use super::types::{HeaderSet, MethodSet, PositiveU64, PositiveUsize};
use crate::error::ValidationError;

/// Methods an API description can define on a path item.
const KNOWN_METHODS: [&str; 8] = [
    "GET", "PUT", "POST", "DELETE", "OPTIONS", "HEAD", "PATCH", "TRACE",
];

/// Parses a JSON object such as `{"Authorization": "Bearer TOKEN"}`.
pub(crate) fn parse_header_json(s: &str) -> Result<HeaderSet, ValidationError> {
    let headers: BTreeMap<String, String> =
        serde_json::from_str(s).map_err(|err| ValidationError::InvalidHeaderJson {
            value: s.to_owned(),
            source: err,
        })?;
    Ok(HeaderSet(headers))
}

/// Parses a JSON array such as `["GET", "POST"]` into upper-cased, de-duplicated methods.
pub(crate) fn parse_methods_json(s: &str) -> Result<MethodSet, ValidationError> {
    let raw: Vec<String> =
        serde_json::from_str(s).map_err(|err| ValidationError::InvalidMethodsJson {
            value: s.to_owned(),
            source: err,
        })?;
    normalize_methods(raw)
}

pub(crate) fn normalize_methods(raw: Vec<String>) -> Result<MethodSet, ValidationError> {
    let mut methods: Vec<String> = Vec::with_capacity(raw.len());
    for method in raw {
        let upper = method.trim().to_ascii_uppercase();
        if !KNOWN_METHODS.contains(&upper.as_str()) {
            return Err(ValidationError::UnsupportedMethod { method });
        }
        if !methods.contains(&upper) {
            methods.push(upper);
        }
    }
    if methods.is_empty() {
        return Err(ValidationError::EmptyMethods);
    }
    Ok(MethodSet(methods))
}

pub(super) fn parse_positive_u64(s: &str) -> Result<PositiveU64, ValidationError> {
    s.parse::<PositiveU64>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

pub(crate) fn parse_bool_env(s: &str) -> Result<bool, ValidationError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        }),
    }
}
