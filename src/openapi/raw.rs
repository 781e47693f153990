//! Wire shapes of OpenAPI 3.x and Swagger 2.0 documents. Only the fields the
//! pinger reads are modelled; everything else is ignored by serde.
use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct RawVersion {
    pub openapi: Option<String>,
    pub swagger: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawDocument {
    pub info: Option<RawInfo>,
    #[serde(default)]
    pub servers: Vec<RawServer>,
    pub host: Option<String>,
    pub base_path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub paths: BTreeMap<String, RawPathItem>,
    #[serde(default)]
    pub components: RawComponents,
    #[serde(default)]
    pub parameters: BTreeMap<String, RawParameter>,
    #[serde(default)]
    pub definitions: BTreeMap<String, RawSchema>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawInfo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawServer {
    pub url: String,
    #[serde(default)]
    pub variables: BTreeMap<String, RawServerVariable>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawServerVariable {
    pub default: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawComponents {
    #[serde(default)]
    pub parameters: BTreeMap<String, RawParameter>,
    #[serde(default)]
    pub schemas: BTreeMap<String, RawSchema>,
    #[serde(default)]
    pub request_bodies: BTreeMap<String, RawRequestBody>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawPathItem {
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    pub get: Option<RawOperation>,
    pub put: Option<RawOperation>,
    pub post: Option<RawOperation>,
    pub delete: Option<RawOperation>,
    pub options: Option<RawOperation>,
    pub head: Option<RawOperation>,
    pub patch: Option<RawOperation>,
    pub trace: Option<RawOperation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawOperation {
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    pub request_body: Option<RawRequestBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawRequestBody {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawParameter {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "in")]
    pub location: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<RawSchema>,
    #[serde(rename = "type")]
    pub kind: Option<RawType>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawSchema {
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<RawType>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

/// `type` is a single string in OpenAPI 3.0 and Swagger 2.0, and may be an
/// array such as `["integer", "null"]` in OpenAPI 3.1.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawType {
    Single(String),
    Many(Vec<String>),
}

impl RawType {
    pub fn primary(&self) -> Option<&str> {
        match self {
            RawType::Single(kind) => Some(kind.as_str()),
            RawType::Many(kinds) => kinds
                .iter()
                .map(String::as_str)
                .find(|kind| *kind != "null"),
        }
    }
}
