use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// HTTP methods an operation can be defined for, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Trace => reqwest::Method::TRACE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    FormData,
    Other(String),
}

impl ParamLocation {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "path" => ParamLocation::Path,
            "query" => ParamLocation::Query,
            "header" => ParamLocation::Header,
            "cookie" => ParamLocation::Cookie,
            "body" => ParamLocation::Body,
            "formData" => ParamLocation::FormData,
            other => ParamLocation::Other(other.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
    Unknown,
}

impl SchemaKind {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "integer" => SchemaKind::Integer,
            "number" => SchemaKind::Number,
            "string" => SchemaKind::String,
            "boolean" => SchemaKind::Boolean,
            "array" => SchemaKind::Array,
            "object" => SchemaKind::Object,
            _ => SchemaKind::Unknown,
        }
    }
}

/// The subset of a JSON schema the synthesizer looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub kind: Option<SchemaKind>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

impl Schema {
    #[must_use]
    pub fn integer(minimum: Option<f64>, maximum: Option<f64>) -> Self {
        Self {
            kind: Some(SchemaKind::Integer),
            minimum,
            maximum,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn string(min_length: Option<u64>, max_length: Option<u64>) -> Self {
        Self {
            kind: Some(SchemaKind::String),
            min_length,
            max_length,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub schema: Option<Schema>,
}

impl Parameter {
    #[must_use]
    pub fn path(name: &str, schema: Option<Schema>) -> Self {
        Self {
            name: name.to_owned(),
            location: ParamLocation::Path,
            required: true,
            schema,
        }
    }

    #[must_use]
    pub fn query(name: &str, required: bool, schema: Option<Schema>) -> Self {
        Self {
            name: name.to_owned(),
            location: ParamLocation::Query,
            required,
            schema,
        }
    }
}

/// One HTTP method defined on one path template.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub method: HttpMethod,
    pub parameters: Vec<Parameter>,
    pub request_body_required: bool,
}

impl Operation {
    #[must_use]
    pub const fn new(method: HttpMethod, parameters: Vec<Parameter>) -> Self {
        Self {
            method,
            parameters,
            request_body_required: false,
        }
    }
}

/// A server entry with its variable defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub url: String,
    pub variables: BTreeMap<String, String>,
}

/// Normalised API description: every `$ref` resolved, path-level parameters
/// merged into operations, Swagger 2 inline types folded into schemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiSpec {
    pub title: Option<String>,
    pub description: Option<String>,
    pub servers: Vec<Server>,
    /// Operations per path template, ordered by [`HttpMethod::ALL`].
    pub paths: BTreeMap<String, Vec<Operation>>,
}

impl ApiSpec {
    /// All `(path, operation)` pairs ordered by path, then method.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.paths.iter().flat_map(|(path, operations)| {
            operations
                .iter()
                .map(move |operation| (path.as_str(), operation))
        })
    }

    pub fn insert(&mut self, path: &str, operation: Operation) {
        let operations = self.paths.entry(path.to_owned()).or_default();
        operations.push(operation);
        operations.sort_by_key(|operation| operation.method);
    }

    #[must_use]
    pub fn heading(&self) -> Option<String> {
        match (self.title.as_deref(), self.description.as_deref()) {
            (Some(title), Some(description)) if !description.trim().is_empty() => {
                Some(format!("{} - {}", title, description.trim()))
            }
            (Some(title), _) => Some(title.to_owned()),
            (None, _) => None,
        }
    }
}
