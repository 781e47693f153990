use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult, SpecError};

use super::model::{
    ApiSpec, HttpMethod, Operation, ParamLocation, Parameter, Schema, SchemaKind, Server,
};
use super::raw::{RawDocument, RawOperation, RawParameter, RawPathItem, RawSchema, RawVersion};

const MAX_REF_DEPTH: usize = 16;

/// Loads an API description from a file path or an http(s) URL.
///
/// # Errors
///
/// Returns an error when the source cannot be read or fetched, or when the
/// document is not a Swagger 2.0 / OpenAPI 3.x JSON document.
pub async fn load_spec(source: &str, timeout: Duration) -> AppResult<ApiSpec> {
    let content = match remote_url(source) {
        Some(url) => fetch(url, timeout).await?,
        None => tokio::fs::read_to_string(source).await.map_err(|err| {
            AppError::spec(SpecError::ReadFile {
                path: PathBuf::from(source),
                source: err,
            })
        })?,
    };
    parse_spec(source, &content)
}

fn remote_url(source: &str) -> Option<Url> {
    let url = Url::parse(source).ok()?;
    let remote = matches!(url.scheme(), "http" | "https") && url.host_str().is_some();
    remote.then_some(url)
}

async fn fetch(url: Url, timeout: Duration) -> AppResult<String> {
    debug!("Fetching API description from {}", url);
    let map_fetch = |err: reqwest::Error| {
        AppError::spec(SpecError::Fetch {
            url: url.to_string(),
            source: err,
        })
    };
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(map_fetch)?;
    let response = client.get(url.clone()).send().await.map_err(map_fetch)?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::spec(SpecError::FetchStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }));
    }
    response.text().await.map_err(map_fetch)
}

/// Parses and normalises a JSON API description. `source` names the input in
/// error messages.
///
/// # Errors
///
/// Returns an error when the JSON is malformed or the version is neither
/// Swagger 2.x nor OpenAPI 3.x.
pub fn parse_spec(source: &str, content: &str) -> AppResult<ApiSpec> {
    let version: RawVersion = serde_json::from_str(content)
        .map_err(|err| AppError::spec(SpecError::ParseJson { source: err }))?;
    let supported = version
        .openapi
        .as_deref()
        .is_some_and(|value| value.starts_with("3."))
        || version
            .swagger
            .as_deref()
            .is_some_and(|value| value.starts_with("2."));
    if !supported {
        return Err(AppError::spec(SpecError::UnsupportedVersion {
            input: source.to_owned(),
        }));
    }

    let document: RawDocument = serde_json::from_str(content)
        .map_err(|err| AppError::spec(SpecError::ParseJson { source: err }))?;
    Ok(normalize(&document))
}

fn normalize(document: &RawDocument) -> ApiSpec {
    let mut spec = ApiSpec {
        title: document.info.as_ref().and_then(|info| info.title.clone()),
        description: document
            .info
            .as_ref()
            .and_then(|info| info.description.clone()),
        servers: servers(document),
        ..ApiSpec::default()
    };

    for (path, item) in &document.paths {
        for (method, raw) in path_operations(item) {
            spec.insert(path, normalize_operation(document, item, method, raw));
        }
    }
    spec
}

fn servers(document: &RawDocument) -> Vec<Server> {
    if !document.servers.is_empty() {
        return document
            .servers
            .iter()
            .map(|server| Server {
                url: server.url.clone(),
                variables: server
                    .variables
                    .iter()
                    .filter_map(|(name, variable)| {
                        let value = match variable.default.as_ref()? {
                            serde_json::Value::String(value) => value.clone(),
                            other => other.to_string(),
                        };
                        Some((name.clone(), value))
                    })
                    .collect(),
            })
            .collect();
    }

    let Some(host) = document.host.as_deref() else {
        return Vec::new();
    };
    let base_path = document.base_path.as_deref().unwrap_or_default();
    let schemes: Vec<&str> = if document.schemes.is_empty() {
        vec!["https"]
    } else {
        document.schemes.iter().map(String::as_str).collect()
    };
    schemes
        .into_iter()
        .map(|scheme| Server {
            url: format!("{}://{}{}", scheme, host, base_path),
            variables: Default::default(),
        })
        .collect()
}

fn path_operations(item: &RawPathItem) -> Vec<(HttpMethod, &RawOperation)> {
    let slots = [
        (HttpMethod::Get, item.get.as_ref()),
        (HttpMethod::Put, item.put.as_ref()),
        (HttpMethod::Post, item.post.as_ref()),
        (HttpMethod::Delete, item.delete.as_ref()),
        (HttpMethod::Options, item.options.as_ref()),
        (HttpMethod::Head, item.head.as_ref()),
        (HttpMethod::Patch, item.patch.as_ref()),
        (HttpMethod::Trace, item.trace.as_ref()),
    ];
    slots
        .into_iter()
        .filter_map(|(method, operation)| operation.map(|operation| (method, operation)))
        .collect()
}

fn normalize_operation(
    document: &RawDocument,
    item: &RawPathItem,
    method: HttpMethod,
    raw: &RawOperation,
) -> Operation {
    let mut request_body_required = raw
        .request_body
        .as_ref()
        .is_some_and(|body| match body.reference.as_deref() {
            Some(reference) => reference
                .strip_prefix("#/components/requestBodies/")
                .and_then(|name| document.components.request_bodies.get(name))
                .is_some_and(|body| body.required),
            None => body.required,
        });

    let mut parameters: Vec<Parameter> = Vec::new();
    for raw_parameter in item.parameters.iter().chain(raw.parameters.iter()) {
        let parameter = normalize_parameter(document, raw_parameter);
        if matches!(parameter.location, ParamLocation::Body | ParamLocation::FormData) {
            request_body_required |= parameter.required;
            continue;
        }
        match parameters
            .iter_mut()
            .find(|existing| existing.name == parameter.name && existing.location == parameter.location)
        {
            Some(existing) => *existing = parameter,
            None => parameters.push(parameter),
        }
    }

    Operation {
        method,
        parameters,
        request_body_required,
    }
}

fn normalize_parameter(document: &RawDocument, raw: &RawParameter) -> Parameter {
    let Some(resolved) = resolve_parameter(document, raw, 0) else {
        // An unresolvable reference keeps the operation from ever being dispatched.
        return Parameter {
            name: raw.reference.clone().unwrap_or_default(),
            location: ParamLocation::Other("unresolved".to_owned()),
            required: true,
            schema: None,
        };
    };

    let schema = match (resolved.schema.as_ref(), resolved.kind.as_ref()) {
        (Some(schema), _) => resolve_schema(document, schema, 0),
        (None, Some(kind)) => Some(Schema {
            kind: kind.primary().map(SchemaKind::parse),
            minimum: resolved.minimum,
            maximum: resolved.maximum,
            min_length: resolved.min_length,
            max_length: resolved.max_length,
        }),
        (None, None) => None,
    };

    Parameter {
        name: resolved.name.clone().unwrap_or_default(),
        location: ParamLocation::parse(resolved.location.as_deref().unwrap_or_default()),
        required: resolved.required,
        schema,
    }
}

fn resolve_parameter<'doc>(
    document: &'doc RawDocument,
    raw: &'doc RawParameter,
    depth: usize,
) -> Option<&'doc RawParameter> {
    let Some(reference) = raw.reference.as_deref() else {
        return Some(raw);
    };
    if depth >= MAX_REF_DEPTH {
        return None;
    }
    let target = if let Some(name) = reference.strip_prefix("#/components/parameters/") {
        document.components.parameters.get(name)
    } else if let Some(name) = reference.strip_prefix("#/parameters/") {
        document.parameters.get(name)
    } else {
        None
    }?;
    resolve_parameter(document, target, depth.saturating_add(1))
}

fn resolve_schema(document: &RawDocument, raw: &RawSchema, depth: usize) -> Option<Schema> {
    let Some(reference) = raw.reference.as_deref() else {
        return Some(Schema {
            kind: raw.kind.as_ref().and_then(|kind| kind.primary()).map(SchemaKind::parse),
            minimum: raw.minimum,
            maximum: raw.maximum,
            min_length: raw.min_length,
            max_length: raw.max_length,
        });
    };
    if depth >= MAX_REF_DEPTH {
        return None;
    }
    let target = if let Some(name) = reference.strip_prefix("#/components/schemas/") {
        document.components.schemas.get(name)
    } else if let Some(name) = reference.strip_prefix("#/definitions/") {
        document.definitions.get(name)
    } else {
        None
    }?;
    resolve_schema(document, target, depth.saturating_add(1))
}
