use regex::Regex;

use crate::openapi::{Operation, ParamLocation, Parameter};

use super::synth::ValueSynthesizer;

/// A concrete URL for one operation. `url` is always filled in, even when
/// `ok` is false, but only `ok` resolutions may be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub url: String,
    pub ok: bool,
}

/// Turns path templates into callable URLs against one base URL.
#[derive(Debug, Clone)]
pub struct EndpointResolver<'run> {
    base: &'run str,
    filter: Option<&'run Regex>,
}

impl<'run> EndpointResolver<'run> {
    #[must_use]
    pub const fn new(base: &'run str, filter: Option<&'run Regex>) -> Self {
        Self { base, filter }
    }

    /// Predicts [`EndpointResolver::resolve`]'s `ok` without drawing any values.
    #[must_use]
    pub fn is_resolvable(&self, path: &str, operation: &Operation) -> bool {
        self.admits(path, operation)
            && operation
                .parameters
                .iter()
                .filter(|parameter| needs_value(parameter))
                .all(|parameter| ValueSynthesizer::supports(parameter.schema.as_ref()))
    }

    pub fn resolve(
        &self,
        synthesizer: &mut ValueSynthesizer,
        path: &str,
        operation: &Operation,
    ) -> Resolution {
        if !self.admits(path, operation) {
            return Resolution {
                url: format!("{}{}", self.base, path),
                ok: false,
            };
        }

        let mut ok = true;
        let mut resolved = path.to_owned();
        for parameter in operation
            .parameters
            .iter()
            .filter(|parameter| needs_value(parameter))
        {
            match synthesizer.synthesize(parameter.schema.as_ref()) {
                Some(value) => {
                    resolved = resolved.replacen(&format!("{{{}}}", parameter.name), &value, 1);
                }
                None => ok = false,
            }
        }

        Resolution {
            url: format!("{}{}", self.base, resolved),
            ok,
        }
    }

    fn admits(&self, path: &str, operation: &Operation) -> bool {
        !operation.request_body_required
            && self.filter.is_none_or(|filter| filter.is_match(path))
    }
}

fn needs_value(parameter: &Parameter) -> bool {
    parameter.required || parameter.location == ParamLocation::Path
}

/// Whether a path template contains a `{...}` placeholder.
#[must_use]
pub fn has_placeholder(path: &str) -> bool {
    path.split_once('{')
        .is_some_and(|(_, rest)| rest.find('}').is_some_and(|end| end > 0))
}
