use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::openapi::{Schema, SchemaKind};

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DEFAULT_INTEGER_MIN: i64 = 0;
const DEFAULT_INTEGER_MAX: i64 = 100;
/// Upper bound on synthesized string length; descriptions often declare
/// `maxLength: 2147483647` as "unbounded".
const MAX_STRING_LENGTH: usize = 8192;

/// Produces concrete parameter values from declared schemas.
///
/// Only integers and strings are supported. Whether a schema is supported
/// never depends on the random source, so [`ValueSynthesizer::supports`]
/// predicts exactly when [`ValueSynthesizer::synthesize`] returns `None`.
#[derive(Debug)]
pub struct ValueSynthesizer {
    rng: StdRng,
}

impl ValueSynthesizer {
    /// Seeds the random source from the current time.
    #[must_use]
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        Self::seeded(u64::try_from(nanos & u128::from(u64::MAX)).unwrap_or_default())
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn supports(schema: Option<&Schema>) -> bool {
        matches!(
            schema.and_then(|schema| schema.kind),
            Some(SchemaKind::Integer | SchemaKind::String)
        )
    }

    /// Draws one value for `schema`, or `None` when the type is unsupported
    /// or the schema is absent.
    pub fn synthesize(&mut self, schema: Option<&Schema>) -> Option<String> {
        let schema = schema?;
        match schema.kind? {
            SchemaKind::Integer => Some(self.integer(schema)),
            SchemaKind::String => Some(self.string(schema)),
            SchemaKind::Number
            | SchemaKind::Boolean
            | SchemaKind::Array
            | SchemaKind::Object
            | SchemaKind::Unknown => None,
        }
    }

    fn integer(&mut self, schema: &Schema) -> String {
        let min = schema
            .minimum
            .map_or(DEFAULT_INTEGER_MIN, |minimum| minimum as i64);
        let max = schema
            .maximum
            .map_or(DEFAULT_INTEGER_MAX, |maximum| maximum as i64)
            .max(min);
        self.rng.gen_range(min..=max).to_string()
    }

    fn string(&mut self, schema: &Schema) -> String {
        let length = match (schema.max_length, schema.min_length) {
            (Some(max_length), _) => max_length,
            (None, Some(min_length)) if min_length > 1 => min_length,
            (None, _) => 1,
        };
        let length = usize::try_from(length)
            .unwrap_or(MAX_STRING_LENGTH)
            .min(MAX_STRING_LENGTH);
        (0..length)
            .map(|_| {
                let index = self.rng.gen_range(0..ALPHANUMERIC.len());
                ALPHANUMERIC.get(index).copied().map_or('0', char::from)
            })
            .collect()
    }
}
