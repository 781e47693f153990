//! Cross-round accumulation of call outcomes per route.
use dashmap::DashMap;

use crate::http::{Outcome, has_placeholder};
use crate::openapi::HttpMethod;
use crate::report::{PathReport, RunReport};


#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub path: String,
    pub method: HttpMethod,
}

/// Running totals for one route across all rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAggregate {
    pub total_elapsed_ms: u64,
    pub outcomes: u64,
    pub urls: Vec<String>,
    pub responses: Vec<String>,
}

impl PathAggregate {
    fn record(&mut self, outcome: &Outcome, sample: bool) {
        self.total_elapsed_ms = self.total_elapsed_ms.saturating_add(outcome.elapsed_ms);
        self.outcomes = self.outcomes.saturating_add(1);
        if !sample {
            return;
        }
        let templated = has_placeholder(&outcome.path);
        push_sample(&mut self.urls, &outcome.url, templated);
        push_sample(&mut self.responses, &outcome.response_text(), templated);
    }
}

/// Templated routes keep every distinct sample; plain routes keep the first.
fn push_sample(samples: &mut Vec<String>, value: &str, templated: bool) {
    let keep = if templated {
        !samples.iter().any(|existing| existing == value)
    } else {
        samples.is_empty()
    };
    if keep {
        samples.push(value.to_owned());
    }
}

/// The only structure workers write to concurrently. Each merge holds the
/// shard lock for its route for the whole lookup-or-create-then-update.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: DashMap<RouteKey, PathAggregate>,
    threshold_ms: Option<u64>,
}

impl Aggregator {
    /// Outcomes faster than `threshold_ms` still count toward latency but add
    /// no samples.
    #[must_use]
    pub fn new(threshold_ms: Option<u64>) -> Self {
        Self {
            entries: DashMap::new(),
            threshold_ms,
        }
    }

    pub fn merge(&self, outcome: &Outcome) {
        let sample = self
            .threshold_ms
            .is_none_or(|threshold| outcome.elapsed_ms >= threshold);
        let key = RouteKey {
            path: outcome.path.to_string(),
            method: outcome.method,
        };
        self.entries
            .entry(key)
            .or_default()
            .record(outcome, sample);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<PathAggregate> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Averages every route over `rounds` and orders routes by path, then method.
    #[must_use]
    pub fn finalize(&self, routes: usize, rounds: usize) -> RunReport {
        let divisor = u64::try_from(rounds).unwrap_or(u64::MAX).max(1);
        let mut entries: Vec<PathReport> = self
            .entries
            .iter()
            .map(|entry| {
                let (key, aggregate) = entry.pair();
                PathReport {
                    path: key.path.clone(),
                    method: key.method,
                    avg_ms: aggregate.total_elapsed_ms.checked_div(divisor).unwrap_or_default(),
                    urls: aggregate.urls.clone(),
                    responses: aggregate.responses.clone(),
                }
            })
            .collect();
        entries.sort_by(|left, right| {
            left.path
                .cmp(&right.path)
                .then_with(|| left.method.cmp(&right.method))
        });
        RunReport {
            routes,
            rounds,
            entries,
        }
    }
}
