use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::Client;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

use crate::aggregate::Aggregator;
use crate::config::PingSettings;
use crate::error::{AppError, AppResult, HttpError};
use crate::openapi::{ApiSpec, Operation};

use super::caller::call;
use super::resolve::EndpointResolver;
use super::synth::ValueSynthesizer;
use super::workload::WorkUnit;

/// Counters for the round in flight, read by the progress renderer.
#[derive(Debug, Default)]
pub struct RoundProgress {
    round: AtomicUsize,
    completed: AtomicUsize,
    total: AtomicUsize,
}

impl RoundProgress {
    fn start_round(&self, round: usize, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
        self.round.store(round, Ordering::Release);
    }

    fn complete_one(&self) {
        self.completed.fetch_add(1, Ordering::AcqRel);
    }

    #[must_use]
    pub fn round(&self) -> usize {
        self.round.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }
}

/// Owns the worker pool for a run. Each round fans its units out to the
/// configured number of workers and returns once every unit is merged.
#[derive(Debug)]
pub struct Dispatcher {
    client: Client,
    settings: Arc<PingSettings>,
    base: String,
    synthesizer: ValueSynthesizer,
    progress: Arc<RoundProgress>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        client: Client,
        settings: Arc<PingSettings>,
        base: String,
        synthesizer: ValueSynthesizer,
    ) -> Self {
        Self {
            client,
            settings,
            base,
            synthesizer,
            progress: Arc::new(RoundProgress::default()),
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<RoundProgress> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Number of units every round dispatches. Uses the same selection as
    /// [`Dispatcher::run_round`] without drawing any values.
    #[must_use]
    pub fn count_routes(&self, spec: &ApiSpec) -> usize {
        let resolver = EndpointResolver::new(&self.base, self.settings.filter.as_ref());
        spec.operations()
            .filter(|(path, operation)| {
                self.method_included(operation) && resolver.is_resolvable(path, operation)
            })
            .count()
    }

    fn method_included(&self, operation: &Operation) -> bool {
        self.settings.methods.contains(operation.method.as_str())
    }

    fn build_units(&mut self, spec: &ApiSpec) -> Vec<WorkUnit> {
        let resolver = EndpointResolver::new(&self.base, self.settings.filter.as_ref());
        let mut units = Vec::new();
        for (path, operation) in spec.operations() {
            if !self.method_included(operation) {
                continue;
            }
            let resolution = resolver.resolve(&mut self.synthesizer, path, operation);
            if !resolution.ok {
                debug!("Skipping {} {}: not resolvable", operation.method, path);
                continue;
            }
            units.push(WorkUnit {
                method: operation.method,
                path: Arc::from(path),
                url: resolution.url,
                headers: Arc::clone(&self.settings.headers),
            });
        }
        units
    }

    /// Runs one round and blocks until every unit has been called and merged.
    /// Returns the number of dispatched units.
    ///
    /// # Errors
    ///
    /// Returns an error when a worker task panics or the round ends with
    /// units unaccounted for.
    pub async fn run_round(
        &mut self,
        round: usize,
        spec: &ApiSpec,
        aggregator: &Arc<Aggregator>,
    ) -> AppResult<usize> {
        let units = self.build_units(spec);
        let total = units.len();
        self.progress.start_round(round, total);
        if total == 0 {
            return Ok(0);
        }

        let (tx, rx) = mpsc::channel::<WorkUnit>(total);
        for unit in units {
            tx.send(unit)
                .await
                .map_err(|_closed| AppError::http(HttpError::QueueClosed { total }))?;
        }
        drop(tx);

        let workers = self.settings.workers.min(total);
        debug!("Round {}: {} routes across {} workers", round, total, workers);

        let queue = Arc::new(Mutex::new(rx));
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let queue = Arc::clone(&queue);
            let client = self.client.clone();
            let aggregator = Arc::clone(aggregator);
            let progress = Arc::clone(&self.progress);
            let capture_response = self.settings.capture_response;

            handles.push(tokio::spawn(async move {
                loop {
                    let next = queue.lock().await.recv().await;
                    let Some(unit) = next else {
                        break;
                    };
                    let outcome = call(&client, unit, capture_response).await;
                    aggregator.merge(&outcome);
                    progress.complete_one();
                }
            }));
        }

        for handle in handles {
            handle.await?;
        }

        let completed = self.progress.completed();
        if completed != total {
            return Err(AppError::http(HttpError::IncompleteRound {
                round,
                completed,
                total,
            }));
        }
        Ok(total)
    }
}
