use std::sync::Arc;

use tracing::{info, warn};

use crate::aggregate::Aggregator;
use crate::error::AppResult;
use crate::http::Dispatcher;
use crate::openapi::ApiSpec;
use crate::report::RunReport;

/// Runs `rounds` rounds back to back and averages every route over them.
/// A round never starts before the previous one has merged all outcomes.
///
/// # Errors
///
/// Returns an error when a round cannot be completed.
pub async fn run_rounds(
    dispatcher: &mut Dispatcher,
    spec: &ApiSpec,
    rounds: usize,
    threshold_ms: Option<u64>,
) -> AppResult<RunReport> {
    let routes = dispatcher.count_routes(spec);
    info!("{} routes x {} rounds against {}", routes, rounds, dispatcher.base());

    let aggregator = Arc::new(Aggregator::new(threshold_ms));
    for round in 1..=rounds {
        let dispatched = dispatcher.run_round(round, spec, &aggregator).await?;
        if dispatched != routes {
            warn!(
                "Round {} dispatched {} routes, expected {}",
                round, dispatched, routes
            );
        }
        info!("Round {}/{} done", round, rounds);
    }

    Ok(aggregator.finalize(routes, rounds))
}
