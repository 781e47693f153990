use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::args::PingArgs;
use crate::config::{PingSettings, validate_base_url};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{Dispatcher, ValueSynthesizer, build_client};
use crate::openapi::{ApiSpec, MAX_SELECTION_ATTEMPTS, load_spec, select_base, server_candidates};
use crate::report::write_report;

use super::progress::setup_progress_indicator;
use super::rounds::run_rounds;

/// Loads the description, pings it for every round, and writes the report.
pub(crate) async fn run_ping(args: PingArgs) -> AppResult<()> {
    let settings = Arc::new(PingSettings::from_args(&args)?);
    let input = args
        .input
        .clone()
        .ok_or_else(|| AppError::validation(ValidationError::MissingInput))?;

    let spec = load_spec(&input, settings.timeout).await?;
    let base = resolve_base(args.base.clone(), &spec).await?;
    let title = spec.heading().unwrap_or_else(|| input.clone());
    info!("Pinging '{}' at {}", title, base);

    let client = build_client(settings.timeout)?;
    let mut dispatcher = Dispatcher::new(
        client,
        Arc::clone(&settings),
        base,
        ValueSynthesizer::from_time(),
    );

    let (done_tx, done_rx) = watch::channel(false);
    let progress_handle = (settings.show_progress && !args.verbose).then(|| {
        setup_progress_indicator(dispatcher.progress(), settings.rounds, args.no_color, done_rx)
    });

    let result = run_rounds(&mut dispatcher, &spec, settings.rounds, settings.threshold_ms).await;
    if done_tx.send(true).is_err() {
        tracing::debug!("Progress indicator already stopped");
    }
    if let Some(handle) = progress_handle {
        handle.await?;
    }
    let report = result?;

    write_report(&report, settings.output, &settings.out_dir, &title).await?;
    Ok(())
}

/// Uses `--base` when given, otherwise asks the user to pick a server.
async fn resolve_base(base: Option<String>, spec: &ApiSpec) -> AppResult<String> {
    let chosen = match base {
        Some(base) => base,
        None => {
            let candidates = server_candidates(spec);
            tokio::task::spawn_blocking(move || {
                select_base(
                    &candidates,
                    std::io::stdin().lock(),
                    std::io::stdout(),
                    MAX_SELECTION_ATTEMPTS,
                )
            })
            .await??
        }
    };
    validate_base_url(&chosen)
}
