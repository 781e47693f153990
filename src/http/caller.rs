use std::time::Instant;

use reqwest::{Client, Response};
use tracing::debug;

use super::workload::{Outcome, WorkUnit};

/// Fires one unit and records its outcome. Transport errors and timeouts
/// become failed outcomes; they never abort the worker.
pub async fn call(client: &Client, unit: WorkUnit, capture_response: bool) -> Outcome {
    let request = match client
        .request(unit.method.into(), unit.url.as_str())
        .headers(unit.headers.as_ref().clone())
        .build()
    {
        Ok(request) => request,
        Err(err) => {
            debug!("Could not build {} {}: {}", unit.method, unit.url, err);
            return Outcome::failed(unit, 0, err.to_string());
        }
    };

    let started = Instant::now();
    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(err) => {
            debug!("{} {} failed: {}", unit.method, unit.url, err);
            return Outcome::failed(unit, elapsed_ms(started), err.to_string());
        }
    };
    let elapsed = elapsed_ms(started);

    let body = if capture_response {
        read_body(response).await.map(Some)
    } else {
        drain_body(response).await.map(|()| None)
    };
    match body {
        Ok(body) => Outcome::succeeded(unit, elapsed, body),
        // A body that stalls past the timeout or breaks off fails the whole call.
        Err(err) => {
            debug!("{} {} failed reading the body: {}", unit.method, unit.url, err);
            Outcome::failed(unit, elapsed_ms(started), err.to_string())
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn read_body(response: Response) -> Result<String, reqwest::Error> {
    let body = response.text().await?;
    Ok(collapse_newlines(&body))
}

async fn drain_body(mut response: Response) -> Result<(), reqwest::Error> {
    while response.chunk().await?.is_some() {}
    Ok(())
}

/// Replaces each `\r\n` or `\n` with a single space.
#[must_use]
pub fn collapse_newlines(body: &str) -> String {
    body.replace("\r\n", " ").replace('\n', " ")
}
