use std::{fmt::Display, future::Future, time::Duration};

use anyhow::Result;
use log::{debug, warn};
use tokio::time::sleep;

/// Runs `operation` until it succeeds or `max_attempts` attempts have failed.
/// After failed attempt `n` the loop waits `backoff(n)` before trying again.
/// The last error is returned once the attempts run out.
pub async fn attempt<T, F, Fut, B>(mut operation: F, max_attempts: u32, backoff: B) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    B: Fn(u32) -> Duration,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt_no = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt_no >= max_attempts => {
                return Err(e.context(format!("Giving up after {} attempts", max_attempts)));
            }
            Err(e) => {
                let wait = backoff(attempt_no);
                debug!(
                    "Attempt {}/{} failed ({:#}), retrying in {:?}",
                    attempt_no, max_attempts, e, wait
                );
                sleep(wait).await;
                attempt_no += 1;
            }
        }
    }
}

/// 1x, 2x, 3x... the given step, capped at `Duration::MAX`
pub fn linear_backoff(step: Duration) -> impl Fn(u32) -> Duration {
    move |attempt_no| step.saturating_mul(attempt_no)
}

/// Applies `operation` to each item in order, waiting `throttle` before each call.
/// Items whose operation fails are logged and left out of the result.
pub async fn collect_or_skip<I, T, F, Fut>(items: I, throttle: Duration, mut operation: F) -> Vec<T>
where
    I: IntoIterator,
    I::Item: Display + Clone,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut results = Vec::new();

    for item in items {
        sleep(throttle).await;
        match operation(item.clone()).await {
            Ok(value) => results.push(value),
            Err(e) => warn!("Skipping {}: {:#}", item, e),
        }
    }

    results
}

/// Like [`collect_or_skip`], but a failed item is replaced by `fallback()`
/// so the output has exactly one entry per input.
pub async fn collect_or_substitute<I, T, F, Fut, D>(
    items: I,
    throttle: Duration,
    mut operation: F,
    fallback: D,
) -> Vec<T>
where
    I: IntoIterator,
    I::Item: Display + Clone,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
    D: Fn() -> T,
{
    let mut results = Vec::new();

    for item in items {
        sleep(throttle).await;
        match operation(item.clone()).await {
            Ok(value) => results.push(value),
            Err(e) => {
                warn!("Substituting placeholder for {}: {:#}", item, e);
                results.push(fallback());
            }
        }
    }

    results
}
