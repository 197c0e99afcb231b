//! Concurrent fan-out of blocking filesystem work.
//!
//! Each job runs on the blocking thread pool; the batch completes once every job
//! has finished. There is no rollback: jobs that succeeded before another one
//! failed keep their effects.

use anyhow::{Context, Result};
use futures::future::try_join_all;

/// Runs every job concurrently and returns their results in input order.
///
/// All jobs are awaited. When any job fails, the returned error lists every
/// failure, the first one (in input order) on top.
pub async fn run_parallel<T, F>(jobs: Vec<F>) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let tasks: Vec<_> = jobs.into_iter().map(tokio::task::spawn_blocking).collect();
    let results = try_join_all(tasks).await.context("Failed to join filesystem tasks")?;

    let mut values = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        return Ok(values);
    }

    let total = errors.len();
    let mut errors = errors.into_iter();
    let Some(first) = errors.next() else {
        return Ok(values);
    };
    if total == 1 {
        return Err(first);
    }

    let others: Vec<String> = errors.map(|error| format!("  {error:#}")).collect();
    Err(first.context(format!("{total} operations failed; also:\n{}", others.join("\n"))))
}
