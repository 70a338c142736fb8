//! Batch coordinator: bounded fan-out of fetch workers over a link set.
//!
//! Keeps up to the configured number of workers in flight; when one finishes,
//! the next queued link is dispatched until the queue is empty. Outcomes are
//! collected in completion order and aggregated only after every dispatched
//! worker has finished (join-all barrier).

mod control;
mod progress;
mod report;

pub use control::BatchControl;
pub use progress::{Progress, ProgressEvent};
pub use report::BatchReport;

use anyhow::{Context, Result};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::classify::{self, ContentShape, ShapeCache};
use crate::engine::MediaEngine;
use crate::fetch::{self, FetchOptions, FetchOutcome};
use crate::url_model::Link;

/// Fixed ceiling on the worker pool when no explicit cap is given.
pub const DEFAULT_MAX_WORKERS: usize = 5;

/// Everything the coordinator needs besides the links themselves.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory downloads are written to; created if missing.
    pub output_root: PathBuf,
    pub fetch: FetchOptions,
    /// Explicit worker cap; `None` uses [`DEFAULT_MAX_WORKERS`].
    pub max_workers: Option<usize>,
}

impl BatchOptions {
    /// Worker-pool size for `links` queued links: min(links, cap), never
    /// below 1.
    pub fn pool_size(&self, links: usize) -> usize {
        links
            .min(self.max_workers.unwrap_or(DEFAULT_MAX_WORKERS))
            .max(1)
    }
}

/// Runs one batch to completion and returns its aggregate report.
///
/// Per-link failures are contained in their outcomes; only pool-management
/// faults (here: output directory creation) surface as an `Err`. Duplicate
/// links each get their own worker and their own outcome. When `control`
/// reports cancellation, links not yet dispatched are dropped; in-flight
/// workers still run to completion and the report covers dispatched links
/// only.
pub async fn run_batch(
    engine: Arc<dyn MediaEngine>,
    cache: Arc<ShapeCache>,
    links: Vec<Link>,
    opts: BatchOptions,
    progress: Progress,
    control: Option<Arc<BatchControl>>,
) -> Result<BatchReport> {
    std::fs::create_dir_all(&opts.output_root).with_context(|| {
        format!(
            "creating output directory {}",
            opts.output_root.display()
        )
    })?;

    let workers = opts.pool_size(links.len());
    progress
        .send(ProgressEvent::Started {
            links: links.len(),
            workers,
        })
        .await;

    // Classification pre-pass: announces the content mix and warms the
    // cache, so each distinct link costs at most one inspect call overall.
    let mut shapes = Vec::with_capacity(links.len());
    let (mut singles, mut collections, mut feeds) = (0usize, 0usize, 0usize);
    for link in &links {
        let shape = classify::classify(engine.as_ref(), &cache, link).await;
        match shape {
            ContentShape::Single => singles += 1,
            ContentShape::Collection => collections += 1,
            ContentShape::Feed => feeds += 1,
        }
        shapes.push(shape);
    }
    if !links.is_empty() {
        progress
            .send(ProgressEvent::ContentMix {
                singles,
                collections,
                feeds,
            })
            .await;
    }

    let mut queue: VecDeque<(usize, Link, ContentShape)> = links
        .into_iter()
        .zip(shapes)
        .enumerate()
        .map(|(i, (link, shape))| (i + 1, link, shape))
        .collect();

    let mut join_set = JoinSet::new();
    let mut in_flight: HashMap<tokio::task::Id, Link> = HashMap::new();
    let mut outcomes = Vec::new();

    loop {
        while join_set.len() < workers {
            if control.as_ref().is_some_and(|c| c.is_cancelled()) {
                if !queue.is_empty() {
                    tracing::info!("batch cancelled, dropping {} queued link(s)", queue.len());
                    queue.clear();
                }
                break;
            }
            let Some((worker, link, shape)) = queue.pop_front() else {
                break;
            };
            let engine = Arc::clone(&engine);
            let fetch_opts = opts.fetch.clone();
            let output_root = opts.output_root.clone();
            let progress = progress.clone();
            let dispatched = link.clone();
            let handle = join_set.spawn(async move {
                fetch::run_fetch(
                    engine.as_ref(),
                    &link,
                    shape,
                    &output_root,
                    &fetch_opts,
                    worker,
                    &progress,
                )
                .await
            });
            in_flight.insert(handle.id(), dispatched);
        }

        let Some(joined) = join_set.join_next_with_id().await else {
            break;
        };
        let outcome = match joined {
            Ok((id, outcome)) => {
                in_flight.remove(&id);
                outcome
            }
            // A panicking worker fails its own link only; the batch goes on.
            Err(err) => {
                let Some(link) = in_flight.remove(&err.id()) else {
                    continue;
                };
                tracing::error!(link = %link, "fetch worker crashed: {err}");
                FetchOutcome::failed(link, format!("worker crashed: {err}"))
            }
        };
        progress
            .send(ProgressEvent::LinkFinished {
                outcome: outcome.clone(),
            })
            .await;
        outcomes.push(outcome);
    }

    Ok(BatchReport::from_outcomes(outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts_with_cap(cap: Option<usize>) -> BatchOptions {
        BatchOptions {
            output_root: PathBuf::from("downloads"),
            fetch: FetchOptions {
                audio_only: false,
                quality: "1080p".to_string(),
                retries: 3,
                fragment_retries: 3,
            },
            max_workers: cap,
        }
    }

    #[test]
    fn pool_size_defaults_to_min_links_five() {
        let opts = opts_with_cap(None);
        assert_eq!(opts.pool_size(1), 1);
        assert_eq!(opts.pool_size(3), 3);
        assert_eq!(opts.pool_size(5), 5);
        assert_eq!(opts.pool_size(12), 5);
    }

    #[test]
    fn pool_size_never_below_one() {
        let opts = opts_with_cap(None);
        assert_eq!(opts.pool_size(0), 1);
        let zero_cap = opts_with_cap(Some(0));
        assert_eq!(zero_cap.pool_size(4), 1);
    }

    #[test]
    fn pool_size_honors_explicit_cap() {
        let opts = opts_with_cap(Some(2));
        assert_eq!(opts.pool_size(10), 2);
        let wide = opts_with_cap(Some(16));
        assert_eq!(wide.pool_size(10), 10);
    }
}
