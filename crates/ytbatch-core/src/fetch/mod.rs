//! Fetch worker: one engine invocation per link, every failure contained.
//!
//! A worker never propagates a fault to the coordinator; engine errors,
//! missing metadata and empty listings all fold into the returned outcome.

mod plan;
mod quality;

pub use plan::{build_spec, FetchOptions};
pub use quality::{
    resolve_audio_bitrate, resolve_video_height, DEFAULT_AUDIO_KBPS, DEFAULT_VIDEO_HEIGHT,
};

use std::path::Path;

use crate::batch::Progress;
use crate::classify::ContentShape;
use crate::engine::MediaEngine;
use crate::url_model::Link;

/// Result of one worker's fetch; produced exactly once per dispatched link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub link: Link,
    pub success: bool,
    pub message: String,
}

impl FetchOutcome {
    pub fn succeeded(link: Link, message: String) -> Self {
        Self {
            link,
            success: true,
            message,
        }
    }

    pub fn failed(link: Link, message: String) -> Self {
        Self {
            link,
            success: false,
            message,
        }
    }
}

/// Downloads one link to completion.
///
/// The cached shape routes the output path only; authoritative metadata is
/// re-resolved here because the inspect answer can be shallow or stale.
/// Transient-network retries are the engine's job (via the spec's retry
/// counts); this layer fails fast on everything else.
pub async fn run_fetch(
    engine: &dyn MediaEngine,
    link: &Link,
    shape: ContentShape,
    output_root: &Path,
    opts: &FetchOptions,
    worker: usize,
    progress: &Progress,
) -> FetchOutcome {
    let spec = build_spec(link.as_str(), shape, output_root, opts);

    let mode_line = if opts.audio_only {
        let kbps = spec.audio.map(|a| a.bitrate_kbps).unwrap_or(DEFAULT_AUDIO_KBPS);
        format!("audio mode: fetching mp3 at {kbps} kbps")
    } else {
        format!("video mode: fetching mp4 at {}", opts.quality)
    };
    progress.worker_line(worker, mode_line).await;
    progress
        .worker_line(worker, format!("detected {} link: {link}", shape.label()))
        .await;

    let info = match engine.resolve(link.as_str()).await {
        Ok(Some(info)) => info,
        Ok(None) => {
            return FetchOutcome::failed(
                link.clone(),
                format!(
                    "[worker {worker}] could not resolve metadata; the {} may be private or unavailable",
                    shape.label()
                ),
            );
        }
        Err(err) => {
            return FetchOutcome::failed(link.clone(), format!("[worker {worker}] error: {err}"));
        }
    };

    let mut item_count = None;
    if info.is_listing() {
        let count = info.entry_count.unwrap_or(0);
        if count == 0 {
            return FetchOutcome::failed(
                link.clone(),
                format!(
                    "[worker {worker}] {} appears to be empty or private",
                    shape.label()
                ),
            );
        }
        item_count = Some(count);
        progress
            .worker_line(
                worker,
                format!(
                    "{} '{}' ({count} items)",
                    shape.label(),
                    info.title.as_deref().unwrap_or("untitled")
                ),
            )
            .await;
    }

    match engine.download(&spec).await {
        Ok(()) => {
            let message = match item_count {
                Some(count) => format!(
                    "[worker {worker}] {} '{}' completed ({count} items)",
                    shape.label(),
                    info.title.as_deref().unwrap_or("untitled")
                ),
                None => format!(
                    "[worker {worker}] {} fetch completed",
                    if opts.audio_only { "audio" } else { "video" }
                ),
            };
            FetchOutcome::succeeded(link.clone(), message)
        }
        Err(err) => FetchOutcome::failed(link.clone(), format!("[worker {worker}] error: {err}")),
    }
}
