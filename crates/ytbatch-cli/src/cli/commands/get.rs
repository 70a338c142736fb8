//! `ytbatch get` – parse links from text and run the batch.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ytbatch_core::batch::{self, BatchOptions, Progress, ProgressEvent};
use ytbatch_core::classify::ShapeCache;
use ytbatch_core::config::YtbatchConfig;
use ytbatch_core::engine::YtDlp;
use ytbatch_core::fetch::FetchOptions;
use ytbatch_core::url_model;

pub async fn run_get(
    cfg: &YtbatchConfig,
    text: Vec<String>,
    input: Option<&Path>,
    output: PathBuf,
    audio: bool,
    quality: Option<String>,
    jobs: Option<usize>,
) -> Result<()> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading link file {}", path.display()))?,
        None => text.join(" "),
    };

    let parsed = url_model::parse_input(&raw);
    for token in &parsed.rejected {
        println!("Skipping unrecognized link: {token}");
    }
    if !parsed.rejected.is_empty() {
        println!(
            "Found {} valid link(s), skipped {} invalid entries.",
            parsed.links.len(),
            parsed.rejected.len()
        );
    }
    if parsed.links.is_empty() {
        bail!("no recognized links in input");
    }

    let default_quality = if audio { "192kbps" } else { "1080p" };
    let quality = quality.unwrap_or_else(|| default_quality.to_string());
    let engine = Arc::new(YtDlp::locate(&cfg.engine)?);
    let cache = Arc::new(ShapeCache::new());
    let opts = BatchOptions {
        output_root: output.clone(),
        fetch: FetchOptions {
            audio_only: audio,
            quality,
            retries: cfg.engine.retries,
            fragment_retries: cfg.engine.fragment_retries,
        },
        max_workers: Some(jobs.unwrap_or(cfg.max_workers)),
    };

    println!("Output directory: {}", output.display());
    println!("Format: {}", if audio { "mp3 audio" } else { "mp4 video" });

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<ProgressEvent>(16);
    let printer = tokio::spawn(async move {
        while let Some(event) = progress_rx.recv().await {
            match event {
                ProgressEvent::Started { links, workers } => {
                    println!("Fetching {links} link(s) with {workers} worker(s)...");
                }
                ProgressEvent::ContentMix {
                    singles,
                    collections,
                    feeds,
                } => {
                    println!("Content: {}", describe_mix(singles, collections, feeds));
                }
                ProgressEvent::WorkerLine { worker, message } => {
                    println!("[worker {worker}] {message}");
                }
                ProgressEvent::LinkFinished { outcome } => {
                    println!("{}", outcome.message);
                }
            }
        }
    });

    let report = batch::run_batch(engine, cache, parsed.links, opts, Progress::new(progress_tx), None)
        .await?;
    let _ = printer.await;

    println!();
    println!(
        "Fetched: {} ok, {} failed ({} total)",
        report.successful(),
        report.failed(),
        report.total()
    );
    if report.failed() > 0 {
        println!("Failures:");
        for failure in report.failures() {
            println!("  {}", failure.link);
            println!("    {}", failure.message);
        }
    }

    Ok(())
}

/// Human summary of the batch content mix, e.g. "2 playlist(s) + 1 video(s)".
fn describe_mix(singles: usize, collections: usize, feeds: usize) -> String {
    let mut parts = Vec::new();
    if collections > 0 {
        parts.push(format!("{collections} playlist(s)"));
    }
    if feeds > 0 {
        parts.push(format!("{feeds} channel(s)"));
    }
    if singles > 0 {
        parts.push(format!("{singles} video(s)"));
    }
    if parts.is_empty() {
        return "nothing recognized".to_string();
    }
    parts.join(" + ")
}
