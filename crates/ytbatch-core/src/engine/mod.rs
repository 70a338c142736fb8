//! External extraction engine boundary.
//!
//! The engine owns all wire-level protocol, format negotiation and on-disk
//! encoding; this crate only builds invocations and interprets results.
//! `MediaEngine` is the seam that lets the classifier and the batch layer run
//! against a scripted stub in tests.

mod error;
mod ytdlp;

pub use error::EngineError;
pub use ytdlp::YtDlp;

use async_trait::async_trait;
use std::path::PathBuf;

/// Shallow metadata from an inspect call (first-item-only, no media fetch).
#[derive(Debug, Clone, Default)]
pub struct InspectInfo {
    /// Engine type tag (`video`, `playlist`, ...), if reported.
    pub kind: Option<String>,
    /// Uploader/channel identifier, if reported.
    pub uploader_id: Option<String>,
    /// Item or listing title.
    pub title: Option<String>,
}

/// Full metadata resolved immediately before a download.
#[derive(Debug, Clone, Default)]
pub struct ResolvedInfo {
    /// Engine type tag (`video`, `playlist`, ...), if reported.
    pub kind: Option<String>,
    /// Item or listing title.
    pub title: Option<String>,
    /// Number of resolvable entries for collection-shaped objects.
    pub entry_count: Option<usize>,
}

impl ResolvedInfo {
    /// True when the engine reports a collection-shaped object.
    pub fn is_listing(&self) -> bool {
        self.kind.as_deref() == Some("playlist")
    }
}

/// Audio post-processing step: extract the best audio stream and convert it
/// to a lossy codec at the given bitrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConversion {
    pub bitrate_kbps: u32,
}

/// One fully-built engine invocation for a single link.
///
/// Pure data; never shared or mutated across workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSpec {
    pub url: String,
    /// Engine format selector expression.
    pub format: String,
    /// Output path template in the engine's placeholder syntax.
    pub output_template: PathBuf,
    /// Target container for video fetches (merge + normalization).
    pub container: Option<String>,
    /// Present in audio mode: lossy conversion at the resolved bitrate.
    pub audio: Option<AudioConversion>,
    /// Connection retry count handed to the engine.
    pub retries: u32,
    /// Media fragment retry count handed to the engine.
    pub fragment_retries: u32,
}

/// The two logical calls this core makes against the engine, plus the
/// download itself.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Shallow probe: type tag and minimal metadata, bounded latency
    /// (collections are introspected first-item-only). `Ok(None)` means the
    /// engine yielded nothing for the link.
    async fn inspect(&self, url: &str) -> Result<Option<InspectInfo>, EngineError>;

    /// Authoritative metadata resolution without downloading media.
    async fn resolve(&self, url: &str) -> Result<Option<ResolvedInfo>, EngineError>;

    /// Performs the transfer described by `spec`.
    async fn download(&self, spec: &FetchSpec) -> Result<(), EngineError>;
}
