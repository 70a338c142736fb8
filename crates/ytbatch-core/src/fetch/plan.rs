//! Builds one engine invocation from shape, mode and quality.

use std::path::Path;

use crate::classify::ContentShape;
use crate::engine::{AudioConversion, FetchSpec};

use super::quality::{resolve_audio_bitrate, resolve_video_height};

/// Mode and quality shared by every link in a batch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Fetch best audio only and convert to mp3.
    pub audio_only: bool,
    /// Quality label (`1080p`, `192kbps`, ...); unrecognized labels resolve
    /// to the per-mode default.
    pub quality: String,
    /// Connection retry count handed to the engine.
    pub retries: u32,
    /// Media fragment retry count handed to the engine.
    pub fragment_retries: u32,
}

/// Derives the engine invocation for one link. Pure function of its inputs.
///
/// Output routing varies by shape: single items land directly under the
/// root, collection items under the collection title keyed by their declared
/// index, feed items under the uploader keyed by date.
pub fn build_spec(
    url: &str,
    shape: ContentShape,
    output_root: &Path,
    opts: &FetchOptions,
) -> FetchSpec {
    let ext = if opts.audio_only { "mp3" } else { "mp4" };
    let output_template = output_root.join(match shape {
        ContentShape::Single => format!("%(title)s.{ext}"),
        ContentShape::Collection => {
            format!("%(playlist_title)s/%(playlist_index)s-%(title)s.{ext}")
        }
        ContentShape::Feed => format!("%(uploader)s/%(upload_date)s-%(title)s.{ext}"),
    });

    if opts.audio_only {
        FetchSpec {
            url: url.to_string(),
            format: "bestaudio/best".to_string(),
            output_template,
            container: None,
            audio: Some(AudioConversion {
                bitrate_kbps: resolve_audio_bitrate(&opts.quality),
            }),
            retries: opts.retries,
            fragment_retries: opts.fragment_retries,
        }
    } else {
        let height = resolve_video_height(&opts.quality);
        FetchSpec {
            url: url.to_string(),
            // Combined stream at the capped height first; merged split
            // streams as the fallback.
            format: format!("best[height<={height}]/bestvideo[height<={height}]+bestaudio/best"),
            output_template,
            container: Some("mp4".to_string()),
            audio: None,
            retries: opts.retries,
            fragment_retries: opts.fragment_retries,
        }
    }
}
