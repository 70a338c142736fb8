//! `yt-dlp` process bindings: inspect, resolve and download invocations.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::EngineConfig;

use super::{EngineError, FetchSpec, InspectInfo, MediaEngine, ResolvedInfo};

/// Name looked up on PATH when no explicit binary is configured.
const ENGINE_BINARY: &str = "yt-dlp";

/// Longest stderr slice carried into a failure message.
const STDERR_TAIL: usize = 500;

/// Engine implementation backed by the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
}

/// Subset of the engine's JSON output needed for classification and
/// pre-download checks.
#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(rename = "_type")]
    kind: Option<String>,
    uploader_id: Option<String>,
    title: Option<String>,
    entries: Option<Vec<serde_json::Value>>,
}

impl YtDlp {
    /// Binds to the configured binary, or discovers `yt-dlp` on PATH.
    pub fn locate(cfg: &EngineConfig) -> Result<Self, EngineError> {
        let binary = match &cfg.binary {
            Some(path) => path.clone(),
            None => which::which(ENGINE_BINARY)
                .map_err(|_| EngineError::BinaryNotFound(ENGINE_BINARY.to_string()))?,
        };
        tracing::debug!("using engine binary {}", binary.display());
        Ok(Self { binary })
    }

    /// Runs a metadata invocation and parses its single-JSON output.
    /// `Ok(None)` when the engine printed nothing usable.
    async fn run_json(&self, args: &[&str], url: &str) -> Result<Option<RawInfo>, EngineError> {
        let output = Command::new(&self.binary)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| EngineError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: describe_status(&output.status),
                stderr: stderr_tail(&output.stderr),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let body = stdout.trim();
        if body.is_empty() || body == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(body)?))
    }
}

#[async_trait]
impl MediaEngine for YtDlp {
    async fn inspect(&self, url: &str) -> Result<Option<InspectInfo>, EngineError> {
        let raw = self.run_json(INSPECT_ARGS, url).await?;
        Ok(raw.map(|info| InspectInfo {
            kind: info.kind,
            uploader_id: info.uploader_id,
            title: info.title,
        }))
    }

    async fn resolve(&self, url: &str) -> Result<Option<ResolvedInfo>, EngineError> {
        let raw = self.run_json(RESOLVE_ARGS, url).await?;
        Ok(raw.map(|info| ResolvedInfo {
            entry_count: info.entries.as_ref().map(Vec::len),
            kind: info.kind,
            title: info.title,
        }))
    }

    async fn download(&self, spec: &FetchSpec) -> Result<(), EngineError> {
        let args = download_args(spec);
        tracing::debug!(url = %spec.url, "engine download: {}", args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| EngineError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: describe_status(&output.status),
                stderr: stderr_tail(&output.stderr),
            });
        }
        Ok(())
    }
}

/// Shallow inspect: single JSON, flat listing, first item only.
const INSPECT_ARGS: &[&str] = &[
    "-J",
    "--flat-playlist",
    "--playlist-items",
    "1",
    "--no-warnings",
    "--skip-download",
];

/// Full metadata resolution, still without media transfer.
const RESOLVE_ARGS: &[&str] = &["-J", "--no-warnings", "--skip-download"];

/// Builds the argument list for a download invocation.
fn download_args(spec: &FetchSpec) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        spec.format.clone(),
        "-o".to_string(),
        spec.output_template.to_string_lossy().into_owned(),
        "--no-warnings".to_string(),
        // Broken items inside a listing must not abort the rest of it.
        "--ignore-errors".to_string(),
        "--retries".to_string(),
        spec.retries.to_string(),
        "--fragment-retries".to_string(),
        spec.fragment_retries.to_string(),
    ];

    if let Some(audio) = &spec.audio {
        args.push("--extract-audio".to_string());
        args.push("--audio-format".to_string());
        args.push("mp3".to_string());
        args.push("--audio-quality".to_string());
        args.push(audio.bitrate_kbps.to_string());
    }

    if let Some(container) = &spec.container {
        args.push("--merge-output-format".to_string());
        args.push(container.clone());
        args.push("--recode-video".to_string());
        args.push(container.clone());
    }

    args.push(spec.url.clone());
    args
}

fn describe_status(status: &std::process::ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Trailing slice of stderr, bounded and char-boundary safe.
fn stderr_tail(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();
    let mut start = text.len().saturating_sub(STDERR_TAIL);
    while start < text.len() && !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AudioConversion;

    fn video_spec() -> FetchSpec {
        FetchSpec {
            url: "https://youtube.com/watch?v=abc".to_string(),
            format: "best[height<=720]/bestvideo[height<=720]+bestaudio/best".to_string(),
            output_template: PathBuf::from("downloads/%(title)s.mp4"),
            container: Some("mp4".to_string()),
            audio: None,
            retries: 3,
            fragment_retries: 3,
        }
    }

    #[test]
    fn download_args_video() {
        let args = download_args(&video_spec());
        assert_eq!(args[0], "-f");
        assert_eq!(args[1], "best[height<=720]/bestvideo[height<=720]+bestaudio/best");
        assert!(args.contains(&"--merge-output-format".to_string()));
        assert!(args.contains(&"--recode-video".to_string()));
        assert!(!args.contains(&"--extract-audio".to_string()));
        assert_eq!(args.last().unwrap(), "https://youtube.com/watch?v=abc");
    }

    #[test]
    fn download_args_audio() {
        let mut spec = video_spec();
        spec.format = "bestaudio/best".to_string();
        spec.container = None;
        spec.audio = Some(AudioConversion { bitrate_kbps: 128 });

        let args = download_args(&spec);
        assert!(args.contains(&"--extract-audio".to_string()));
        let quality_pos = args.iter().position(|a| a == "--audio-quality").unwrap();
        assert_eq!(args[quality_pos + 1], "128");
        assert!(!args.contains(&"--merge-output-format".to_string()));
    }

    #[test]
    fn download_args_carry_retry_counts() {
        let mut spec = video_spec();
        spec.retries = 7;
        spec.fragment_retries = 2;
        let args = download_args(&spec);
        let retries_pos = args.iter().position(|a| a == "--retries").unwrap();
        assert_eq!(args[retries_pos + 1], "7");
        let frag_pos = args.iter().position(|a| a == "--fragment-retries").unwrap();
        assert_eq!(args[frag_pos + 1], "2");
    }

    #[test]
    fn raw_info_from_single_item_json() {
        let raw: RawInfo =
            serde_json::from_str(r#"{"id": "abc", "title": "A video", "uploader_id": "@chan"}"#)
                .unwrap();
        assert!(raw.kind.is_none());
        assert_eq!(raw.title.as_deref(), Some("A video"));
        assert!(raw.entries.is_none());
    }

    #[test]
    fn raw_info_from_listing_json() {
        let raw: RawInfo = serde_json::from_str(
            r#"{"_type": "playlist", "title": "Mix", "entries": [{"id": "a"}, {"id": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(raw.kind.as_deref(), Some("playlist"));
        assert_eq!(raw.entries.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn stderr_tail_bounds_long_output() {
        let long = "x".repeat(2000);
        assert_eq!(stderr_tail(long.as_bytes()).len(), STDERR_TAIL);
        assert_eq!(stderr_tail(b"  short message \n"), "short message");
    }

    #[test]
    fn stderr_tail_respects_char_boundaries() {
        let text = "é".repeat(STDERR_TAIL);
        let tail = stderr_tail(text.as_bytes());
        assert!(tail.chars().all(|c| c == 'é'));
    }
}
