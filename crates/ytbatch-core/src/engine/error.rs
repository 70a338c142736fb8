//! Typed failures surfaced at the engine boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine executable could not be found.
    #[error("engine binary `{0}` not found on PATH")]
    BinaryNotFound(String),

    /// The engine process could not be launched.
    #[error("failed to launch {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and reported failure; `stderr` carries its message.
    #[error("engine {status}: {stderr}")]
    Failed { status: String, stderr: String },

    /// The engine produced metadata this crate could not read.
    #[error("unreadable engine metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}
