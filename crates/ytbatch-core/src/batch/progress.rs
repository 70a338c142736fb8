//! Progress events streamed from the coordinator and its workers.
//!
//! The presentation layer subscribes to a channel; the core never prints.

use tokio::sync::mpsc;

use crate::fetch::FetchOutcome;

/// One progress notification from a running batch.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Dispatch is starting: link count and worker-pool size.
    Started { links: usize, workers: usize },
    /// Pre-dispatch content mix across the batch.
    ContentMix {
        singles: usize,
        collections: usize,
        feeds: usize,
    },
    /// A human-readable, worker-tagged status line.
    WorkerLine { worker: usize, message: String },
    /// A link's worker finished; events arrive in completion order.
    LinkFinished { outcome: FetchOutcome },
}

/// Sending half handed to the coordinator and cloned into each worker.
///
/// A disabled handle drops every event, so library callers that don't render
/// progress pay nothing.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    tx: Option<mpsc::Sender<ProgressEvent>>,
}

impl Progress {
    pub fn new(tx: mpsc::Sender<ProgressEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Delivers `event` to the subscriber, if any. A closed receiver is
    /// treated the same as no subscriber.
    pub async fn send(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event).await;
        }
    }

    pub async fn worker_line(&self, worker: usize, message: impl Into<String>) {
        self.send(ProgressEvent::WorkerLine {
            worker,
            message: message.into(),
        })
        .await;
    }
}
