//! Debug-session events and sinks.
//!
//! A debug session records a trace of the batch (quota before and after, the
//! processed file, rejected input, per-item failures, and the summary) in a
//! side-channel log. The sink is passed explicitly to the components that
//! write to it; when no debug session is active the no-op sink is used.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::sync::Mutex;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Point of the run at which a quota snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaStage {
    /// Before the batch starts.
    Start,
    /// After the batch completes.
    End,
}

/// A structured event recorded during a debug session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A new debug session began.
    SessionStarted,
    /// The batch started reading an input file.
    ProcessingStarted {
        /// Input file path.
        input: String,
    },
    /// The input file was rejected.
    InputRejected {
        /// Human-readable rejection reason.
        reason: String,
    },
    /// Remote quota observed at a point of the run.
    QuotaSnapshot {
        /// When the snapshot was taken.
        stage: QuotaStage,
        /// Requests remaining in the window.
        remaining: u32,
        /// Window size.
        limit: u32,
    },
    /// Fetching the commenters of one pull request failed.
    ItemFailed {
        /// Canonical `org/project/number` identifier.
        pull_request: String,
        /// Failure detail.
        message: String,
    },
    /// Final counters of the batch.
    BatchSummary {
        /// Pull requests without any comment.
        without_comments: usize,
        /// Pull requests with at least one comment.
        with_comments: usize,
        /// Comments across all pull requests.
        total_comments: usize,
        /// Pull requests whose fetch failed.
        failed: usize,
    },
}

/// A sink that can record debug-session events.
pub trait TelemetrySink: Send + Sync {
    /// Records an event.
    fn record(&self, event: TelemetryEvent);

    /// Returns true when events are kept; callers skip work that only feeds
    /// the sink otherwise.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Sink used outside debug sessions; drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Appends events to a file as JSON lines (JSONL).
///
/// The file is opened in append mode so successive sessions accumulate.
#[derive(Debug)]
pub struct JsonlFileTelemetrySink {
    writer: Mutex<BufWriter<File>>,
}

impl JsonlFileTelemetrySink {
    /// Opens (or creates) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the file cannot be opened for appending.
    pub fn open(path: &Utf8Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl TelemetrySink for JsonlFileTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        if let Err(error) = writeln!(writer, "{serialised}").and_then(|()| writer.flush()) {
            tracing::warn!("failed to write debug log entry: {error}");
        }
    }
}
