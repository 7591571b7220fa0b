//! Status and result reporting for CLI output.
//!
//! Human mode drives a spinner and prints the record as text; JSON mode
//! writes one envelope per line to stdout.

#![allow(clippy::print_stdout)]

use super::human::format_record;
use super::json_envelope::{
    ErrorPayload, EventType, IdentificationPayload, JsonEnvelope, ResultType, StatusPayload,
};
use super::progress::{create_status_spinner, update_status};
use crate::error::Error;
use crate::knowledge::PlantRecord;
use crate::pipeline::PipelineStatus;
use indicatif::ProgressBar;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Output mode for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Spinner and plain text.
    #[default]
    Human,
    /// Newline-delimited JSON envelopes.
    Json,
}

/// Receives progress and the outcome of one identification.
pub trait StatusReporter: Send + Sync {
    /// Pipeline entered `status`.
    fn status(&self, status: PipelineStatus);

    /// Identification succeeded.
    fn record(&self, record: &PlantRecord);

    /// Identification (or its setup) failed.
    fn error(&self, error: &Error);
}

/// Spinner plus plain-text record.
pub struct HumanReporter {
    spinner: Option<ProgressBar>,
}

impl HumanReporter {
    /// Create a reporter for `photo`; the spinner is shown when `progress` is set.
    pub fn new(photo: &Path, progress: bool) -> Self {
        Self {
            spinner: create_status_spinner(photo, progress),
        }
    }
}

impl StatusReporter for HumanReporter {
    fn status(&self, status: PipelineStatus) {
        update_status(self.spinner.as_ref(), status);
    }

    fn record(&self, record: &PlantRecord) {
        print!("{}", format_record(record));
    }

    fn error(&self, _error: &Error) {
        // Rendered by main on exit
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }
    }
}

/// NDJSON reporter.
pub struct JsonReporter {
    photo: PathBuf,
    writer: Mutex<Box<dyn Write + Send>>,
    write_failed: AtomicBool,
}

impl JsonReporter {
    /// Create a reporter writing to stdout.
    pub fn new(photo: &Path) -> Self {
        Self::with_writer(photo, io::stdout())
    }

    /// Create a reporter with a custom writer.
    pub fn with_writer<W: Write + Send + 'static>(photo: &Path, writer: W) -> Self {
        Self {
            photo: photo.to_path_buf(),
            writer: Mutex::new(Box::new(writer)),
            write_failed: AtomicBool::new(false),
        }
    }

    fn emit<T: Serialize>(&self, event: EventType, payload: T) {
        let envelope = JsonEnvelope::new(event, payload);
        let Ok(json) = serde_json::to_string(&envelope) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{json}") {
                // Only the first failure is logged, a closed pipe fails every write
                if !self.write_failed.swap(true, Ordering::Relaxed) {
                    tracing::warn!("failed to write to stdout: {e}");
                }
            }
            let _ = writer.flush();
        }
    }
}

impl StatusReporter for JsonReporter {
    fn status(&self, status: PipelineStatus) {
        self.emit(
            EventType::Status,
            StatusPayload {
                photo: self.photo.clone(),
                status,
            },
        );
    }

    fn record(&self, record: &PlantRecord) {
        self.emit(
            EventType::Result,
            IdentificationPayload {
                result_type: ResultType::Identification,
                photo: self.photo.clone(),
                record,
            },
        );
    }

    fn error(&self, error: &Error) {
        self.emit(EventType::Error, ErrorPayload::from_error(error));
    }
}

/// Create a reporter based on output mode.
pub fn create_reporter(mode: OutputMode, photo: &Path, progress: bool) -> Box<dyn StatusReporter> {
    match mode {
        OutputMode::Human => Box::new(HumanReporter::new(photo, progress)),
        OutputMode::Json => Box::new(JsonReporter::new(photo)),
    }
}

/// Emit a JSON result event to stdout.
///
/// Used by command handlers for structured results in JSON mode.
pub fn emit_json_result<T: Serialize>(payload: &T) {
    let envelope = JsonEnvelope::new(EventType::Result, payload);
    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("failed to serialize JSON result: {e}"),
    }
}
