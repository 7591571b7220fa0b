//! JSON envelope types for CLI output.
//!
//! Every line leafy writes to stdout in JSON mode is one envelope, so a UI
//! shell can drive its status display and result view from the stream.

use crate::error::{Error, ErrorKind};
use crate::knowledge::PlantRecord;
use crate::pipeline::PipelineStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Envelope format version.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping all CLI output events.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T> {
    /// API specification version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Pipeline moved to a new stage.
    Status,
    /// Final result.
    Result,
    /// Error occurred.
    Error,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Plant identification.
    Identification,
    /// Label registry listing.
    Labels,
    /// Configuration display.
    Config,
}

/// Payload for `status` events.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPayload {
    /// Photo being identified.
    pub photo: PathBuf,
    /// Stage entered.
    pub status: PipelineStatus,
}

/// Payload for an identification result.
#[derive(Debug, Clone, Serialize)]
pub struct IdentificationPayload<'a> {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Photo that was identified.
    pub photo: PathBuf,
    /// Resolved plant record.
    pub record: &'a PlantRecord,
}

/// Payload for error events.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    /// Error kind (`snake_case` identifier).
    pub code: ErrorKind,
    /// Human-readable error message, including causes.
    pub message: String,
    /// Suggested action to resolve the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorPayload {
    /// Build from an error, flattening its source chain into the message.
    pub fn from_error(error: &Error) -> Self {
        let kind = error.kind();
        Self {
            code: kind,
            message: error_chain(error),
            suggestion: suggestion_for(kind).map(str::to_string),
        }
    }
}

/// One label in a registry listing.
#[derive(Debug, Clone, Serialize)]
pub struct LabelEntry {
    /// Class index.
    pub index: i64,
    /// Species label.
    pub name: String,
}

/// Payload for the labels listing.
#[derive(Debug, Clone, Serialize)]
pub struct LabelsPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Labels in index order.
    pub labels: Vec<LabelEntry>,
}

/// Payload for config show result.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// The configuration contents (as JSON value for flexibility).
    pub config: serde_json::Value,
}

/// Render an error followed by its `source()` chain, separated by `: `.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

const fn suggestion_for(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::ImageDecode => Some("check that the file exists and is a JPEG, PNG or WebP photo"),
        ErrorKind::ModelLoad => Some("pass --model or set model.path in the config file"),
        ErrorKind::SpeciesNotResolvable => Some("check your network connection and try again"),
        ErrorKind::Config => Some("run 'leafy config path' to locate the config file"),
        ErrorKind::UnsupportedFormat
        | ErrorKind::Inference
        | ErrorKind::EmptyPrediction
        | ErrorKind::InvalidClassIndex
        | ErrorKind::Internal => None,
    }
}
