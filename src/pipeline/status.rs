//! Pipeline progress states.

use serde::Serialize;
use std::fmt;

/// Stage the pipeline is in, reported to the caller as it advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Loading the model artifact (no-op after the first run).
    LoadingModel,
    /// Decoding and resizing the photo.
    Preprocessing,
    /// Running the forward pass and vote.
    Predicting,
    /// Fetching species knowledge.
    Resolving,
    /// Record produced.
    Done,
    /// A stage failed; the error is returned to the caller.
    Failed,
}

impl PipelineStatus {
    /// Whether no further status follows.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::LoadingModel => "Loading model",
            Self::Preprocessing => "Preparing photo",
            Self::Predicting => "Identifying",
            Self::Resolving => "Looking up species",
            Self::Done => "Done",
            Self::Failed => "Failed",
        };
        f.write_str(text)
    }
}
