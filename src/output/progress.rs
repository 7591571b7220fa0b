//! Terminal spinner that follows pipeline status.

use crate::pipeline::PipelineStatus;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Create a spinner for identifying a single photo.
pub fn create_status_spinner(photo: &Path, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let file_name = photo
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo");

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] {{msg}} - {file_name}"
            ))
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("█▓▒░ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Move the spinner to `status`, finishing it on terminal states.
pub fn update_status(pb: Option<&ProgressBar>, status: PipelineStatus) {
    let Some(pb) = pb else {
        return;
    };

    if status.is_terminal() {
        pb.finish_and_clear();
    } else {
        pb.set_message(format!("{status}..."));
    }
}
