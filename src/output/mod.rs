//! CLI output: status reporting, JSON envelopes and text rendering.

mod human;
pub mod json_envelope;
mod progress;
mod reporter;

pub use human::format_record;
pub use reporter::{
    HumanReporter, JsonReporter, OutputMode, StatusReporter, create_reporter, emit_json_result,
};
