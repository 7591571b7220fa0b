//! Identification pipeline.

mod identifier;
mod status;

pub use identifier::Identifier;
pub use status::PipelineStatus;
