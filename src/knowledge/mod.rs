//! Species knowledge lookup and record fusion.
//!
//! Resolution is two stages: a summary fetched by species title, then a
//! structured entity fetched by the summary's cross-reference id. Only the
//! first stage is required; the second fills in taxonomy when it can.

mod entity;
mod fetch;
mod record;
mod resolver;
mod summary;

pub use entity::Taxonomy;
pub use fetch::{FetchError, HttpFetcher, JsonFetcher};
pub use record::PlantRecord;
pub use resolver::KnowledgeResolver;
pub use summary::Summary;
