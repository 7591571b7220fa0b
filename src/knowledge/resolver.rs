//! Two-stage species resolution.

use super::{FetchError, JsonFetcher, PlantRecord, Summary, Taxonomy};
use crate::config::KnowledgeConfig;
use crate::error::{Error, Result};
use reqwest::Url;
use tracing::{debug, info, warn};

/// Resolves a species label into a [`PlantRecord`].
///
/// The summary stage is mandatory. The entity stage degrades to
/// unavailable taxonomy on any failure.
pub struct KnowledgeResolver<F: JsonFetcher> {
    fetcher: F,
    summary_base: Url,
    entity_base: Url,
}

impl<F: JsonFetcher> KnowledgeResolver<F> {
    /// Create a resolver over `fetcher` using the configured endpoints.
    pub fn new(fetcher: F, config: &KnowledgeConfig) -> Result<Self> {
        let parse = |field: &str, value: &str| {
            Url::parse(value).map_err(|e| Error::ConfigValidation {
                message: format!("knowledge.{field} '{value}' is not a valid URL: {e}"),
            })
        };

        Ok(Self {
            fetcher,
            summary_base: parse("summary_url", &config.summary_url)?,
            entity_base: parse("entity_url", &config.entity_url)?,
        })
    }

    /// Look up `species` and fuse both stages into a record.
    pub async fn resolve(&self, species: &str) -> Result<PlantRecord> {
        let summary = self
            .fetch_summary(species)
            .await
            .map_err(|source| Error::SpeciesNotResolvable {
                species: species.to_string(),
                source,
            })?;

        let taxonomy = match summary.wikibase_item.as_deref() {
            Some(entity_id) => self.fetch_taxonomy(species, entity_id).await,
            None => {
                warn!("No entity reference for '{species}'; taxonomy unavailable");
                Taxonomy::unavailable()
            }
        };

        info!(
            "Resolved '{}' (taxonomy {})",
            species,
            if taxonomy.is_empty() { "unavailable" } else { "found" }
        );
        Ok(PlantRecord::fuse(species, summary, taxonomy))
    }

    async fn fetch_summary(&self, species: &str) -> std::result::Result<Summary, FetchError> {
        let url = summary_url(&self.summary_base, species)?;
        debug!("Fetching summary for '{species}'");
        let document = self.fetcher.get_json(&url).await?;
        Summary::from_json(&document)
    }

    async fn fetch_taxonomy(&self, species: &str, entity_id: &str) -> Taxonomy {
        let document = match entity_url(&self.entity_base, entity_id) {
            Ok(url) => self.fetcher.get_json(&url).await,
            Err(e) => Err(e),
        };

        match document {
            Ok(document) => Taxonomy::from_json(&document, entity_id),
            Err(e) => {
                warn!("Entity lookup {entity_id} for '{species}' failed: {e}; taxonomy unavailable");
                Taxonomy::unavailable()
            }
        }
    }
}

/// Append `name` as a single path segment, with spaces as underscores.
fn summary_url(base: &Url, name: &str) -> std::result::Result<Url, FetchError> {
    append_segment(base, &name.replace(' ', "_"))
}

fn entity_url(base: &Url, entity_id: &str) -> std::result::Result<Url, FetchError> {
    append_segment(base, &format!("{entity_id}.json"))
}

fn append_segment(base: &Url, segment: &str) -> std::result::Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| FetchError::Url(base.to_string()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
