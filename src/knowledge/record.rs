//! The fused plant record.

use super::{Summary, Taxonomy};
use crate::constants::placeholder::{NO_DESCRIPTION, UNAVAILABLE, UNKNOWN_COMMON_NAME};
use serde::{Serialize, Serializer};

/// Everything known about an identified species.
///
/// Built once by the resolver and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantRecord {
    species: String,
    title: String,
    description: String,
    display_name: String,
    #[serde(serialize_with = "or_unavailable")]
    order: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    family: Option<String>,
    #[serde(serialize_with = "or_unavailable")]
    genus: Option<String>,
    reference_url: Option<String>,
}

impl PlantRecord {
    /// Fuse summary and taxonomy for `species`, filling placeholders.
    pub(crate) fn fuse(species: &str, summary: Summary, taxonomy: Taxonomy) -> Self {
        Self {
            species: species.to_string(),
            title: summary.title.unwrap_or_else(|| species.to_string()),
            description: summary
                .extract
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            display_name: summary
                .display_title
                .unwrap_or_else(|| UNKNOWN_COMMON_NAME.to_string()),
            order: taxonomy.order,
            family: taxonomy.family,
            genus: taxonomy.genus,
            reference_url: summary.page_url,
        }
    }

    /// Label the model predicted.
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Canonical page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Summary extract or placeholder.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Common display name or placeholder.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Taxonomic order, or the unavailable marker.
    pub fn order(&self) -> &str {
        self.order.as_deref().unwrap_or(UNAVAILABLE)
    }

    /// Taxonomic family, or the unavailable marker.
    pub fn family(&self) -> &str {
        self.family.as_deref().unwrap_or(UNAVAILABLE)
    }

    /// Taxonomic genus, or the unavailable marker.
    pub fn genus(&self) -> &str {
        self.genus.as_deref().unwrap_or(UNAVAILABLE)
    }

    /// Link to the full article, when the summary carried one.
    pub fn reference_url(&self) -> Option<&str> {
        self.reference_url.as_deref()
    }

    /// True when at least one taxonomic rank was resolved.
    pub const fn has_taxonomy(&self) -> bool {
        self.order.is_some() || self.family.is_some() || self.genus.is_some()
    }
}

#[allow(clippy::ref_option)]
fn or_unavailable<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(UNAVAILABLE))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_for_empty_summary() {
        let record = PlantRecord::fuse("ti", Summary::default(), Taxonomy::unavailable());

        assert_eq!(record.title(), "ti");
        assert_eq!(record.description(), NO_DESCRIPTION);
        assert_eq!(record.display_name(), UNKNOWN_COMMON_NAME);
        assert_eq!(record.order(), UNAVAILABLE);
        assert_eq!(record.family(), UNAVAILABLE);
        assert_eq!(record.genus(), UNAVAILABLE);
        assert!(record.reference_url().is_none());
        assert!(!record.has_taxonomy());
    }

    #[test]
    fn test_fuse_keeps_resolved_fields() {
        let summary = Summary {
            title: Some("Cycas revoluta".to_string()),
            display_title: Some("Cycas revoluta".to_string()),
            extract: Some("A species of gymnosperm.".to_string()),
            page_url: Some("https://en.wikipedia.org/wiki/Cycas_revoluta".to_string()),
            wikibase_item: Some("Q310861".to_string()),
        };
        let taxonomy = Taxonomy {
            genus: Some("Cycas".to_string()),
            ..Taxonomy::default()
        };

        let record = PlantRecord::fuse("sago cycad", summary, taxonomy);
        assert_eq!(record.species(), "sago cycad");
        assert_eq!(record.title(), "Cycas revoluta");
        assert_eq!(record.genus(), "Cycas");
        assert_eq!(record.order(), UNAVAILABLE);
        assert!(record.has_taxonomy());
    }

    #[test]
    fn test_serialized_ranks_use_marker() {
        let record = PlantRecord::fuse("ivy tree", Summary::default(), Taxonomy::unavailable());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["order"], "N/A");
        assert_eq!(json["family"], "N/A");
        assert_eq!(json["genus"], "N/A");
        assert!(json["reference_url"].is_null());
        assert_eq!(json["species"], "ivy tree");
    }
}
