//! Entity-stage taxonomy extraction.

use crate::constants::knowledge::{PROP_FAMILY, PROP_GENUS, PROP_ORDER};
use serde_json::Value;

/// Taxonomic ranks read from an entity; each is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    /// Taxonomic order.
    pub order: Option<String>,
    /// Taxonomic family.
    pub family: Option<String>,
    /// Taxonomic genus.
    pub genus: Option<String>,
}

impl Taxonomy {
    /// All ranks unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Read ranks for `entity_id` from an entity-data document.
    ///
    /// Falls back to the only entity present when the id was redirected.
    pub fn from_json(document: &Value, entity_id: &str) -> Self {
        let Some(entities) = document.get("entities").and_then(Value::as_object) else {
            return Self::unavailable();
        };

        let entity = entities.get(entity_id).or_else(|| {
            if entities.len() == 1 {
                entities.values().next()
            } else {
                None
            }
        });

        entity.map_or_else(Self::unavailable, |entity| Self {
            order: claim_text(entity, PROP_ORDER),
            family: claim_text(entity, PROP_FAMILY),
            genus: claim_text(entity, PROP_GENUS),
        })
    }

    /// True when no rank was found.
    pub const fn is_empty(&self) -> bool {
        self.order.is_none() && self.family.is_none() && self.genus.is_none()
    }
}

/// Text of the first claim for `property`, if every level is present.
fn claim_text(entity: &Value, property: &str) -> Option<String> {
    entity
        .get("claims")?
        .get(property)?
        .get(0)?
        .pointer("/mainsnak/datavalue/value/text")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
