//! Class index to species name mapping.

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Species names in model label order; index 0 holds class 1.
pub const SPECIES_LABELS: [&str; 7] = [
    "common guava",
    "ivy tree",
    "garden geranium",
    "painters palette",
    "ti",
    "callistemon hybridus",
    "sago cycad",
];

/// A class index as emitted by the model.
///
/// Not validated on construction; the registry rejects indices outside
/// the label space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassIndex(pub i64);

impl ClassIndex {
    /// Raw index value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable registry of the species the model can recognise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelRegistry;

impl LabelRegistry {
    /// Lowest valid class index.
    pub const FIRST: i64 = 1;

    /// Look up the species name for `index`.
    pub fn name_of(self, index: ClassIndex) -> Result<&'static str> {
        index
            .0
            .checked_sub(Self::FIRST)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|slot| SPECIES_LABELS.get(slot))
            .copied()
            .ok_or(Error::InvalidClassIndex { index: index.0 })
    }

    /// All `(index, name)` pairs in index order.
    pub fn iter(self) -> impl Iterator<Item = (ClassIndex, &'static str)> {
        (Self::FIRST..)
            .zip(SPECIES_LABELS)
            .map(|(index, name)| (ClassIndex(index), name))
    }

    /// Number of classes.
    pub const fn len(self) -> usize {
        SPECIES_LABELS.len()
    }

    /// Always false; the label space is fixed.
    pub const fn is_empty(self) -> bool {
        SPECIES_LABELS.is_empty()
    }
}
