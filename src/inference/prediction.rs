//! Raw model output.

use crate::error::{Error, Result};

/// Unreduced model output: a shape and its row-major values.
///
/// Row-major storage is the flattened order of the nested output, so
/// flattening is a plain iteration over `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrediction {
    shape: Vec<usize>,
    values: Vec<i64>,
}

impl RawPrediction {
    /// Build a prediction, checking that `values` fills `shape`.
    pub fn new(shape: Vec<usize>, values: Vec<i64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(Error::Inference {
                reason: format!(
                    "output shape {shape:?} needs {expected} values, got {}",
                    values.len()
                ),
            });
        }
        Ok(Self { shape, values })
    }

    /// One-dimensional prediction over `values`.
    pub fn from_flat(values: Vec<i64>) -> Self {
        Self {
            shape: vec![values.len()],
            values,
        }
    }

    /// Output shape as reported by the model.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Class index values in flattened order.
    pub fn flatten(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    /// Number of scalar values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the output holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
