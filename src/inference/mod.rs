//! Inference module for plant species classification.

mod labels;
mod onnx;
mod prediction;
mod reducer;
mod session;

pub use labels::{ClassIndex, LabelRegistry, SPECIES_LABELS};
pub use onnx::{OnnxClassifier, OnnxLoader};
pub use prediction::RawPrediction;
pub use reducer::reduce;
pub use session::{Classifier, ModelLoader, ModelSession, infer};
