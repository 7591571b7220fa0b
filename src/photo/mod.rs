//! Photo preprocessing into model input tensors.

mod preprocess;
mod tensor;

pub use preprocess::Preprocessor;
pub use tensor::ImageTensor;
