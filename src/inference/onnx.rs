//! ONNX Runtime classifier backend.

use super::{Classifier, ModelLoader, RawPrediction};
use crate::error::{Error, Result};
use crate::photo::ImageTensor;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::{DynValue, Tensor, TensorElementType};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Loads an ONNX model file into an [`OnnxClassifier`].
#[derive(Debug, Clone)]
pub struct OnnxLoader {
    path: PathBuf,
    intra_threads: usize,
}

impl OnnxLoader {
    /// Create a loader for the model at `path`.
    ///
    /// `intra_threads` of 0 keeps the runtime default.
    pub fn new(path: impl Into<PathBuf>, intra_threads: usize) -> Self {
        Self {
            path: path.into(),
            intra_threads,
        }
    }

    fn load_error(&self, reason: impl Into<String>) -> Error {
        Error::ModelLoad {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl ModelLoader for OnnxLoader {
    type Model = OnnxClassifier;

    fn load(&self) -> Result<OnnxClassifier> {
        if !self.path.is_file() {
            return Err(self.load_error("model file does not exist"));
        }

        let mut builder = Session::builder()
            .map_err(|e| self.load_error(format!("failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| self.load_error(format!("failed to set optimization level: {e}")))?;

        if self.intra_threads > 0 {
            builder = builder
                .with_intra_threads(self.intra_threads)
                .map_err(|e| self.load_error(format!("failed to set thread count: {e}")))?;
        }

        let session = builder
            .commit_from_file(&self.path)
            .map_err(|e| self.load_error(e.to_string()))?;

        OnnxClassifier::from_session(session, &self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A loaded ONNX classification model.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
    input_type: TensorElementType,
    input_dims: Vec<i64>,
}

impl OnnxClassifier {
    fn from_session(session: Session, path: &Path) -> Result<Self> {
        let load_error = |reason: String| Error::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| load_error("model declares no inputs".to_string()))?;

        let input_name = input.name().to_string();
        let input_type = input
            .dtype()
            .tensor_type()
            .ok_or_else(|| load_error(format!("model input '{input_name}' is not a tensor")))?;
        let input_dims: Vec<i64> = input
            .dtype()
            .tensor_shape()
            .map(|shape| shape.iter().copied().collect())
            .unwrap_or_default();

        if !matches!(
            input_type,
            TensorElementType::Int32
                | TensorElementType::Int64
                | TensorElementType::Uint8
                | TensorElementType::Float32
        ) {
            return Err(load_error(format!(
                "unsupported input element type {input_type:?}"
            )));
        }

        info!(
            "Model input '{}': {:?} {:?}, {} output(s)",
            input_name,
            input_type,
            input_dims,
            session.outputs().len()
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            input_type,
            input_dims,
        })
    }

    /// Build the input value in the element type the model declares.
    fn build_input(&self, shape: [usize; 4], data: Vec<i32>) -> Result<DynValue> {
        let tensor_error = |e: ort::Error| Error::Inference {
            reason: format!("failed to build input tensor: {e}"),
        };

        let value = match self.input_type {
            TensorElementType::Int32 => Tensor::from_array((shape, data))
                .map_err(tensor_error)?
                .into_dyn(),
            TensorElementType::Int64 => {
                let data: Vec<i64> = data.into_iter().map(i64::from).collect();
                Tensor::from_array((shape, data))
                    .map_err(tensor_error)?
                    .into_dyn()
            }
            TensorElementType::Uint8 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let data: Vec<u8> = data.into_iter().map(|v| v.clamp(0, 255) as u8).collect();
                Tensor::from_array((shape, data))
                    .map_err(tensor_error)?
                    .into_dyn()
            }
            TensorElementType::Float32 => {
                #[allow(clippy::cast_precision_loss)]
                let data: Vec<f32> = data.into_iter().map(|v| v as f32).collect();
                Tensor::from_array((shape, data))
                    .map_err(tensor_error)?
                    .into_dyn()
            }
            other => {
                return Err(Error::Inference {
                    reason: format!("unsupported input element type {other:?}"),
                });
            }
        };
        Ok(value)
    }
}

impl Classifier for OnnxClassifier {
    fn infer(&self, tensor: ImageTensor) -> Result<RawPrediction> {
        let shape = tensor.shape();
        if !shape_matches(&self.input_dims, &shape) {
            return Err(Error::Inference {
                reason: format!(
                    "input tensor shape {:?} does not match model input {:?}",
                    shape, self.input_dims
                ),
            });
        }

        let (shape, data) = tensor.into_parts();
        let input = self.build_input(shape, data)?;

        let mut session = self.session.lock().map_err(|_| Error::Inference {
            reason: "model session lock poisoned".to_string(),
        })?;

        // Outputs borrow the session and are dropped with it at the end of
        // this scope, on both the success and the error path.
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (name, output) = outputs.iter().next().ok_or_else(|| Error::Inference {
            reason: "model produced no outputs".to_string(),
        })?;
        debug!("Reading class indices from output '{name}'");

        if let Ok((dims, values)) = output.try_extract_tensor::<i64>() {
            return RawPrediction::new(output_shape(dims)?, values.to_vec());
        }
        if let Ok((dims, values)) = output.try_extract_tensor::<i32>() {
            return RawPrediction::new(
                output_shape(dims)?,
                values.iter().copied().map(i64::from).collect(),
            );
        }
        if let Ok((dims, values)) = output.try_extract_tensor::<f32>() {
            let values = values
                .iter()
                .map(|&v| float_to_index(v))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| Error::Inference {
                    reason: format!("output '{name}' contains non-finite class indices"),
                })?;
            return RawPrediction::new(output_shape(dims)?, values);
        }

        Err(Error::Inference {
            reason: format!("output '{name}' is not an integer or float tensor"),
        })
    }
}

/// Compare declared model dims against a concrete shape; non-positive dims are dynamic.
fn shape_matches(declared: &[i64], actual: &[usize]) -> bool {
    if declared.is_empty() {
        return true;
    }
    declared.len() == actual.len()
        && declared
            .iter()
            .zip(actual)
            .all(|(&d, &a)| d <= 0 || usize::try_from(d).is_ok_and(|d| d == a))
}

fn output_shape(dims: &[i64]) -> Result<Vec<usize>> {
    dims.iter()
        .map(|&d| {
            usize::try_from(d).map_err(|_| Error::Inference {
                reason: format!("output has negative dimension {d}"),
            })
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_index(value: f32) -> Option<i64> {
    value.is_finite().then(|| value.round() as i64)
}
