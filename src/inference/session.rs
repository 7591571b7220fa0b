//! Load-once model session.

use super::RawPrediction;
use crate::error::{Error, Result};
use crate::photo::ImageTensor;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// A loaded classification model.
pub trait Classifier: Send + Sync {
    /// Run one forward pass, consuming the input tensor.
    fn infer(&self, tensor: ImageTensor) -> Result<RawPrediction>;
}

/// Loads a [`Classifier`] from its artifact.
pub trait ModelLoader: Send + Sync + 'static {
    /// The classifier produced by this loader.
    type Model: Classifier + 'static;

    /// Load the model. Expensive; called at most once per successful session.
    fn load(&self) -> Result<Self::Model>;

    /// Human-readable description of the artifact for logs.
    fn describe(&self) -> String;
}

/// Owns a model loader and caches the loaded model.
///
/// Concurrent callers of [`ModelSession::load`] share a single load; the
/// cached model is read-only afterwards. A failed load is not cached.
pub struct ModelSession<L: ModelLoader> {
    loader: Arc<L>,
    model: OnceCell<Arc<L::Model>>,
}

impl<L: ModelLoader> ModelSession<L> {
    /// Create a session that has not loaded its model yet.
    pub fn new(loader: L) -> Self {
        Self {
            loader: Arc::new(loader),
            model: OnceCell::new(),
        }
    }

    /// Return the loaded model, loading it on first use.
    pub async fn load(&self) -> Result<Arc<L::Model>> {
        let model = self
            .model
            .get_or_try_init(|| async {
                let loader = Arc::clone(&self.loader);
                let description = loader.describe();
                info!("Loading model: {description}");
                let start = Instant::now();

                let model = tokio::task::spawn_blocking(move || loader.load())
                    .await
                    .map_err(|e| Error::Internal {
                        message: format!("model load task failed: {e}"),
                    })??;

                info!(
                    "Model loaded in {:.2}s",
                    start.elapsed().as_secs_f64()
                );
                Ok::<_, Error>(Arc::new(model))
            })
            .await?;

        Ok(Arc::clone(model))
    }

    /// Whether the model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }
}

/// Run a forward pass on the blocking thread pool.
pub async fn infer<M: Classifier + 'static>(
    model: &Arc<M>,
    tensor: ImageTensor,
) -> Result<RawPrediction> {
    let model = Arc::clone(model);
    let start = Instant::now();

    let prediction = tokio::task::spawn_blocking(move || model.infer(tensor))
        .await
        .map_err(|e| Error::Internal {
            message: format!("inference task failed: {e}"),
        })??;

    debug!(
        "Forward pass produced shape {:?} in {:.1}ms",
        prediction.shape(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(prediction)
}
