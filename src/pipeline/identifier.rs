//! Photo-to-record orchestration.

use super::PipelineStatus;
use crate::error::{Error, Result};
use crate::inference::{LabelRegistry, ModelLoader, ModelSession, infer, reduce};
use crate::knowledge::{JsonFetcher, KnowledgeResolver, PlantRecord};
use crate::photo::{ImageTensor, Preprocessor};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Runs the identification stages for a photo.
///
/// Shareable across concurrent calls; the only state carried between calls is
/// the cached model inside the session.
pub struct Identifier<L: ModelLoader, F: JsonFetcher> {
    session: ModelSession<L>,
    preprocessor: Preprocessor,
    labels: LabelRegistry,
    resolver: KnowledgeResolver<F>,
}

impl<L: ModelLoader, F: JsonFetcher> Identifier<L, F> {
    /// Assemble an identifier from its stages.
    pub const fn new(
        session: ModelSession<L>,
        preprocessor: Preprocessor,
        resolver: KnowledgeResolver<F>,
    ) -> Self {
        Self {
            session,
            preprocessor,
            labels: LabelRegistry,
            resolver,
        }
    }

    /// Whether the model has been loaded by an earlier call.
    pub fn is_model_loaded(&self) -> bool {
        self.session.is_loaded()
    }

    /// Identify the plant in `photo`, reporting each stage to `report`.
    ///
    /// Ends with [`PipelineStatus::Done`] on success and
    /// [`PipelineStatus::Failed`] on any error, which is returned unchanged.
    pub async fn identify<R>(&self, photo: &Path, mut report: R) -> Result<PlantRecord>
    where
        R: FnMut(PipelineStatus),
    {
        let start = Instant::now();
        let result = self.run_stages(photo, &mut report).await;

        match &result {
            Ok(record) => {
                info!(
                    "Identified {} as '{}' in {:.2}s",
                    photo.display(),
                    record.species(),
                    start.elapsed().as_secs_f64()
                );
                report(PipelineStatus::Done);
            }
            Err(e) => {
                error!("Identification of {} failed: {e}", photo.display());
                report(PipelineStatus::Failed);
            }
        }
        result
    }

    async fn run_stages<R>(&self, photo: &Path, report: &mut R) -> Result<PlantRecord>
    where
        R: FnMut(PipelineStatus),
    {
        report(PipelineStatus::LoadingModel);
        let model = self.session.load().await?;

        report(PipelineStatus::Preprocessing);
        let tensor = self.prepare(photo).await?;

        report(PipelineStatus::Predicting);
        let prediction = infer(&model, tensor).await?;
        let index = reduce(&prediction)?;
        let species = self.labels.name_of(index)?;
        info!("Predicted class {index}: {species}");

        report(PipelineStatus::Resolving);
        self.resolver.resolve(species).await
    }

    async fn prepare(&self, photo: &Path) -> Result<ImageTensor> {
        let preprocessor = self.preprocessor.clone();
        let photo = photo.to_path_buf();
        tokio::task::spawn_blocking(move || preprocessor.prepare(&photo))
            .await
            .map_err(|e| Error::Internal {
                message: format!("preprocessing task failed: {e}"),
            })?
    }
}
