use crate::model::{LogisticPipeline, ModelLoadError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub type LoadResult = Result<Arc<LogisticPipeline>, ModelLoadError>;

/// Loads the artifact at most once; every later call returns the cached outcome, failures
/// included.
#[derive(Debug)]
pub struct ModelLoader {
    path: PathBuf,
    cell: OnceLock<LoadResult>,
}

impl ModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> LoadResult {
        self.cell
            .get_or_init(|| {
                tracing::info!(model_path = %self.path.display(), "loading model artifact");
                let loaded = LogisticPipeline::from_path(&self.path).map(Arc::new);
                match &loaded {
                    Ok(model) => tracing::info!(
                        model_path = %self.path.display(),
                        coefficients = model.document().coefficients.len(),
                        "model artifact loaded"
                    ),
                    Err(e) => tracing::error!(
                        model_path = %self.path.display(),
                        error = %e,
                        "model artifact failed to load"
                    ),
                }
                loaded
            })
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
