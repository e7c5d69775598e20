pub mod artifact;
pub mod error;
pub mod loader;

pub use artifact::LogisticPipeline;
pub use error::{InferenceError, ModelLoadError};
pub use loader::ModelLoader;

use crate::domain::record::FeatureRow;

/// Class label the artifact uses for "not fully paid".
pub const DEFAULT_CLASS_LABEL: i64 = 1;
pub const PAY_CLASS_LABEL: i64 = 0;

/// A fitted binary classifier over one keyed input row.
pub trait Classifier: Send + Sync {
    /// Class labels in the order `predict_proba` reports them.
    fn classes(&self) -> &[i64];

    fn predict(&self, row: &FeatureRow) -> Result<i64, InferenceError>;

    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError>;
}
