use std::path::PathBuf;
use thiserror::Error;

/// The artifact could not be turned into a usable classifier. Fatal for the session.
#[derive(Debug, Clone, Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact {path}: {detail}")]
    Io { path: PathBuf, detail: String },
    #[error("model artifact {path} is not valid: {detail}")]
    Parse { path: PathBuf, detail: String },
    #[error("model artifact is incompatible: {0}")]
    Incompatible(String),
}

/// A single predict call failed. The session stays usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("input is missing column `{0}`")]
    MissingColumn(String),
    #[error("column `{column}` expects {expected} values, got {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("found unknown category {value:?} in column `{column}` during transform")]
    UnknownCategory { column: String, value: String },
    #[error("column `{0}` holds a non-finite value")]
    NonFinite(String),
    #[error("model returned an invalid probability: {0}")]
    InvalidProbability(f64),
    #[error("model returned unexpected class label {0}")]
    UnexpectedClass(i64),
    #[error("model output has {found} probabilities for {expected} classes")]
    ShapeMismatch { expected: usize, found: usize },
}
