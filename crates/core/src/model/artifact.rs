//! JSON model artifact: a fitted logistic regression behind standard scaling of the numeric
//! columns and one-hot encoding of the categorical ones.

use crate::domain::record::{FeatureRow, FEATURE_KEYS};
use crate::model::{
    Classifier, InferenceError, ModelLoadError, DEFAULT_CLASS_LABEL, PAY_CLASS_LABEL,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

pub const ARTIFACT_FORMAT: &str = "logistic-pipeline";
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericColumn {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub column: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactDocument {
    pub format: String,
    pub version: u32,
    pub input_columns: Vec<String>,
    pub classes: Vec<i64>,
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone)]
pub struct LogisticPipeline {
    doc: ArtifactDocument,
}

impl LogisticPipeline {
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let bytes = std::fs::read(path).map_err(|e| ModelLoadError::Io {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let doc = serde_json::from_slice::<ArtifactDocument>(&bytes).map_err(|e| {
            ModelLoadError::Parse {
                path: path.to_path_buf(),
                detail: e.to_string(),
            }
        })?;
        Self::from_document(doc)
    }

    pub fn from_document(doc: ArtifactDocument) -> Result<Self, ModelLoadError> {
        validate(&doc)?;
        Ok(Self { doc })
    }

    pub fn document(&self) -> &ArtifactDocument {
        &self.doc
    }

    fn decision_function(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let mut z = self.doc.intercept;
        let mut coefs = self.doc.coefficients.iter();

        for col in &self.doc.numeric {
            let value = lookup(row, &col.column)?;
            let x = value.as_f64().ok_or_else(|| InferenceError::TypeMismatch {
                column: col.column.clone(),
                expected: "numeric",
                found: value.type_name(),
            })?;
            if !x.is_finite() {
                return Err(InferenceError::NonFinite(col.column.clone()));
            }
            // Coefficient count is checked at load time.
            let w = coefs.next().copied().unwrap_or_default();
            z += w * (x - col.mean) / col.scale;
        }

        for col in &self.doc.categorical {
            let value = lookup(row, &col.column)?;
            let text = value.as_text().ok_or_else(|| InferenceError::TypeMismatch {
                column: col.column.clone(),
                expected: "text",
                found: value.type_name(),
            })?;
            let hot = col
                .categories
                .iter()
                .position(|c| c == text)
                .ok_or_else(|| InferenceError::UnknownCategory {
                    column: col.column.clone(),
                    value: text.to_string(),
                })?;
            let block: Vec<f64> = coefs.by_ref().take(col.categories.len()).copied().collect();
            z += block.get(hot).copied().unwrap_or_default();
        }

        Ok(z)
    }
}

impl Classifier for LogisticPipeline {
    fn classes(&self) -> &[i64] {
        &self.doc.classes
    }

    fn predict(&self, row: &FeatureRow) -> Result<i64, InferenceError> {
        let proba = self.predict_proba(row)?;
        // Ties go to the first class, as an argmax does.
        let idx = if proba[1] > proba[0] { 1 } else { 0 };
        Ok(self.doc.classes[idx])
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        let z = self.decision_function(row)?;
        let positive = sigmoid(z);
        Ok(vec![1.0 - positive, positive])
    }
}

fn lookup<'a>(
    row: &'a FeatureRow,
    column: &str,
) -> Result<&'a crate::domain::record::FeatureValue, InferenceError> {
    row.get(column)
        .ok_or_else(|| InferenceError::MissingColumn(column.to_string()))
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn validate(doc: &ArtifactDocument) -> Result<(), ModelLoadError> {
    let incompatible = |msg: String| Err(ModelLoadError::Incompatible(msg));

    if doc.format != ARTIFACT_FORMAT {
        return incompatible(format!(
            "unsupported format {:?} (expected {ARTIFACT_FORMAT:?})",
            doc.format
        ));
    }
    if doc.version != ARTIFACT_VERSION {
        return incompatible(format!(
            "unsupported artifact version {} (expected {ARTIFACT_VERSION})",
            doc.version
        ));
    }

    let expected: Vec<&str> = FEATURE_KEYS.to_vec();
    let declared: Vec<&str> = doc.input_columns.iter().map(String::as_str).collect();
    if declared != expected {
        return incompatible(format!(
            "artifact was trained on columns {declared:?}, this build sends {expected:?}"
        ));
    }

    let labels: BTreeSet<i64> = doc.classes.iter().copied().collect();
    let known: BTreeSet<i64> = [PAY_CLASS_LABEL, DEFAULT_CLASS_LABEL].into_iter().collect();
    if doc.classes.len() != 2 || labels != known {
        return incompatible(format!(
            "expected class labels {PAY_CLASS_LABEL} and {DEFAULT_CLASS_LABEL}, got {:?}",
            doc.classes
        ));
    }

    let mut seen = BTreeSet::new();
    let used = doc
        .numeric
        .iter()
        .map(|c| c.column.as_str())
        .chain(doc.categorical.iter().map(|c| c.column.as_str()));
    for column in used {
        if !declared.contains(&column) {
            return incompatible(format!("transform references undeclared column `{column}`"));
        }
        if !seen.insert(column) {
            return incompatible(format!("column `{column}` is transformed twice"));
        }
    }

    for col in &doc.numeric {
        if !col.mean.is_finite() || !col.scale.is_finite() || col.scale == 0.0 {
            return incompatible(format!(
                "column `{}` has unusable scaling (mean={}, scale={})",
                col.column, col.mean, col.scale
            ));
        }
    }

    for col in &doc.categorical {
        if col.categories.is_empty() {
            return incompatible(format!("column `{}` has no categories", col.column));
        }
    }

    let width = doc.numeric.len()
        + doc
            .categorical
            .iter()
            .map(|c| c.categories.len())
            .sum::<usize>();
    if doc.coefficients.len() != width {
        return incompatible(format!(
            "expected {width} coefficients, found {}",
            doc.coefficients.len()
        ));
    }
    if doc.coefficients.iter().any(|w| !w.is_finite()) || !doc.intercept.is_finite() {
        return incompatible("coefficients must be finite".to_string());
    }

    Ok(())
}
