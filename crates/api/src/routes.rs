use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use loanrisk_core::collector::BorrowerForm;
use loanrisk_core::inference::evaluate;
use loanrisk_core::model::loader::LoadResult;
use std::collections::HashMap;

use crate::view::{self, Summary};

#[derive(Debug, Clone)]
pub struct AppState {
    pub model: LoadResult,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/predict", post(predict))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.model {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "model unavailable"),
    }
}

async fn dashboard(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    if let Err(e) = &state.model {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(view::load_error_page(e).into_string()),
        );
    }

    let form = BorrowerForm::default();
    (
        StatusCode::OK,
        Html(view::dashboard_page(&form, &Summary::Placeholder).into_string()),
    )
}

async fn predict(
    State(state): State<AppState>,
    Form(submitted): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let model = match &state.model {
        Ok(model) => model,
        Err(e) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(view::load_error_page(e).into_string()),
            )
        }
    };

    let form = BorrowerForm::from_submission(&submitted);
    let record = form.snapshot();

    let summary = match evaluate(model.as_ref(), &record) {
        Ok(result) => Summary::Result(result),
        Err(e) => {
            tracing::warn!(error = %e, purpose = %record.purpose, "prediction failed");
            Summary::Error(e)
        }
    };

    (
        StatusCode::OK,
        Html(view::dashboard_page(&form, &summary).into_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanrisk_core::model::{LogisticPipeline, ModelLoadError};
    use serde_json::json;
    use std::sync::Arc;

    fn artifact(purposes: &[&str]) -> serde_json::Value {
        let mut coefficients = vec![
            -0.2, 0.05, 0.1, -0.2, 0.03, -0.3, 0.01, 0.05, 0.05, 0.25, 0.0, 0.05,
        ];
        coefficients.extend(purposes.iter().map(|_| 0.0));
        json!({
            "format": "logistic-pipeline",
            "version": 1,
            "input_columns": loanrisk_core::domain::record::FEATURE_KEYS,
            "classes": [0, 1],
            "numeric": [
                {"column": "credit.policy", "mean": 0.8, "scale": 0.4},
                {"column": "int.rate", "mean": 0.12, "scale": 0.027},
                {"column": "installment", "mean": 319.0, "scale": 207.0},
                {"column": "log.annual.inc", "mean": 10.93, "scale": 0.61},
                {"column": "dti", "mean": 12.6, "scale": 6.9},
                {"column": "fico", "mean": 710.8, "scale": 37.97},
                {"column": "days.with.cr.line", "mean": 4560.0, "scale": 2497.0},
                {"column": "revol.bal", "mean": 16913.0, "scale": 33755.0},
                {"column": "revol.util", "mean": 46.8, "scale": 29.0},
                {"column": "inq.last.6mths", "mean": 1.58, "scale": 2.2},
                {"column": "delinq.2yrs", "mean": 0.16, "scale": 0.55},
                {"column": "pub.rec", "mean": 0.06, "scale": 0.26}
            ],
            "categorical": [{"column": "purpose", "categories": purposes}],
            "coefficients": coefficients,
            "intercept": -1.7
        })
    }

    fn loaded_state(purposes: &[&str]) -> AppState {
        let doc = serde_json::from_value(artifact(purposes)).unwrap();
        AppState {
            model: Ok(Arc::new(LogisticPipeline::from_document(doc).unwrap())),
        }
    }

    fn failed_state() -> AppState {
        AppState {
            model: Err(ModelLoadError::Incompatible("trained on other columns".to_string())),
        }
    }

    fn submission(pairs: &[(&str, &str)]) -> Form<HashMap<String, String>> {
        Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn dashboard_starts_with_placeholder() {
        let state = loaded_state(&loanrisk_core::domain::record::PURPOSES);
        let (status, Html(body)) = dashboard(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Borrower Profile"));
        assert!(body.contains("name=\"fico\""));
        assert!(body.contains("Predict Default Risk"));
        assert!(!body.contains("class=\"risk-badge"));
    }

    #[tokio::test]
    async fn predict_renders_summary_and_keeps_inputs() {
        let state = loaded_state(&loanrisk_core::domain::record::PURPOSES);
        let (status, Html(body)) = predict(
            State(state),
            submission(&[("fico", "612"), ("purpose", "credit_card")]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("class=\"risk-badge"));
        assert!(body.contains("Default Probability"));
        assert!(body.contains("Payback Probability"));
        assert!(body.contains("<progress"));
        assert!(body.contains("value=\"612\""));
        assert!(body.contains("Predicted class: "));
        assert!(!body.contains("Error during prediction"));
    }

    #[tokio::test]
    async fn inference_failure_replaces_summary() {
        // Artifact that never saw "educational" during training.
        let state = loaded_state(&["debt_consolidation", "credit_card", "other"]);
        let (status, Html(body)) =
            predict(State(state), submission(&[("purpose", "educational")])).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error during prediction"));
        assert!(body.contains("unknown category"));
        assert!(!body.contains("class=\"risk-badge"));
        // The form is still there so the user can retry.
        assert!(body.contains("Predict Default Risk"));
    }

    #[tokio::test]
    async fn load_failure_hides_form_everywhere() {
        let (status, Html(body)) = dashboard(State(failed_state())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("Could not load model"));
        assert!(body.contains("trained on other columns"));
        assert!(!body.contains("<form"));

        let (status, Html(body)) = predict(State(failed_state()), submission(&[])).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.contains("Error during prediction"));
        assert!(!body.contains("class=\"risk-badge"));
    }

    #[tokio::test]
    async fn healthz_reflects_model_state() {
        let (status, _) = healthz(State(loaded_state(&["other"]))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = healthz(State(failed_state())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, "model unavailable");
    }
}
