use crate::risk::RiskAssessment;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictedClass {
    Pay,
    Default,
}

impl PredictedClass {
    pub fn label(self) -> &'static str {
        match self {
            PredictedClass::Pay => "pay",
            PredictedClass::Default => "default",
        }
    }
}

/// Outcome of one predict action. Rendered once and dropped.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub predicted_class: PredictedClass,
    pub default_probability: f64,
    pub pay_probability: f64,
    pub assessment: RiskAssessment,
    pub evaluated_at: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(predicted_class: PredictedClass, default_probability: f64) -> Self {
        Self {
            predicted_class,
            default_probability,
            pay_probability: 1.0 - default_probability,
            assessment: RiskAssessment::from_default_probability(default_probability),
            evaluated_at: Utc::now(),
        }
    }
}
