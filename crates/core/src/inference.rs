use crate::domain::prediction::{PredictedClass, PredictionResult};
use crate::domain::record::BorrowerRecord;
use crate::model::{Classifier, InferenceError, DEFAULT_CLASS_LABEL, PAY_CLASS_LABEL};

pub fn evaluate(
    model: &dyn Classifier,
    record: &BorrowerRecord,
) -> Result<PredictionResult, InferenceError> {
    let row = record.to_feature_row();

    let label = model.predict(&row)?;
    let predicted_class = match label {
        DEFAULT_CLASS_LABEL => PredictedClass::Default,
        PAY_CLASS_LABEL => PredictedClass::Pay,
        other => return Err(InferenceError::UnexpectedClass(other)),
    };

    let proba = model.predict_proba(&row)?;
    let classes = model.classes();
    if proba.len() != classes.len() {
        return Err(InferenceError::ShapeMismatch {
            expected: classes.len(),
            found: proba.len(),
        });
    }
    let idx = classes
        .iter()
        .position(|c| *c == DEFAULT_CLASS_LABEL)
        .ok_or(InferenceError::UnexpectedClass(DEFAULT_CLASS_LABEL))?;

    let default_probability = proba[idx];
    if !(0.0..=1.0).contains(&default_probability) {
        return Err(InferenceError::InvalidProbability(default_probability));
    }

    let result = PredictionResult::new(predicted_class, default_probability);
    tracing::info!(
        default_probability,
        predicted_class = result.predicted_class.label(),
        tier = result.assessment.tier.label(),
        "borrower evaluated"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{sample_record, FeatureRow, PURPOSES};
    use crate::model::artifact::tests::artifact_json;
    use crate::model::LogisticPipeline;
    use crate::risk::{RiskBadge, RiskTier};

    /// Returns a fixed default probability regardless of input.
    struct FixedModel {
        classes: Vec<i64>,
        p_default: f64,
    }

    impl FixedModel {
        fn new(p_default: f64) -> Self {
            Self {
                classes: vec![0, 1],
                p_default,
            }
        }
    }

    impl Classifier for FixedModel {
        fn classes(&self) -> &[i64] {
            &self.classes
        }

        fn predict(&self, _row: &FeatureRow) -> Result<i64, InferenceError> {
            Ok(if self.p_default > 0.5 { 1 } else { 0 })
        }

        fn predict_proba(&self, _row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
            let mut out = vec![0.0; self.classes.len()];
            for (i, c) in self.classes.iter().enumerate() {
                out[i] = if *c == 1 {
                    self.p_default
                } else {
                    1.0 - self.p_default
                };
            }
            Ok(out)
        }
    }

    fn pipeline() -> LogisticPipeline {
        LogisticPipeline::from_document(serde_json::from_value(artifact_json()).unwrap()).unwrap()
    }

    #[test]
    fn very_high_risk_scenario() {
        let r = evaluate(&FixedModel::new(0.82), &sample_record()).unwrap();
        assert_eq!(r.assessment.badge, RiskBadge::High);
        assert_eq!(r.assessment.badge.label(), "HIGH RISK");
        assert_eq!(r.assessment.tier, RiskTier::High);
        assert!(r.assessment.tier.advisory().contains("very high risk"));
        assert!((r.pay_probability - 0.18).abs() < 1e-9);
        assert_eq!(r.predicted_class, PredictedClass::Default);
    }

    #[test]
    fn moderate_scenario_keeps_low_badge() {
        let r = evaluate(&FixedModel::new(0.42), &sample_record()).unwrap();
        assert_eq!(r.assessment.badge.label(), "LOW RISK");
        assert_eq!(r.assessment.tier, RiskTier::Moderate);
        assert!(r.assessment.tier.advisory().contains("Standard checks"));
    }

    #[test]
    fn exact_half_is_high_badge_moderate_high_tier() {
        let r = evaluate(&FixedModel::new(0.5), &sample_record()).unwrap();
        assert_eq!(r.assessment.badge, RiskBadge::High);
        assert_eq!(r.assessment.tier, RiskTier::ModerateHigh);
        assert_eq!(r.assessment.default_probability, r.default_probability);
    }

    #[test]
    fn picks_default_column_by_class_label() {
        let model = FixedModel {
            classes: vec![1, 0],
            p_default: 0.9,
        };
        let r = evaluate(&model, &sample_record()).unwrap();
        assert!((r.default_probability - 0.9).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let err = evaluate(&FixedModel::new(1.2), &sample_record()).unwrap_err();
        assert_eq!(err, InferenceError::InvalidProbability(1.2));
    }

    #[test]
    fn malformed_purpose_raises_inference_error() {
        let mut record = sample_record();
        record.purpose = "crypto".to_string();
        let err = evaluate(&pipeline(), &record).unwrap_err();
        assert!(matches!(err, InferenceError::UnknownCategory { .. }));
    }

    #[test]
    fn valid_records_give_complementary_probabilities() {
        let model = pipeline();
        let mut record = sample_record();
        for purpose in PURPOSES {
            for fico in [300, 580, 680, 850] {
                for int_rate in [0.0, 0.12, 1.0] {
                    record.purpose = purpose.to_string();
                    record.fico_score = fico;
                    record.interest_rate = int_rate;
                    let r = evaluate(&model, &record).unwrap();
                    assert!((0.0..=1.0).contains(&r.default_probability));
                    assert!((r.default_probability + r.pay_probability - 1.0).abs() < 1e-12);
                }
            }
        }
    }
}
