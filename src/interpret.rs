// src/interpret.rs
//! Turns whatever reached the result screen into exactly one presentable
//! outcome.

use log::{debug, warn};

use crate::decode::{DecodeError, decode_json};
use crate::insights::{ConfidenceBand, insights};
use crate::models::PredictionResult;

const UNKNOWN_TUMOR: &str = "Unknown";
const UNKNOWN_ERROR: &str = "Unknown error";

/// One row of the confidence-scores list.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbability {
    pub class_name: String,
    pub probability: f64,
}

impl ClassProbability {
    pub fn label(&self) -> String {
        self.class_name.to_uppercase()
    }

    /// Whole percent, truncated toward zero.
    pub fn percent(&self) -> u32 {
        (self.probability * 100.0).clamp(0.0, 100.0) as u32
    }
}

/// Everything the result screen shows for a successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionSummary {
    pub tumor_type: String,
    pub confidence: f64,
    pub probabilities: Vec<ClassProbability>,
    pub insights: Vec<&'static str>,
}

impl PredictionSummary {
    fn from_prediction(prediction: PredictionResult) -> Self {
        let tumor_type = prediction
            .tumor_type
            .unwrap_or_else(|| UNKNOWN_TUMOR.to_string());
        let confidence = prediction.confidence.unwrap_or(0.0);

        let mut probabilities: Vec<ClassProbability> = prediction
            .class_probabilities
            .unwrap_or_default()
            .into_iter()
            .map(|(class_name, probability)| ClassProbability {
                class_name,
                probability,
            })
            .collect();
        probabilities.sort_by(|a, b| {
            b.probability
                .total_cmp(&a.probability)
                .then_with(|| a.class_name.cmp(&b.class_name))
        });

        let insights = insights(&tumor_type, confidence);
        PredictionSummary {
            tumor_type,
            confidence,
            probabilities,
            insights,
        }
    }

    /// Tumor type with its first letter upper-cased.
    pub fn headline(&self) -> String {
        let mut chars = self.tumor_type.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultOutcome {
    /// No prediction was handed to the screen at all.
    NoData,
    /// Something was handed over but it could not be parsed.
    Malformed(DecodeError),
    /// The backend answered coherently but declined to predict.
    BackendFailure {
        message: String,
        prediction: PredictionResult,
    },
    Success(PredictionSummary),
}

impl ResultOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResultOutcome::Success(_))
    }

    /// The explanation shown in place of a result. `None` on success.
    pub fn explanation(&self) -> Option<String> {
        match self {
            ResultOutcome::NoData => Some(
                "No prediction data was received.\n\nThe prediction was not passed along from the previous screen."
                    .to_string(),
            ),
            ResultOutcome::Malformed(_) => Some(
                "Prediction data was received but failed to parse.\n\nThe JSON format may be corrupted or invalid."
                    .to_string(),
            ),
            ResultOutcome::BackendFailure { message, .. } => {
                Some(format!("Analysis failed on the backend: {message}"))
            }
            ResultOutcome::Success(_) => None,
        }
    }
}

/// Interprets the `prediction_json` navigation parameter.
pub fn interpret(prediction_json: Option<&str>) -> ResultOutcome {
    let Some(json) = prediction_json else {
        warn!("No prediction JSON supplied to the result screen");
        return ResultOutcome::NoData;
    };

    debug!("Raw prediction JSON: {json}");
    match decode_json::<PredictionResult>(json) {
        Ok(prediction) => interpret_prediction(prediction),
        Err(e) => {
            warn!("Failed to parse prediction JSON: {e}");
            ResultOutcome::Malformed(e)
        }
    }
}

/// Interprets an already-decoded prediction.
pub fn interpret_prediction(prediction: PredictionResult) -> ResultOutcome {
    if prediction.success {
        return ResultOutcome::Success(PredictionSummary::from_prediction(prediction));
    }

    let message = prediction
        .error
        .clone()
        .or_else(|| prediction.message.clone())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    ResultOutcome::BackendFailure {
        message,
        prediction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_and_malformed_are_distinct() {
        assert_eq!(interpret(None), ResultOutcome::NoData);
        match interpret(Some("{not valid json")) {
            ResultOutcome::Malformed(e) => assert_eq!(e.kind, DecodeErrorKind::Syntax),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn backend_failure_falls_back_error_message_generic() {
        let with_error = interpret(Some(r#"{"success":false,"error":"bad scan","message":"m"}"#));
        assert_eq!(
            with_error.explanation().as_deref(),
            Some("Analysis failed on the backend: bad scan")
        );

        let with_message = interpret(Some(r#"{"success":false,"message":"queue full"}"#));
        assert!(matches!(
            with_message,
            ResultOutcome::BackendFailure { ref message, .. } if message == "queue full"
        ));

        let bare = interpret(Some(r#"{"success":false}"#));
        assert!(matches!(
            bare,
            ResultOutcome::BackendFailure { ref message, .. } if message == "Unknown error"
        ));
    }

    #[test]
    fn success_sorts_probabilities_descending() {
        let outcome = interpret(Some(
            r#"{"success":true,"tumor_type":"meningioma","confidence":0.75,
                "class_probabilities":{"glioma":0.17,"meningioma":0.75,"notumor":0.03,"pituitary":0.05}}"#,
        ));
        let ResultOutcome::Success(summary) = outcome else {
            panic!("expected success");
        };
        assert_eq!(summary.headline(), "Meningioma");
        let order: Vec<&str> = summary
            .probabilities
            .iter()
            .map(|p| p.class_name.as_str())
            .collect();
        assert_eq!(order, vec!["meningioma", "glioma", "pituitary", "notumor"]);
        assert_eq!(summary.probabilities[0].percent(), 75);
        assert_eq!(summary.probabilities[0].label(), "MENINGIOMA");
        assert_eq!(summary.band(), ConfidenceBand::Moderate);
        assert_eq!(summary.insights.len(), 6);
    }

    #[test]
    fn success_with_missing_fields_uses_defaults() {
        let ResultOutcome::Success(summary) = interpret(Some(r#"{"success":true}"#)) else {
            panic!("expected success");
        };
        assert_eq!(summary.tumor_type, "Unknown");
        assert_eq!(summary.confidence, 0.0);
        assert!(summary.probabilities.is_empty());
        assert_eq!(summary.insights.len(), 3);
    }
}
