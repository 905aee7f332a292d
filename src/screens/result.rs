// src/screens/result.rs
use crate::interpret::{ResultOutcome, interpret};
use crate::navigation::{PARAM_PREDICTION_JSON, ResultParams};

pub const DISCLAIMER: &str = "Important: This information is for educational purposes only and should not replace professional medical advice. Always consult with qualified healthcare professionals for accurate diagnosis and treatment recommendations.";

const PREVIEW_CHARS: usize = 20;

/// Diagnostics shown under a failed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    pub lines: Vec<String>,
}

pub struct ResultScreen {
    params: ResultParams,
    outcome: ResultOutcome,
}

impl ResultScreen {
    pub fn open(params: ResultParams) -> Self {
        let outcome = interpret(params.prediction_json.as_deref());
        ResultScreen { params, outcome }
    }

    pub fn outcome(&self) -> &ResultOutcome {
        &self.outcome
    }

    pub fn image_uri(&self) -> Option<&str> {
        self.params.image_uri.as_deref()
    }

    pub fn debug_info(&self) -> DebugInfo {
        let json = self.params.prediction_json.as_deref();
        let mut lines = Vec::new();

        match json.filter(|j| !j.trim().is_empty()) {
            Some(j) => {
                let preview: String = j.chars().take(PREVIEW_CHARS).collect();
                lines.push(format!("{PARAM_PREDICTION_JSON}: ✓ ({preview}...)"));
            }
            None => lines.push(format!("{PARAM_PREDICTION_JSON}: ✗ No data")),
        }
        if let Some(j) = json {
            lines.push(format!("JSON Length: {}", j.chars().count()));
        }

        match &self.outcome {
            ResultOutcome::BackendFailure { prediction, .. } => {
                lines.push(format!("Parsed Success: {}", prediction.success));
                if let Some(error) = &prediction.error {
                    lines.push(format!("Error: {error}"));
                }
            }
            ResultOutcome::Success(_) => lines.push("Parsed Success: true".to_string()),
            ResultOutcome::Malformed(e) => lines.push(format!("Decode Error: {e}")),
            ResultOutcome::NoData => {}
        }

        DebugInfo { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_info_for_missing_json() {
        let screen = ResultScreen::open(ResultParams::image_only("content://scan/3"));
        assert_eq!(screen.outcome(), &ResultOutcome::NoData);
        assert_eq!(screen.image_uri(), Some("content://scan/3"));
        assert_eq!(screen.debug_info().lines, vec!["prediction_json: ✗ No data"]);
    }

    #[test]
    fn debug_info_for_backend_failure() {
        let json = r#"{"success":false,"error":"blurry"}"#;
        let screen = ResultScreen::open(ResultParams {
            prediction_json: Some(json.to_string()),
            image_uri: None,
        });
        assert_eq!(
            screen.debug_info().lines,
            vec![
                "prediction_json: ✓ ({\"success\":false,\"er...)".to_string(),
                format!("JSON Length: {}", json.len()),
                "Parsed Success: false".to_string(),
                "Error: blurry".to_string(),
            ]
        );
    }
}
