// src/insights.rs
use crate::tumor::TumorTag;

/// How much weight a prediction's confidence deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfidenceBand {
    Low,
    Fair,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceBand {
    /// Lower bounds, highest first. The first bound the confidence reaches wins.
    const THRESHOLDS: [(f64, ConfidenceBand); 4] = [
        (0.95, ConfidenceBand::VeryHigh),
        (0.85, ConfidenceBand::High),
        (0.7, ConfidenceBand::Moderate),
        (0.6, ConfidenceBand::Fair),
    ];

    /// NaN lands in `Low`.
    pub fn from_confidence(confidence: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(floor, _)| confidence >= *floor)
            .map(|(_, band)| *band)
            .unwrap_or(ConfidenceBand::Low)
    }

    pub fn advisory(self) -> &'static str {
        match self {
            ConfidenceBand::VeryHigh => {
                "Prediction made with very high confidence. Diagnosis is likely reliable."
            }
            ConfidenceBand::High => {
                "High confidence in prediction. Results can be considered dependable."
            }
            ConfidenceBand::Moderate => {
                "Moderate confidence. Consider clinical validation if symptoms persist."
            }
            ConfidenceBand::Fair => {
                "Fair confidence. Use with caution and consult a healthcare provider."
            }
            ConfidenceBand::Low => {
                "Low prediction confidence. Recommend retesting or further clinical evaluation."
            }
        }
    }
}

const GENERIC_INSIGHTS: &[&str] = &[
    "No detailed medical insights available for this classification.",
    "Consider consulting a medical professional for further evaluation.",
];

fn tag_insights(tag: TumorTag) -> &'static [&'static str] {
    match tag {
        TumorTag::Glioma => &[
            "Gliomas are brain tumors originating from glial (supportive) cells.",
            "They are the most common malignant primary brain tumors, making up ~80%.",
            "Symptoms may include headaches, seizures, memory loss, or personality changes.",
            "Tumor aggressiveness is classified from Grade I (least) to Grade IV (most aggressive).",
            "Treatment often includes surgery, radiation, and chemotherapy depending on grade and location.",
        ],
        TumorTag::Meningioma => &[
            "Meningiomas are tumors arising from the meninges, the brain’s protective layers.",
            "They are often slow-growing and benign, but can occasionally be atypical or malignant.",
            "Common symptoms include vision changes, headaches, or memory difficulties.",
            "Incidence is higher in women and increases with age.",
            "Treatment may involve monitoring, surgery, or radiation therapy depending on size and symptoms.",
        ],
        TumorTag::Pituitary => &[
            "Pituitary tumors develop in the pituitary gland at the base of the brain.",
            "Most are benign adenomas that may affect hormone production.",
            "They can cause vision issues, fatigue, weight changes, or hormonal imbalances.",
            "They are classified as functioning (hormone-secreting) or non-functioning.",
            "Treatment can include medication, surgery, or radiation depending on the tumor's effects.",
        ],
        TumorTag::NoTumor => &[
            "No tumor or abnormal growth was detected in the brain scan.",
            "Brain structures, blood vessels, and tissues appear healthy.",
            "Signs of brain health include normal tissue density, symmetry, and cerebrospinal fluid.",
            "No medical treatment is required, but continued healthy habits are encouraged.",
            "Routine check-ups and mental wellness practices support ongoing brain health.",
        ],
    }
}

/// Advisory lines for a prediction: the tumor-specific sentences followed by
/// exactly one line describing the confidence band.
pub fn insights(tumor_type: &str, confidence: f64) -> Vec<&'static str> {
    let specific = TumorTag::parse(tumor_type)
        .map(tag_insights)
        .unwrap_or(GENERIC_INSIGHTS);

    let mut lines = Vec::with_capacity(specific.len() + 1);
    lines.extend_from_slice(specific);
    lines.push(ConfidenceBand::from_confidence(confidence).advisory());
    lines
}
