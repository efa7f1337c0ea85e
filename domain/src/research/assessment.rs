//! Per-condition assessment and the deep-research confidence formula.

use serde::{Deserialize, Serialize};

/// Probability assumed when the model's answer carries no usable value.
pub const DEFAULT_ASSESSMENT_PROBABILITY: f64 = 0.5;

/// Weight of the model's probability in the confidence score.
pub const MODEL_WEIGHT: f64 = 0.6;

/// Weight of source corroboration in the confidence score.
pub const SOURCE_WEIGHT: f64 = 0.4;

/// Number of sources at which corroboration saturates.
pub const SOURCE_SATURATION: usize = 5;

/// The reasoning model's verdict on how well one condition fits the symptoms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionAssessment {
    /// Probability in `[0, 1]`
    pub probability: f64,
    pub matched_symptoms: Vec<String>,
    pub mismatched_symptoms: Vec<String>,
    /// Text of the `REASONING:` section, empty if absent
    pub reasoning: String,
}

impl Default for ConditionAssessment {
    fn default() -> Self {
        Self {
            probability: DEFAULT_ASSESSMENT_PROBABILITY,
            matched_symptoms: Vec::new(),
            mismatched_symptoms: Vec::new(),
            reasoning: String::new(),
        }
    }
}

/// Combine model judgment with source corroboration.
///
/// `0.6 * probability + 0.4 * min(source_count / 5, 1)`, clamped to `[0, 1]`.
pub fn deep_research_confidence(probability: f64, source_count: usize) -> f64 {
    let corroboration = (source_count as f64 / SOURCE_SATURATION as f64).min(1.0);
    let confidence = MODEL_WEIGHT * probability + SOURCE_WEIGHT * corroboration;
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}
