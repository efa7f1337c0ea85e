//! Final diagnosis report

use crate::analysis::FinalCondition;
use crate::clinic::ClinicRecord;
use crate::forum::ForumOutcome;
use crate::research::AgentFinding;
use serde::{Deserialize, Serialize};

/// Symptom descriptions shorter than this get a brevity warning.
pub const BRIEF_SYMPTOMS_CHARS: usize = 50;

/// Average confidence below which results are flagged as weak.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

pub const BRIEF_SYMPTOMS_WARNING: &str =
    "Your symptom description is quite brief. More detailed information may improve accuracy.";
pub const NO_CONDITIONS_WARNING: &str = "Unable to identify specific conditions. Please provide more detailed symptoms or consult a healthcare provider.";
pub const LOW_CONFIDENCE_WARNING: &str = "Results have lower confidence due to general symptoms. These are possibilities, not diagnoses. Please consult a healthcare provider.";

/// Everything one pipeline run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    /// Ranked output
    pub conditions: Vec<FinalCondition>,
    /// Aggregate finding from coarse discovery
    pub discovery: AgentFinding,
    /// Candidate names that went into deep research
    pub candidates: Vec<String>,
    /// One finding per deep-research agent
    pub findings: Vec<AgentFinding>,
    pub forum: ForumOutcome,
    pub clinics: Vec<ClinicRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub processing_time_ms: u64,
}

impl DiagnosisReport {
    pub fn has_emergency(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| c.urgency == crate::analysis::Urgency::Emergency)
    }
}

/// Pick the caveat to show alongside the results, if any.
///
/// Checked in order: brief symptoms, no conditions, low average confidence.
pub fn warning_message(symptoms: &str, conditions: &[FinalCondition]) -> Option<&'static str> {
    if symptoms.chars().count() < BRIEF_SYMPTOMS_CHARS {
        return Some(BRIEF_SYMPTOMS_WARNING);
    }
    if conditions.is_empty() {
        return Some(NO_CONDITIONS_WARNING);
    }

    let average =
        conditions.iter().map(|c| c.confidence).sum::<f64>() / conditions.len() as f64;
    (average < LOW_CONFIDENCE_THRESHOLD).then_some(LOW_CONFIDENCE_WARNING)
}
