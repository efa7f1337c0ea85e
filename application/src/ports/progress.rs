//! Progress notification port
//!
//! Defines the interface for reporting progress during a diagnosis run.

use symptom_domain::AgentFinding;

/// Coarse stage of a diagnosis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Discovering,
    DeepResearch,
    Debating,
    Analyzing,
    FindingClinics,
    Completed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Discovering => "discovering",
            PipelineStage::DeepResearch => "deep_research",
            PipelineStage::Debating => "debating",
            PipelineStage::Analyzing => "analyzing",
            PipelineStage::FindingClinics => "finding_clinics",
            PipelineStage::Completed => "completed",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::Discovering => "Discovering candidate conditions",
            PipelineStage::DeepResearch => "Researching conditions",
            PipelineStage::Debating => "Debating findings",
            PipelineStage::Analyzing => "Scoring conditions",
            PipelineStage::FindingClinics => "Finding nearby clinics",
            PipelineStage::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during a diagnosis run
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called on every stage change and batch completion, `percent` in 0..=100
    fn on_stage(&self, stage: PipelineStage, percent: u8);

    /// Called once discovery has produced its candidates
    fn on_candidates(&self, _candidates: &[String]) {}

    /// Called for each deep-research finding as its batch completes
    fn on_finding(&self, _finding: &AgentFinding) {}

    /// Called after each debate round
    fn on_debate_round(&self, _round: usize, _total: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage(&self, _stage: PipelineStage, _percent: u8) {}
}
