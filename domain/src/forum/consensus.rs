//! Consensus types and confidence adjustment

use super::debate::DebateRound;
use crate::research::AgentFinding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reason recorded for every contested condition.
pub const CONTESTED_REASON: &str = "Significant debate in forum";

/// Synthesized agreement/disagreement after all debate rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub summary: String,
    /// Conditions with strong support
    pub consensus: Vec<String>,
    /// Conditions with significant debate
    pub contested: Vec<String>,
    /// Condition name -> confidence multiplier (nominally 0.7-1.3)
    pub multipliers: BTreeMap<String, f64>,
}

impl ConsensusResult {
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn multiplier_for(&self, condition: &str) -> Option<f64> {
        self.multipliers.get(condition).copied()
    }

    pub fn contested_points(&self) -> Vec<ContestedPoint> {
        self.contested
            .iter()
            .map(|condition| ContestedPoint {
                condition: condition.clone(),
                reason: CONTESTED_REASON.to_string(),
            })
            .collect()
    }
}

/// A condition the forum could not agree on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestedPoint {
    pub condition: String,
    pub reason: String,
}

/// Everything the forum produced for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumOutcome {
    pub consensus: ConsensusResult,
    pub rounds: Vec<DebateRound>,
    /// Condition name -> confidence after applying the multiplier
    pub adjusted_confidences: BTreeMap<String, f64>,
    pub contested_points: Vec<ContestedPoint>,
    pub participants: Vec<String>,
}

/// `clamp(original * multiplier, 0, 1)`
pub fn apply_multiplier(original: f64, multiplier: f64) -> f64 {
    let adjusted = original * multiplier;
    if adjusted.is_nan() {
        return original.clamp(0.0, 1.0);
    }
    adjusted.clamp(0.0, 1.0)
}

/// Adjusted confidence for every named finding.
///
/// Findings without a multiplier keep their confidence unchanged.
pub fn adjusted_confidences(
    findings: &[AgentFinding],
    consensus: &ConsensusResult,
) -> BTreeMap<String, f64> {
    findings
        .iter()
        .filter_map(|finding| {
            let condition = finding.condition()?;
            let confidence = match consensus.multiplier_for(condition) {
                Some(multiplier) => apply_multiplier(finding.confidence(), multiplier),
                None => finding.confidence(),
            };
            Some((condition.to_string(), confidence))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::{AgentId, AgentKind};

    fn finding(condition: &str, confidence: f64) -> AgentFinding {
        AgentFinding::new(AgentId::new(condition), AgentKind::DeepResearch, "")
            .with_condition(condition)
            .with_confidence(confidence)
    }

    #[test]
    fn test_apply_multiplier_boundaries() {
        assert_eq!(apply_multiplier(0.5, 0.0), 0.0);
        assert_eq!(apply_multiplier(0.6, 2.0), 1.0);
        assert_eq!(apply_multiplier(0.0, 1.3), 0.0);
        assert_eq!(apply_multiplier(1.0, 1.3), 1.0);
        assert_eq!(apply_multiplier(1.0, 0.7), 0.7);
        assert_eq!(apply_multiplier(0.5, -1.0), 0.0);
    }

    #[test]
    fn test_apply_multiplier_in_range() {
        assert!((apply_multiplier(0.5, 1.2) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_adjusted_confidences() {
        let findings = vec![finding("Anemia", 0.6), finding("Hypothyroidism", 0.5)];
        let mut consensus = ConsensusResult::default();
        consensus.multipliers.insert("Anemia".to_string(), 1.5);

        let adjusted = adjusted_confidences(&findings, &consensus);

        assert!((adjusted["Anemia"] - 0.9).abs() < 1e-9);
        assert_eq!(adjusted["Hypothyroidism"], 0.5);
    }

    #[test]
    fn test_adjusted_confidences_exact_name_match() {
        let findings = vec![finding("Anemia", 0.6)];
        let mut consensus = ConsensusResult::default();
        consensus.multipliers.insert("anemia".to_string(), 0.5);

        let adjusted = adjusted_confidences(&findings, &consensus);
        assert_eq!(adjusted["Anemia"], 0.6);
    }

    #[test]
    fn test_contested_points() {
        let consensus = ConsensusResult {
            contested: vec!["Lupus".to_string()],
            ..Default::default()
        };
        let points = consensus.contested_points();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].condition, "Lupus");
        assert_eq!(points[0].reason, CONTESTED_REASON);
    }
}
