//! Final scoring and ranking of researched conditions

use super::condition::{ConditionEvidence, FinalCondition};
use super::rules::{
    GENERALITY_PENALTY, classify_urgency, infer_body_region, recommended_tests,
    symptoms_too_general,
};
use crate::core::text::truncate_chars;
use crate::parsing::{extract_matched_symptoms, extract_probability};
use crate::research::AgentFinding;
use std::collections::BTreeMap;

/// Probability used when neither the findings nor the confidence give one.
pub const DEFAULT_PROBABILITY: f64 = 0.70;

const EVIDENCE_SUMMARY_CHARS: usize = 300;
const EVIDENCE_CONTENT_CHARS: usize = 500;

/// Turns adjusted findings into the ranked output list
///
/// Stateless apart from the result cap; construct one per run or share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionAnalyzer {
    max_conditions: usize,
}

impl ConditionAnalyzer {
    pub fn new(max_conditions: usize) -> Self {
        Self { max_conditions }
    }

    pub fn max_conditions(&self) -> usize {
        self.max_conditions
    }

    /// Score, filter, rank and cap the findings.
    ///
    /// Findings without a condition name are skipped. `adjusted` maps a
    /// condition name to its post-debate confidence; missing names keep the
    /// finding's own confidence. When the symptom text is too general the
    /// whole list is scaled down after ranking.
    pub fn score(
        &self,
        findings: &[AgentFinding],
        adjusted: &BTreeMap<String, f64>,
        symptoms: &str,
    ) -> Vec<FinalCondition> {
        let mut conditions: Vec<FinalCondition> = findings
            .iter()
            .filter_map(|finding| {
                let name = finding.named_condition()?;
                let confidence = adjusted
                    .get(name)
                    .copied()
                    .unwrap_or_else(|| finding.confidence());
                Some(build_condition(finding, name, confidence))
            })
            .filter(|c| !(c.probability == 0.0 && c.confidence == 0.0))
            .collect();

        // sort_by is stable: ties keep input order
        conditions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        conditions.truncate(self.max_conditions);

        let confidences: Vec<f64> = conditions.iter().map(|c| c.confidence).collect();
        if symptoms_too_general(symptoms, &confidences) {
            for condition in &mut conditions {
                condition.probability *= GENERALITY_PENALTY;
            }
        }

        conditions
    }
}

fn build_condition(finding: &AgentFinding, name: &str, confidence: f64) -> FinalCondition {
    let confidence = sanitize(confidence);
    let probability = pick_probability(finding.findings(), confidence);
    let body_region = infer_body_region(name);

    FinalCondition {
        name: name.to_string(),
        probability,
        confidence,
        body_region,
        evidence_summary: truncate_chars(finding.findings(), EVIDENCE_SUMMARY_CHARS).to_string(),
        evidence: vec![ConditionEvidence {
            source: finding.kind().as_str().to_string(),
            content: truncate_chars(finding.findings(), EVIDENCE_CONTENT_CHARS).to_string(),
            relevance: confidence,
        }],
        position: body_region.position(),
        matched_symptoms: extract_matched_symptoms(finding.reasoning()),
        recommended_tests: recommended_tests(name),
        urgency: classify_urgency(name, probability, confidence),
    }
}

/// First nonzero of: probability stated in the findings, the confidence,
/// [`DEFAULT_PROBABILITY`]. Clamped to `[0, 1]`.
fn pick_probability(findings: &str, confidence: f64) -> f64 {
    let probability = [extract_probability(findings), Some(confidence)]
        .into_iter()
        .flatten()
        .find(|p| *p != 0.0 && p.is_finite())
        .unwrap_or(DEFAULT_PROBABILITY);
    probability.clamp(0.0, 1.0)
}

fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BodyRegion, Urgency};
    use crate::research::{AgentId, AgentKind};

    fn finding(condition: &str, confidence: f64, findings: &str) -> AgentFinding {
        AgentFinding::new(AgentId::new("agent_test"), AgentKind::DeepResearch, findings)
            .with_condition(condition)
            .with_confidence(confidence)
            .with_reasoning("PROBABILITY: 0.6\nMATCHES: fatigue, pale skin\nREASONING: fits")
    }

    #[test]
    fn test_score_basic_fields() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("Iron Deficiency Anemia", 0.76, "Low iron stores.")];
        let result = analyzer.score(&findings, &BTreeMap::new(), "shortness of breath on stairs");

        assert_eq!(result.len(), 1);
        let condition = &result[0];
        assert_eq!(condition.name, "Iron Deficiency Anemia");
        assert_eq!(condition.probability, 0.76);
        assert_eq!(condition.confidence, 0.76);
        assert_eq!(condition.body_region, BodyRegion::Blood);
        assert_eq!(condition.position, BodyRegion::Blood.position());
        assert_eq!(condition.matched_symptoms, vec!["fatigue", "pale skin"]);
        assert_eq!(condition.recommended_tests[0], "Complete Blood Count (CBC)");
        assert_eq!(condition.evidence.len(), 1);
        assert_eq!(condition.evidence[0].source, "deep_research");
        assert_eq!(condition.evidence[0].relevance, 0.76);
        assert_eq!(condition.urgency, Urgency::Routine);
    }

    #[test]
    fn test_score_uses_adjusted_confidence() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("Hypothyroidism", 0.5, "")];
        let adjusted = BTreeMap::from([("Hypothyroidism".to_string(), 0.65)]);

        let result = analyzer.score(&findings, &adjusted, "weight gain and feeling cold");
        assert_eq!(result[0].confidence, 0.65);
        assert_eq!(result[0].probability, 0.65);
    }

    #[test]
    fn test_score_prefers_stated_probability() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("Migraine", 0.5, "Overall probability: 0.35 in adults")];

        let result = analyzer.score(&findings, &BTreeMap::new(), "throbbing one-sided head");
        assert_eq!(result[0].probability, 0.35);
        assert_eq!(result[0].urgency, Urgency::Routine);
    }

    #[test]
    fn test_score_zero_probability_falls_through() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("Migraine", 0.0, "probability: 0")];

        let result = analyzer.score(&findings, &BTreeMap::new(), "throbbing one-sided head");
        // Nonzero default keeps the condition in
        assert_eq!(result[0].probability, DEFAULT_PROBABILITY);
        assert_eq!(result[0].confidence, 0.0);
    }

    #[test]
    fn test_score_skips_unnamed_findings() {
        let analyzer = ConditionAnalyzer::new(5);
        let coarse = AgentFinding::new(AgentId::new("a"), AgentKind::CoarseSearch, "Identified 3")
            .with_confidence(0.7);
        let blank = finding("   ", 0.9, "");

        assert!(analyzer.score(&[coarse, blank], &BTreeMap::new(), "chest tightness").is_empty());
    }

    #[test]
    fn test_score_sorted_and_capped() {
        let analyzer = ConditionAnalyzer::new(2);
        let findings = vec![
            finding("A", 0.55, ""),
            finding("B", 0.9, ""),
            finding("C", 0.55, ""),
            finding("D", 0.7, ""),
        ];

        let result = analyzer.score(&findings, &BTreeMap::new(), "night sweats and weight loss");
        let names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D"]);
    }

    #[test]
    fn test_score_stable_ties() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("A", 0.55, ""), finding("B", 0.55, "")];

        let result = analyzer.score(&findings, &BTreeMap::new(), "night sweats and weight loss");
        assert_eq!(result[0].name, "A");
        assert_eq!(result[1].name, "B");
    }

    #[test]
    fn test_generality_penalty() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("Anemia", 0.5, ""), finding("Depression", 0.4, "")];

        let result = analyzer.score(&findings, &BTreeMap::new(), "tired, headache and back pain");
        assert_eq!(result[0].probability, 0.5 * GENERALITY_PENALTY);
        assert_eq!(result[1].probability, 0.4 * GENERALITY_PENALTY);
        // Confidence is not touched
        assert_eq!(result[0].confidence, 0.5);
    }

    #[test]
    fn test_no_penalty_with_confident_results() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("Anemia", 0.8, "")];

        let result = analyzer.score(&findings, &BTreeMap::new(), "tired, headache and back pain");
        assert_eq!(result[0].probability, 0.8);
    }

    #[test]
    fn test_emergency_keyword_with_low_scores() {
        let analyzer = ConditionAnalyzer::new(5);
        let findings = vec![finding("Acute Ischemic Stroke", 0.4, "")];

        let result = analyzer.score(&findings, &BTreeMap::new(), "sudden facial droop");
        assert_eq!(result[0].urgency, Urgency::Emergency);
        assert_eq!(result[0].body_region, BodyRegion::Brain);
    }
}
