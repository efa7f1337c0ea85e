//! Prompt templates for each pipeline stage

use crate::core::text::truncate_chars;
use crate::forum::DebateRound;
use crate::research::AgentFinding;

/// Characters of symptom text used in the coarse research query.
const RESEARCH_QUERY_SYMPTOM_CHARS: usize = 300;

/// Characters of findings text shown to the forum per agent.
const DEBATE_FINDINGS_CHARS: usize = 200;

/// Characters of each earlier round shown to the next round.
const PREVIOUS_ROUND_CHARS: usize = 200;

/// Sources listed per agent in the debate prompt.
const DEBATE_SOURCES: usize = 3;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for coarse discovery
    pub fn discovery_system() -> &'static str {
        r#"You are an expert medical diagnostician with 20+ years of experience.
You excel at differential diagnosis - considering all possibilities before narrowing down.
Be thorough but precise in identifying potential conditions."#
    }

    /// Ask for `count` candidate conditions as a numbered list
    pub fn discovery_prompt(count: usize, patient_summary: &str, symptoms: &str) -> String {
        format!(
            r#"You are a medical diagnostician. Based on these symptoms, identify {} possible medical conditions (cast a wide net).

{}
Symptoms: {}

Return ONLY a numbered list of condition names, no explanations:
1. [Condition name]
2. [Condition name]
..."#,
            count, patient_summary, symptoms
        )
    }

    /// Research query for the coarse literature pass
    pub fn discovery_research_query(symptoms: &str) -> String {
        format!(
            "Medical conditions with symptoms: {}",
            truncate_chars(symptoms, RESEARCH_QUERY_SYMPTOM_CHARS)
        )
    }

    /// System prompt for per-condition assessment
    pub fn assessment_system() -> &'static str {
        r#"You are a medical expert evaluating diagnostic hypotheses.
Be objective and evidence-based. Consider both positive and negative evidence."#
    }

    /// Ask for the four-field assessment of one condition
    pub fn assessment_prompt(condition: &str, patient_summary: &str, symptoms: &str) -> String {
        let mut prompt = format!(
            "Analyze how well this condition matches the patient's symptoms.\n\nCondition: {}\n",
            condition
        );
        prompt.push_str(patient_summary);
        prompt.push_str(&format!("Symptoms: {}\n", symptoms));
        prompt.push_str(
            r#"
Provide:
1. Probability this condition matches symptoms (0.0-1.0)
2. Key symptoms that match
3. Key symptoms that don't match
4. Your reasoning

Format as:
PROBABILITY: [0.0-1.0]
MATCHES: [list]
MISMATCHES: [list]
REASONING: [explanation]"#,
        );
        prompt
    }

    /// System prompt for debate rounds
    pub fn debate_system() -> &'static str {
        r#"You are a senior medical diagnostician moderating a case review.
Your role is to challenge assumptions and ensure thorough differential diagnosis.
Be skeptical but fair. Focus on evidence quality."#
    }

    /// One debate round over every finding plus condensed earlier rounds
    pub fn debate_prompt(
        symptoms: &str,
        findings: &[AgentFinding],
        previous: &[DebateRound],
    ) -> String {
        format!(
            r#"You are moderating a medical diagnostic forum. Agents have researched conditions and must now debate their findings.

Patient Symptoms: {}

Agent Research Findings:
{}

{}

For each condition, provide:
1. SUPPORTING EVIDENCE: What supports this diagnosis?
2. CONTRADICTING EVIDENCE: What argues against it?
3. CONFIDENCE ADJUSTMENT: Should confidence increase, decrease, or stay same? (up/down/same)

Be critical and objective. Look for contradictions and weak reasoning."#,
            symptoms,
            Self::format_findings(findings),
            Self::format_previous_rounds(previous)
        )
    }

    /// Final synthesis over the concatenated round analyses
    pub fn consensus_prompt(rounds: &[DebateRound]) -> String {
        format!(
            r#"Based on the adversarial debate, provide final consensus.

Debate Summary:
{}

Provide:
1. CONSENSUS CONDITIONS: Conditions with strong support (list condition names)
2. CONTESTED CONDITIONS: Conditions with significant debate (list condition names)
3. CONFIDENCE ADJUSTMENTS: For each researched condition, provide confidence multiplier (0.7-1.3)

Format:
CONSENSUS: [condition1], [condition2], ...
CONTESTED: [condition1], [condition2], ...
ADJUSTMENTS:
- [condition]: [multiplier]
- [condition]: [multiplier]
..."#,
            Self::debate_summary(rounds)
        )
    }

    /// Round analyses separated by blank lines
    pub fn debate_summary(rounds: &[DebateRound]) -> String {
        rounds
            .iter()
            .map(|r| r.analysis.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_findings(findings: &[AgentFinding]) -> String {
        findings
            .iter()
            .map(|f| {
                format!(
                    "Agent {}:\n  Condition: {}\n  Confidence: {:.2}\n  Findings: {}...\n  Sources: {}\n",
                    f.agent_id(),
                    f.condition().unwrap_or("unspecified"),
                    f.confidence(),
                    truncate_chars(f.findings(), DEBATE_FINDINGS_CHARS),
                    f.sources()
                        .iter()
                        .take(DEBATE_SOURCES)
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_previous_rounds(previous: &[DebateRound]) -> String {
        if previous.is_empty() {
            return String::new();
        }

        let rounds = previous
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "Round {}: {}...",
                    i + 1,
                    truncate_chars(&r.analysis, PREVIOUS_ROUND_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("\nPrevious Debate Rounds:\n{}", rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::{AgentId, AgentKind};

    #[test]
    fn test_discovery_prompt_format() {
        let prompt = PromptTemplate::discovery_prompt(10, "Age: 40\n", "night sweats");
        assert!(prompt.contains("identify 10 possible medical conditions"));
        assert!(prompt.contains("Age: 40\n\nSymptoms: night sweats"));
    }

    #[test]
    fn test_discovery_research_query_truncates() {
        let symptoms = "a".repeat(400);
        let query = PromptTemplate::discovery_research_query(&symptoms);
        assert_eq!(query.len(), "Medical conditions with symptoms: ".len() + 300);
    }

    #[test]
    fn test_assessment_prompt_format() {
        let prompt = PromptTemplate::assessment_prompt("Anemia", "", "pale skin");
        assert!(prompt.contains("Condition: Anemia\nSymptoms: pale skin"));
        assert!(prompt.contains("PROBABILITY: [0.0-1.0]"));
    }

    #[test]
    fn test_debate_prompt_format() {
        let finding = AgentFinding::new(AgentId::new("agent_1"), AgentKind::DeepResearch, "x".repeat(300))
            .with_condition("Anemia")
            .with_confidence(0.756)
            .with_sources(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        let prompt = PromptTemplate::debate_prompt("pale skin", &[finding], &[]);

        assert!(prompt.contains("Agent agent_1:\n  Condition: Anemia\n  Confidence: 0.76\n"));
        assert!(prompt.contains(&format!("  Findings: {}...\n", "x".repeat(200))));
        assert!(prompt.contains("  Sources: a, b, c\n"));
        assert!(!prompt.contains("Previous Debate Rounds"));
    }

    #[test]
    fn test_debate_prompt_previous_rounds() {
        let rounds = vec![
            DebateRound::new(1, "y".repeat(250), vec![]),
            DebateRound::new(2, "short", vec![]),
        ];
        let prompt = PromptTemplate::debate_prompt("pale skin", &[], &rounds);

        assert!(prompt.contains(&format!(
            "\nPrevious Debate Rounds:\nRound 1: {}...\nRound 2: short...",
            "y".repeat(200)
        )));
    }

    #[test]
    fn test_consensus_prompt_joins_rounds() {
        let rounds = vec![
            DebateRound::new(1, "first", vec![]),
            DebateRound::new(2, "second", vec![]),
        ];
        let prompt = PromptTemplate::consensus_prompt(&rounds);
        assert!(prompt.contains("Debate Summary:\nfirst\n\nsecond\n"));
        assert!(prompt.contains("ADJUSTMENTS:"));
    }
}
