//! Forum coordinator
//!
//! Runs a fixed number of sequential debate rounds over the deep-research
//! findings, then one synthesis call that yields confidence multipliers.
//! Every reasoning failure degrades to "no adjustment".

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::reasoning::{ReasoningPort, ReasoningRequest};
use std::sync::Arc;
use symptom_domain::core::text::truncate_chars;
use symptom_domain::forum::adjusted_confidences;
use symptom_domain::parsing::{extract_challenged_conditions, parse_consensus};
use symptom_domain::{AgentFinding, AgentId, DebateRound, ForumOutcome, PromptTemplate};
use tracing::{debug, info};

/// Temperature for debate rounds.
const DEBATE_TEMPERATURE: f64 = 0.6;

/// Temperature for the synthesis call.
const SYNTHESIS_TEMPERATURE: f64 = 0.4;

/// Characters of concatenated debate text kept as the summary.
const SUMMARY_CHARS: usize = 1000;

pub struct ForumCoordinator {
    id: AgentId,
    reasoning: Arc<dyn ReasoningPort>,
    rounds: usize,
}

impl ForumCoordinator {
    pub fn new(reasoning: Arc<dyn ReasoningPort>, rounds: usize) -> Self {
        Self {
            id: AgentId::generate(),
            reasoning,
            rounds,
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Debate with default (no-op) progress
    pub async fn debate(&self, findings: &[AgentFinding], symptoms: &str) -> ForumOutcome {
        self.debate_with_progress(findings, symptoms, &NoProgress)
            .await
    }

    /// Debate the findings and derive adjusted confidences.
    ///
    /// With no findings there is nothing to debate and no call is made.
    pub async fn debate_with_progress(
        &self,
        findings: &[AgentFinding],
        symptoms: &str,
        progress: &dyn ProgressNotifier,
    ) -> ForumOutcome {
        if findings.is_empty() {
            info!("[{}] No findings to debate", self.id);
            return ForumOutcome::default();
        }

        info!(
            "[{}] Starting forum with {} agents",
            self.id,
            findings.len()
        );

        let mut rounds: Vec<DebateRound> = Vec::with_capacity(self.rounds);
        for round in 1..=self.rounds {
            info!("[{}] Debate round {}/{}", self.id, round, self.rounds);

            let request =
                ReasoningRequest::new(PromptTemplate::debate_prompt(symptoms, findings, &rounds))
                    .with_system_prompt(PromptTemplate::debate_system())
                    .with_temperature(DEBATE_TEMPERATURE);
            let analysis = self.reasoning.reason(request).await;
            let challenged = extract_challenged_conditions(&analysis);
            debug!(
                "[{}] Round {} challenged {} names",
                self.id,
                round,
                challenged.len()
            );

            rounds.push(DebateRound::new(round, analysis, challenged));
            progress.on_debate_round(round, self.rounds);
        }

        let request = ReasoningRequest::new(PromptTemplate::consensus_prompt(&rounds))
            .with_temperature(SYNTHESIS_TEMPERATURE);
        let synthesis = self.reasoning.reason(request).await;

        let summary = PromptTemplate::debate_summary(&rounds);
        let consensus =
            parse_consensus(&synthesis).with_summary(truncate_chars(&summary, SUMMARY_CHARS));
        let adjusted = adjusted_confidences(findings, &consensus);

        info!(
            "[{}] Forum complete: {} consensus conditions",
            self.id,
            consensus.consensus.len()
        );

        ForumOutcome {
            contested_points: consensus.contested_points(),
            participants: findings
                .iter()
                .map(|f| f.agent_id().to_string())
                .collect(),
            adjusted_confidences: adjusted,
            rounds,
            consensus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedReasoner;
    use std::sync::Mutex;
    use symptom_domain::AgentKind;

    const SYMPTOMS: &str = "persistent fatigue, pale skin, dizziness for two weeks";

    fn finding(id: &str, condition: &str, confidence: f64) -> AgentFinding {
        AgentFinding::new(AgentId::new(id), AgentKind::DeepResearch, "overview")
            .with_condition(condition)
            .with_confidence(confidence)
    }

    const SYNTHESIS: &str = "CONSENSUS: Iron Deficiency Anemia\nCONTESTED: Depression\nADJUSTMENTS:\n- Iron Deficiency Anemia: 1.2\n- Depression: 0.7";

    #[tokio::test]
    async fn test_debate_applies_multipliers() {
        let reasoner = Arc::new(
            ScriptedReasoner::new()
                .on("provide final consensus", SYNTHESIS)
                .otherwise("Depression: CONTRADICTING EVIDENCE: Normal mood reported"),
        );
        let forum = ForumCoordinator::new(reasoner.clone(), 2);
        let findings = vec![
            finding("agent_a", "Iron Deficiency Anemia", 0.7),
            finding("agent_b", "Depression", 0.5),
            finding("agent_c", "Hypothyroidism", 0.45),
        ];

        let outcome = forum.debate(&findings, SYMPTOMS).await;

        assert!((outcome.adjusted_confidences["Iron Deficiency Anemia"] - 0.84).abs() < 1e-9);
        assert!((outcome.adjusted_confidences["Depression"] - 0.35).abs() < 1e-9);
        assert_eq!(outcome.adjusted_confidences["Hypothyroidism"], 0.45);

        assert_eq!(outcome.consensus.consensus, vec!["Iron Deficiency Anemia"]);
        assert_eq!(outcome.contested_points.len(), 1);
        assert_eq!(outcome.contested_points[0].condition, "Depression");
        assert_eq!(outcome.participants, vec!["agent_a", "agent_b", "agent_c"]);

        assert_eq!(outcome.rounds.len(), 2);
        assert_eq!(outcome.rounds[0].round, 1);
        assert_eq!(
            outcome.rounds[0].challenged,
            vec!["Depression:", "CONTRADICTING", "EVIDENCE:", "Normal"]
        );
        assert!(outcome.consensus.summary.starts_with("Depression: CONTRADICTING"));
    }

    #[tokio::test]
    async fn test_rounds_are_sequential() {
        let reasoner = Arc::new(ScriptedReasoner::new().otherwise("round text"));
        let forum = ForumCoordinator::new(reasoner.clone(), 3);

        forum
            .debate(&[finding("agent_a", "Migraine", 0.6)], SYMPTOMS)
            .await;

        let requests = reasoner.requests();
        // 3 rounds + synthesis
        assert_eq!(requests.len(), 4);
        assert!(!requests[0].prompt.contains("Previous Debate Rounds"));
        assert!(requests[1].prompt.contains("Round 1: round text..."));
        assert!(requests[2].prompt.contains("Round 2: round text..."));
        assert_eq!(requests[0].temperature, Some(DEBATE_TEMPERATURE));

        let synthesis = &requests[3];
        assert!(synthesis.system_prompt.is_none());
        assert_eq!(synthesis.temperature, Some(SYNTHESIS_TEMPERATURE));
        assert!(synthesis.prompt.contains("round text\n\nround text\n\nround text"));
    }

    #[tokio::test]
    async fn test_reasoning_failure_keeps_confidences() {
        let forum = ForumCoordinator::new(Arc::new(ScriptedReasoner::new()), 2);
        let findings = vec![finding("agent_a", "Migraine", 0.6)];

        let outcome = forum.debate(&findings, SYMPTOMS).await;

        assert!(outcome.consensus.consensus.is_empty());
        assert!(outcome.consensus.multipliers.is_empty());
        assert_eq!(outcome.adjusted_confidences["Migraine"], 0.6);
        assert_eq!(outcome.rounds.len(), 2);
    }

    #[tokio::test]
    async fn test_no_findings_skips_debate() {
        let reasoner = Arc::new(ScriptedReasoner::new().otherwise("unused"));
        let forum = ForumCoordinator::new(reasoner.clone(), 2);

        let outcome = forum.debate(&[], SYMPTOMS).await;

        assert_eq!(outcome, ForumOutcome::default());
        assert!(reasoner.requests().is_empty());
    }

    struct RoundCounter(Mutex<Vec<(usize, usize)>>);

    impl ProgressNotifier for RoundCounter {
        fn on_stage(&self, _stage: crate::ports::progress::PipelineStage, _percent: u8) {}

        fn on_debate_round(&self, round: usize, total: usize) {
            self.0.lock().unwrap().push((round, total));
        }
    }

    #[tokio::test]
    async fn test_debate_reports_rounds() {
        let forum = ForumCoordinator::new(Arc::new(ScriptedReasoner::new().otherwise("x")), 2);
        let counter = RoundCounter(Mutex::new(Vec::new()));

        forum
            .debate_with_progress(&[finding("a", "Migraine", 0.6)], SYMPTOMS, &counter)
            .await;

        assert_eq!(*counter.0.lock().unwrap(), vec![(1, 2), (2, 2)]);
    }
}
