//! Coarse discovery agent
//!
//! Builds the initial candidate list from two independent enumerations:
//! the reasoning model's differential and names pulled from a literature
//! search. Names found by both rank first.

use crate::config::PipelineConfig;
use crate::ports::reasoning::{ReasoningPort, ReasoningRequest};
use crate::ports::research::ResearchPort;
use std::sync::Arc;
use std::time::Instant;
use symptom_domain::parsing::{extract_research_candidates, parse_condition_list};
use symptom_domain::{
    AgentFinding, AgentId, AgentKind, CandidateList, PromptTemplate, ResearchContext,
};
use tracing::{debug, info};

/// Temperature for the differential enumeration.
const DISCOVERY_TEMPERATURE: f64 = 0.7;

/// Confidence attached to the aggregate discovery finding.
pub const DISCOVERY_CONFIDENCE: f64 = 0.7;

/// Source hints passed with the literature search.
const DISCOVERY_SOURCES: &[&str] = &["medical", "pubmed", "mayo_clinic"];

/// Result of one discovery pass
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    pub candidates: CandidateList,
    /// Aggregate finding describing the pass itself
    pub finding: AgentFinding,
}

pub struct CoarseDiscoveryAgent {
    id: AgentId,
    reasoning: Arc<dyn ReasoningPort>,
    research: Arc<dyn ResearchPort>,
    max_conditions: usize,
    candidate_cap: usize,
}

impl CoarseDiscoveryAgent {
    pub fn new(
        reasoning: Arc<dyn ReasoningPort>,
        research: Arc<dyn ResearchPort>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            id: AgentId::generate(),
            reasoning,
            research,
            max_conditions: config.max_conditions,
            candidate_cap: config.discovery_cap(),
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Produce up to `2 * max_conditions` candidate names.
    pub async fn discover(&self, context: &ResearchContext) -> DiscoveryOutcome {
        let started = Instant::now();
        info!("[{}] Starting coarse discovery", self.id);

        let (intuition, literature) =
            tokio::join!(self.enumerate_by_reasoning(context), self.enumerate_by_research(context));

        let candidates = CandidateList::merge(&intuition, &literature, self.candidate_cap);

        let finding = AgentFinding::new(
            self.id.clone(),
            AgentKind::CoarseSearch,
            format!("Identified {} potential conditions", candidates.len()),
        )
        .with_sources(vec![
            "LLM reasoning".to_string(),
            "Medical literature search".to_string(),
        ])
        .with_confidence(DISCOVERY_CONFIDENCE)
        .with_reasoning("Combined LLM intuition with medical literature search")
        .with_processing_time(started.elapsed());

        info!(
            "[{}] Coarse discovery complete: {:?}",
            self.id,
            candidates.as_slice()
        );

        DiscoveryOutcome {
            candidates,
            finding,
        }
    }

    async fn enumerate_by_reasoning(&self, context: &ResearchContext) -> Vec<String> {
        let count = self.candidate_cap;
        let request = ReasoningRequest::new(PromptTemplate::discovery_prompt(
            count,
            &context.patient_summary(),
            context.symptoms(),
        ))
        .with_system_prompt(PromptTemplate::discovery_system())
        .with_temperature(DISCOVERY_TEMPERATURE);

        let response = self.reasoning.reason(request).await;
        let names = parse_condition_list(&response, count);
        debug!("[{}] Reasoning enumerated {} conditions", self.id, names.len());
        names
    }

    async fn enumerate_by_research(&self, context: &ResearchContext) -> Vec<String> {
        let query = PromptTemplate::discovery_research_query(context.symptoms());
        let results = self.research.research_web(&query, DISCOVERY_SOURCES).await;
        let names = extract_research_candidates(&results, self.max_conditions);
        debug!("[{}] Research enumerated {} conditions", self.id, names.len());
        names
    }
}
