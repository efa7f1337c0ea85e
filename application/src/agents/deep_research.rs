//! Deep research agent
//!
//! Investigates one candidate condition. The reasoning assessment and the
//! research lookup run concurrently and are combined into a single
//! [`AgentFinding`].

use crate::ports::reasoning::{ReasoningPort, ReasoningRequest};
use crate::ports::research::ResearchPort;
use std::sync::Arc;
use std::time::Instant;
use symptom_domain::core::text::truncate_chars;
use symptom_domain::parsing::parse_condition_assessment;
use symptom_domain::research::deep_research_confidence;
use symptom_domain::{
    AgentFinding, AgentId, AgentKind, ConditionAssessment, ConditionResearch, PromptTemplate,
    ResearchContext,
};
use tracing::info;

/// Temperature for the per-condition assessment.
const ASSESSMENT_TEMPERATURE: f64 = 0.5;

/// Characters of research overview kept as findings text.
const FINDINGS_CHARS: usize = 500;

/// Source appended after the research sources.
pub const MODEL_SOURCE: &str = "LLM analysis";

/// Everything one deep-research pass produced
#[derive(Debug, Clone)]
pub struct DeepResearchOutcome {
    pub finding: AgentFinding,
    pub assessment: ConditionAssessment,
    pub research: ConditionResearch,
}

/// Investigates a single condition; holds no state shared with siblings.
pub struct DeepResearchAgent {
    id: AgentId,
    reasoning: Arc<dyn ReasoningPort>,
    research: Arc<dyn ResearchPort>,
}

impl DeepResearchAgent {
    pub fn new(reasoning: Arc<dyn ReasoningPort>, research: Arc<dyn ResearchPort>) -> Self {
        Self {
            id: AgentId::generate(),
            reasoning,
            research,
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Assess `condition` against the symptoms. Never fails.
    pub async fn investigate(
        &self,
        condition: &str,
        context: &ResearchContext,
    ) -> DeepResearchOutcome {
        let started = Instant::now();
        info!("[{}] Deep research on: {}", self.id, condition);

        let request = ReasoningRequest::new(PromptTemplate::assessment_prompt(
            condition,
            &context.patient_summary(),
            context.symptoms(),
        ))
        .with_system_prompt(PromptTemplate::assessment_system())
        .with_temperature(ASSESSMENT_TEMPERATURE);

        let (response, research) = tokio::join!(
            self.reasoning.reason(request),
            self.research
                .condition_details(condition, Some(context.symptoms()))
        );

        let assessment = parse_condition_assessment(&response);
        let confidence = deep_research_confidence(assessment.probability, research.sources.len());

        let mut sources = research.sources.clone();
        sources.push(MODEL_SOURCE.to_string());

        let finding = AgentFinding::new(
            self.id.clone(),
            AgentKind::DeepResearch,
            truncate_chars(&research.overview, FINDINGS_CHARS),
        )
        .with_condition(condition)
        .with_sources(sources)
        .with_confidence(confidence)
        .with_reasoning(response)
        .with_processing_time(started.elapsed());

        info!(
            "[{}] Deep research complete for {} (confidence {:.2})",
            self.id,
            condition,
            finding.confidence()
        );

        DeepResearchOutcome {
            finding,
            assessment,
            research,
        }
    }
}
