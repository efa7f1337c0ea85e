//! Run Diagnosis use case
//!
//! Orchestrates the full pipeline:
//!
//! ```text
//! discovery ──▶ deep research (batched) ──▶ forum ──▶ analysis ──▶ clinics?
//!    20%            40% → 70%                 70%        85%          90%
//! ```
//!
//! Batches run one after another; the agents inside a batch run concurrently
//! on the current task. A run never fails once its input is valid.

use crate::agents::{CoarseDiscoveryAgent, DeepResearchAgent, DeepResearchOutcome, ForumCoordinator};
use crate::config::PipelineConfig;
use crate::ports::progress::{NoProgress, PipelineStage, ProgressNotifier};
use crate::ports::reasoning::ReasoningPort;
use crate::ports::research::ResearchPort;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use symptom_domain::{
    CandidateList, ConditionAnalyzer, DiagnosisReport, Location, ResearchContext, warning_message,
};
use tracing::{info, warn};

const DISCOVERY_PERCENT: u8 = 20;
const DEEP_RESEARCH_START_PERCENT: u8 = 40;
const DEEP_RESEARCH_SPAN_PERCENT: usize = 30;
const DEBATE_PERCENT: u8 = 70;
const ANALYSIS_PERCENT: u8 = 85;
const CLINICS_PERCENT: u8 = 90;
const COMPLETED_PERCENT: u8 = 100;

/// Input for the RunDiagnosis use case
#[derive(Debug, Clone)]
pub struct RunDiagnosisInput {
    pub context: ResearchContext,
    /// Clinics are looked up only when a location is given
    pub location: Option<Location>,
}

impl RunDiagnosisInput {
    pub fn new(context: ResearchContext) -> Self {
        Self {
            context,
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// Use case for running one diagnosis
pub struct RunDiagnosisUseCase {
    reasoning: Arc<dyn ReasoningPort>,
    research: Arc<dyn ResearchPort>,
    config: PipelineConfig,
}

impl RunDiagnosisUseCase {
    pub fn new(
        reasoning: Arc<dyn ReasoningPort>,
        research: Arc<dyn ResearchPort>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            reasoning,
            research,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDiagnosisInput) -> DiagnosisReport {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDiagnosisInput,
        progress: &dyn ProgressNotifier,
    ) -> DiagnosisReport {
        let started = Instant::now();
        let context = &input.context;
        info!("Starting diagnosis pipeline");

        // Stage 1: Coarse discovery
        progress.on_stage(PipelineStage::Discovering, DISCOVERY_PERCENT);
        let discovery = CoarseDiscoveryAgent::new(
            Arc::clone(&self.reasoning),
            Arc::clone(&self.research),
            &self.config,
        )
        .discover(context)
        .await;
        info!(
            "Identified {} potential conditions",
            discovery.candidates.len()
        );
        progress.on_candidates(discovery.candidates.as_slice());

        // Stage 2: Deep research
        progress.on_stage(PipelineStage::DeepResearch, DEEP_RESEARCH_START_PERCENT);
        let outcomes = self
            .research_candidates(&discovery.candidates, context, progress)
            .await;
        let findings: Vec<_> = outcomes.into_iter().map(|o| o.finding).collect();

        // Stage 3: Forum
        progress.on_stage(PipelineStage::Debating, DEBATE_PERCENT);
        let forum = ForumCoordinator::new(Arc::clone(&self.reasoning), self.config.debate_rounds)
            .debate_with_progress(&findings, context.symptoms(), progress)
            .await;

        // Stage 4: Analysis
        progress.on_stage(PipelineStage::Analyzing, ANALYSIS_PERCENT);
        let conditions = ConditionAnalyzer::new(self.config.max_conditions).score(
            &findings,
            &forum.adjusted_confidences,
            context.symptoms(),
        );

        // Stage 5: Clinics
        let clinics = match input.location {
            Some(location) => {
                progress.on_stage(PipelineStage::FindingClinics, CLINICS_PERCENT);
                let mut clinics = self
                    .research
                    .clinics_near(location, self.config.min_clinic_rating)
                    .await;
                clinics.truncate(self.config.max_clinics);
                clinics
            }
            None => Vec::new(),
        };

        let warning = warning_message(context.symptoms(), &conditions).map(str::to_string);
        if let Some(message) = &warning {
            warn!("{}", message);
        }

        progress.on_stage(PipelineStage::Completed, COMPLETED_PERCENT);
        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!("Diagnosis complete in {}ms", processing_time_ms);

        DiagnosisReport {
            conditions,
            discovery: discovery.finding,
            candidates: discovery.candidates.into_vec(),
            findings,
            forum,
            clinics,
            warning,
            processing_time_ms,
        }
    }

    /// Investigate every candidate, one batch at a time.
    async fn research_candidates(
        &self,
        candidates: &CandidateList,
        context: &ResearchContext,
        progress: &dyn ProgressNotifier,
    ) -> Vec<DeepResearchOutcome> {
        let total = candidates.len();
        let batch_size = self.config.effective_batch(total);
        let mut outcomes = Vec::with_capacity(total);

        for (index, batch) in candidates.as_slice().chunks(batch_size).enumerate() {
            info!("Processing batch {}: {:?}", index + 1, batch);

            let runs = batch.iter().map(|condition| {
                let agent =
                    DeepResearchAgent::new(Arc::clone(&self.reasoning), Arc::clone(&self.research));
                async move { agent.investigate(condition, context).await }
            });
            let completed = join_all(runs).await;

            for outcome in &completed {
                progress.on_finding(&outcome.finding);
            }
            outcomes.extend(completed);

            progress.on_stage(
                PipelineStage::DeepResearch,
                deep_research_percent(outcomes.len(), total),
            );
        }

        outcomes
    }
}

/// Linear progress from 40 to 70 over completed candidates.
fn deep_research_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return DEEP_RESEARCH_START_PERCENT;
    }
    let span = completed.min(total) * DEEP_RESEARCH_SPAN_PERCENT / total;
    DEEP_RESEARCH_START_PERCENT + span as u8
}
