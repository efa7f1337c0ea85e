//! Pipeline parameters for the diagnosis use case.
//!
//! [`PipelineConfig`] groups the static parameters that shape one diagnosis
//! run in [`RunDiagnosisUseCase`](crate::use_cases::run_diagnosis::RunDiagnosisUseCase).

/// Diagnosis pipeline control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Conditions in the final list. Discovery keeps twice as many.
    pub max_conditions: usize,
    /// Deep-research agents run concurrently per batch.
    pub agents_batch: usize,
    /// Sequential debate rounds before synthesis.
    pub debate_rounds: usize,
    /// Minimum rating for clinic lookup.
    pub min_clinic_rating: f64,
    /// Clinics kept in the report.
    pub max_clinics: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_conditions: 5,
            agents_batch: 2,
            debate_rounds: 2,
            min_clinic_rating: 3.5,
            max_clinics: 5,
        }
    }
}

impl PipelineConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_conditions(mut self, max: usize) -> Self {
        self.max_conditions = max;
        self
    }

    pub fn with_agents_batch(mut self, batch: usize) -> Self {
        self.agents_batch = batch;
        self
    }

    pub fn with_debate_rounds(mut self, rounds: usize) -> Self {
        self.debate_rounds = rounds;
        self
    }

    pub fn with_min_clinic_rating(mut self, rating: f64) -> Self {
        self.min_clinic_rating = rating;
        self
    }

    pub fn with_max_clinics(mut self, max: usize) -> Self {
        self.max_clinics = max;
        self
    }

    /// Candidates discovery may hand to deep research.
    pub fn discovery_cap(&self) -> usize {
        self.max_conditions * 2
    }

    /// Batch size for `candidate_count` candidates.
    ///
    /// Capped by `max_conditions` and the candidate count, never below 1.
    pub fn effective_batch(&self, candidate_count: usize) -> usize {
        self.agents_batch
            .min(self.max_conditions)
            .min(candidate_count)
            .max(1)
    }
}
