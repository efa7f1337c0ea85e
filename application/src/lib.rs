//! Application layer for symptom-quorum
//!
//! This crate contains the agents, port definitions, pipeline configuration
//! and the diagnosis use case. It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use agents::{
    CoarseDiscoveryAgent, DeepResearchAgent, DeepResearchOutcome, DiscoveryOutcome,
    ForumCoordinator,
};
pub use config::PipelineConfig;
pub use ports::{
    progress::{NoProgress, PipelineStage, ProgressNotifier},
    reasoning::{ReasoningError, ReasoningPort, ReasoningRequest},
    research::{ResearchError, ResearchPort},
};
pub use use_cases::run_diagnosis::{RunDiagnosisInput, RunDiagnosisUseCase};
