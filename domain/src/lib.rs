//! Domain layer for symptom-quorum
//!
//! This crate contains the data model, the free-text parsing heuristics and
//! the deterministic scoring rules. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Findings
//!
//! Every research pass produces an [`AgentFinding`](research::AgentFinding):
//! a condition hypothesis with findings text, sources and a confidence in
//! `[0, 1]`.
//!
//! ## Forum
//!
//! Findings are cross-examined over a fixed number of
//! [`DebateRound`](forum::DebateRound)s and condensed into a
//! [`ConsensusResult`](forum::ConsensusResult) of confidence multipliers.
//!
//! ## Analysis
//!
//! [`ConditionAnalyzer`](analysis::ConditionAnalyzer) turns adjusted
//! findings into ranked [`FinalCondition`](analysis::FinalCondition)s tagged
//! with body region and urgency.

pub mod analysis;
pub mod clinic;
pub mod core;
pub mod forum;
pub mod parsing;
pub mod prompt;
pub mod report;
pub mod research;

pub use analysis::{
    BodyRegion, ConditionAnalyzer, ConditionEvidence, FinalCondition, Position, Urgency,
};
pub use clinic::{ClinicRecord, Location};
pub use core::{
    context::{PatientSex, ResearchContext},
    error::DomainError,
};
pub use forum::{ConsensusResult, ContestedPoint, DebateRound, ForumOutcome};
pub use prompt::PromptTemplate;
pub use report::{DiagnosisReport, warning_message};
pub use research::{
    AgentFinding, AgentId, AgentKind, CandidateList, ConditionAssessment, ConditionResearch,
    SearchResult,
};
