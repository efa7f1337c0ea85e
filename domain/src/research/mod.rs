//! Research domain
//!
//! Types produced by the discovery and deep-research agents:
//!
//! - [`CandidateList`] - deduplicated, prioritized condition names from discovery
//! - [`AgentFinding`] - one agent's structured result about a condition
//! - [`ConditionAssessment`] - the reasoning model's parsed verdict on one condition
//! - [`ConditionResearch`] / [`SearchResult`] - records returned by the research backend

pub mod assessment;
pub mod candidates;
pub mod finding;
pub mod record;

pub use assessment::{ConditionAssessment, deep_research_confidence};
pub use candidates::CandidateList;
pub use finding::{AgentFinding, AgentId, AgentKind};
pub use record::{ConditionResearch, SearchResult};
