//! Condition analysis
//!
//! Deterministic last stage of the pipeline. [`ConditionAnalyzer`] turns
//! post-debate findings into [`FinalCondition`]s:
//!
//! ```text
//! findings ──▶ probability / region / urgency / tests ──▶ filter ──▶ sort ──▶ cap
//!                                                                          │
//!                                             generality penalty ◀─────────┘
//! ```

mod analyzer;
mod condition;
pub mod rules;

pub use analyzer::{ConditionAnalyzer, DEFAULT_PROBABILITY};
pub use condition::{BodyRegion, ConditionEvidence, FinalCondition, Position, Urgency};
