//! Adversarial forum domain
//!
//! The forum cross-validates deep-research findings through a fixed number
//! of sequential debate rounds followed by one synthesis call.
//!
//! ```text
//! findings ──▶ round 1 ──▶ round 2 ──▶ … ──▶ synthesis ──▶ ConsensusResult
//!                 │           ▲
//!                 └─ summary ─┘   (each round sees a condensed history)
//! ```
//!
//! Confidence adjustment is a pure function of the consensus multipliers:
//! `clamp(original * multiplier, 0, 1)`, or the original when no multiplier
//! was parsed for that condition.

pub mod consensus;
pub mod debate;

pub use consensus::{
    ConsensusResult, ContestedPoint, ForumOutcome, adjusted_confidences, apply_multiplier,
};
pub use debate::DebateRound;
