//! Debate round value object

use serde::{Deserialize, Serialize};

/// One round of adversarial debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateRound {
    /// Round number (1-indexed)
    pub round: usize,
    /// Free-text analysis returned by the moderator model
    pub analysis: String,
    /// Words picked out of lines that argue against a condition
    pub challenged: Vec<String>,
}

impl DebateRound {
    pub fn new(round: usize, analysis: impl Into<String>, challenged: Vec<String>) -> Self {
        Self {
            round,
            analysis: analysis.into(),
            challenged,
        }
    }
}
