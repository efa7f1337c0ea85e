//! Agent finding entity

use crate::core::text::current_timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unique identifier for an agent instance (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh id of the form `agent_1a2b3c4d`.
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("agent_{}", &hex[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which agent role produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Broad discovery over all symptoms
    CoarseSearch,
    /// Investigation of a single candidate condition
    DeepResearch,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::CoarseSearch => "coarse_search",
            AgentKind::DeepResearch => "deep_research",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured output of one agent pass (Entity)
///
/// Built once through the `with_*` methods and read-only afterwards.
/// Confidence is clamped to `[0, 1]` on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFinding {
    agent_id: AgentId,
    kind: AgentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
    findings: String,
    sources: Vec<String>,
    confidence: f64,
    reasoning: String,
    processing_time_ms: u64,
    /// Milliseconds since epoch
    timestamp: u64,
}

impl AgentFinding {
    pub fn new(agent_id: AgentId, kind: AgentKind, findings: impl Into<String>) -> Self {
        Self {
            agent_id,
            kind,
            condition: None,
            findings: findings.into(),
            sources: Vec::new(),
            confidence: 0.0,
            reasoning: String::new(),
            processing_time_ms: 0,
            timestamp: current_timestamp(),
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_processing_time(mut self, elapsed: Duration) -> Self {
        self.processing_time_ms = elapsed.as_millis() as u64;
        self
    }

    pub fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    /// Condition this finding is about; `None` for the discovery aggregate.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Condition name if present and not blank.
    pub fn named_condition(&self) -> Option<&str> {
        self.condition().filter(|c| !c.trim().is_empty())
    }

    pub fn findings(&self) -> &str {
        &self.findings
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
