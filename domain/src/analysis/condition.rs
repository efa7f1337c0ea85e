//! Final condition record and its tags

use serde::{Deserialize, Serialize};

/// How quickly a condition should be acted upon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Emergency,
    Urgent,
    Routine,
    Monitor,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Emergency => "emergency",
            Urgency::Urgent => "urgent",
            Urgency::Routine => "routine",
            Urgency::Monitor => "monitor",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point on the 800x600 body diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Body region a condition is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyRegion {
    Head,
    Brain,
    Heart,
    Lungs,
    Respiratory,
    Stomach,
    Liver,
    Kidneys,
    Digestive,
    Blood,
    Immune,
    Endocrine,
    Musculoskeletal,
    Skin,
    General,
}

impl BodyRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyRegion::Head => "head",
            BodyRegion::Brain => "brain",
            BodyRegion::Heart => "heart",
            BodyRegion::Lungs => "lungs",
            BodyRegion::Respiratory => "respiratory",
            BodyRegion::Stomach => "stomach",
            BodyRegion::Liver => "liver",
            BodyRegion::Kidneys => "kidneys",
            BodyRegion::Digestive => "digestive",
            BodyRegion::Blood => "blood",
            BodyRegion::Immune => "immune",
            BodyRegion::Endocrine => "endocrine",
            BodyRegion::Musculoskeletal => "musculoskeletal",
            BodyRegion::Skin => "skin",
            BodyRegion::General => "general",
        }
    }

    /// Diagram coordinates for this region.
    pub fn position(&self) -> Position {
        match self {
            BodyRegion::Head => Position::new(400, 80),
            BodyRegion::Brain => Position::new(400, 60),
            BodyRegion::Heart => Position::new(380, 210),
            BodyRegion::Lungs => Position::new(420, 210),
            BodyRegion::Respiratory => Position::new(440, 220),
            BodyRegion::Stomach => Position::new(380, 300),
            BodyRegion::Liver => Position::new(430, 290),
            BodyRegion::Kidneys => Position::new(370, 330),
            BodyRegion::Digestive => Position::new(400, 320),
            BodyRegion::Blood => Position::new(340, 280),
            BodyRegion::Immune => Position::new(480, 280),
            BodyRegion::Endocrine => Position::new(400, 200),
            BodyRegion::Musculoskeletal => Position::new(300, 300),
            BodyRegion::Skin => Position::new(500, 300),
            BodyRegion::General => Position::new(400, 350),
        }
    }
}

impl std::fmt::Display for BodyRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One piece of evidence backing a final condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEvidence {
    /// Agent kind that produced the evidence
    pub source: String,
    pub content: String,
    pub relevance: f64,
}

/// A ranked, annotated condition: the unit of pipeline output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalCondition {
    pub name: String,
    pub probability: f64,
    pub confidence: f64,
    pub body_region: BodyRegion,
    pub evidence_summary: String,
    pub evidence: Vec<ConditionEvidence>,
    pub position: Position,
    pub matched_symptoms: Vec<String>,
    pub recommended_tests: Vec<String>,
    pub urgency: Urgency,
}
