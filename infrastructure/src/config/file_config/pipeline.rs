//! Pipeline configuration from TOML (`[pipeline]` and `[clinics]` sections)

use serde::{Deserialize, Serialize};

/// Raw pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Conditions kept in the final ranking (default: 5)
    pub max_conditions: usize,
    /// Deep-research agents per concurrent batch (default: 2)
    pub agents_batch: usize,
    /// Sequential debate rounds (default: 2)
    pub debate_rounds: usize,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            max_conditions: 5,
            agents_batch: 2,
            debate_rounds: 2,
        }
    }
}

/// Raw clinic lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileClinicsConfig {
    /// Minimum provider rating, 0.0 to 5.0 (default: 3.5)
    pub min_rating: f64,
    /// Providers kept in the report (default: 5)
    pub max_clinics: usize,
}

impl Default for FileClinicsConfig {
    fn default() -> Self {
        Self {
            min_rating: 3.5,
            max_clinics: 5,
        }
    }
}
