//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! once validated.

mod logging;
mod pipeline;
mod reasoning;
mod research;

pub use logging::FileLoggingConfig;
pub use pipeline::{FileClinicsConfig, FilePipelineConfig};
pub use reasoning::FileReasoningConfig;
pub use research::FileResearchConfig;

use serde::{Deserialize, Serialize};
use symptom_application::PipelineConfig;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("pipeline.max_conditions cannot be 0")]
    ZeroMaxConditions,

    #[error("pipeline.agents_batch cannot be 0")]
    ZeroBatch,

    #[error("pipeline.debate_rounds cannot be 0")]
    ZeroRounds,

    #[error("clinics.min_rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),

    #[error("{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("reasoning.model cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Pipeline shape
    pub pipeline: FilePipelineConfig,
    /// Language-model backend
    pub reasoning: FileReasoningConfig,
    /// Web research backend
    pub research: FileResearchConfig,
    /// Clinic lookup
    pub clinics: FileClinicsConfig,
    /// Log output
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.pipeline.max_conditions == 0 {
            return Err(ConfigValidationError::ZeroMaxConditions);
        }
        if self.pipeline.agents_batch == 0 {
            return Err(ConfigValidationError::ZeroBatch);
        }
        if self.pipeline.debate_rounds == 0 {
            return Err(ConfigValidationError::ZeroRounds);
        }

        let rating = self.clinics.min_rating;
        if !(0.0..=5.0).contains(&rating) {
            return Err(ConfigValidationError::InvalidRating(rating));
        }

        if self.reasoning.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("reasoning"));
        }
        if self.research.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("research"));
        }

        if self.reasoning.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        Ok(())
    }

    /// Pipeline parameters for the diagnosis use case
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_max_conditions(self.pipeline.max_conditions)
            .with_agents_batch(self.pipeline.agents_batch)
            .with_debate_rounds(self.pipeline.debate_rounds)
            .with_min_clinic_rating(self.clinics.min_rating)
            .with_max_clinics(self.clinics.max_clinics)
    }
}
