//! Infrastructure layer for symptom-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod reasoning;
pub mod research;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileClinicsConfig, FileConfig, FileLoggingConfig,
    FilePipelineConfig, FileReasoningConfig, FileResearchConfig,
};
pub use reasoning::AnthropicReasoningGateway;
pub use research::{DuckDuckGoSearch, WebResearchService};
