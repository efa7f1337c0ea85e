//! Configuration file loading for symptom-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SYMPTOM_QUORUM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./symptom-quorum.toml` or `./.symptom-quorum.toml`
//! 4. Global: `$XDG_CONFIG_HOME/symptom-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileClinicsConfig, FileConfig, FileLoggingConfig, FilePipelineConfig,
    FileReasoningConfig, FileResearchConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
