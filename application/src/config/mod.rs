//! Application-level configuration.
//!
//! - [`PipelineConfig`]: result caps, batch size and debate length

pub mod pipeline_config;

pub use pipeline_config::PipelineConfig;
