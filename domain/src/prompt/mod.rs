//! Prompt domain
//!
//! Templates for generating prompts at each stage of the diagnosis pipeline.

mod template;

pub use template::PromptTemplate;
