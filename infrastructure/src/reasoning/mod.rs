//! Reasoning backends

mod anthropic;

pub use anthropic::AnthropicReasoningGateway;
