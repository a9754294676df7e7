//! Schema-validated prompt templates over a hosted LLM provider.
//!
//! `PromptTemplate` is the unit everything above builds on: it renders a
//! named prompt, forwards declared tools, and fails closed when the model's
//! JSON payload does not match the declared output shape. The provider is
//! opaque behind `LlmClient`.

mod anthropic;
pub mod client;
mod error;
pub mod template;
pub mod tool;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::GenAiError;
pub use template::PromptTemplate;
pub use tool::Tool;
