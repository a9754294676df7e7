//! Capability interface for functions the model may invoke mid-generation.

use async_trait::async_trait;

use super::client::ToolDescriptor;
use super::GenAiError;

/// A named function a template can declare as invocable by the model.
///
/// Implementations must be deterministic about their declared name and
/// shapes: prompt text refers to tools by name, so a rename breaks the
/// template that declares it.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// JSON Schema for the tool's input object.
    fn input_schema(&self) -> serde_json::Value;
    async fn invoke(&self, input: serde_json::Value) -> Result<serde_json::Value, GenAiError>;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}
