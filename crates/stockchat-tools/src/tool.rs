//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors a tool invocation can produce
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments did not match the tool's parameter schema
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool ran but failed, typically because an upstream data source
    /// was unreachable or returned nothing usable
    #[error("{0}")]
    Failed(String),
}

/// Result type for tool invocations
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// A function the model can invoke
///
/// One implementation is the single source of truth for a function's name,
/// model-facing description, parameter schema, and behavior; registering it
/// keeps dispatch and schema advertisement in lockstep by construction.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Invoke the tool with an argument object
    ///
    /// Returns the stringified result that becomes the content of the
    /// tool-role message sent back to the model.
    async fn call(&self, args: Value) -> ToolResult<String>;

    /// Function name, unique within a registry
    fn name(&self) -> &str;

    /// Description shown to the model when the function is offered
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters
    fn parameters(&self) -> Value;
}
