//! Two-round tool-calling orchestration
//!
//! Round one offers the full function list and lets the model pick zero or
//! more calls. Chosen calls are dispatched through the registry in model
//! order, each answered with a tool-role message. Round two replays the
//! accumulated conversation with no functions attached and its text is the
//! final reply. Every tool_call_id the model emits gets a matching tool
//! message, including unknown function names, which are answered with an
//! error string instead of being dropped.

use serde_json::Value;
use std::sync::Arc;
use stockchat_llm::{ChatClient, ChatMessage, CompletionRequest, FunctionSpec, LlmError};
use stockchat_tools::{ToolError, ToolRegistry};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Errors from a chat orchestration run
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A model round failed
    #[error("model API error: {0}")]
    Model(#[from] LlmError),

    /// A dispatched tool failed
    #[error("tool {name} failed: {source}")]
    Tool {
        name: String,
        #[source]
        source: ToolError,
    },
}

/// Drives the two-round exchange between the model and the tool registry
pub struct Orchestrator {
    client: Arc<dyn ChatClient>,
    registry: Arc<ToolRegistry>,
    model: String,
}

impl Orchestrator {
    /// Create an orchestrator over a chat backend and a tool registry
    pub fn new(client: Arc<dyn ChatClient>, registry: Arc<ToolRegistry>, model: String) -> Self {
        Self {
            client,
            registry,
            model,
        }
    }

    /// Answer one user question
    #[instrument(skip(self, user_input))]
    pub async fn answer(&self, user_input: &str) -> Result<String, OrchestratorError> {
        let mut messages = vec![ChatMessage::user(user_input)];

        let request = CompletionRequest::builder(&self.model)
            .messages(messages.clone())
            .tools_auto(self.function_specs())
            .build();
        let reply = self.client.complete(request).await?;

        if !reply.has_tool_calls() {
            debug!("Model answered without tool calls");
            return Ok(reply.text().to_string());
        }

        let tool_calls = reply.tool_calls().to_vec();
        info!(count = tool_calls.len(), "Model requested tool calls");
        messages.push(ChatMessage::assistant_tool_calls(tool_calls.clone()));

        for call in &tool_calls {
            let name = &call.function.name;
            let args = parse_arguments(&call.function.arguments);

            match self.registry.get(name) {
                Some(tool) => {
                    let result =
                        tool.call(args)
                            .await
                            .map_err(|source| OrchestratorError::Tool {
                                name: name.clone(),
                                source,
                            })?;
                    debug!(tool = %name, id = %call.id, result = %result, "Tool dispatched");
                    messages.push(ChatMessage::tool(call.id.clone(), name.clone(), result));
                }
                None => {
                    warn!(tool = %name, id = %call.id, "Model requested unknown tool");
                    messages.push(ChatMessage::tool(
                        call.id.clone(),
                        name.clone(),
                        format!("Error: no function named {name} is available"),
                    ));
                }
            }
        }

        let request = CompletionRequest::builder(&self.model)
            .messages(messages)
            .build();
        let reply = self.client.complete(request).await?;
        Ok(reply.text().to_string())
    }

    fn function_specs(&self) -> Vec<FunctionSpec> {
        self.registry
            .list()
            .iter()
            .map(|tool| FunctionSpec::new(tool.name(), tool.description(), tool.parameters()))
            .collect()
    }
}

/// Parse a model-produced argument payload into an argument object
///
/// Anything that is not a JSON object, including invalid JSON, degrades to
/// an empty object rather than failing the request.
fn parse_arguments(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::Object(serde_json::Map::new()),
    }
}
