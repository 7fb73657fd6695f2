//! Chat client trait and completion request types

use crate::{ChatMessage, FunctionSpec, Result};
use async_trait::async_trait;

/// Request for one chat-completion round
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,

    /// Conversation so far, in order
    pub messages: Vec<ChatMessage>,

    /// Functions offered to the model this round; `None` on the final
    /// round, which must be free-text only
    pub tools: Option<Vec<FunctionSpec>>,

    /// Tool choice directive, e.g. `"auto"`; only meaningful with `tools`
    pub tool_choice: Option<String>,
}

impl CompletionRequest {
    /// Create a builder for completion requests
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder::new(model)
    }
}

/// Builder for [`CompletionRequest`]
pub struct CompletionRequestBuilder {
    model: String,
    messages: Vec<ChatMessage>,
    tools: Option<Vec<FunctionSpec>>,
    tool_choice: Option<String>,
}

impl CompletionRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            tools: None,
            tool_choice: None,
        }
    }

    /// Set the conversation messages
    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Add a single message
    pub fn add_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Offer functions to the model with automatic tool choice
    pub fn tools_auto(mut self, tools: Vec<FunctionSpec>) -> Self {
        self.tools = Some(tools);
        self.tool_choice = Some("auto".to_string());
        self
    }

    /// Build the completion request
    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            model: self.model,
            messages: self.messages,
            tools: self.tools,
            tool_choice: self.tool_choice,
        }
    }
}

/// Trait for chat-completion backends
///
/// The orchestrator is written against this seam so tests can script the
/// model's tool selections without network access.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run one completion round and return the assistant's message
    async fn complete(&self, request: CompletionRequest) -> Result<ChatMessage>;

    /// Backend name, e.g. `"openai"`
    fn name(&self) -> &str;
}
