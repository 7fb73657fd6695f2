//! OpenAI chat-completions backend
//!
//! See: https://platform.openai.com/docs/api-reference/chat

use crate::{ChatClient, ChatMessage, CompletionRequest, FunctionSpec, LlmError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: `https://api.openai.com/v1`);
    /// can point at any OpenAI-compatible deployment
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from the `OPENAI_API_KEY` environment variable,
    /// honoring `OPENAI_API_BASE` when set
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            LlmError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Create config by reading the API key from a local file
    ///
    /// Surrounding whitespace is trimmed. A missing or unreadable file is a
    /// configuration error; callers treat that as fatal at startup.
    pub fn from_key_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let api_key = std::fs::read_to_string(path).map_err(|e| {
            LlmError::Config(format!("cannot read API key file {}: {e}", path.display()))
        })?;
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::Config(format!(
                "API key file {} is empty",
                path.display()
            )));
        }
        Ok(Self::new(api_key))
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// OpenAI chat-completions client
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a client with custom configuration
    pub fn with_config(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAiConfig::new(api_key))
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<ChatMessage> {
        let wire_tools = request
            .tools
            .as_ref()
            .map(|tools| tools.iter().map(WireTool::function).collect());

        let wire_request = WireRequest {
            model: &request.model,
            messages: &request.messages,
            tools: wire_tools,
            tool_choice: request.tool_choice.as_deref(),
        };

        debug!(
            message_count = request.messages.len(),
            tools_offered = request.tools.as_ref().map_or(0, Vec::len),
            "Sending chat-completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await?;
            return Err(LlmError::Rejected { status, detail });
        }

        let wire_response: WireResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("failed to parse body: {e}")))?;

        let choice = wire_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::MalformedResponse("no choices in response".to_string()))?;

        debug!(
            has_tool_calls = choice.message.has_tool_calls(),
            "Chat-completion response received"
        );

        Ok(choice.message)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// Wire-level request/response envelopes. The message type already matches
// the provider's shape, so only the tool wrapper and the choices envelope
// need dedicated structs.

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: &'a FunctionSpec,
}

impl<'a> WireTool<'a> {
    fn function(spec: &'a FunctionSpec) -> Self {
        Self {
            tool_type: "function",
            function: spec,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: ChatMessage,
}
