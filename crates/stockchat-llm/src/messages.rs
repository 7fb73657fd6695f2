//! Message types for the chat-completions wire protocol
//!
//! These mirror the OpenAI chat message shape directly: a role, optional
//! text content, and the tool-call fields used during function calling.
//! Message order in a conversation is significant; the second model round
//! reconstructs the exchange from it.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Tool result message
    Tool,
}

/// A function invocation requested by the model
///
/// `arguments` is kept as the raw JSON string the model produced; parsing
/// it (and deciding what to do when it is not an object) is the caller's
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded argument object
    pub arguments: String,
}

/// A tool call entry in an assistant message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call, echoed back in the tool result
    pub id: String,
    /// Call type; always `"function"` for this protocol
    #[serde(rename = "type")]
    pub call_type: String,
    /// The requested function invocation
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a function tool call
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: Role,

    /// Text content; absent on assistant messages that only carry tool calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool calls requested by the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Identifier of the tool call this message answers (tool role only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Function name that produced this result (tool role only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(text.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(text.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    /// Create an assistant message that records tool calls and no text
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            tool_calls: Some(tool_calls),
            tool_call_id: None,
            name: None,
        }
    }

    /// Create a tool result message
    ///
    /// `tool_call_id` must match a `tool_calls` entry of the immediately
    /// preceding assistant message; the provider rejects or misbehaves on
    /// unmatched ids.
    pub fn tool(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            name: Some(name.into()),
        }
    }

    /// Tool calls carried by this message, empty when there are none
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or_default()
    }

    /// Whether this message requests any tool calls
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls().is_empty()
    }

    /// Text content, empty string when absent
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_round_trips() {
        let msg = ChatMessage::user("What is the RSI of AAPL?");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "What is the RSI of AAPL?");
        // Optional fields must not appear on the wire
        assert!(json.get("tool_calls").is_none());
        assert!(json.get("tool_call_id").is_none());

        let back: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back.text(), "What is the RSI of AAPL?");
        assert!(!back.has_tool_calls());
    }

    #[test]
    fn assistant_tool_call_message_has_no_content() {
        let msg = ChatMessage::assistant_tool_calls(vec![ToolCall::function(
            "call_1",
            "get_stock_price",
            r#"{"ticker":"AAPL"}"#,
        )]);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert!(json.get("content").is_none());
        assert_eq!(json["tool_calls"][0]["id"], "call_1");
        assert_eq!(json["tool_calls"][0]["type"], "function");
        assert_eq!(json["tool_calls"][0]["function"]["name"], "get_stock_price");
        // Arguments stay a raw JSON string, not a nested object
        assert_eq!(
            json["tool_calls"][0]["function"]["arguments"],
            r#"{"ticker":"AAPL"}"#
        );
    }

    #[test]
    fn tool_message_carries_id_and_name() {
        let msg = ChatMessage::tool("call_1", "calculate_RSI", "62.5");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_1");
        assert_eq!(json["name"], "calculate_RSI");
        assert_eq!(json["content"], "62.5");
    }

    #[test]
    fn assistant_response_with_tool_calls_parses() {
        let raw = r#"{
            "role": "assistant",
            "content": null,
            "tool_calls": [
                {"id": "call_abc", "type": "function",
                 "function": {"name": "calculate_SMA", "arguments": "{\"ticker\":\"MSFT\",\"window\":20}"}}
            ]
        }"#;
        let msg: ChatMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.has_tool_calls());
        assert_eq!(msg.tool_calls()[0].function.name, "calculate_SMA");
    }
}
