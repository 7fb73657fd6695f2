//! OpenAI chat-completions client for stockchat
//!
//! Wire-level message and tool-call types, the [`ChatClient`] trait the
//! orchestrator is written against, and the concrete [`OpenAiClient`].

pub mod client;
pub mod error;
pub mod messages;
pub mod openai;
pub mod tools;

pub use client::{ChatClient, CompletionRequest};
pub use error::{LlmError, Result};
pub use messages::{ChatMessage, FunctionCall, Role, ToolCall};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use tools::FunctionSpec;
