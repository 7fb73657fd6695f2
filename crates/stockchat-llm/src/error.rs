//! Error types for chat-completion operations

use thiserror::Error;

/// Result type for chat-completion operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Failure classes of the chat-completion client
#[derive(Debug, Error)]
pub enum LlmError {
    /// The provider rejected the request: bad credential, malformed body,
    /// unknown model, or rate limiting. Retrying the same request will not
    /// change the outcome.
    #[error("model API rejected the request (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The provider could not be reached, or the connection failed before
    /// a response arrived
    #[error("model API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a body this client cannot use
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The client could not be configured; fatal at startup
    #[error("configuration error: {0}")]
    Config(String),
}
