//! Error types for market-data operations

use thiserror::Error;

/// Market-data specific errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Market-data request exceeded its deadline
    #[error("Market data request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Chart rendering failed
    #[error("Chart rendering error: {0}")]
    Chart(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for market-data operations
pub type Result<T> = std::result::Result<T, MarketError>;

impl From<MarketError> for stockchat_tools::ToolError {
    fn from(err: MarketError) -> Self {
        stockchat_tools::ToolError::Failed(err.to_string())
    }
}
