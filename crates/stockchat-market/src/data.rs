//! Market-data access
//!
//! The [`MarketData`] trait is the seam the indicator tools are written
//! against; [`YahooMarketData`] is the production implementation.

use crate::error::{MarketError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// One day's closing price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Source of historical daily prices
///
/// Every lookup covers one year of daily history, oldest bar first.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// One year of daily bars for `ticker`
    async fn daily_history(&self, ticker: &str) -> Result<Vec<DailyBar>>;

    /// One year of daily closing prices for `ticker`
    async fn closing_prices(&self, ticker: &str) -> Result<Vec<f64>> {
        Ok(self
            .daily_history(ticker)
            .await?
            .iter()
            .map(|b| b.close)
            .collect())
    }
}

/// Yahoo Finance implementation of [`MarketData`]
///
/// No authentication; failures are provider-specific and wrapped opaquely.
/// Every fetch is bounded by a deadline so a stalled provider cannot hang
/// the request indefinitely.
#[derive(Debug, Clone)]
pub struct YahooMarketData {
    timeout: std::time::Duration,
}

impl Default for YahooMarketData {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooMarketData {
    /// Create a new Yahoo Finance data source with the default deadline
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-fetch deadline
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl MarketData for YahooMarketData {
    async fn daily_history(&self, ticker: &str) -> Result<Vec<DailyBar>> {
        let provider =
            yahoo::YahooConnector::new().map_err(|e| MarketError::YahooFinance(e.to_string()))?;

        let end = Utc::now();
        let start = end - Duration::days(365);

        // yahoo_finance_api speaks `time`, the rest of the crate `chrono`
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::YahooFinance(format!("invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::YahooFinance(format!("invalid end timestamp: {e}")))?;

        let response = tokio::time::timeout(
            self.timeout,
            provider.get_quote_history(ticker, start_odt, end_odt),
        )
        .await
        .map_err(|_| MarketError::Timeout(self.timeout))?
        .map_err(|e| MarketError::YahooFinance(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::YahooFinance(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| DailyBar {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                close: q.close,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn fetches_one_year_of_history() {
        let data = YahooMarketData::new();
        let bars = data.daily_history("AAPL").await.unwrap();

        assert!(!bars.is_empty());
        // Daily bars over a year: roughly 250 trading days
        assert!(bars.len() > 200);
        assert!(bars.first().unwrap().timestamp < bars.last().unwrap().timestamp);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn closing_prices_match_history() {
        let data = YahooMarketData::new();
        let closes = data.closing_prices("AAPL").await.unwrap();
        assert!(closes.iter().all(|c| *c > 0.0));
    }
}
