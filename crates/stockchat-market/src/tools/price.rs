//! Latest-price tool

use crate::data::MarketData;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use stockchat_tools::{Tool, ToolError, ToolResult};

/// `get_stock_price`: latest daily close for a ticker
pub struct StockPriceTool {
    data: Arc<dyn MarketData>,
}

#[derive(Debug, Deserialize)]
struct PriceParams {
    ticker: String,
}

impl StockPriceTool {
    pub fn new(data: Arc<dyn MarketData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn call(&self, args: Value) -> ToolResult<String> {
        let params: PriceParams = serde_json::from_value(args)?;
        let closes = self.data.closing_prices(&params.ticker).await?;
        let latest = closes.last().copied().ok_or_else(|| {
            ToolError::Failed(format!("no price history for {}", params.ticker))
        })?;
        Ok(latest.to_string())
    }

    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Gets the latest stock price."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"ticker": {"type": "string"}},
            "required": ["ticker"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testdata::{StaticMarketData, UnreachableMarketData};
    use super::*;

    #[test]
    fn tool_metadata() {
        let tool = StockPriceTool::new(Arc::new(StaticMarketData::new(&[1.0])));
        assert_eq!(tool.name(), "get_stock_price");
        assert_eq!(tool.parameters()["type"], "object");
        assert_eq!(tool.parameters()["required"][0], "ticker");
    }

    #[tokio::test]
    async fn returns_latest_close_stringified() {
        let tool = StockPriceTool::new(Arc::new(StaticMarketData::new(&[100.0, 101.5, 230.1])));
        let out = tool.call(json!({"ticker": "AAPL"})).await.unwrap();
        assert_eq!(out, "230.1");
    }

    #[tokio::test]
    async fn missing_ticker_is_invalid_params() {
        let tool = StockPriceTool::new(Arc::new(StaticMarketData::new(&[1.0])));
        let err = tool.call(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let tool = StockPriceTool::new(Arc::new(UnreachableMarketData));
        let err = tool.call(json!({"ticker": "AAPL"})).await.unwrap_err();
        assert!(matches!(err, ToolError::Failed(_)));
    }

    #[tokio::test]
    async fn empty_history_is_a_failure() {
        let tool = StockPriceTool::new(Arc::new(StaticMarketData::new(&[])));
        let err = tool.call(json!({"ticker": "AAPL"})).await.unwrap_err();
        assert!(matches!(err, ToolError::Failed(_)));
    }
}
