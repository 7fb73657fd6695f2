//! Momentum-oscillator tools

use crate::data::MarketData;
use crate::indicators;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use stockchat_tools::{Tool, ToolResult};

#[derive(Debug, Deserialize)]
struct TickerParams {
    ticker: String,
}

fn ticker_schema() -> Value {
    json!({
        "type": "object",
        "properties": {"ticker": {"type": "string"}},
        "required": ["ticker"]
    })
}

/// `calculate_RSI`: 14-period relative strength index
pub struct RsiTool {
    data: Arc<dyn MarketData>,
}

impl RsiTool {
    pub fn new(data: Arc<dyn MarketData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for RsiTool {
    async fn call(&self, args: Value) -> ToolResult<String> {
        let params: TickerParams = serde_json::from_value(args)?;
        let closes = self.data.closing_prices(&params.ticker).await?;
        Ok(indicators::rsi(&closes).to_string())
    }

    fn name(&self) -> &str {
        "calculate_RSI"
    }

    fn description(&self) -> &str {
        "Relative Strength Index."
    }

    fn parameters(&self) -> Value {
        ticker_schema()
    }
}

/// `calculate_MACD`: MACD line, signal line, and histogram, comma-separated
pub struct MacdTool {
    data: Arc<dyn MarketData>,
}

impl MacdTool {
    pub fn new(data: Arc<dyn MarketData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for MacdTool {
    async fn call(&self, args: Value) -> ToolResult<String> {
        let params: TickerParams = serde_json::from_value(args)?;
        let closes = self.data.closing_prices(&params.ticker).await?;
        let m = indicators::macd(&closes);
        Ok(format!("{}, {}, {}", m.macd, m.signal, m.histogram))
    }

    fn name(&self) -> &str {
        "calculate_MACD"
    }

    fn description(&self) -> &str {
        "MACD indicator."
    }

    fn parameters(&self) -> Value {
        ticker_schema()
    }
}
