//! Moving-average tools

use crate::data::MarketData;
use crate::indicators;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use stockchat_tools::{Tool, ToolResult};

#[derive(Debug, Deserialize)]
struct WindowParams {
    ticker: String,
    window: usize,
}

fn window_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ticker": {"type": "string"},
            "window": {"type": "integer"}
        },
        "required": ["ticker", "window"]
    })
}

/// `calculate_SMA`: simple moving average over the last `window` closes
///
/// A window longer than the available history stringifies as `NaN` rather
/// than failing; the model relays that to the user.
pub struct SmaTool {
    data: Arc<dyn MarketData>,
}

impl SmaTool {
    pub fn new(data: Arc<dyn MarketData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for SmaTool {
    async fn call(&self, args: Value) -> ToolResult<String> {
        let params: WindowParams = serde_json::from_value(args)?;
        let closes = self.data.closing_prices(&params.ticker).await?;
        Ok(indicators::sma(&closes, params.window).to_string())
    }

    fn name(&self) -> &str {
        "calculate_SMA"
    }

    fn description(&self) -> &str {
        "Simple Moving Average."
    }

    fn parameters(&self) -> Value {
        window_schema()
    }
}

/// `calculate_EMA`: exponential moving average with smoothing span `window`
pub struct EmaTool {
    data: Arc<dyn MarketData>,
}

impl EmaTool {
    pub fn new(data: Arc<dyn MarketData>) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Tool for EmaTool {
    async fn call(&self, args: Value) -> ToolResult<String> {
        let params: WindowParams = serde_json::from_value(args)?;
        let closes = self.data.closing_prices(&params.ticker).await?;
        Ok(indicators::ema(&closes, params.window).to_string())
    }

    fn name(&self) -> &str {
        "calculate_EMA"
    }

    fn description(&self) -> &str {
        "Exponential Moving Average."
    }

    fn parameters(&self) -> Value {
        window_schema()
    }
}
