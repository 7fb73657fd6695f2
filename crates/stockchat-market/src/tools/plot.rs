//! Chart-plotting tool

use crate::chart::ChartStore;
use crate::data::MarketData;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use stockchat_tools::{Tool, ToolResult};

/// `plot_stock_price`: render one year of closes to the ticker's chart
/// artifact
///
/// The image itself is not returned; clients fetch it from the chart
/// endpoint after the chat turn completes.
pub struct PlotTool {
    data: Arc<dyn MarketData>,
    charts: ChartStore,
}

#[derive(Debug, Deserialize)]
struct PlotParams {
    ticker: String,
}

impl PlotTool {
    pub fn new(data: Arc<dyn MarketData>, charts: ChartStore) -> Self {
        Self { data, charts }
    }
}

#[async_trait]
impl Tool for PlotTool {
    async fn call(&self, args: Value) -> ToolResult<String> {
        let params: PlotParams = serde_json::from_value(args)?;
        let bars = self.data.daily_history(&params.ticker).await?;
        let path = self.charts.render(&params.ticker, &bars)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(format!("Chart saved as {file_name}"))
    }

    fn name(&self) -> &str {
        "plot_stock_price"
    }

    fn description(&self) -> &str {
        "Plot stock price and save image."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"ticker": {"type": "string"}},
            "required": ["ticker"]
        })
    }
}
