//! The six functions offered to the model
//!
//! Tool names and descriptions are part of the model-facing contract;
//! changing them changes which functions the model believes exist.

mod momentum;
mod moving_average;
mod plot;
mod price;

pub use momentum::{MacdTool, RsiTool};
pub use moving_average::{EmaTool, SmaTool};
pub use plot::PlotTool;
pub use price::StockPriceTool;
