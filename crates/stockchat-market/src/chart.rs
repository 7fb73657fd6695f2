//! Per-ticker PNG chart artifacts
//!
//! Charts are addressed by ticker under one directory, one file per
//! symbol. Rendering writes to a temp file and renames it into place, so
//! a reader never observes a partially written image and concurrent plots
//! of the same ticker settle on whichever finished last.

use crate::data::DailyBar;
use crate::error::{MarketError, Result};
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

const CHART_SIZE: (u32, u32) = (1000, 500);

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Store of rendered chart artifacts, one PNG per ticker
#[derive(Debug, Clone)]
pub struct ChartStore {
    dir: PathBuf,
}

impl ChartStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the artifact directory if it does not exist
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of the artifact for `ticker`
    ///
    /// The ticker is uppercased and restricted to filename-safe symbol
    /// characters, which also keeps request-supplied names inside the
    /// artifact directory.
    pub fn path_for(&self, ticker: &str) -> Result<PathBuf> {
        let name = artifact_stem(ticker)?;
        Ok(self.dir.join(format!("{name}.png")))
    }

    /// Render a line chart of `bars` for `ticker` and return the artifact
    /// path
    pub fn render(&self, ticker: &str, bars: &[DailyBar]) -> Result<PathBuf> {
        if bars.is_empty() {
            return Err(MarketError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: "no price history to plot".to_string(),
            });
        }

        self.ensure_dir()?;
        let stem = artifact_stem(ticker)?;
        let path = self.dir.join(format!("{stem}.png"));
        let tmp = self.dir.join(format!(
            ".{stem}.{}.{}.png",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        draw_chart(&tmp, &stem, bars)?;
        std::fs::rename(&tmp, &path)?;

        info!(ticker = %stem, path = %path.display(), points = bars.len(), "Chart rendered");
        Ok(path)
    }
}

fn artifact_stem(ticker: &str) -> Result<String> {
    let stem: String = ticker
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
        .collect();
    if stem.is_empty() {
        return Err(MarketError::Chart(format!(
            "ticker {ticker:?} has no filename-safe characters"
        )));
    }
    Ok(stem)
}

fn draw_chart(path: &Path, ticker: &str, bars: &[DailyBar]) -> Result<()> {
    let first_day = bars[0].timestamp.date_naive();
    let last_day = bars[bars.len() - 1].timestamp.date_naive();
    // A one-bar series still needs a non-degenerate axis
    let last_day = if last_day > first_day {
        last_day
    } else {
        first_day + Days::new(1)
    };

    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for bar in bars {
        min = min.min(bar.close);
        max = max.max(bar.close);
    }
    let pad = ((max - min) * 0.05).max(0.01);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{ticker} Stock Price Over Last Year"),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first_day..last_day, (min - pad)..(max + pad))
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Stock Price ($)")
        .x_labels(8)
        .x_label_formatter(&|d: &NaiveDate| d.format("%b %Y").to_string())
        .draw()
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            bars.iter().map(|b| (b.timestamp.date_naive(), b.close)),
            &BLUE,
        ))
        .map_err(|e| MarketError::Chart(e.to_string()))?;

    root.present().map_err(|e| MarketError::Chart(e.to_string()))?;
    Ok(())
}
