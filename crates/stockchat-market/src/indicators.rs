//! Pure indicator math over closing-price series
//!
//! No I/O, no side effects. Inputs are daily closes, oldest first. The
//! smoothing recurrences follow the exponentially-weighted form
//! `y[t] = alpha * x[t] + (1 - alpha) * y[t-1]` seeded with the first
//! observation. Degenerate inputs propagate through the `f64` arithmetic
//! as `NaN`/`inf` rather than raising errors; callers stringify whatever
//! comes out.

/// Simple moving average over the last `window` closes
///
/// `NaN` when `window` is zero or exceeds the available history.
pub fn sma(closes: &[f64], window: usize) -> f64 {
    if window == 0 || window > closes.len() {
        return f64::NAN;
    }
    closes[closes.len() - window..].iter().sum::<f64>() / window as f64
}

/// Exponential moving average with smoothing span `span`, last value
///
/// `alpha = 2 / (span + 1)`. `NaN` on an empty series.
pub fn ema(closes: &[f64], span: usize) -> f64 {
    last(&ema_series(closes, span))
}

/// Full EMA series with smoothing span `span`
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    smoothed_series(values, 2.0 / (span as f64 + 1.0))
}

/// 14-period relative strength index, last value
///
/// Gains and losses are smoothed with `alpha = 1/14`; RS is their ratio
/// and RSI = 100 - 100 / (1 + RS). A window with no losses drives RS to
/// infinity (RSI 100); a window with no movement at all yields `NaN`.
pub fn rsi(closes: &[f64]) -> f64 {
    const PERIOD: f64 = 14.0;

    if closes.len() < 2 {
        return f64::NAN;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let avg_gain = last(&smoothed_series(&gains, 1.0 / PERIOD));
    let avg_loss = last(&smoothed_series(&losses, 1.0 / PERIOD));

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// MACD line, signal line, and histogram, last values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Moving-average convergence/divergence with the standard 12/26/9 setup
pub fn macd(closes: &[f64]) -> Macd {
    let ema12 = ema_series(closes, 12);
    let ema26 = ema_series(closes, 26);

    let line: Vec<f64> = ema12
        .iter()
        .zip(ema26.iter())
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal_series = ema_series(&line, 9);

    let macd = last(&line);
    let signal = last(&signal_series);
    Macd {
        macd,
        signal,
        histogram: macd - signal,
    }
}

fn smoothed_series(values: &[f64], alpha: f64) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(values.len());
    let mut prev = first;
    out.push(prev);
    for &x in &values[1..] {
        prev = alpha * x + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

fn last(series: &[f64]) -> f64 {
    series.last().copied().unwrap_or(f64::NAN)
}
