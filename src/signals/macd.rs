// =============================================================================
// Momentum Oscillator (MACD-style)
// =============================================================================
//
// Step 1 — Fast and slow EMAs of price (spans `short_window`, `long_window`),
//          each seeded with the first price, alpha = 2 / (span + 1).
// Step 2 — MACD line   = EMA_fast - EMA_slow
// Step 3 — Signal line = EMA of the MACD line (span `signal_window`)
// Step 4 — Histogram   = MACD line - signal line
// Step 5 — Normalise the histogram over the whole series to zero mean and
//          unit sample std; a constant histogram divides by 1 instead.
//
// Exponential smoothing has no warm-up gap, so every output is aligned to
// the full price index.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MacdParams;
use crate::error::{Result, SignalError};
use crate::indicators::{calculate_ema, normalize};
use crate::types::{PriceSeries, SignalSeries};

/// Un-normalised MACD lines, all on the price index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA.
    pub macd_line: SignalSeries,
    /// EMA of the MACD line.
    pub signal_line: SignalSeries,
    /// MACD line minus signal line.
    pub histogram: SignalSeries,
}

/// MACD-style oscillator with its own spans.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumOscillator {
    params: MacdParams,
}

impl Default for MomentumOscillator {
    fn default() -> Self {
        Self {
            params: MacdParams::default(),
        }
    }
}

impl MomentumOscillator {
    /// Build an oscillator; every span must be positive.
    ///
    /// The spans may come in any order.  With `short_window > long_window`
    /// the MACD line changes sign; equal spans give an all-zero oscillator.
    pub fn new(short_window: usize, long_window: usize, signal_window: usize) -> Result<Self> {
        Self::from_params(MacdParams {
            short_window,
            long_window,
            signal_window,
        })
    }

    pub fn from_params(params: MacdParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &MacdParams {
        &self.params
    }

    /// Compute the raw MACD, signal and histogram lines.
    pub fn calc_components(&self, prices: &PriceSeries) -> Result<MacdOutput> {
        if prices.is_empty() {
            return Err(SignalError::EmptySeries);
        }

        let ema_short = calculate_ema(prices.values(), self.params.short_window);
        let ema_long = calculate_ema(prices.values(), self.params.long_window);

        let macd_line: Vec<f64> = ema_short
            .iter()
            .zip(ema_long.iter())
            .map(|(s, l)| s - l)
            .collect();
        let signal_line = calculate_ema(&macd_line, self.params.signal_window);
        let histogram: Vec<f64> = macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(m, s)| m - s)
            .collect();

        Ok(MacdOutput {
            macd_line: prices.with_values(macd_line),
            signal_line: prices.with_values(signal_line),
            histogram: prices.with_values(histogram),
        })
    }

    /// Normalised oscillator (histogram z-score) aligned to the price index.
    ///
    /// A single price has no sample standard deviation; the divisor falls
    /// back to 1 as for a constant series, so the output is `[0.0]` rather
    /// than NaN.
    pub fn calc_combined_signal(&self, prices: &PriceSeries) -> Result<SignalSeries> {
        let output = self.calc_components(prices)?;
        let signal = normalize(output.histogram.values());

        debug!(
            len = signal.len(),
            short = self.params.short_window,
            long = self.params.long_window,
            signal_window = self.params.signal_window,
            "momentum oscillator computed"
        );

        Ok(prices.with_values(signal))
    }
}
