// =============================================================================
// Trend / Momentum Blend ("trend intermediate" strategy)
// =============================================================================
//
// Trend     — sign(SMA_short - SMA_long) in {-1, 0, +1}; both SMAs use minimum
//             periods of 1 so the trend exists from the first price.
// Momentum  — rolling sum of log returns over `momentum_window`, then
//             forward-filled back onto the price index.  The first price has
//             no return yet, so its momentum is 0.
// Blend     — (1 - w) * trend + w * momentum, pointwise.
// Output    — the blend normalised over the whole series (zero mean, unit
//             sample std, divisor 1 when the blend is constant).
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{validate_blend_weight, TrendParams};
use crate::error::{Result, SignalError};
use crate::indicators::{forward_fill_reindex, normalize, rolling_mean, rolling_sum, sign};
use crate::signals::returns::calc_returns;
use crate::types::{PriceSeries, SignalSeries};

/// Un-normalised blend components on the price index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBlendOutput {
    /// sign(SMA_short - SMA_long).
    pub trend: SignalSeries,
    /// Rolling sum of log returns, forward-filled onto the price index.
    pub momentum: SignalSeries,
    /// (1 - w) * trend + w * momentum.
    pub blended: SignalSeries,
}

/// Trend / momentum blender with its own windows and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendMomentumBlender {
    params: TrendParams,
}

impl Default for TrendMomentumBlender {
    fn default() -> Self {
        Self {
            params: TrendParams::default(),
        }
    }
}

impl TrendMomentumBlender {
    /// Build a blender; see [`TrendParams::validate`] for the accepted ranges.
    pub fn new(params: TrendParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &TrendParams {
        &self.params
    }

    /// Compute trend, aligned momentum and their blend with weight `w`.
    pub fn calc_components(&self, prices: &PriceSeries, w: f64) -> Result<TrendBlendOutput> {
        validate_blend_weight(w)?;
        if prices.is_empty() {
            return Err(SignalError::EmptySeries);
        }

        let values = prices.values();
        let sma_short = rolling_mean(values, self.params.short_window);
        let sma_long = rolling_mean(values, self.params.long_window);
        let trend: Vec<f64> = sma_short
            .iter()
            .zip(sma_long.iter())
            .map(|(s, l)| sign(s - l))
            .collect();

        let momentum = match calc_returns(prices) {
            Ok(returns) => {
                let sums = rolling_sum(returns.values(), self.params.momentum_window);
                let sums = returns.with_values(sums);
                forward_fill_reindex(&sums, prices.index(), 0.0)
            }
            // A single price has no return; its momentum is the fill value.
            Err(SignalError::InsufficientData { .. }) => vec![0.0; prices.len()],
            Err(e) => return Err(e),
        };

        let blended: Vec<f64> = trend
            .iter()
            .zip(momentum.iter())
            .map(|(t, m)| (1.0 - w) * t + w * m)
            .collect();

        Ok(TrendBlendOutput {
            trend: prices.with_values(trend),
            momentum: prices.with_values(momentum),
            blended: prices.with_values(blended),
        })
    }

    /// Normalised blend using the configured weight.
    pub fn calc_signal(&self, prices: &PriceSeries) -> Result<SignalSeries> {
        self.calc_signal_with_weight(prices, self.params.blend_weight)
    }

    /// Normalised blend with an explicit weight toward momentum.
    ///
    /// As with the oscillator, a single price normalises to `[0.0]`: an
    /// undefined standard deviation takes the same divisor of 1 as a zero one.
    pub fn calc_signal_with_weight(&self, prices: &PriceSeries, w: f64) -> Result<SignalSeries> {
        let output = self.calc_components(prices, w)?;
        let signal = normalize(output.blended.values());

        debug!(
            len = signal.len(),
            short = self.params.short_window,
            long = self.params.long_window,
            momentum_window = self.params.momentum_window,
            w,
            "trend/momentum blend computed"
        );

        Ok(prices.with_values(signal))
    }
}

/// Blend with the default windows (20 / 100 / 5) and weight `w` toward
/// momentum.
pub fn calc_trend_intermediate_strategy(prices: &PriceSeries, w: f64) -> Result<SignalSeries> {
    TrendMomentumBlender::default().calc_signal_with_weight(prices, w)
}
