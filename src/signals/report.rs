// =============================================================================
// Signal Report — every component for one price series
// =============================================================================
//
// Runs returns, volatility, the momentum oscillator and the trend/momentum
// blend under one `SignalConfig` and bundles the aligned outputs.  This is
// the shape a charting or reporting layer consumes.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SignalConfig;
use crate::error::Result;
use crate::signals::macd::MomentumOscillator;
use crate::signals::returns::{calc_returns, validate_prices};
use crate::signals::trend_blend::TrendMomentumBlender;
use crate::signals::volatility::calc_daily_vol;
use crate::types::{PriceSeries, ReturnSeries, SignalSeries, StrategyKind};

/// Aligned outputs of every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    pub returns: ReturnSeries,
    pub volatility: SignalSeries,
    pub macd_signal: SignalSeries,
    pub trend_signal: SignalSeries,
}

/// Most recent value of each output series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSignals {
    pub label: i64,
    pub last_return: f64,
    pub volatility: f64,
    pub macd_signal: f64,
    pub trend_signal: f64,
}

impl SignalReport {
    /// Compute every series for `prices` under `config`.
    ///
    /// Needs at least two prices (returns are part of the report).
    pub fn compute(prices: &PriceSeries, config: &SignalConfig) -> Result<Self> {
        config.validate()?;
        if config.strict_prices {
            validate_prices(prices)?;
        }

        let returns = calc_returns(prices)?;
        let volatility = calc_daily_vol(prices, config.volatility.window)?;
        let oscillator = MomentumOscillator::from_params(config.macd.clone())?;
        let macd_signal = oscillator.calc_combined_signal(prices)?;
        let blender = TrendMomentumBlender::new(config.trend.clone())?;
        let trend_signal = blender.calc_signal(prices)?;

        info!(
            prices = prices.len(),
            returns = returns.len(),
            strict = config.strict_prices,
            "signal report computed"
        );

        Ok(Self {
            returns,
            volatility,
            macd_signal,
            trend_signal,
        })
    }

    /// The normalised signal for one strategy.
    pub fn strategy(&self, kind: StrategyKind) -> &SignalSeries {
        match kind {
            StrategyKind::Macd => &self.macd_signal,
            StrategyKind::TrendIntermediate => &self.trend_signal,
        }
    }

    /// Latest values, keyed by the last price label.
    pub fn latest(&self) -> Option<LatestSignals> {
        let (label, macd_signal) = self.macd_signal.last()?;
        Some(LatestSignals {
            label,
            last_return: self.returns.last()?.1,
            volatility: self.volatility.last()?.1,
            macd_signal,
            trend_signal: self.trend_signal.last()?.1,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignalError;
    use crate::types::TimeSeries;

    fn prices() -> PriceSeries {
        TimeSeries::from_values(vec![
            100.0, 102.0, 101.0, 105.0, 110.0, 108.0, 112.0, 115.0, 111.0, 117.0,
        ])
    }

    #[test]
    fn report_lengths_are_aligned() {
        let report = SignalReport::compute(&prices(), &SignalConfig::default()).unwrap();
        assert_eq!(report.returns.len(), 9);
        assert_eq!(report.volatility.len(), 9);
        assert_eq!(report.macd_signal.len(), 10);
        assert_eq!(report.trend_signal.len(), 10);
        assert_eq!(report.volatility.index(), report.returns.index());
    }

    #[test]
    fn latest_takes_last_values() {
        let report = SignalReport::compute(&prices(), &SignalConfig::default()).unwrap();
        let latest = report.latest().unwrap();
        assert_eq!(latest.label, 9);
        assert!((latest.last_return - (117.0_f64 / 111.0).ln()).abs() < 1e-12);
        assert_eq!(latest.trend_signal, report.trend_signal.values()[9]);
    }

    #[test]
    fn strategy_selects_series() {
        let report = SignalReport::compute(&prices(), &SignalConfig::default()).unwrap();
        assert_eq!(report.strategy(StrategyKind::Macd), &report.macd_signal);
        assert_eq!(report.strategy(StrategyKind::TrendIntermediate), &report.trend_signal);
    }

    #[test]
    fn strict_config_rejects_bad_price() {
        let bad = TimeSeries::from_values(vec![100.0, 0.0, 101.0]);
        let config = SignalConfig {
            strict_prices: true,
            ..SignalConfig::default()
        };
        assert_eq!(
            SignalReport::compute(&bad, &config),
            Err(SignalError::NonPositivePrice { position: 1, value: 0.0 })
        );
        // Lenient mode lets NaN through instead.
        let report = SignalReport::compute(&bad, &SignalConfig::default()).unwrap();
        assert!(report.returns.values()[0].is_nan());
    }

    #[test]
    fn serialises_to_json() {
        let report = SignalReport::compute(&prices(), &SignalConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["macd_signal"]["values"].as_array().unwrap().len(), 10);
        assert_eq!(json["returns"]["index"][0], 1);
    }
}
