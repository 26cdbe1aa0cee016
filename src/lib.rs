// =============================================================================
// trend-signals — trading indicators derived from a price series
// =============================================================================
//
// Log returns, rolling volatility, a MACD-style momentum oscillator and a
// blended trend/momentum signal.  Every operation is a pure function of a
// caller-supplied series and returns a new series aligned to the input index.
// =============================================================================

pub mod config;
pub mod error;
pub mod indicators;
pub mod io;
pub mod signals;
pub mod types;

pub use config::{MacdParams, SignalConfig, TrendParams, VolatilityParams};
pub use error::{Result, SignalError};
pub use signals::{
    calc_daily_vol, calc_returns, calc_returns_strict, calc_trend_intermediate_strategy,
    LatestSignals, MacdOutput, MomentumOscillator, SignalReport, TrendBlendOutput,
    TrendMomentumBlender,
};
pub use types::{PriceSeries, ReturnSeries, SignalSeries, StrategyKind, TimeSeries};
