// =============================================================================
// Signals Module
// =============================================================================
//
// The four signal components.  Each takes a price series as its only data
// input and returns an aligned series; none calls another except through
// the shared log-return helper.
// - Log returns
// - Rolling daily volatility
// - MACD-style momentum oscillator
// - Trend / momentum blend

pub mod macd;
pub mod report;
pub mod returns;
pub mod trend_blend;
pub mod volatility;

pub use macd::{MacdOutput, MomentumOscillator};
pub use report::{LatestSignals, SignalReport};
pub use returns::{calc_returns, calc_returns_strict, validate_prices};
pub use trend_blend::{calc_trend_intermediate_strategy, TrendBlendOutput, TrendMomentumBlender};
pub use volatility::{calc_daily_vol, DEFAULT_VOL_WINDOW};
