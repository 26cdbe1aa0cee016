// =============================================================================
// Daily Volatility — rolling standard deviation of log returns
// =============================================================================
//
// vol_t = sample std of the last `window` log returns ending at t
//
// The window fills up gradually (minimum periods = 1).  The first output sits
// on a one-return window and is therefore NaN; that is kept as is rather than
// replaced by a default.  Output is aligned to the return index, one element
// shorter than the prices.

use tracing::debug;

use crate::config::require_positive;
use crate::error::Result;
use crate::indicators::rolling_std;
use crate::signals::returns::calc_returns;
use crate::types::{PriceSeries, SignalSeries};

/// Default rolling window, in observations.
pub const DEFAULT_VOL_WINDOW: usize = 20;

/// Rolling volatility of log returns over `window` observations.
pub fn calc_daily_vol(prices: &PriceSeries, window: usize) -> Result<SignalSeries> {
    require_positive("volatility.window", window)?;

    let returns = calc_returns(prices)?;
    let vol = rolling_std(returns.values(), window);

    debug!(len = vol.len(), window, "daily volatility computed");
    Ok(returns.with_values(vol))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignalError;
    use crate::types::TimeSeries;

    #[test]
    fn vol_aligned_to_returns() {
        let prices = TimeSeries::new(vec![1, 2, 3, 4], vec![10.0, 11.0, 10.5, 12.0]).unwrap();
        let vol = calc_daily_vol(&prices, 20).unwrap();
        assert_eq!(vol.index(), &[2, 3, 4]);
        assert!(vol.values()[0].is_nan());
        assert!(vol.values()[1].is_finite());
    }

    #[test]
    fn vol_of_constant_growth_is_zero() {
        // Each step multiplies by 1.01, so every return is identical.
        let prices: Vec<f64> = (0..30).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let vol = calc_daily_vol(&TimeSeries::from_values(prices), 5).unwrap();
        for &v in &vol.values()[1..] {
            assert!(v.abs() < 1e-9, "expected ~0, got {v}");
        }
    }

    #[test]
    fn vol_rejects_zero_window() {
        let prices = TimeSeries::from_values(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            calc_daily_vol(&prices, 0),
            Err(SignalError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn vol_needs_two_prices() {
        let prices = TimeSeries::from_values(vec![1.0]);
        assert!(matches!(
            calc_daily_vol(&prices, DEFAULT_VOL_WINDOW),
            Err(SignalError::InsufficientData { .. })
        ));
    }
}
