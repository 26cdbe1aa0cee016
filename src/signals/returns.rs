// =============================================================================
// Log Returns
// =============================================================================
//
//   r_t = ln(p_t / p_{t-1})        for t >= 1
//
// The first price has no predecessor, so the output is one element shorter
// than the input and carries the input's index from position 1 onward.
//
// A non-positive or non-finite price on either side of a ratio makes that
// return NaN.  In strict mode such prices are rejected up front instead.

use tracing::{trace, warn};

use crate::error::{Result, SignalError};
use crate::types::{PriceSeries, ReturnSeries, TimeSeries};

/// Minimum number of prices needed to produce a single return.
pub const MIN_PRICES: usize = 2;

/// Compute log returns, letting invalid prices surface as NaN.
pub fn calc_returns(prices: &PriceSeries) -> Result<ReturnSeries> {
    if prices.len() < MIN_PRICES {
        return Err(SignalError::InsufficientData {
            needed: MIN_PRICES,
            got: prices.len(),
        });
    }

    let values: Vec<f64> = prices.values().windows(2).map(|w| log_return(w[0], w[1])).collect();

    let nan_count = values.iter().filter(|v| v.is_nan()).count();
    if nan_count > 0 {
        warn!(
            nan_count,
            len = values.len(),
            "log returns contain NaN from non-positive or non-finite prices"
        );
    }
    trace!(len = values.len(), "log returns computed");

    Ok(TimeSeries::from_parts(prices.index()[1..].to_vec(), values))
}

/// Compute log returns, rejecting any non-positive or non-finite price.
pub fn calc_returns_strict(prices: &PriceSeries) -> Result<ReturnSeries> {
    validate_prices(prices)?;
    calc_returns(prices)
}

/// Reject the first price that cannot be log-transformed.
pub fn validate_prices(prices: &PriceSeries) -> Result<()> {
    match prices
        .values()
        .iter()
        .position(|p| !(p.is_finite() && *p > 0.0))
    {
        Some(position) => Err(SignalError::NonPositivePrice {
            position,
            value: prices.values()[position],
        }),
        None => Ok(()),
    }
}

fn log_return(prev: f64, curr: f64) -> f64 {
    if prev > 0.0 && curr > 0.0 && prev.is_finite() && curr.is_finite() {
        (curr / prev).ln()
    } else {
        f64::NAN
    }
}
