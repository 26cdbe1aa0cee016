// =============================================================================
// Shared types used across the signal library
// =============================================================================
//
// Every series handled by the library is a `TimeSeries`: an index of strictly
// increasing integer labels (epoch milliseconds or plain positions) paired
// one-to-one with `f64` values.  Series are immutable once built; operations
// read them by reference and return fresh series.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// An ordered numeric series keyed by a strictly increasing index.
///
/// Deserialisation goes through [`TimeSeries::new`], so a decoded series
/// obeys the same length and ordering checks as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSeries")]
pub struct TimeSeries {
    index: Vec<i64>,
    values: Vec<f64>,
}

/// Unchecked wire form of a [`TimeSeries`].
#[derive(Deserialize)]
struct RawTimeSeries {
    index: Vec<i64>,
    values: Vec<f64>,
}

impl TryFrom<RawTimeSeries> for TimeSeries {
    type Error = SignalError;

    fn try_from(raw: RawTimeSeries) -> Result<Self> {
        Self::new(raw.index, raw.values)
    }
}

/// Prices supplied by the caller.
pub type PriceSeries = TimeSeries;
/// Log returns; one element shorter than the prices they came from.
pub type ReturnSeries = TimeSeries;
/// Any derived output aligned to its input's index.
pub type SignalSeries = TimeSeries;

impl TimeSeries {
    /// Build a series from an explicit index.
    ///
    /// Fails when the lengths differ or the index is not strictly increasing.
    pub fn new(index: Vec<i64>, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(SignalError::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }
        if let Some(pos) = index.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SignalError::NonIncreasingIndex { position: pos + 1 });
        }
        Ok(Self { index, values })
    }

    /// Build a series indexed by position (`0..n`).
    pub fn from_values(values: Vec<f64>) -> Self {
        let index = (0..values.len() as i64).collect();
        Self { index, values }
    }

    /// A new series on the same index as `self` carrying `values`.
    ///
    /// Callers inside the crate guarantee the lengths agree.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(self.index.len(), values.len());
        Self {
            index: self.index.clone(),
            values,
        }
    }

    /// A series built from already-validated parts.
    pub(crate) fn from_parts(index: Vec<i64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self { index, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index(&self) -> &[i64] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate `(label, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }

    /// The most recent `(label, value)` pair.
    pub fn last(&self) -> Option<(i64, f64)> {
        Some((*self.index.last()?, *self.values.last()?))
    }

    /// Mean over the finite values, `None` if there are none.
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = finite_sum(&self.values);
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Sample standard deviation (ddof = 1) over the finite values.
    ///
    /// `None` with fewer than two finite values.
    pub fn std(&self) -> Option<f64> {
        let (sum, count) = finite_sum(&self.values);
        if count < 2 {
            return None;
        }
        let mean = sum / count as f64;
        let ss: f64 = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| (v - mean).powi(2))
            .sum();
        Some((ss / (count - 1) as f64).sqrt())
    }
}

fn finite_sum(values: &[f64]) -> (f64, usize) {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0), |(s, c), v| (s + v, c + 1))
}

/// The two strategy signals the library produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    Macd,
    TrendIntermediate,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Macd => write!(f, "MACD"),
            Self::TrendIntermediate => write!(f, "Trend Intermediate"),
        }
    }
}
