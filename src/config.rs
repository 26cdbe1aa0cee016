// =============================================================================
// Signal Configuration — window sizes, blend weight, validation mode
// =============================================================================
//
// Every tunable parameter of the signal components lives here as an explicit
// value, so several differently configured instances can coexist in one
// process.  All fields carry `#[serde(default)]` so that a partial JSON file
// loads with the remaining values at their defaults.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SignalError;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_macd_short() -> usize {
    12
}

fn default_macd_long() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_trend_short() -> usize {
    20
}

fn default_trend_long() -> usize {
    100
}

fn default_momentum_window() -> usize {
    5
}

fn default_blend_weight() -> f64 {
    0.5
}

fn default_vol_window() -> usize {
    20
}

// =============================================================================
// MacdParams
// =============================================================================

/// EMA spans for the momentum oscillator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdParams {
    /// Span of the fast EMA.
    #[serde(default = "default_macd_short")]
    pub short_window: usize,

    /// Span of the slow EMA.
    #[serde(default = "default_macd_long")]
    pub long_window: usize,

    /// Span of the signal-line EMA applied to the MACD line.
    #[serde(default = "default_macd_signal")]
    pub signal_window: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            short_window: default_macd_short(),
            long_window: default_macd_long(),
            signal_window: default_macd_signal(),
        }
    }
}

impl MacdParams {
    /// Every span must be positive.  Their relative order is not checked:
    /// `short_window >= long_window` is legal and flips the oscillator's sign.
    pub fn validate(&self) -> Result<(), SignalError> {
        require_positive("macd.short_window", self.short_window)?;
        require_positive("macd.long_window", self.long_window)?;
        require_positive("macd.signal_window", self.signal_window)
    }
}

// =============================================================================
// TrendParams
// =============================================================================

/// Windows and blend weight for the trend / momentum blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendParams {
    /// Short simple-moving-average window.
    #[serde(default = "default_trend_short")]
    pub short_window: usize,

    /// Long simple-moving-average window.
    #[serde(default = "default_trend_long")]
    pub long_window: usize,

    /// Rolling-sum window applied to log returns.
    #[serde(default = "default_momentum_window")]
    pub momentum_window: usize,

    /// Weight toward momentum; `1 - blend_weight` goes to trend.
    #[serde(default = "default_blend_weight")]
    pub blend_weight: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            short_window: default_trend_short(),
            long_window: default_trend_long(),
            momentum_window: default_momentum_window(),
            blend_weight: default_blend_weight(),
        }
    }
}

impl TrendParams {
    /// Windows must be positive and the weight within [0, 1].  The two
    /// moving-average windows may come in either order.
    pub fn validate(&self) -> Result<(), SignalError> {
        require_positive("trend.short_window", self.short_window)?;
        require_positive("trend.long_window", self.long_window)?;
        require_positive("trend.momentum_window", self.momentum_window)?;
        validate_blend_weight(self.blend_weight)
    }
}

// =============================================================================
// VolatilityParams
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityParams {
    /// Rolling window over log returns.
    #[serde(default = "default_vol_window")]
    pub window: usize,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self {
            window: default_vol_window(),
        }
    }
}

// =============================================================================
// SignalConfig
// =============================================================================

/// Top-level configuration for a full signal run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default)]
    pub macd: MacdParams,

    #[serde(default)]
    pub trend: TrendParams,

    #[serde(default)]
    pub volatility: VolatilityParams,

    /// Reject non-positive or non-finite prices instead of letting NaN
    /// propagate through the outputs.
    #[serde(default)]
    pub strict_prices: bool,
}

impl SignalConfig {
    /// Check every section; the first violation wins.
    pub fn validate(&self) -> Result<(), SignalError> {
        self.macd.validate()?;
        self.trend.validate()?;
        require_positive("volatility.window", self.volatility.window)
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read signal config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse signal config from {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid signal config in {}", path.display()))?;

        info!(
            path = %path.display(),
            macd = ?(config.macd.short_window, config.macd.long_window, config.macd.signal_window),
            blend_weight = config.trend.blend_weight,
            strict_prices = config.strict_prices,
            "signal config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise signal config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "signal config saved (atomic)");
        Ok(())
    }
}

pub(crate) fn require_positive(name: &'static str, value: usize) -> Result<(), SignalError> {
    if value == 0 {
        Err(SignalError::InvalidWindow { name, value })
    } else {
        Ok(())
    }
}

pub(crate) fn validate_blend_weight(w: f64) -> Result<(), SignalError> {
    if (0.0..=1.0).contains(&w) {
        Ok(())
    } else {
        Err(SignalError::InvalidBlendWeight(w))
    }
}
