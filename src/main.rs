// =============================================================================
// trend-signals — command-line harness
// =============================================================================
//
// Usage: trend-signals <prices.csv> [report.json]
//
// Loads a price CSV, computes every signal under the configuration found at
// $SIGNAL_CONFIG (default `signal_config.json`), and writes the report as
// JSON to the given path or stdout.
// =============================================================================

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trend_signals::io::{format_timestamp, load_prices_csv, write_report_json};
use trend_signals::{SignalConfig, SignalReport, StrategyKind};

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path =
        std::env::var("SIGNAL_CONFIG").unwrap_or_else(|_| "signal_config.json".to_string());
    let config = SignalConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, path = %config_path, "Failed to load config, using defaults");
        SignalConfig::default()
    });

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: trend-signals <prices.csv> [report.json]");
    };
    let output = args.next().map(PathBuf::from);

    // ── 2. Load prices ───────────────────────────────────────────────────
    let prices = load_prices_csv(&input)?;
    info!(path = %input.display(), rows = prices.len(), "Prices loaded");

    // ── 3. Compute & write ───────────────────────────────────────────────
    let report = SignalReport::compute(&prices, &config).context("signal computation failed")?;
    write_report_json(&report, output.as_deref())?;

    if let Some(latest) = report.latest() {
        info!(
            at = %format_timestamp(latest.label),
            last_return = latest.last_return,
            volatility = latest.volatility,
            "Latest values"
        );
        for kind in [StrategyKind::Macd, StrategyKind::TrendIntermediate] {
            if let Some((_, value)) = report.strategy(kind).last() {
                info!(strategy = %kind, value, "Latest strategy signal");
            }
        }
    }

    Ok(())
}
