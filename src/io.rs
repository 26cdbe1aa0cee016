// =============================================================================
// Price CSV loading and report output
// =============================================================================
//
// Input CSV must carry a header with a time column (`timestamp`, `date` or
// `time`) and a price column (`close` or `price`).  Time values may be RFC
// 3339 timestamps, `YYYY-MM-DD` dates or integer epoch milliseconds; they
// become the series index in epoch milliseconds.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::debug;

use crate::signals::SignalReport;
use crate::types::{PriceSeries, TimeSeries};

const TIME_COLUMNS: [&str; 3] = ["timestamp", "date", "time"];
const PRICE_COLUMNS: [&str; 2] = ["close", "price"];

/// Load a price series from a CSV file.
pub fn load_prices_csv(path: impl AsRef<Path>) -> Result<PriceSeries> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open price CSV {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV header from {}", path.display()))?
        .clone();
    let time_col = find_column(&headers, &TIME_COLUMNS)?;
    let price_col = find_column(&headers, &PRICE_COLUMNS)?;

    let mut index = Vec::new();
    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV row {}", row + 1))?;
        let raw_time = record.get(time_col).unwrap_or_default();
        let raw_price = record.get(price_col).unwrap_or_default();

        index.push(parse_timestamp(raw_time).with_context(|| format!("row {}", row + 1))?);
        values.push(
            raw_price
                .trim()
                .parse::<f64>()
                .with_context(|| format!("row {}: invalid price {raw_price:?}", row + 1))?,
        );
    }

    debug!(path = %path.display(), rows = values.len(), "price CSV loaded");
    TimeSeries::new(index, values)
        .with_context(|| format!("invalid price series in {}", path.display()))
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        .ok_or_else(|| anyhow!("CSV header has none of the columns {names:?}"))
}

/// Parse a time label into epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<i64>() {
        return Ok(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).timestamp_millis());
        }
    }
    bail!("unrecognised timestamp {raw:?}")
}

/// Render an epoch-millisecond label as RFC 3339, for log output.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

/// Write `report` as pretty JSON to `path`, or stdout when `path` is `None`.
pub fn write_report_json(report: &SignalReport, path: Option<&Path>) -> Result<()> {
    let content =
        serde_json::to_string_pretty(report).context("failed to serialise signal report")?;
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write report to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}").context("failed to write report to stdout")
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignalConfig;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn parse_timestamp_formats() {
        assert_eq!(parse_timestamp("1700000000000").unwrap(), 1_700_000_000_000);
        assert_eq!(parse_timestamp("1970-01-02").unwrap(), 86_400_000);
        assert_eq!(parse_timestamp("1970-01-01T00:00:01Z").unwrap(), 1_000);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn format_timestamp_rfc3339() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn load_dates_and_closes() {
        let (_dir, path) = write_csv("date,open,close\n2024-01-01,1,100.5\n2024-01-02,1,101.25\n");
        let prices = load_prices_csv(&path).unwrap();
        assert_eq!(prices.values(), &[100.5, 101.25]);
        assert_eq!(prices.index()[1] - prices.index()[0], 86_400_000);
    }

    #[test]
    fn load_rejects_missing_price_column() {
        let (_dir, path) = write_csv("date,volume\n2024-01-01,5\n");
        assert!(load_prices_csv(&path).is_err());
    }

    #[test]
    fn load_rejects_unsorted_rows() {
        let (_dir, path) = write_csv("timestamp,close\n2000,1.0\n1000,2.0\n");
        assert!(load_prices_csv(&path).is_err());
    }

    #[test]
    fn report_written_to_file() {
        let (dir, path) = write_csv("timestamp,price\n1,10\n2,11\n3,12\n4,11.5\n");
        let prices = load_prices_csv(&path).unwrap();
        let report = SignalReport::compute(&prices, &SignalConfig::default()).unwrap();

        let out = dir.path().join("report.json");
        write_report_json(&report, Some(&out)).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["trend_signal"]["index"].as_array().unwrap().len(), 4);
    }
}
