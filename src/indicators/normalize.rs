// =============================================================================
// Z-score Normalisation with a zero-variance guard
// =============================================================================
//
//   z_t = (x_t - mean(x)) / std(x)
//
// Mean and sample standard deviation (ddof = 1) are taken over the whole
// series, not per window, and only over finite values.  When the standard
// deviation is exactly zero, or undefined because fewer than two finite values
// exist, the divisor is 1: a constant signal normalises to all zeros rather
// than to NaN.  NaN inputs stay NaN.

use tracing::trace;

/// Statistics used by a normalisation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationStats {
    pub mean: f64,
    /// The divisor actually applied (1.0 when the guard fired).
    pub divisor: f64,
    /// True when the zero-variance guard replaced the standard deviation.
    pub guarded: bool,
}

/// Compute the mean and divisor for `values`.
pub fn normalization_stats(values: &[f64]) -> NormalizationStats {
    let (sum, count) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0_usize), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        return NormalizationStats {
            mean: f64::NAN,
            divisor: 1.0,
            guarded: true,
        };
    }

    let mean = sum / count as f64;
    let std = if count < 2 {
        0.0
    } else {
        let ss: f64 = values
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| (v - mean).powi(2))
            .sum();
        (ss / (count - 1) as f64).sqrt()
    };

    if std == 0.0 {
        NormalizationStats {
            mean,
            divisor: 1.0,
            guarded: true,
        }
    } else {
        NormalizationStats {
            mean,
            divisor: std,
            guarded: false,
        }
    }
}

/// Normalise `values` to zero mean and unit sample standard deviation.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let stats = normalization_stats(values);
    if stats.guarded {
        trace!(len = values.len(), mean = stats.mean, "zero-variance guard: divisor = 1");
    }
    values
        .iter()
        .map(|v| (v - stats.mean) / stats.divisor)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn mean_std(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let m = values.iter().sum::<f64>() / n;
        let v = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1.0);
        (m, v.sqrt())
    }

    #[test]
    fn normalized_has_zero_mean_unit_std() {
        let z = normalize(&[1.0, 5.0, 2.0, 8.0, 3.0]);
        let (m, s) = mean_std(&z);
        assert!(m.abs() < 1e-12);
        assert!((s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_series_becomes_zero() {
        let z = normalize(&[4.2; 6]);
        assert!(z.iter().all(|v| *v == 0.0));
        assert!(normalization_stats(&[4.2; 6]).guarded);
    }

    #[test]
    fn single_value_is_guarded() {
        let stats = normalization_stats(&[3.0]);
        assert!(stats.guarded);
        assert_eq!(normalize(&[3.0]), vec![0.0]);
    }

    #[test]
    fn nan_stays_nan_and_is_ignored_by_stats() {
        let z = normalize(&[1.0, f64::NAN, 3.0]);
        assert!(z[1].is_nan());
        assert!((z[0] + z[2]).abs() < 1e-12);
        assert!((z[2] - 2.0_f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input() {
        assert!(normalize(&[]).is_empty());
    }
}
