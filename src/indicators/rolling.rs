// =============================================================================
// Rolling Window Statistics (minimum periods = 1)
// =============================================================================
//
// Sum, mean and sample standard deviation over the most recent `window`
// observations.  The window is allowed to be partially filled: the first
// outputs use whatever history exists (1, 2, ... observations) instead of
// waiting for a full window.
//
// Running sum / sum-of-squares are updated in O(1) as the window slides.
// They accumulate deviations from a fixed shift (the first finite input), so
// a constant series sums to exactly zero and its mean is exactly the input.
// Once per full window length the sums are rebuilt from the slice so that
// floating-point drift from repeated add/subtract stays bounded; the cost is
// O(window) every `window` steps, so the pass stays O(n).
//
// Any NaN inside the window makes that output NaN.  Statistics over invalid
// prices are undefined and must not be silently computed from the rest.
// =============================================================================

/// Sliding accumulator over a borrowed slice.
struct RollingWindow<'a> {
    values: &'a [f64],
    window: usize,
    shift: f64,
    start: usize,
    end: usize,
    sum: f64,
    sum_sq: f64,
    count: usize,
    invalid: usize,
    since_rebuild: usize,
}

impl<'a> RollingWindow<'a> {
    fn new(values: &'a [f64], window: usize) -> Self {
        let shift = values.iter().copied().find(|v| v.is_finite()).unwrap_or(0.0);
        Self {
            values,
            window,
            shift,
            start: 0,
            end: 0,
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
            invalid: 0,
            since_rebuild: 0,
        }
    }

    /// Slide the window forward by one observation.
    fn advance(&mut self) {
        self.add(self.values[self.end]);
        self.end += 1;

        if self.end - self.start > self.window {
            self.remove(self.values[self.start]);
            self.start += 1;
            self.since_rebuild += 1;
            if self.since_rebuild >= self.window {
                self.rebuild();
            }
        }
    }

    fn add(&mut self, x: f64) {
        if x.is_finite() {
            let d = x - self.shift;
            self.sum += d;
            self.sum_sq += d * d;
            self.count += 1;
        } else {
            self.invalid += 1;
        }
    }

    fn remove(&mut self, x: f64) {
        if x.is_finite() {
            let d = x - self.shift;
            self.sum -= d;
            self.sum_sq -= d * d;
            self.count -= 1;
        } else {
            self.invalid -= 1;
        }
    }

    fn rebuild(&mut self) {
        self.sum = 0.0;
        self.sum_sq = 0.0;
        self.count = 0;
        self.invalid = 0;
        for i in self.start..self.end {
            self.add(self.values[i]);
        }
        self.since_rebuild = 0;
    }

    fn is_defined(&self) -> bool {
        self.invalid == 0 && self.count > 0
    }

    fn sum(&self) -> f64 {
        if !self.is_defined() {
            return f64::NAN;
        }
        self.sum + self.shift * self.count as f64
    }

    fn mean(&self) -> f64 {
        if !self.is_defined() {
            return f64::NAN;
        }
        self.shift + self.sum / self.count as f64
    }

    /// Sample standard deviation (ddof = 1); NaN with a single observation.
    fn std(&self) -> f64 {
        if self.invalid > 0 || self.count < 2 {
            return f64::NAN;
        }
        let n = self.count as f64;
        let var = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
        // Cancellation can leave a tiny negative residue for flat windows.
        var.max(0.0).sqrt()
    }
}

fn rolling_apply<'a>(
    values: &'a [f64],
    window: usize,
    stat: impl Fn(&RollingWindow<'a>) -> f64,
) -> Vec<f64> {
    if window == 0 {
        return vec![f64::NAN; values.len()];
    }

    let mut acc = RollingWindow::new(values, window);
    let mut result = Vec::with_capacity(values.len());
    for _ in 0..values.len() {
        acc.advance();
        result.push(stat(&acc));
    }
    result
}

/// Rolling sum over up to `window` preceding observations.
pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, RollingWindow::sum)
}

/// Rolling mean over up to `window` preceding observations.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, RollingWindow::mean)
}

/// Rolling sample standard deviation over up to `window` observations.
///
/// The first output is always NaN (one observation has no sample variance).
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, RollingWindow::std)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Direct O(n * window) reference implementation.
    fn naive_std(values: &[f64], window: usize) -> Vec<f64> {
        (0..values.len())
            .map(|i| {
                let lo = (i + 1).saturating_sub(window);
                let w = &values[lo..=i];
                if w.len() < 2 {
                    return f64::NAN;
                }
                let m = w.iter().sum::<f64>() / w.len() as f64;
                let ss: f64 = w.iter().map(|x| (x - m).powi(2)).sum();
                (ss / (w.len() - 1) as f64).sqrt()
            })
            .collect()
    }

    #[test]
    fn sum_partial_then_full_window() {
        let s = rolling_sum(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(s, vec![1.0, 3.0, 6.0, 9.0, 12.0]);
    }

    #[test]
    fn mean_partial_then_full_window() {
        let m = rolling_mean(&[2.0, 4.0, 6.0, 8.0], 2);
        assert_eq!(m, vec![2.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn window_larger_than_input_is_expanding() {
        let m = rolling_mean(&[1.0, 2.0, 3.0], 100);
        assert!((m[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn std_first_is_nan() {
        let s = rolling_std(&[1.0, 2.0, 4.0], 3);
        assert!(s[0].is_nan());
        assert!((s[1] - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn std_matches_naive_reference() {
        let values: Vec<f64> = (0..200)
            .map(|i| ((i as f64) * 0.37).sin() * 0.02 + 0.001 * (i % 7) as f64)
            .collect();
        let fast = rolling_std(&values, 20);
        let slow = naive_std(&values, 20);
        assert!(fast[0].is_nan() && slow[0].is_nan());
        for (a, b) in fast.iter().zip(slow.iter()).skip(1) {
            assert!((a - b).abs() < 1e-10, "got {a}, expected {b}");
        }
    }

    #[test]
    fn mean_of_constant_is_exact() {
        // 4.2 is not representable; a plain running sum would drift.
        let m = rolling_mean(&[4.2; 150], 20);
        let l = rolling_mean(&[4.2; 150], 100);
        assert!(m.iter().zip(l.iter()).all(|(a, b)| a == b && *a == 4.2));
    }

    #[test]
    fn std_of_flat_window_is_zero() {
        let s = rolling_std(&[100.0; 10], 4);
        for &v in &s[1..] {
            assert!(v.abs() < 1e-9);
        }
    }

    #[test]
    fn nan_poisons_only_windows_containing_it() {
        let s = rolling_sum(&[1.0, f64::NAN, 2.0, 3.0, 4.0], 2);
        assert_eq!(s[0], 1.0);
        assert!(s[1].is_nan());
        assert!(s[2].is_nan());
        assert_eq!(s[3], 5.0);
        assert_eq!(s[4], 7.0);
    }

    #[test]
    fn zero_window_yields_nan() {
        assert!(rolling_mean(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn empty_input() {
        assert!(rolling_std(&[], 5).is_empty());
    }
}
