// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent observations.  This is the recursive form
// without warm-up bias adjustment:
//
//   alpha  = 2 / (span + 1)
//   EMA_0  = x_0
//   EMA_t  = alpha * x_t + (1 - alpha) * EMA_{t-1}
//          = EMA_{t-1} + alpha * (x_t - EMA_{t-1})
//
// The second form is the one evaluated: a constant input then reproduces
// itself exactly instead of drifting by an ulp per step.
//
// The output has one value per input value; there is no warm-up gap.
// A NaN input poisons every later value, which is how invalid prices flow
// through to the signals built on top of the average.
// =============================================================================

/// Smoothing factor for a given span.
pub fn alpha_for_span(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Compute the EMA series for `values` with the given `span`.
///
/// # Edge cases
/// - empty input => empty vec
/// - `span == 1` => alpha = 1, the output equals the input
/// - `span == 0` is rejected by configuration validation before reaching here;
///   it would give alpha = 2 and an oscillating series.
pub fn calculate_ema(values: &[f64], span: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let alpha = alpha_for_span(span);
    let mut result = Vec::with_capacity(values.len());
    result.push(first);

    let mut prev = first;
    for &x in &values[1..] {
        let ema = prev + alpha * (x - prev);
        result.push(ema);
        prev = ema;
    }

    result
}
