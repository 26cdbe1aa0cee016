// =============================================================================
// Forward-fill Reindexing
// =============================================================================
//
// Moves a series onto a (usually longer) target index.  Each target label
// takes the value at the latest source label at or before it; target labels
// earlier than every source label take `fill`.
//
// Both indices are strictly increasing, so one merge-style pass suffices.

use crate::types::TimeSeries;

/// Reindex `source` onto `target_index` with forward-fill semantics.
pub fn forward_fill_reindex(source: &TimeSeries, target_index: &[i64], fill: f64) -> Vec<f64> {
    let src_index = source.index();
    let src_values = source.values();

    let mut result = Vec::with_capacity(target_index.len());
    let mut cursor = 0;
    let mut current = fill;

    for &label in target_index {
        while cursor < src_index.len() && src_index[cursor] <= label {
            current = src_values[cursor];
            cursor += 1;
        }
        result.push(current);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_gap_takes_fill() {
        let src = TimeSeries::new(vec![1, 2, 3], vec![0.5, 0.6, 0.7]).unwrap();
        let out = forward_fill_reindex(&src, &[0, 1, 2, 3], 0.0);
        assert_eq!(out, vec![0.0, 0.5, 0.6, 0.7]);
    }

    #[test]
    fn interior_gaps_carry_last_value() {
        let src = TimeSeries::new(vec![10, 30], vec![1.0, 3.0]).unwrap();
        let out = forward_fill_reindex(&src, &[5, 10, 20, 30, 40], -1.0);
        assert_eq!(out, vec![-1.0, 1.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn empty_source_is_all_fill() {
        let src = TimeSeries::from_values(vec![]);
        assert_eq!(forward_fill_reindex(&src, &[0, 1], 0.0), vec![0.0, 0.0]);
    }
}
