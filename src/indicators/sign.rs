// =============================================================================
// Three-valued sign
// =============================================================================
//
// `f64::signum` maps +0.0 to 1.0, which would turn "moving averages equal"
// into a long signal.  Trend direction needs {-1, 0, +1}.

/// -1.0, 0.0 or +1.0 according to the sign of `x`; NaN for NaN.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        0.0
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_values() {
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.001), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert!(sign(f64::NAN).is_nan());
    }
}
