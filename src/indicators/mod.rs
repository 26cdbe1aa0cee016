// =============================================================================
// Numerical Primitives
// =============================================================================
//
// Pure, side-effect-free building blocks for the signal components: seeded
// exponential smoothing, O(n) rolling statistics with minimum periods of one,
// whole-series normalisation, forward-fill reindexing and a three-valued sign.

pub mod align;
pub mod ema;
pub mod normalize;
pub mod rolling;
pub mod sign;

pub use align::forward_fill_reindex;
pub use ema::calculate_ema;
pub use normalize::{normalization_stats, normalize, NormalizationStats};
pub use rolling::{rolling_mean, rolling_std, rolling_sum};
pub use sign::sign;
