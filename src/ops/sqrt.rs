use crate::rounding::RoundingMode;
use crate::scale::ScaleMetrics;
use crate::truncated::TruncatedPart;
use crate::unsigned::WideUnsigned;
use crate::{DecimalError, Result};

/// Square root of `a` at the engine's scale.
///
/// With `F = 10^scale`, the result is `sqrt(a × F)` on unscaled values. The
/// radicand needs up to 123 bits; the root always fits in 62.
pub(crate) fn sqrt(metrics: &ScaleMetrics, rounding: RoundingMode, a: i64) -> Result<i64> {
    if a < 0 {
        return Err(DecimalError::InvalidArgument("square root of a negative value"));
    }
    let radicand = WideUnsigned::product(a as u64, metrics.scale_factor_u64());
    let (root, remainder) = if radicand.fits_u64() {
        let root = radicand.lo.isqrt();
        (root, WideUnsigned::from_u64(radicand.lo - root * root))
    } else {
        radicand.sqrt_rem()
    };

    // The exact root lies in [r, r + 1); it is past r + 1/2 iff
    // N - r^2 > r + 1/4, i.e. remainder > r for integers. Never a tie.
    let part = if remainder.is_zero() {
        TruncatedPart::Zero
    } else if remainder > WideUnsigned::from_u64(root) {
        TruncatedPart::GreaterThanHalf
    } else {
        TruncatedPart::LessThanHalfButNotZero
    };
    let increment = rounding.calculate_rounding_increment(1, root as i64, part)?;
    Ok(root as i64 + increment)
}
