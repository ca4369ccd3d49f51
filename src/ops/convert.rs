use super::{rescale, round_magnitude, scale_down, scale_up};
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::rounding::RoundingMode;
use crate::scale::{MAX_SCALE, ScaleMetrics};
use crate::scratch::WideQuotient;
use crate::truncated::TruncatedPart;
use crate::{DecimalError, Result};

// ============================================================================
// Integer and Rescaling Conversions
// ============================================================================

#[inline(always)]
pub(crate) fn from_long(metrics: &ScaleMetrics, overflow: OverflowMode, l: i64) -> Result<i64> {
    match overflow {
        OverflowMode::Checked => metrics.multiply_by_scale_factor_exact(l),
        OverflowMode::Unchecked => Ok(metrics.multiply_by_scale_factor(l)),
    }
}

#[inline]
pub(crate) fn to_long(metrics: &ScaleMetrics, rounding: RoundingMode, a: i64) -> Result<i64> {
    scale_down(rounding, a, metrics.scale() as u32)
}

/// Converts `value × 10^-scale` to the engine's scale.
pub(crate) fn from_unscaled(
    metrics: &ScaleMetrics,
    policy: TruncationPolicy,
    value: i64,
    scale: u8,
) -> Result<i64> {
    check_scale(scale)?;
    let result = rescale(policy.rounding_mode(), value, scale as u32, metrics.scale() as u32)?;
    policy.overflow_mode().resolve(result)
}

/// Converts `a` from the engine's scale to `scale`.
pub(crate) fn to_unscaled(
    metrics: &ScaleMetrics,
    policy: TruncationPolicy,
    a: i64,
    scale: u8,
) -> Result<i64> {
    check_scale(scale)?;
    let result = rescale(policy.rounding_mode(), a, metrics.scale() as u32, scale as u32)?;
    policy.overflow_mode().resolve(result)
}

#[inline]
fn check_scale(scale: u8) -> Result<()> {
    if scale > MAX_SCALE {
        return Err(DecimalError::InvalidArgument("scale must be in 0..=18"));
    }
    Ok(())
}

// ============================================================================
// Sign and Rounding
// ============================================================================

#[inline(always)]
pub(crate) fn negate(overflow: OverflowMode, a: i64) -> Result<i64> {
    overflow.resolve(a.overflowing_neg())
}

#[inline(always)]
pub(crate) fn abs(overflow: OverflowMode, a: i64) -> Result<i64> {
    overflow.resolve(a.overflowing_abs())
}

/// `(a + b) / 2`, rounded, without forming `a + b`.
pub(crate) fn avg(rounding: RoundingMode, a: i64, b: i64) -> Result<i64> {
    // floor((a + b) / 2), exact and in range
    let floor = (a >> 1) + (b >> 1) + (a & b & 1);
    if (a ^ b) & 1 == 0 {
        return Ok(floor);
    }
    // The exact mean is floor + 1/2.
    let negative = floor < 0;
    let truncated = if negative { floor + 1 } else { floor };
    let increment = rounding.calculate_rounding_increment(
        if negative { -1 } else { 1 },
        truncated,
        TruncatedPart::EqualToHalf,
    )?;
    Ok(truncated + increment)
}

/// Rounds `a` to `precision` fraction digits, keeping the engine's scale.
///
/// `precision` may be negative (round to tens, hundreds, ...) down to
/// `scale - 18`; at or above the scale `a` is returned unchanged.
pub(crate) fn round(
    metrics: &ScaleMetrics,
    policy: TruncationPolicy,
    a: i64,
    precision: i32,
) -> Result<i64> {
    let scale = metrics.scale() as i32;
    if precision >= scale {
        return Ok(a);
    }
    let digits = (scale - precision) as u32;
    if digits > MAX_SCALE as u32 {
        return Err(DecimalError::InvalidArgument("precision must be at least scale - 18"));
    }
    let rounded = scale_down(policy.rounding_mode(), a, digits)?;
    policy.overflow_mode().resolve(scale_up(rounded, digits))
}

/// Rounds a magnitude carrying a discarded fraction; range errors become
/// `InvalidArgument`, since the source was not a representable value.
pub(crate) fn round_into_range(
    rounding: RoundingMode,
    negative: bool,
    magnitude: u64,
    part: TruncatedPart,
) -> Result<i64> {
    let truncated = WideQuotient {
        quotient: magnitude,
        overflow: false,
        part,
    };
    match round_magnitude(rounding, negative, truncated)? {
        (value, false) => Ok(value),
        (_, true) => Err(DecimalError::InvalidArgument("value out of range")),
    }
}
