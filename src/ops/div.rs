use super::{mul_div, scale_down, scale_up};
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::scale::{MAX_SCALE, POW10_U64, ScaleMetrics};
use crate::unsigned::{apply_sign, magnitude};
use crate::{DecimalError, Result};

/// `a / b` with both operands at the engine's scale.
#[inline]
pub(crate) fn divide(metrics: &ScaleMetrics, policy: TruncationPolicy, a: i64, b: i64) -> Result<i64> {
    divide_by_unscaled(policy, a, b, metrics.scale())
}

/// `a / (b × 10^-b_scale)`, rounded to the engine's scale.
///
/// Computes `a × 10^b_scale / b`; the rescaled dividend may need up to
/// 128 bits, in which case the division runs in a scratch register.
pub(crate) fn divide_by_unscaled(
    policy: TruncationPolicy,
    a: i64,
    b: i64,
    b_scale: u8,
) -> Result<i64> {
    if b_scale > MAX_SCALE {
        return Err(DecimalError::InvalidArgument("scale must be in 0..=18"));
    }
    if b == 0 {
        return Err(DecimalError::DivisionByZero);
    }
    let negative = (a < 0) != (b < 0);
    let result = mul_div(
        policy.rounding_mode(),
        negative,
        magnitude(a),
        POW10_U64[b_scale as usize],
        magnitude(b),
    )?;
    policy.overflow_mode().resolve(result)
}

/// `a / l` for a plain integer `l`.
#[inline]
pub(crate) fn divide_by_long(policy: TruncationPolicy, a: i64, l: i64) -> Result<i64> {
    divide_by_unscaled(policy, a, l, 0)
}

/// `a / 10^n`; a negative `n` multiplies.
pub(crate) fn divide_by_power_of_10(policy: TruncationPolicy, a: i64, n: i32) -> Result<i64> {
    if n >= 0 {
        scale_down(policy.rounding_mode(), a, n as u32)
    } else {
        policy.overflow_mode().resolve(scale_up(a, n.unsigned_abs()))
    }
}

/// `1 / a`.
#[inline]
pub(crate) fn invert(metrics: &ScaleMetrics, policy: TruncationPolicy, a: i64) -> Result<i64> {
    divide(metrics, policy, metrics.scale_factor(), a)
}

/// `a / b` truncated to an integer, as an unscaled value at the engine's scale.
pub(crate) fn divide_to_integral_value(
    metrics: &ScaleMetrics,
    overflow: OverflowMode,
    a: i64,
    b: i64,
) -> Result<i64> {
    if b == 0 {
        return Err(DecimalError::DivisionByZero);
    }
    let (quotient, o1) = apply_sign((a < 0) != (b < 0), magnitude(a) / magnitude(b));
    let (value, o2) = quotient.overflowing_mul(metrics.scale_factor());
    overflow.resolve((value, o1 || o2))
}

/// `a / b` rounded to a plain integer.
#[inline]
pub(crate) fn divide_to_long_value(policy: TruncationPolicy, a: i64, b: i64) -> Result<i64> {
    // Scales cancel: the quotient of two unscaled values is already an integer.
    divide_by_long(policy, a, b)
}

/// `a - b × trunc(a / b)`; always exact, carries the sign of `a`.
#[inline]
pub(crate) fn remainder(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(DecimalError::DivisionByZero);
    }
    Ok(a.wrapping_rem(b))
}
