use core::cmp::Ordering;

use super::Overflowing;
use crate::checked;
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::rounding::RoundingMode;
use crate::scale::{MAX_SCALE, SCALE_METRICS, ScaleMetrics};
use crate::truncated::TruncatedPart;
use crate::unsigned::magnitude;
use crate::{DecimalError, Result};

#[inline(always)]
pub(crate) fn add(overflow: OverflowMode, a: i64, b: i64) -> Result<i64> {
    overflow.resolve(a.overflowing_add(b))
}

#[inline(always)]
pub(crate) fn subtract(overflow: OverflowMode, a: i64, b: i64) -> Result<i64> {
    overflow.resolve(a.overflowing_sub(b))
}

/// `a ± b × 10^-b_scale`, with `a` at the engine's scale.
pub(crate) fn add_unscaled(
    metrics: &ScaleMetrics,
    policy: TruncationPolicy,
    a: i64,
    b: i64,
    b_scale: u8,
    subtract: bool,
) -> Result<i64> {
    if b_scale > MAX_SCALE {
        return Err(DecimalError::InvalidArgument("scale must be in 0..=18"));
    }
    let scale = metrics.scale();
    let overflow = policy.overflow_mode();
    match b_scale.cmp(&scale) {
        Ordering::Equal if subtract => self::subtract(overflow, a, b),
        Ordering::Equal => add(overflow, a, b),
        Ordering::Less => {
            let k = (scale - b_scale) as u32;
            if overflow.is_checked() {
                checked::add_scaled(a, b, k, subtract)
            } else {
                let scaled = SCALE_METRICS[k as usize].multiply_by_scale_factor(b);
                Ok(if subtract {
                    a.wrapping_sub(scaled)
                } else {
                    a.wrapping_add(scaled)
                })
            }
        }
        Ordering::Greater => {
            let k = (b_scale - scale) as u32;
            let result = add_downscaled(policy.rounding_mode(), a, b, k, subtract)?;
            overflow.resolve(result)
        }
    }
}

/// `a ± b / 10^k`, rounding the sum rather than the rescaled operand.
fn add_downscaled(
    rounding: RoundingMode,
    a: i64,
    b: i64,
    k: u32,
    subtract: bool,
) -> Result<Overflowing> {
    let gap = &SCALE_METRICS[k as usize];
    let factor = gap.scale_factor();
    let (mut quotient, mut remainder) =
        (gap.divide_by_scale_factor(b), gap.modulo_by_scale_factor(b));
    if subtract {
        // |quotient| <= i64::MAX / 10, so neither negation overflows
        quotient = -quotient;
        remainder = -remainder;
    }

    let (sum, overflowed) = a.overflowing_add(quotient);
    // An overflowed sum has the sign of `a`, not of the wrapped value.
    let sign = if overflowed { a.signum() } else { sum.signum() };

    // Move the integer part toward zero until the fraction shares its sign.
    // Never taken after an overflow: then `a`, `quotient` and `remainder` agree.
    let (truncated, fraction) = if sign > 0 && remainder < 0 {
        (sum - 1, remainder + factor)
    } else if sign < 0 && remainder > 0 {
        (sum + 1, remainder - factor)
    } else {
        (sum, remainder)
    };

    let negative = sign < 0 || (sign == 0 && fraction < 0);
    let part = TruncatedPart::from_remainder(magnitude(fraction), factor as u64);
    let increment =
        rounding.calculate_rounding_increment(if negative { -1 } else { 1 }, truncated, part)?;
    let (value, carried) = truncated.overflowing_add(increment);
    Ok((value, overflowed || carried))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scale: u8) -> &'static ScaleMetrics {
        ScaleMetrics::for_scale(scale).unwrap()
    }

    #[test]
    fn test_add_and_subtract() {
        assert_eq!(add(OverflowMode::Unchecked, 150, 275), Ok(425));
        assert_eq!(subtract(OverflowMode::Checked, 150, 275), Ok(-125));
        assert_eq!(add(OverflowMode::Unchecked, i64::MAX, 1), Ok(i64::MIN));
        assert_eq!(add(OverflowMode::Checked, i64::MAX, 1), Err(DecimalError::Overflow));
        assert_eq!(subtract(OverflowMode::Checked, i64::MIN, 1), Err(DecimalError::Overflow));
    }

    #[test]
    fn test_add_lower_scale() {
        // 1.25 + 3.1 = 4.35
        let r = add_unscaled(metrics(2), TruncationPolicy::HALF_UP, 125, 31, 1, false);
        assert_eq!(r, Ok(435));
        // 1.25 - 3 = -1.75
        let r = add_unscaled(metrics(2), TruncationPolicy::HALF_UP, 125, 3, 0, true);
        assert_eq!(r, Ok(-175));
    }

    #[test]
    fn test_add_lower_scale_at_integer_bounds() {
        let m = metrics(2);
        let max = m.max_integer_value();
        let p = TruncationPolicy::CHECKED_HALF_UP;
        assert_eq!(add_unscaled(m, p, 0, max, 0, false), Ok(max * 100));
        assert_eq!(add_unscaled(m, p, 0, max + 1, 0, false), Err(DecimalError::Overflow));
        // (max + 1) * 100 alone is out of range, the sum is not
        assert_eq!(
            add_unscaled(m, p, -100, max + 1, 0, false),
            Ok(9_223_372_036_854_775_800)
        );
        assert_eq!(
            add_unscaled(m, TruncationPolicy::HALF_UP, 0, max + 1, 0, false),
            Ok((max + 1).wrapping_mul(100))
        );
    }

    #[test]
    fn test_add_higher_scale_rounds_the_sum() {
        let m = metrics(2);
        // 1.00 + 0.005 = 1.005 -> 1.01 (HALF_UP), 1.00 (HALF_EVEN)
        assert_eq!(add_unscaled(m, TruncationPolicy::HALF_UP, 100, 5, 3, false), Ok(101));
        assert_eq!(add_unscaled(m, TruncationPolicy::HALF_EVEN, 100, 5, 3, false), Ok(100));
        // 1.00 - 0.004 = 0.996 -> 1.00
        assert_eq!(add_unscaled(m, TruncationPolicy::HALF_UP, 100, 4, 3, true), Ok(100));
        // 1.00 - 0.004 = 0.996 -> 0.99 (DOWN)
        assert_eq!(add_unscaled(m, TruncationPolicy::DOWN, 100, 4, 3, true), Ok(99));
        // -0.01 + 0.004 = -0.006 -> -0.01 (HALF_UP), -0.00 (DOWN)
        assert_eq!(add_unscaled(m, TruncationPolicy::HALF_UP, -1, 4, 3, false), Ok(-1));
        assert_eq!(add_unscaled(m, TruncationPolicy::DOWN, -1, 4, 3, false), Ok(0));
        // 0.00 - 0.005 = -0.005 -> -0.01 (HALF_UP), 0.00 (CEILING)
        assert_eq!(add_unscaled(m, TruncationPolicy::HALF_UP, 0, 5, 3, true), Ok(-1));
        assert_eq!(add_unscaled(m, TruncationPolicy::CEILING, 0, 5, 3, true), Ok(0));
    }

    #[test]
    fn test_add_unnecessary() {
        let m = metrics(1);
        assert_eq!(add_unscaled(m, TruncationPolicy::UNNECESSARY, 10, 500, 3, false), Ok(15));
        assert_eq!(
            add_unscaled(m, TruncationPolicy::UNNECESSARY, 10, 501, 3, false),
            Err(DecimalError::RoundingNecessary)
        );
    }

    #[test]
    fn test_add_cross_scale_overflow() {
        let m = metrics(18);
        // MAX - 10 at scale 18: 10 * 10^18 alone does not fit
        let expected = (i64::MAX as i128 - 10 * 10i128.pow(18)) as i64;
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_HALF_UP, i64::MAX, 10, 0, true),
            Ok(expected)
        );
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_HALF_UP, 0, 10, 0, false),
            Err(DecimalError::Overflow)
        );
        // unchecked wraps to the exact result mod 2^64
        let wrapped = (10i128 * 10i128.pow(18)) as u64 as i64;
        assert_eq!(add_unscaled(m, TruncationPolicy::HALF_UP, 0, 10, 0, false), Ok(wrapped));
    }

    #[test]
    fn test_add_downscaled_overflow() {
        let m = metrics(0);
        // MAX + 0.7 rounds up past the range
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_HALF_UP, i64::MAX, 7, 1, false),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_DOWN, i64::MAX, 7, 1, false),
            Ok(i64::MAX)
        );
        assert_eq!(
            add_unscaled(m, TruncationPolicy::HALF_UP, i64::MAX, 7, 1, false),
            Ok(i64::MIN)
        );
    }

    #[test]
    fn test_add_downscaled_at_the_edges() {
        let m = metrics(0);
        // MAX - 0.6 -> MAX - 1 (DOWN)
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_DOWN, i64::MAX, -6, 1, false),
            Ok(i64::MAX - 1)
        );
        // MAX - (-1.4) = MAX + 1.4: the quotient alone overflows, DOWN stays out of range
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_DOWN, i64::MAX, -14, 1, true),
            Err(DecimalError::Overflow)
        );
        // MIN - 0.7 -> MIN (DOWN), out of range (HALF_UP)
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_DOWN, i64::MIN, -7, 1, false),
            Ok(i64::MIN)
        );
        assert_eq!(
            add_unscaled(m, TruncationPolicy::CHECKED_HALF_UP, i64::MIN, -7, 1, false),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_rejects_scale_out_of_range() {
        assert!(matches!(
            add_unscaled(metrics(2), TruncationPolicy::DEFAULT, 1, 1, 19, false),
            Err(DecimalError::InvalidArgument(_))
        ));
    }
}
