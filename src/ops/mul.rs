use super::{mul_div, scale_down, scale_up};
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::scale::{MAX_SCALE, POW10_U64, ScaleMetrics};
use crate::unsigned::magnitude;
use crate::{DecimalError, Result};

/// `a * b` with both operands at the engine's scale.
#[inline]
pub(crate) fn multiply(metrics: &ScaleMetrics, policy: TruncationPolicy, a: i64, b: i64) -> Result<i64> {
    multiply_by_unscaled(policy, a, b, metrics.scale())
}

/// `a * l` for a plain integer `l`; exact up to overflow.
#[inline(always)]
pub(crate) fn multiply_by_long(overflow: OverflowMode, a: i64, l: i64) -> Result<i64> {
    overflow.resolve(a.overflowing_mul(l))
}

/// `a * b × 10^-b_scale`, rounded to the engine's scale.
pub(crate) fn multiply_by_unscaled(
    policy: TruncationPolicy,
    a: i64,
    b: i64,
    b_scale: u8,
) -> Result<i64> {
    if b_scale > MAX_SCALE {
        return Err(DecimalError::InvalidArgument("scale must be in 0..=18"));
    }
    if b_scale == 0 {
        return multiply_by_long(policy.overflow_mode(), a, b);
    }
    if let Some(product) = a.checked_mul(b) {
        return scale_down(policy.rounding_mode(), product, b_scale as u32);
    }
    let negative = (a < 0) != (b < 0);
    let result = mul_div(
        policy.rounding_mode(),
        negative,
        magnitude(a),
        magnitude(b),
        POW10_U64[b_scale as usize],
    )?;
    policy.overflow_mode().resolve(result)
}

/// `a * 10^n`; a negative `n` divides with rounding.
pub(crate) fn multiply_by_power_of_10(policy: TruncationPolicy, a: i64, n: i32) -> Result<i64> {
    if n >= 0 {
        policy.overflow_mode().resolve(scale_up(a, n as u32))
    } else {
        scale_down(policy.rounding_mode(), a, n.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scale: u8) -> &'static ScaleMetrics {
        ScaleMetrics::for_scale(scale).unwrap()
    }

    #[test]
    fn test_multiply_scale_2() {
        // 1.23 * 4.56 = 5.6088
        assert_eq!(multiply(metrics(2), TruncationPolicy::HALF_UP, 123, 456), Ok(561));
        assert_eq!(multiply(metrics(2), TruncationPolicy::DOWN, 123, 456), Ok(560));
        assert_eq!(multiply(metrics(2), TruncationPolicy::HALF_UP, -123, 456), Ok(-561));
        assert_eq!(multiply(metrics(2), TruncationPolicy::FLOOR, 123, -456), Ok(-561));
        assert_eq!(multiply(metrics(2), TruncationPolicy::CEILING, 123, -456), Ok(-560));
    }

    #[test]
    fn test_multiply_scale_4() {
        // 1.2300 * 4.5600 = 5.6088
        assert_eq!(
            multiply(metrics(4), TruncationPolicy::UNNECESSARY, 12_300, 45_600),
            Ok(56_088)
        );
    }

    #[test]
    fn test_multiply_scale_0() {
        assert_eq!(multiply(metrics(0), TruncationPolicy::DEFAULT, 7, -6), Ok(-42));
        assert_eq!(
            multiply(metrics(0), TruncationPolicy::CHECKED_HALF_UP, i64::MAX, 2),
            Err(DecimalError::Overflow)
        );
        assert_eq!(multiply(metrics(0), TruncationPolicy::DEFAULT, i64::MAX, 2), Ok(-2));
    }

    #[test]
    fn test_multiply_wide_product() {
        // 9.223372036854775807 * 0.5 at scale 18
        let m = metrics(18);
        let half = 500_000_000_000_000_000;
        assert_eq!(
            multiply(m, TruncationPolicy::HALF_UP, i64::MAX, half),
            Ok(4_611_686_018_427_387_904)
        );
        assert_eq!(
            multiply(m, TruncationPolicy::DOWN, i64::MAX, half),
            Ok(4_611_686_018_427_387_903)
        );
        assert_eq!(
            multiply(m, TruncationPolicy::HALF_EVEN, i64::MIN, half),
            Ok(i64::MIN / 2)
        );
    }

    #[test]
    fn test_multiply_overflow_in_wide_path() {
        let m = metrics(9);
        // 10^7 * 10^7 at scale 9 = 10^14 (unscaled 10^23)
        let big = 10_000_000_000_000_000;
        assert_eq!(
            multiply(m, TruncationPolicy::CHECKED_HALF_UP, big, big),
            Err(DecimalError::Overflow)
        );
        let exact = (big as i128 * big as i128 / 1_000_000_000) as u64 as i64;
        assert_eq!(multiply(m, TruncationPolicy::DOWN, big, big), Ok(exact));
    }

    #[test]
    fn test_multiply_min_by_one() {
        let m = metrics(18);
        let one = 1_000_000_000_000_000_000;
        assert_eq!(
            multiply(m, TruncationPolicy::CHECKED_UNNECESSARY, i64::MIN, one),
            Ok(i64::MIN)
        );
        assert_eq!(
            multiply(m, TruncationPolicy::CHECKED_UNNECESSARY, i64::MIN, -one),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_multiply_by_long_and_unscaled() {
        assert_eq!(multiply_by_long(OverflowMode::Checked, 125, 3), Ok(375));
        assert_eq!(
            multiply_by_long(OverflowMode::Checked, i64::MIN, -1),
            Err(DecimalError::Overflow)
        );
        // 1.25 * 0.333 at scale 2 = 0.41625
        assert_eq!(multiply_by_unscaled(TruncationPolicy::HALF_UP, 125, 333, 3), Ok(42));
        assert!(matches!(
            multiply_by_unscaled(TruncationPolicy::HALF_UP, 125, 333, 19),
            Err(DecimalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_multiply_by_power_of_10() {
        assert_eq!(multiply_by_power_of_10(TruncationPolicy::DEFAULT, 125, 2), Ok(12_500));
        assert_eq!(multiply_by_power_of_10(TruncationPolicy::DEFAULT, 125, -1), Ok(13));
        assert_eq!(multiply_by_power_of_10(TruncationPolicy::DOWN, 125, -1), Ok(12));
        assert_eq!(multiply_by_power_of_10(TruncationPolicy::DEFAULT, 125, -30), Ok(0));
        assert_eq!(
            multiply_by_power_of_10(TruncationPolicy::CHECKED_DOWN, 1, 19),
            Err(DecimalError::Overflow)
        );
        assert_eq!(multiply_by_power_of_10(TruncationPolicy::CHECKED_DOWN, 0, 100), Ok(0));
    }
}
