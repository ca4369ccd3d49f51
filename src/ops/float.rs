//! Exact conversions between unscaled values and IEEE 754 binary floats.
//!
//! Neither direction multiplies floats by powers of ten. A float is decomposed
//! into `mantissa × 2^exponent` and scaled with integer arithmetic; the other
//! way, the unscaled value is divided by the scale factor to just over 62
//! significant bits before a single rounding to the float's precision.

use super::convert::round_into_range;
use crate::rounding::RoundingMode;
use crate::scale::ScaleMetrics;
use crate::scratch::divide_wide;
use crate::truncated::TruncatedPart;
use crate::unsigned::{WideUnsigned, bit_length, magnitude};
use crate::{DecimalError, Result};

const F64_MANTISSA_BITS: u32 = 52;
const F64_EXPONENT_BIAS: i32 = 1023;
const F64_SIGNIFICANT_BITS: u32 = F64_MANTISSA_BITS + 1;
const F32_SIGNIFICANT_BITS: u32 = 24;

// ============================================================================
// Float to Decimal
// ============================================================================

pub(crate) fn from_f64(metrics: &ScaleMetrics, rounding: RoundingMode, value: f64) -> Result<i64> {
    if !value.is_finite() {
        return Err(DecimalError::InvalidArgument("value must be finite"));
    }
    if value == 0.0 {
        return Ok(0);
    }

    let bits = value.to_bits();
    let negative = bits >> 63 != 0;
    let biased = ((bits >> F64_MANTISSA_BITS) & 0x7FF) as i32;
    let fraction = bits & ((1u64 << F64_MANTISSA_BITS) - 1);
    let (mantissa, exponent) = if biased == 0 {
        // subnormal
        (fraction, 1 - F64_EXPONENT_BIAS - F64_MANTISSA_BITS as i32)
    } else {
        (
            fraction | (1u64 << F64_MANTISSA_BITS),
            biased - F64_EXPONENT_BIAS - F64_MANTISSA_BITS as i32,
        )
    };

    // unscaled = mantissa × 10^scale × 2^exponent, at most 113 bits before shifting
    let scaled = WideUnsigned::product(mantissa, metrics.scale_factor_u64());
    let (magnitude, part) = if exponent >= 0 {
        let shift = exponent as u32;
        if scaled.bit_length() + shift > u64::BITS {
            return Err(DecimalError::InvalidArgument("value out of range"));
        }
        (scaled.shl(shift).lo, TruncatedPart::Zero)
    } else {
        let (shifted, part) = scaled.shr_truncating(exponent.unsigned_abs());
        if !shifted.fits_u64() {
            return Err(DecimalError::InvalidArgument("value out of range"));
        }
        (shifted.lo, part)
    };
    round_into_range(rounding, negative, magnitude, part)
}

#[inline]
pub(crate) fn from_f32(metrics: &ScaleMetrics, rounding: RoundingMode, value: f32) -> Result<i64> {
    // Every f32 is exactly representable as an f64.
    from_f64(metrics, rounding, value as f64)
}

// ============================================================================
// Decimal to Float
// ============================================================================

pub(crate) fn to_f64(metrics: &ScaleMetrics, rounding: RoundingMode, a: i64) -> Result<f64> {
    let Some((negative, mantissa, exponent)) =
        to_binary(metrics, rounding, a, F64_SIGNIFICANT_BITS)?
    else {
        return Ok(0.0);
    };
    let value = mantissa as f64 * pow2_f64(exponent);
    Ok(if negative { -value } else { value })
}

pub(crate) fn to_f32(metrics: &ScaleMetrics, rounding: RoundingMode, a: i64) -> Result<f32> {
    let Some((negative, mantissa, exponent)) =
        to_binary(metrics, rounding, a, F32_SIGNIFICANT_BITS)?
    else {
        return Ok(0.0);
    };
    // 2^exponent is within f32's normal range for every unscaled value
    let value = mantissa as f32 * pow2_f64(exponent) as f32;
    Ok(if negative { -value } else { value })
}

/// Rounds `a / 10^scale` to `mantissa × 2^exponent` with `precision`
/// significant bits; `None` for zero.
fn to_binary(
    metrics: &ScaleMetrics,
    rounding: RoundingMode,
    a: i64,
    precision: u32,
) -> Result<Option<(bool, u64, i32)>> {
    if a == 0 {
        return Ok(None);
    }
    let negative = a < 0;
    let m = magnitude(a);
    let divisor = metrics.scale_factor_u64();

    // Shift so the quotient lands in [2^62, 2^64): m × 2^k / 10^scale.
    let k = 63 + bit_length(divisor) - bit_length(m);
    let quotient = divide_wide(WideUnsigned::from_u64(m).shl(k), divisor);
    debug_assert!(!quotient.overflow && quotient.quotient >= 1 << 62);

    let excess = bit_length(quotient.quotient) - precision;
    let (kept, part) = WideUnsigned::from_u64(quotient.quotient).shr_truncating(excess);
    let part = part.with_sticky(!quotient.part.is_zero());
    let mut mantissa = kept.lo;
    if rounding.rounds_away(negative, mantissa, part)? {
        // Reaching 2^precision is still exact in the float.
        mantissa += 1;
    }
    Ok(Some((negative, mantissa, excess as i32 - k as i32)))
}

/// `2^exponent` for exponents inside the normal f64 range.
#[inline]
fn pow2_f64(exponent: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exponent));
    f64::from_bits(((exponent + F64_EXPONENT_BIAS) as u64) << F64_MANTISSA_BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scale: u8) -> &'static ScaleMetrics {
        ScaleMetrics::for_scale(scale).unwrap()
    }

    #[test]
    fn test_from_f64_exact_values() {
        let m = metrics(4);
        assert_eq!(from_f64(m, RoundingMode::Unnecessary, 1.5), Ok(15_000));
        assert_eq!(from_f64(m, RoundingMode::Unnecessary, -0.125), Ok(-1_250));
        assert_eq!(from_f64(m, RoundingMode::Unnecessary, 0.0), Ok(0));
        assert_eq!(from_f64(m, RoundingMode::Unnecessary, -0.0), Ok(0));
        assert_eq!(from_f64(metrics(0), RoundingMode::Unnecessary, 4096.0), Ok(4_096));
    }

    #[test]
    fn test_from_f64_rounds_exact_binary_value() {
        let m = metrics(2);
        // 0.1 is slightly above 1/10 in binary
        assert_eq!(from_f64(m, RoundingMode::HalfUp, 0.1), Ok(10));
        assert_eq!(from_f64(m, RoundingMode::Up, 0.1), Ok(11));
        assert_eq!(from_f64(m, RoundingMode::Down, 0.1), Ok(10));
        // 2.675 is slightly below 2.675 in binary
        assert_eq!(from_f64(m, RoundingMode::HalfUp, 2.675), Ok(267));
        // exact tie
        assert_eq!(from_f64(m, RoundingMode::HalfEven, 0.125), Ok(12));
        assert_eq!(from_f64(m, RoundingMode::HalfUp, -0.125), Ok(-13));
        assert_eq!(
            from_f64(m, RoundingMode::Unnecessary, 0.1),
            Err(DecimalError::RoundingNecessary)
        );
    }

    #[test]
    fn test_from_f64_tiny_and_subnormal() {
        let m = metrics(18);
        assert_eq!(from_f64(m, RoundingMode::HalfUp, 1e-300), Ok(0));
        assert_eq!(from_f64(m, RoundingMode::Up, 1e-300), Ok(1));
        assert_eq!(from_f64(m, RoundingMode::Floor, -f64::from_bits(1)), Ok(-1));
        assert_eq!(from_f64(m, RoundingMode::Ceiling, -f64::from_bits(1)), Ok(0));
    }

    #[test]
    fn test_from_f64_out_of_range() {
        let m = metrics(0);
        assert_eq!(from_f64(m, RoundingMode::Unnecessary, -9_223_372_036_854_775_808.0), Ok(i64::MIN));
        assert!(matches!(
            from_f64(m, RoundingMode::HalfUp, 9_223_372_036_854_775_808.0),
            Err(DecimalError::InvalidArgument(_))
        ));
        assert!(matches!(
            from_f64(m, RoundingMode::HalfUp, 1e300),
            Err(DecimalError::InvalidArgument(_))
        ));
        assert!(matches!(
            from_f64(metrics(18), RoundingMode::HalfUp, 10.0),
            Err(DecimalError::InvalidArgument(_))
        ));
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                from_f64(m, RoundingMode::HalfUp, bad),
                Err(DecimalError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_from_f32() {
        let m = metrics(3);
        assert_eq!(from_f32(m, RoundingMode::Unnecessary, 0.75f32), Ok(750));
        // 0.1f32 = 0.100000001490116...
        assert_eq!(from_f32(m, RoundingMode::Up, 0.1f32), Ok(101));
        assert_eq!(from_f32(m, RoundingMode::HalfUp, 0.1f32), Ok(100));
    }

    #[test]
    fn test_to_f64() {
        let m = metrics(2);
        assert_eq!(to_f64(m, RoundingMode::HalfEven, 150), Ok(1.5));
        assert_eq!(to_f64(m, RoundingMode::HalfEven, -1), Ok(-0.01));
        assert_eq!(to_f64(m, RoundingMode::HalfEven, 0), Ok(0.0));
        assert_eq!(to_f64(metrics(0), RoundingMode::HalfEven, i64::MIN), Ok(-9.223372036854775808e18));
        assert_eq!(to_f64(metrics(0), RoundingMode::HalfEven, i64::MAX), Ok(9.223372036854775807e18));
        assert_eq!(
            to_f64(metrics(18), RoundingMode::HalfEven, 1),
            Ok(1e-18)
        );
        assert_eq!(
            to_f64(metrics(18), RoundingMode::HalfEven, 123_456_789_012_345_678),
            Ok(0.123456789012345678)
        );
    }

    #[test]
    fn test_to_f64_directed_rounding() {
        let m = metrics(1);
        // 0.1 is not representable: DOWN and UP bracket the nearest double
        let down = to_f64(m, RoundingMode::Down, 1).unwrap();
        let up = to_f64(m, RoundingMode::Up, 1).unwrap();
        assert!(down < up);
        assert!(down == 0.1 || up == 0.1);
        assert_eq!(f64::from_bits(down.to_bits() + 1), up);
        assert_eq!(
            to_f64(m, RoundingMode::Unnecessary, 1),
            Err(DecimalError::RoundingNecessary)
        );
        assert_eq!(to_f64(m, RoundingMode::Unnecessary, 5), Ok(0.5));
    }

    #[test]
    fn test_to_f32() {
        let m = metrics(3);
        assert_eq!(to_f32(m, RoundingMode::HalfEven, 750), Ok(0.75f32));
        assert_eq!(to_f32(m, RoundingMode::HalfEven, 100), Ok(0.1f32));
        assert_eq!(to_f32(metrics(0), RoundingMode::HalfEven, i64::MAX), Ok(9.223372e18f32));
        assert_eq!(to_f32(metrics(18), RoundingMode::HalfEven, -1), Ok(-1e-18f32));
    }

    #[test]
    fn test_round_trip_through_f64() {
        let m = metrics(6);
        for a in [1i64, -1, 123_456, 999_999_999, -31_415_926, 123_456_789_012_345] {
            let f = to_f64(m, RoundingMode::HalfEven, a).unwrap();
            assert_eq!(from_f64(m, RoundingMode::HalfEven, f), Ok(a), "{a}");
        }
    }
}
