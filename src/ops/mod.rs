// ============================================================================
// Operation Algorithms
// Arithmetic on unscaled i64 values at a fixed scale
// ============================================================================
//
// Every algorithm works on magnitudes and signs, produces a truncated result
// plus a `TruncatedPart`, and lets the rounding mode decide the increment.
// Results that may leave the i64 range come back as `(wrapped, overflowed)`
// pairs and are resolved by the overflow mode (see `checked`).

pub(crate) mod add;
pub(crate) mod convert;
pub(crate) mod div;
pub(crate) mod float;
pub(crate) mod mul;
pub(crate) mod pow;
pub(crate) mod shift;
pub(crate) mod sqrt;
pub(crate) mod string;

use crate::Result;
use crate::rounding::RoundingMode;
use crate::scale::{POW10_I64, POW10_U64};
use crate::scratch::{WideQuotient, divide_wide};
use crate::truncated::TruncatedPart;
use crate::unsigned::{WideUnsigned, apply_sign, magnitude};

/// A two's complement result and whether the exact result left the i64 range.
pub(crate) type Overflowing = (i64, bool);

/// Rounds a truncated magnitude and applies the sign.
#[inline]
pub(crate) fn round_magnitude(
    rounding: RoundingMode,
    negative: bool,
    truncated: WideQuotient,
) -> Result<Overflowing> {
    let mut magnitude = truncated.quotient;
    let mut overflow = truncated.overflow;
    if rounding.rounds_away(negative, magnitude, truncated.part)? {
        let (incremented, carry) = magnitude.overflowing_add(1);
        magnitude = incremented;
        overflow |= carry;
    }
    let (value, out_of_range) = apply_sign(negative, magnitude);
    Ok((value, overflow || out_of_range))
}

/// Computes `±(x * y / z)`, correctly rounded. `z` must not be zero.
///
/// Stays in 64 bits when `x * y` fits, otherwise divides the two-limb product
/// in a scratch register.
#[inline]
pub(crate) fn mul_div(
    rounding: RoundingMode,
    negative: bool,
    x: u64,
    y: u64,
    z: u64,
) -> Result<Overflowing> {
    debug_assert!(z != 0);
    let truncated = match x.checked_mul(y) {
        Some(product) => WideQuotient {
            quotient: product / z,
            overflow: false,
            part: TruncatedPart::from_remainder(product % z, z),
        },
        None => divide_wide(WideUnsigned::product(x, y), z),
    };
    round_magnitude(rounding, negative, truncated)
}

/// Returns `x / 10^n`, rounded. Never overflows.
pub(crate) fn scale_down(rounding: RoundingMode, x: i64, n: u32) -> Result<i64> {
    if n == 0 {
        return Ok(x);
    }
    let m = magnitude(x);
    let truncated = match POW10_U64.get(n as usize) {
        Some(&divisor) => WideQuotient {
            quotient: m / divisor,
            overflow: false,
            part: TruncatedPart::from_remainder(m % divisor, divisor),
        },
        // |x| < 10^20 / 2 <= 10^n / 2
        None => WideQuotient {
            quotient: 0,
            overflow: false,
            part: TruncatedPart::Zero.with_sticky(m != 0),
        },
    };
    round_magnitude(rounding, x < 0, truncated).map(|(value, _)| value)
}

/// Returns `x * 10^n`.
pub(crate) fn scale_up(x: i64, n: u32) -> Overflowing {
    let mut remaining = n;
    let mut value = x;
    let mut overflow = false;
    while remaining > 0 {
        let step = remaining.min(18);
        let (product, o) = value.overflowing_mul(POW10_I64[step as usize]);
        value = product;
        overflow |= o;
        remaining -= step;
    }
    (value, overflow)
}

/// Converts `x` from scale `from` to scale `to`.
pub(crate) fn rescale(rounding: RoundingMode, x: i64, from: u32, to: u32) -> Result<Overflowing> {
    if from >= to {
        scale_down(rounding, x, from - to).map(|value| (value, false))
    } else {
        Ok(scale_up(x, to - from))
    }
}
