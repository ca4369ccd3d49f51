use super::round_magnitude;
use crate::policy::OverflowMode;
use crate::rounding::RoundingMode;
use crate::scratch::WideQuotient;
use crate::unsigned::{WideUnsigned, magnitude};
use crate::Result;

/// `a × 2^n`; a negative `n` shifts right with `rounding`.
pub(crate) fn shift_left(
    overflow: OverflowMode,
    rounding: RoundingMode,
    a: i64,
    n: i32,
) -> Result<i64> {
    if n < 0 {
        return shift_right_by(rounding, a, n.unsigned_abs());
    }
    overflow.resolve(shl(a, n as u32))
}

/// `a / 2^n` rounded with `rounding`; a negative `n` shifts left.
pub(crate) fn shift_right(
    overflow: OverflowMode,
    rounding: RoundingMode,
    a: i64,
    n: i32,
) -> Result<i64> {
    if n < 0 {
        return overflow.resolve(shl(a, n.unsigned_abs()));
    }
    shift_right_by(rounding, a, n as u32)
}

/// The magnitude only shrinks, so this never overflows.
fn shift_right_by(rounding: RoundingMode, a: i64, n: u32) -> Result<i64> {
    let (quotient, part) = WideUnsigned::from_u64(magnitude(a)).shr_truncating(n);
    let truncated = WideQuotient {
        quotient: quotient.lo,
        overflow: false,
        part,
    };
    round_magnitude(rounding, a < 0, truncated).map(|(value, _)| value)
}

/// `a << n` and whether bits (or the sign) were lost.
#[inline]
fn shl(a: i64, n: u32) -> (i64, bool) {
    if a == 0 {
        return (0, false);
    }
    if n >= i64::BITS {
        return (0, true);
    }
    let shifted = a << n;
    (shifted, shifted >> n != a)
}
