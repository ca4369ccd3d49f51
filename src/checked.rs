//! Overflow resolution and the checked-only algorithm variants.
//!
//! Algorithms report `(wrapped, overflowed)` pairs; the engine's
//! [`OverflowMode`] decides what the caller sees.

use crate::policy::OverflowMode;
use crate::scale::SCALE_METRICS;
use crate::{DecimalError, Result};

impl OverflowMode {
    /// Returns the wrapped value, or `Err(Overflow)` in checked mode when the
    /// exact result left the `i64` range.
    #[inline(always)]
    pub(crate) const fn resolve(self, result: (i64, bool)) -> Result<i64> {
        match (self, result) {
            (Self::Checked, (_, true)) => Err(DecimalError::Overflow),
            (_, (value, _)) => Ok(value),
        }
    }
}

/// `a + b * 10^k` (or `a - b * 10^k`) for `k` in `1..=18`, failing only when
/// the exact result does not fit.
///
/// When `b * 10^k` itself is out of range the multiplier is applied as two
/// halves, so a result back inside the range is still produced.
pub(crate) fn add_scaled(a: i64, b: i64, k: u32, subtract: bool) -> Result<i64> {
    debug_assert!((1..=18).contains(&k));
    let gap = &SCALE_METRICS[k as usize];
    let step = |x: i64, y: i64| {
        if subtract {
            x.checked_sub(y)
        } else {
            x.checked_add(y)
        }
    };
    if gap.is_valid_integer_value(b) {
        return step(a, gap.multiply_by_scale_factor(b)).ok_or(DecimalError::Overflow);
    }
    // |b * 10^k| >= 2^63; if even half of it does not fit the sum cannot.
    let half = b.checked_mul(gap.scale_factor() / 2).ok_or(DecimalError::Overflow)?;
    step(a, half)
        .and_then(|x| step(x, half))
        .ok_or(DecimalError::Overflow)
}

/// Smallest exponent for which `|base|^n` never fits when `|base| >= 2`.
///
/// At 63 the result can still be exact: `(-2)^63` at scale 0 is `i64::MIN`.
pub(crate) const POW_OVERFLOW_EXPONENT: u32 = 64;
