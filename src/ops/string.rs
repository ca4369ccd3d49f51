use core::fmt;

use super::convert::round_into_range;
use crate::rounding::RoundingMode;
use crate::scale::{POW10_U64, ScaleMetrics};
use crate::truncated::TruncatedPart;
use crate::unsigned::magnitude;
use crate::{DecimalError, Result};

/// Integer and fraction digits together never exceed 19, plus a sign and a point.
const BUFFER_LEN: usize = 24;

// ============================================================================
// Parsing
// ============================================================================

/// Parses `[+-]digits[.digits]` into an unscaled value at the engine's scale.
///
/// At least one digit is required on either side of the point. Fraction
/// digits beyond the scale are rounded with `rounding`.
pub(crate) fn parse(metrics: &ScaleMetrics, rounding: RoundingMode, s: &str) -> Result<i64> {
    let bytes = s.as_bytes();
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let (integer_digits, fraction_digits) = match digits.iter().position(|&b| b == b'.') {
        Some(point) => (&digits[..point], &digits[point + 1..]),
        None => (digits, &digits[digits.len()..]),
    };
    if integer_digits.is_empty() && fraction_digits.is_empty() {
        return Err(DecimalError::InvalidArgument("no digits"));
    }

    let mut integer: u64 = 0;
    for &b in integer_digits {
        let d = u64::from(digit(b)?);
        integer = integer
            .checked_mul(10)
            .and_then(|x| x.checked_add(d))
            .ok_or(OUT_OF_RANGE)?;
    }

    // Exactly `scale` fraction digits are kept, padding with zeros.
    let scale = metrics.scale() as usize;
    let (kept, discarded) = fraction_digits.split_at(fraction_digits.len().min(scale));
    let mut fraction: u64 = 0;
    for &b in kept {
        fraction = fraction * 10 + u64::from(digit(b)?);
    }
    fraction *= POW10_U64[scale - kept.len()];

    let part = match discarded.split_first() {
        None => TruncatedPart::Zero,
        Some((&first, rest)) => {
            let mut rest_is_zero = true;
            for &b in rest {
                rest_is_zero &= digit(b)? == 0;
            }
            TruncatedPart::from_digit(digit(first)?, rest_is_zero)
        }
    };

    let magnitude = integer
        .checked_mul(metrics.scale_factor_u64())
        .and_then(|x| x.checked_add(fraction))
        .ok_or(OUT_OF_RANGE)?;
    round_into_range(rounding, negative, magnitude, part)
}

const OUT_OF_RANGE: DecimalError = DecimalError::InvalidArgument("value out of range");

#[inline(always)]
fn digit(b: u8) -> Result<u8> {
    let d = b.wrapping_sub(b'0');
    if d > 9 {
        return Err(DecimalError::InvalidArgument("invalid character in decimal literal"));
    }
    Ok(d)
}

// ============================================================================
// Formatting
// ============================================================================

/// An unscaled value rendered with exactly `scale` fraction digits.
///
/// Returned by [`DecimalArithmetic::format`](crate::DecimalArithmetic::format);
/// formatting happens in a stack buffer, without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalDisplay {
    value: i64,
    scale: u8,
}

impl DecimalDisplay {
    #[inline(always)]
    pub(crate) const fn new(value: i64, scale: u8) -> Self {
        Self { value, scale }
    }
}

impl fmt::Display for DecimalDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0u8; BUFFER_LEN];
        let mut pos = BUFFER_LEN;
        let mut m = magnitude(self.value);

        for _ in 0..self.scale {
            pos -= 1;
            buffer[pos] = b'0' + (m % 10) as u8;
            m /= 10;
        }
        if self.scale > 0 {
            pos -= 1;
            buffer[pos] = b'.';
        }
        loop {
            pos -= 1;
            buffer[pos] = b'0' + (m % 10) as u8;
            m /= 10;
            if m == 0 {
                break;
            }
        }
        if self.value < 0 {
            pos -= 1;
            buffer[pos] = b'-';
        }

        let s = core::str::from_utf8(&buffer[pos..]).map_err(|_| fmt::Error)?;
        f.pad(s)
    }
}
