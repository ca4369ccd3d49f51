use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::truncated::TruncatedPart;
use crate::{DecimalError, Result};

/// How a discarded fraction is turned into an adjustment of the retained value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Toward zero (truncation).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To nearest, ties away from zero.
    #[default]
    HalfUp,
    /// To nearest, ties toward zero.
    HalfDown,
    /// To nearest, ties to the even neighbor (banker's rounding).
    HalfEven,
    /// Rounding is not expected; any discarded fraction is an error.
    Unnecessary,
}

impl RoundingMode {
    /// All rounding modes in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Ceiling,
        Self::Floor,
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::Unnecessary,
    ];

    /// The engine-wide default.
    pub const DEFAULT: Self = Self::HalfUp;

    /// The default for right shifts, matching `>>` on signed integers.
    pub const SHIFT_DEFAULT: Self = Self::Floor;

    /// Position in [`RoundingMode::ALL`].
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the value to add to a truncated result.
    ///
    /// * `sign` - sign of the exact result, `-1` or `1`
    /// * `truncated_value` - the result truncated toward zero; only its lowest
    ///   bit is inspected (for `HalfEven`)
    /// * `part` - the discarded fraction
    ///
    /// The increment is in `{-1, 0, 1}` and always points away from zero, since
    /// truncation is toward zero.
    ///
    /// # Errors
    /// Returns `DecimalError::RoundingNecessary` for `Unnecessary` when `part`
    /// is not zero.
    #[inline]
    pub const fn calculate_rounding_increment(
        self,
        sign: i64,
        truncated_value: i64,
        part: TruncatedPart,
    ) -> Result<i64> {
        debug_assert!(sign == 1 || sign == -1);
        let round_away = match self {
            Self::Up => !part.is_zero(),
            Self::Down => false,
            Self::Ceiling => sign > 0 && !part.is_zero(),
            Self::Floor => sign < 0 && !part.is_zero(),
            Self::HalfUp => part.is_greater_than_or_equal_to_half(),
            Self::HalfDown => part.is_greater_than_half(),
            Self::HalfEven => {
                part.is_greater_than_half()
                    || (part.is_equal_to_half() && truncated_value & 1 != 0)
            }
            Self::Unnecessary => {
                if !part.is_zero() {
                    return Err(DecimalError::RoundingNecessary);
                }
                false
            }
        };
        Ok(if round_away { sign } else { 0 })
    }

    /// Same as [`calculate_rounding_increment`](Self::calculate_rounding_increment)
    /// but answers whether the magnitude of a truncated result grows by one.
    #[inline]
    pub const fn rounds_away(self, negative: bool, truncated_magnitude: u64, part: TruncatedPart) -> Result<bool> {
        let sign = if negative { -1 } else { 1 };
        match self.calculate_rounding_increment(sign, truncated_magnitude as i64, part) {
            Ok(increment) => Ok(increment != 0),
            Err(e) => Err(e),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Ceiling => "CEILING",
            Self::Floor => "FLOOR",
            Self::HalfUp => "HALF_UP",
            Self::HalfDown => "HALF_DOWN",
            Self::HalfEven => "HALF_EVEN",
            Self::Unnecessary => "UNNECESSARY",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(DecimalError::InvalidArgument("unknown rounding mode"))
    }
}
