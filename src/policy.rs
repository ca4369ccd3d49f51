use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rounding::RoundingMode;
use crate::{DecimalError, Result};

// ============================================================================
// Overflow Mode
// ============================================================================

/// Whether arithmetic wraps or reports overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OverflowMode {
    /// Two's complement wrap-around, like `i64::wrapping_*`.
    #[default]
    Unchecked,
    /// Overflow is reported as `DecimalError::Overflow`.
    Checked,
}

impl OverflowMode {
    pub const ALL: [Self; 2] = [Self::Unchecked, Self::Checked];

    #[inline(always)]
    pub const fn is_checked(self) -> bool {
        matches!(self, Self::Checked)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Unchecked => "UNCHECKED",
            Self::Checked => "CHECKED",
        }
    }
}

impl fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverflowMode {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or(DecimalError::InvalidArgument("unknown overflow mode"))
    }
}

// ============================================================================
// Truncation Policy
// ============================================================================

/// A rounding mode paired with an overflow mode.
///
/// All 16 combinations exist as constants; [`TruncationPolicy::ALL`] lists
/// them in [`index`](Self::index) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruncationPolicy {
    rounding_mode: RoundingMode,
    overflow_mode: OverflowMode,
}

impl TruncationPolicy {
    /// Number of distinct policies.
    pub const COUNT: usize = RoundingMode::ALL.len() * OverflowMode::ALL.len();

    /// `HalfUp` with `Unchecked` overflow.
    pub const DEFAULT: Self = Self::new(RoundingMode::DEFAULT, OverflowMode::Unchecked);

    pub const UP: Self = Self::new(RoundingMode::Up, OverflowMode::Unchecked);
    pub const DOWN: Self = Self::new(RoundingMode::Down, OverflowMode::Unchecked);
    pub const CEILING: Self = Self::new(RoundingMode::Ceiling, OverflowMode::Unchecked);
    pub const FLOOR: Self = Self::new(RoundingMode::Floor, OverflowMode::Unchecked);
    pub const HALF_UP: Self = Self::new(RoundingMode::HalfUp, OverflowMode::Unchecked);
    pub const HALF_DOWN: Self = Self::new(RoundingMode::HalfDown, OverflowMode::Unchecked);
    pub const HALF_EVEN: Self = Self::new(RoundingMode::HalfEven, OverflowMode::Unchecked);
    pub const UNNECESSARY: Self = Self::new(RoundingMode::Unnecessary, OverflowMode::Unchecked);

    pub const CHECKED_UP: Self = Self::new(RoundingMode::Up, OverflowMode::Checked);
    pub const CHECKED_DOWN: Self = Self::new(RoundingMode::Down, OverflowMode::Checked);
    pub const CHECKED_CEILING: Self = Self::new(RoundingMode::Ceiling, OverflowMode::Checked);
    pub const CHECKED_FLOOR: Self = Self::new(RoundingMode::Floor, OverflowMode::Checked);
    pub const CHECKED_HALF_UP: Self = Self::new(RoundingMode::HalfUp, OverflowMode::Checked);
    pub const CHECKED_HALF_DOWN: Self = Self::new(RoundingMode::HalfDown, OverflowMode::Checked);
    pub const CHECKED_HALF_EVEN: Self = Self::new(RoundingMode::HalfEven, OverflowMode::Checked);
    pub const CHECKED_UNNECESSARY: Self =
        Self::new(RoundingMode::Unnecessary, OverflowMode::Checked);

    /// Every policy, ordered by [`index`](Self::index).
    pub const ALL: [Self; Self::COUNT] = {
        let mut all = [Self::DEFAULT; Self::COUNT];
        let mut i = 0;
        while i < Self::COUNT {
            all[i] = Self::from_index(i);
            i += 1;
        }
        all
    };

    #[inline(always)]
    pub const fn new(rounding_mode: RoundingMode, overflow_mode: OverflowMode) -> Self {
        Self {
            rounding_mode,
            overflow_mode,
        }
    }

    #[inline(always)]
    pub const fn rounding_mode(self) -> RoundingMode {
        self.rounding_mode
    }

    #[inline(always)]
    pub const fn overflow_mode(self) -> OverflowMode {
        self.overflow_mode
    }

    /// Dense index in `0..16`: unchecked policies first, then checked.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.overflow_mode.index() * RoundingMode::ALL.len() + self.rounding_mode.index()
    }

    const fn from_index(index: usize) -> Self {
        let modes = RoundingMode::ALL.len();
        Self::new(
            RoundingMode::ALL[index % modes],
            OverflowMode::ALL[index / modes],
        )
    }

    #[inline(always)]
    pub const fn with_rounding_mode(self, rounding_mode: RoundingMode) -> Self {
        Self::new(rounding_mode, self.overflow_mode)
    }

    #[inline(always)]
    pub const fn with_overflow_mode(self, overflow_mode: OverflowMode) -> Self {
        Self::new(self.rounding_mode, overflow_mode)
    }
}

impl fmt::Display for TruncationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.rounding_mode, self.overflow_mode)
    }
}
