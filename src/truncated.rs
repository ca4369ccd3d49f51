/// Classification of a discarded fraction relative to one half.
///
/// Rounding decisions only need to know where the discarded part falls, not its
/// exact magnitude. Every algorithm that truncates reduces its remainder to one
/// of these four buckets and hands it to
/// [`RoundingMode::calculate_rounding_increment`](crate::RoundingMode::calculate_rounding_increment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruncatedPart {
    /// Nothing was discarded.
    Zero,
    /// `0 < discarded < 0.5`
    LessThanHalfButNotZero,
    /// `discarded == 0.5`
    EqualToHalf,
    /// `0.5 < discarded < 1`
    GreaterThanHalf,
}

impl TruncatedPart {
    /// Classifies `remainder / divisor` where `remainder < divisor`.
    ///
    /// Compares `remainder` with `divisor - remainder` so that `2 * remainder`
    /// is never formed.
    #[inline]
    pub const fn from_remainder(remainder: u64, divisor: u64) -> Self {
        debug_assert!(remainder < divisor);
        if remainder == 0 {
            return Self::Zero;
        }
        let complement = divisor - remainder;
        if remainder < complement {
            Self::LessThanHalfButNotZero
        } else if remainder == complement {
            Self::EqualToHalf
        } else {
            Self::GreaterThanHalf
        }
    }

    /// Classifies a decimal fraction from its first discarded digit and whether
    /// all following digits are zero.
    #[inline]
    pub const fn from_digit(first_digit: u8, rest_is_zero: bool) -> Self {
        debug_assert!(first_digit <= 9);
        match first_digit {
            0 if rest_is_zero => Self::Zero,
            0..=4 => Self::LessThanHalfButNotZero,
            5 if rest_is_zero => Self::EqualToHalf,
            _ => Self::GreaterThanHalf,
        }
    }

    /// Classifies a binary fraction from its first discarded bit and whether all
    /// following bits are zero.
    #[inline]
    pub const fn from_top_bit(top_bit_set: bool, rest_is_zero: bool) -> Self {
        match (top_bit_set, rest_is_zero) {
            (false, true) => Self::Zero,
            (false, false) => Self::LessThanHalfButNotZero,
            (true, true) => Self::EqualToHalf,
            (true, false) => Self::GreaterThanHalf,
        }
    }

    /// Folds further discarded digits into this classification.
    ///
    /// Used when a fraction is discarded in stages: if a later stage dropped
    /// something non-zero, an exact `Zero` or `EqualToHalf` moves up a bucket.
    #[inline]
    pub const fn with_sticky(self, nonzero: bool) -> Self {
        if !nonzero {
            return self;
        }
        match self {
            Self::Zero => Self::LessThanHalfButNotZero,
            Self::EqualToHalf => Self::GreaterThanHalf,
            other => other,
        }
    }

    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }

    /// True for `EqualToHalf` and `GreaterThanHalf`.
    #[inline(always)]
    pub const fn is_greater_than_or_equal_to_half(self) -> bool {
        matches!(self, Self::EqualToHalf | Self::GreaterThanHalf)
    }

    #[inline(always)]
    pub const fn is_greater_than_half(self) -> bool {
        matches!(self, Self::GreaterThanHalf)
    }

    #[inline(always)]
    pub const fn is_equal_to_half(self) -> bool {
        matches!(self, Self::EqualToHalf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_remainder() {
        assert_eq!(TruncatedPart::from_remainder(0, 10), TruncatedPart::Zero);
        assert_eq!(
            TruncatedPart::from_remainder(4, 10),
            TruncatedPart::LessThanHalfButNotZero
        );
        assert_eq!(TruncatedPart::from_remainder(5, 10), TruncatedPart::EqualToHalf);
        assert_eq!(TruncatedPart::from_remainder(6, 10), TruncatedPart::GreaterThanHalf);
        // odd divisor: no exact half
        assert_eq!(
            TruncatedPart::from_remainder(1, 3),
            TruncatedPart::LessThanHalfButNotZero
        );
        assert_eq!(TruncatedPart::from_remainder(2, 3), TruncatedPart::GreaterThanHalf);
    }

    #[test]
    fn test_from_remainder_full_range() {
        // 2 * remainder would overflow here
        let divisor = u64::MAX - 1;
        assert_eq!(
            TruncatedPart::from_remainder(divisor / 2, divisor),
            TruncatedPart::EqualToHalf
        );
        assert_eq!(
            TruncatedPart::from_remainder(divisor / 2 + 1, divisor),
            TruncatedPart::GreaterThanHalf
        );
        assert_eq!(
            TruncatedPart::from_remainder(u64::MAX - 1, u64::MAX),
            TruncatedPart::GreaterThanHalf
        );
        assert_eq!(
            TruncatedPart::from_remainder(1 << 63, 10_000_000_000_000_000_000),
            TruncatedPart::GreaterThanHalf
        );
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(TruncatedPart::from_digit(0, true), TruncatedPart::Zero);
        assert_eq!(
            TruncatedPart::from_digit(0, false),
            TruncatedPart::LessThanHalfButNotZero
        );
        assert_eq!(
            TruncatedPart::from_digit(4, true),
            TruncatedPart::LessThanHalfButNotZero
        );
        assert_eq!(TruncatedPart::from_digit(5, true), TruncatedPart::EqualToHalf);
        assert_eq!(TruncatedPart::from_digit(5, false), TruncatedPart::GreaterThanHalf);
        assert_eq!(TruncatedPart::from_digit(9, true), TruncatedPart::GreaterThanHalf);
    }

    #[test]
    fn test_from_top_bit() {
        assert_eq!(TruncatedPart::from_top_bit(false, true), TruncatedPart::Zero);
        assert_eq!(TruncatedPart::from_top_bit(true, true), TruncatedPart::EqualToHalf);
        assert_eq!(
            TruncatedPart::from_top_bit(true, false),
            TruncatedPart::GreaterThanHalf
        );
    }

    #[test]
    fn test_with_sticky() {
        use TruncatedPart::*;
        assert_eq!(Zero.with_sticky(true), LessThanHalfButNotZero);
        assert_eq!(EqualToHalf.with_sticky(true), GreaterThanHalf);
        assert_eq!(EqualToHalf.with_sticky(false), EqualToHalf);
        assert_eq!(LessThanHalfButNotZero.with_sticky(true), LessThanHalfButNotZero);
    }

    #[test]
    fn test_predicates() {
        assert!(TruncatedPart::Zero.is_zero());
        assert!(TruncatedPart::EqualToHalf.is_greater_than_or_equal_to_half());
        assert!(!TruncatedPart::EqualToHalf.is_greater_than_half());
        assert!(TruncatedPart::GreaterThanHalf.is_greater_than_half());
        assert!(!TruncatedPart::LessThanHalfButNotZero.is_greater_than_or_equal_to_half());
    }
}
