//! Unsigned 64-bit helpers and a two-limb unsigned value.
//!
//! The engine never widens to a 128-bit integer type. Products and shifted
//! dividends that need more than 64 bits are held as a `(hi, lo)` pair of
//! `u64` limbs, built from 32-bit half products.

use core::cmp::Ordering;

use crate::truncated::TruncatedPart;

const LOW_MASK: u64 = 0xFFFF_FFFF;

/// Magnitude of a signed value; `i64::MIN` maps to `2^63`.
#[inline(always)]
pub(crate) const fn magnitude(x: i64) -> u64 {
    x.unsigned_abs()
}

/// Applies a sign to a magnitude.
///
/// Returns the two's complement result and whether the signed value is out of
/// range (`magnitude > i64::MAX`, or `> 2^63` for negative values).
#[inline(always)]
pub(crate) const fn apply_sign(negative: bool, magnitude: u64) -> (i64, bool) {
    if negative {
        ((magnitude as i64).wrapping_neg(), magnitude > 1 << 63)
    } else {
        (magnitude as i64, magnitude > i64::MAX as u64)
    }
}

/// Bit length of `x`: `0` for zero, otherwise one past the index of the top set bit.
#[inline(always)]
pub(crate) const fn bit_length(x: u64) -> u32 {
    u64::BITS - x.leading_zeros()
}

/// An unsigned value of up to 128 bits held in two 64-bit limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct WideUnsigned {
    pub hi: u64,
    pub lo: u64,
}

impl WideUnsigned {
    pub const ZERO: Self = Self { hi: 0, lo: 0 };

    #[inline(always)]
    pub const fn new(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    #[inline(always)]
    pub const fn from_u64(lo: u64) -> Self {
        Self { hi: 0, lo }
    }

    /// Full 128-bit product of `a * b`.
    ///
    /// Schoolbook multiplication on 32-bit halves:
    ///
    /// ```text
    ///          a1    a0
    ///     ×    b1    b0
    ///     -------------
    ///        a1b0  a0b0
    ///  a1b1  a0b1
    /// ```
    #[inline]
    pub const fn product(a: u64, b: u64) -> Self {
        let (a1, a0) = (a >> 32, a & LOW_MASK);
        let (b1, b0) = (b >> 32, b & LOW_MASK);

        let a0b0 = a0 * b0;
        let a1b0 = a1 * b0;
        let a0b1 = a0 * b1;
        let a1b1 = a1 * b1;

        // Middle column: at most 3 * (2^32 - 1), no overflow.
        let mid = (a0b0 >> 32) + (a1b0 & LOW_MASK) + (a0b1 & LOW_MASK);
        let lo = (mid << 32) | (a0b0 & LOW_MASK);
        let hi = a1b1 + (a1b0 >> 32) + (a0b1 >> 32) + (mid >> 32);
        Self::new(hi, lo)
    }

    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// True if the value fits in a single `u64`.
    #[inline(always)]
    pub const fn fits_u64(self) -> bool {
        self.hi == 0
    }

    #[inline]
    pub const fn bit_length(self) -> u32 {
        if self.hi != 0 {
            64 + bit_length(self.hi)
        } else {
            bit_length(self.lo)
        }
    }

    /// `self << n` for `n < 128`; bits shifted past bit 127 are lost.
    #[inline]
    pub const fn shl(self, n: u32) -> Self {
        debug_assert!(n < 128);
        if n == 0 {
            self
        } else if n < 64 {
            Self {
                hi: (self.hi << n) | (self.lo >> (64 - n)),
                lo: self.lo << n,
            }
        } else {
            Self {
                hi: self.lo << (n - 64),
                lo: 0,
            }
        }
    }

    /// `self >> n` together with the classification of the discarded bits.
    #[inline]
    pub const fn shr_truncating(self, n: u32) -> (Self, TruncatedPart) {
        if n == 0 {
            return (self, TruncatedPart::Zero);
        }
        if n > 128 {
            let part = if self.is_zero() {
                TruncatedPart::Zero
            } else {
                TruncatedPart::LessThanHalfButNotZero
            };
            return (Self::ZERO, part);
        }
        let top_bit_set = self.bit(n - 1);
        let rest_is_zero = self.low_bits_are_zero(n - 1);
        let shifted = if n == 128 {
            Self::ZERO
        } else if n < 64 {
            Self {
                hi: self.hi >> n,
                lo: (self.lo >> n) | (self.hi << (64 - n)),
            }
        } else {
            Self {
                hi: 0,
                lo: self.hi >> (n - 64),
            }
        };
        (shifted, TruncatedPart::from_top_bit(top_bit_set, rest_is_zero))
    }

    /// Bit `i` (0 = least significant) for `i < 128`.
    #[inline(always)]
    const fn bit(self, i: u32) -> bool {
        if i < 64 {
            (self.lo >> i) & 1 != 0
        } else {
            (self.hi >> (i - 64)) & 1 != 0
        }
    }

    /// True if the `n` lowest bits are all zero, `n <= 128`.
    #[inline]
    const fn low_bits_are_zero(self, n: u32) -> bool {
        if n == 0 {
            true
        } else if n < 64 {
            self.lo & ((1u64 << n) - 1) == 0
        } else if n == 64 {
            self.lo == 0
        } else if n < 128 {
            self.lo == 0 && self.hi & ((1u64 << (n - 64)) - 1) == 0
        } else {
            self.is_zero()
        }
    }

    #[inline]
    pub const fn wrapping_add(self, other: Self) -> Self {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        Self {
            hi: self.hi.wrapping_add(other.hi).wrapping_add(carry as u64),
            lo,
        }
    }

    /// `self - other`; the caller guarantees `self >= other`.
    #[inline]
    pub const fn wrapping_sub(self, other: Self) -> Self {
        let (lo, borrow) = self.lo.overflowing_sub(other.lo);
        Self {
            hi: self.hi.wrapping_sub(other.hi).wrapping_sub(borrow as u64),
            lo,
        }
    }

    #[inline]
    pub const fn compare(self, other: Self) -> Ordering {
        if self.hi < other.hi {
            Ordering::Less
        } else if self.hi > other.hi {
            Ordering::Greater
        } else if self.lo < other.lo {
            Ordering::Less
        } else if self.lo > other.lo {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Integer square root and remainder: `(r, self - r^2)` with `r = floor(sqrt(self))`.
    ///
    /// Classic digit-by-digit method, consuming two bits per step from the top.
    pub const fn sqrt_rem(self) -> (u64, Self) {
        let mut root: u64 = 0;
        let mut rem = Self::ZERO;
        let mut i = 64;
        while i > 0 {
            i -= 1;
            let pair = if i >= 32 {
                (self.hi >> (2 * (i - 32))) & 3
            } else {
                (self.lo >> (2 * i)) & 3
            };
            rem = rem.shl(2).wrapping_add(Self::from_u64(pair));
            // trial = 4 * root + 1
            let trial = Self::from_u64(root).shl(2).wrapping_add(Self::from_u64(1));
            root <<= 1;
            if !matches!(rem.compare(trial), Ordering::Less) {
                rem = rem.wrapping_sub(trial);
                root |= 1;
            }
        }
        (root, rem)
    }
}

impl PartialOrd for WideUnsigned {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WideUnsigned {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(*other)
    }
}
