//! Extended-precision scratch arithmetic.
//!
//! A [`ScratchRegister`] performs one unsigned division of a 128-bit dividend
//! by a 64-bit divisor using only 64-bit operations, as long division on
//! 32-bit limbs (Knuth, TAOCP vol. 2, 4.3.1, Algorithm D; see also Warren,
//! _Hacker's Delight_, `divmnu`). It is used when a rescaled dividend or a
//! full product no longer fits in 64 bits but the quotient still has to be
//! correctly rounded.
//!
//! The register lives on the caller's stack for the duration of one division.
//! [`ScratchRegister::load`] overwrites every field, so nothing carries over
//! from a previous use.

use crate::truncated::TruncatedPart;
use crate::unsigned::WideUnsigned;

const BASE: u64 = 1 << 32;
const LOW_MASK: u64 = BASE - 1;

/// Dividend limbs, one more than needed for 128 bits to absorb normalization.
const DIVIDEND_LIMBS: usize = 5;

/// Result of a widened division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WideQuotient {
    /// Low 64 bits of the quotient.
    pub quotient: u64,
    /// True if the full quotient needs more than 64 bits.
    pub overflow: bool,
    /// Classification of `remainder / divisor`.
    pub part: TruncatedPart,
}

/// Working storage for a single 128-by-64-bit unsigned division.
#[derive(Debug, Clone)]
pub(crate) struct ScratchRegister {
    /// Normalized dividend, least significant limb first.
    dividend: [u32; DIVIDEND_LIMBS],
    /// Normalized divisor, least significant limb first.
    divisor: [u32; 2],
    /// Number of significant divisor limbs, 1 or 2.
    divisor_len: usize,
    /// Left shift applied to dividend and divisor so the divisor's top bit is set.
    shift: u32,
    /// Divisor before normalization.
    raw_divisor: u64,
}

impl ScratchRegister {
    pub(crate) const fn new() -> Self {
        Self {
            dividend: [0; DIVIDEND_LIMBS],
            divisor: [0; 2],
            divisor_len: 0,
            shift: 0,
            raw_divisor: 0,
        }
    }

    /// Clears the register.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Loads `dividend / divisor` and normalizes both operands.
    ///
    /// `divisor` must not be zero.
    pub(crate) fn load(&mut self, dividend: WideUnsigned, divisor: u64) {
        debug_assert!(divisor != 0);
        self.reset();
        self.raw_divisor = divisor;

        let (divisor_len, top) = if divisor >> 32 == 0 {
            (1, divisor as u32)
        } else {
            (2, (divisor >> 32) as u32)
        };
        self.divisor_len = divisor_len;
        self.shift = top.leading_zeros();

        let normalized = divisor << self.shift;
        self.divisor = if divisor_len == 1 {
            [normalized as u32, 0]
        } else {
            [normalized as u32, (normalized >> 32) as u32]
        };

        let limbs = [
            dividend.lo as u32,
            (dividend.lo >> 32) as u32,
            dividend.hi as u32,
            (dividend.hi >> 32) as u32,
        ];
        // Shift by up to 31 bits; the top limb takes the overflow.
        let s = self.shift;
        let mut carry = 0u32;
        for (i, limb) in limbs.iter().enumerate() {
            let wide = ((*limb as u64) << s) | carry as u64;
            self.dividend[i] = wide as u32;
            carry = (wide >> 32) as u32;
        }
        self.dividend[DIVIDEND_LIMBS - 1] = carry;
    }

    /// Divides the loaded operands.
    pub(crate) fn divide(&mut self) -> WideQuotient {
        let mut quotient = [0u32; DIVIDEND_LIMBS];
        let remainder = if self.divisor_len == 1 {
            self.divide_by_limb(&mut quotient)
        } else {
            self.divide_by_two_limbs(&mut quotient)
        };

        let overflow = quotient[2..].iter().any(|&q| q != 0);
        WideQuotient {
            quotient: ((quotient[1] as u64) << 32) | quotient[0] as u64,
            overflow,
            part: TruncatedPart::from_remainder(remainder, self.raw_divisor),
        }
    }

    /// Short division by a single normalized limb.
    fn divide_by_limb(&self, quotient: &mut [u32; DIVIDEND_LIMBS]) -> u64 {
        let v = self.divisor[0] as u64;
        let mut rem = 0u64;
        for i in (0..DIVIDEND_LIMBS).rev() {
            let current = (rem << 32) | self.dividend[i] as u64;
            quotient[i] = (current / v) as u32;
            rem = current % v;
        }
        rem >> self.shift
    }

    /// Long division by a normalized two-limb divisor.
    fn divide_by_two_limbs(&mut self, quotient: &mut [u32; DIVIDEND_LIMBS]) -> u64 {
        let vn1 = self.divisor[1] as u64;
        let vn0 = self.divisor[0] as u64;
        let un = &mut self.dividend;

        // One quotient limb per step, most significant first.
        for j in (0..DIVIDEND_LIMBS - 2).rev() {
            let numerator = ((un[j + 2] as u64) << 32) | un[j + 1] as u64;
            let mut qhat = numerator / vn1;
            let mut rhat = numerator % vn1;

            // Trial quotient is at most two too large.
            while qhat >= BASE || qhat * vn0 > ((rhat << 32) | un[j] as u64) {
                qhat -= 1;
                rhat += vn1;
                if rhat >= BASE {
                    break;
                }
            }

            // Multiply and subtract.
            let mut borrow: i64 = 0;
            for (i, v) in [vn0, vn1].into_iter().enumerate() {
                let product = qhat * v;
                let t = un[i + j] as i64 - borrow - (product & LOW_MASK) as i64;
                un[i + j] = t as u32;
                borrow = (product >> 32) as i64 - (t >> 32);
            }
            let t = un[j + 2] as i64 - borrow;
            un[j + 2] = t as u32;

            // Estimate was one too large: add the divisor back.
            if t < 0 {
                qhat -= 1;
                let mut carry = 0u64;
                for (i, v) in [vn0, vn1].into_iter().enumerate() {
                    let sum = un[i + j] as u64 + v + carry;
                    un[i + j] = sum as u32;
                    carry = sum >> 32;
                }
                un[j + 2] = un[j + 2].wrapping_add(carry as u32);
            }
            quotient[j] = qhat as u32;
        }

        let normalized = ((un[1] as u64) << 32) | un[0] as u64;
        normalized >> self.shift
    }
}

/// Divides a 128-bit dividend by `divisor` using a fresh stack-local register.
#[inline]
pub(crate) fn divide_wide(dividend: WideUnsigned, divisor: u64) -> WideQuotient {
    if dividend.fits_u64() {
        let n = dividend.lo;
        return WideQuotient {
            quotient: n / divisor,
            overflow: false,
            part: TruncatedPart::from_remainder(n % divisor, divisor),
        };
    }
    let mut scratch = ScratchRegister::new();
    scratch.load(dividend, divisor);
    scratch.divide()
}
