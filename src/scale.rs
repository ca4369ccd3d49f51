use crate::{DecimalError, Result};

// ============================================================================
// Power of Ten Tables
// ============================================================================

/// Powers of ten that fit in an `i64`: `10^0` through `10^18`.
pub const POW10_I64: [i64; 19] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
];

/// Powers of ten that fit in a `u64`: `10^0` through `10^19`.
pub const POW10_U64: [u64; 20] = {
    let mut table = [1u64; 20];
    let mut i = 1;
    while i < 20 {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// The largest supported scale.
pub const MAX_SCALE: u8 = 18;

/// Number of supported scales (`0..=MAX_SCALE`).
pub const SCALE_COUNT: usize = MAX_SCALE as usize + 1;

// ============================================================================
// Scale Metrics
// ============================================================================

/// Constants and scale factor arithmetic for one fixed scale.
///
/// There is exactly one instance per scale, living in [`SCALE_METRICS`]; use
/// [`ScaleMetrics::for_scale`] to obtain it. Instances are never mutated.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ScaleMetrics {
    scale: u8,
    scale_factor: i64,
    max_integer_value: i64,
    min_integer_value: i64,
    scale_factor_leading_zeros: u32,
}

impl ScaleMetrics {
    const fn new(scale: u8) -> Self {
        let scale_factor = POW10_I64[scale as usize];
        Self {
            scale,
            scale_factor,
            max_integer_value: i64::MAX / scale_factor,
            min_integer_value: i64::MIN / scale_factor,
            scale_factor_leading_zeros: scale_factor.leading_zeros(),
        }
    }

    /// Returns the metrics for `scale`.
    ///
    /// # Errors
    /// Returns `DecimalError::InvalidArgument` if `scale` is not in `0..=18`.
    #[inline]
    pub fn for_scale(scale: u8) -> Result<&'static Self> {
        SCALE_METRICS
            .get(scale as usize)
            .ok_or(DecimalError::InvalidArgument("scale must be in 0..=18"))
    }

    /// The number of fraction digits.
    #[inline(always)]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// `10^scale`.
    #[inline(always)]
    pub const fn scale_factor(&self) -> i64 {
        self.scale_factor
    }

    /// `10^scale` as an unsigned value.
    #[inline(always)]
    pub const fn scale_factor_u64(&self) -> u64 {
        self.scale_factor as u64
    }

    /// Largest integer whose scaled representation fits in an `i64`.
    #[inline(always)]
    pub const fn max_integer_value(&self) -> i64 {
        self.max_integer_value
    }

    /// Smallest integer whose scaled representation fits in an `i64`.
    #[inline(always)]
    pub const fn min_integer_value(&self) -> i64 {
        self.min_integer_value
    }

    /// Leading zero bits of the scale factor.
    #[inline(always)]
    pub const fn scale_factor_leading_zeros(&self) -> u32 {
        self.scale_factor_leading_zeros
    }

    /// Returns `x * 10^scale`, wrapping on overflow.
    #[inline(always)]
    pub const fn multiply_by_scale_factor(&self, x: i64) -> i64 {
        x.wrapping_mul(self.scale_factor)
    }

    /// Returns `x * 10^scale`.
    ///
    /// # Errors
    /// Returns `DecimalError::Overflow` if the product does not fit in an `i64`.
    #[inline]
    pub const fn multiply_by_scale_factor_exact(&self, x: i64) -> Result<i64> {
        match x.checked_mul(self.scale_factor) {
            Some(product) => Ok(product),
            None => Err(DecimalError::Overflow),
        }
    }

    /// Returns `x / 10^scale`, truncated toward zero.
    #[inline(always)]
    pub const fn divide_by_scale_factor(&self, x: i64) -> i64 {
        x / self.scale_factor
    }

    /// Returns `x % 10^scale` (same sign as `x`).
    #[inline(always)]
    pub const fn modulo_by_scale_factor(&self, x: i64) -> i64 {
        x % self.scale_factor
    }

    /// Returns true if `x` can be multiplied by the scale factor without overflow.
    #[inline(always)]
    pub const fn is_valid_integer_value(&self, x: i64) -> bool {
        self.min_integer_value <= x && x <= self.max_integer_value
    }
}

/// One metrics instance per scale, indexed by scale.
pub static SCALE_METRICS: [ScaleMetrics; SCALE_COUNT] = {
    let mut i = 0;
    // Placeholder entries are overwritten below.
    let mut table = [const { ScaleMetrics::new(0) }; SCALE_COUNT];
    while i < SCALE_COUNT {
        table[i] = ScaleMetrics::new(i as u8);
        i += 1;
    }
    table
};

/// Returns `10^n` for `n` in `0..=18`.
///
/// # Errors
/// Returns `DecimalError::InvalidArgument` for larger exponents.
#[inline]
pub fn pow10(n: u32) -> Result<i64> {
    POW10_I64
        .get(n as usize)
        .copied()
        .ok_or(DecimalError::InvalidArgument("power of ten exponent must be in 0..=18"))
}
