use core::cmp::Ordering;
use core::fmt;

#[cfg(feature = "alloc")]
use alloc::string::{String, ToString};

use crate::ops::string::DecimalDisplay;
use crate::ops::{add, convert, div, float, mul, pow, shift, sqrt, string};
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::rounding::RoundingMode;
use crate::scale::ScaleMetrics;
use crate::Result;

/// Arithmetic on unscaled `i64` values at one fixed scale and truncation policy.
///
/// An engine holds no mutable state. Every operand and result is an unscaled
/// value: with scale 2, `561` stands for `5.61`. Obtain engines from an
/// [`ArithmeticRegistry`](crate::ArithmeticRegistry), which owns exactly one
/// per `(scale, policy)` pair.
///
/// Rounding applies whenever a result carries more fraction digits than the
/// scale. In [`OverflowMode::Unchecked`] a result outside the `i64` range wraps
/// to the rounded result modulo 2^64; in [`OverflowMode::Checked`] it is an
/// error. Division by zero is always an error.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct DecimalArithmetic {
    metrics: &'static ScaleMetrics,
    policy: TruncationPolicy,
}

impl DecimalArithmetic {
    pub(crate) const fn new(metrics: &'static ScaleMetrics, policy: TruncationPolicy) -> Self {
        Self { metrics, policy }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    #[inline(always)]
    pub const fn scale(&self) -> u8 {
        self.metrics.scale()
    }

    #[inline(always)]
    pub const fn scale_metrics(&self) -> &'static ScaleMetrics {
        self.metrics
    }

    #[inline(always)]
    pub const fn truncation_policy(&self) -> TruncationPolicy {
        self.policy
    }

    #[inline(always)]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.policy.rounding_mode()
    }

    #[inline(always)]
    pub const fn overflow_mode(&self) -> OverflowMode {
        self.policy.overflow_mode()
    }

    /// The unscaled representation of `1`.
    #[inline(always)]
    pub const fn one(&self) -> i64 {
        self.metrics.scale_factor()
    }

    #[inline(always)]
    fn overflow(&self) -> OverflowMode {
        self.policy.overflow_mode()
    }

    #[inline(always)]
    fn rounding(&self) -> RoundingMode {
        self.policy.rounding_mode()
    }

    // ========================================================================
    // Addition
    // ========================================================================

    #[inline(always)]
    pub fn add(&self, a: i64, b: i64) -> Result<i64> {
        add::add(self.overflow(), a, b)
    }

    #[inline(always)]
    pub fn subtract(&self, a: i64, b: i64) -> Result<i64> {
        add::subtract(self.overflow(), a, b)
    }

    /// `a + l` for a plain integer `l`.
    #[inline]
    pub fn add_long(&self, a: i64, l: i64) -> Result<i64> {
        add::add_unscaled(self.metrics, self.policy, a, l, 0, false)
    }

    /// `a - l` for a plain integer `l`.
    #[inline]
    pub fn subtract_long(&self, a: i64, l: i64) -> Result<i64> {
        add::add_unscaled(self.metrics, self.policy, a, l, 0, true)
    }

    /// `a + b × 10^-b_scale`. When `b_scale` exceeds the engine's scale the
    /// sum is rounded once.
    ///
    /// # Errors
    /// `InvalidArgument` if `b_scale` is not in `0..=18`.
    #[inline]
    pub fn add_unscaled(&self, a: i64, b: i64, b_scale: u8) -> Result<i64> {
        add::add_unscaled(self.metrics, self.policy, a, b, b_scale, false)
    }

    /// `a - b × 10^-b_scale`.
    #[inline]
    pub fn subtract_unscaled(&self, a: i64, b: i64, b_scale: u8) -> Result<i64> {
        add::add_unscaled(self.metrics, self.policy, a, b, b_scale, true)
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// `a × b`, rounded to the engine's scale.
    ///
    /// ```
    /// use fixarith::{ArithmeticRegistry, TruncationPolicy};
    ///
    /// let registry = ArithmeticRegistry::new();
    /// let arith = registry.get(2, TruncationPolicy::HALF_UP).unwrap();
    /// assert_eq!(arith.multiply(123, 456), Ok(561)); // 1.23 * 4.56 = 5.6088
    /// ```
    #[inline]
    pub fn multiply(&self, a: i64, b: i64) -> Result<i64> {
        mul::multiply(self.metrics, self.policy, a, b)
    }

    #[inline(always)]
    pub fn multiply_by_long(&self, a: i64, l: i64) -> Result<i64> {
        mul::multiply_by_long(self.overflow(), a, l)
    }

    /// `a × b × 10^-b_scale`.
    #[inline]
    pub fn multiply_by_unscaled(&self, a: i64, b: i64, b_scale: u8) -> Result<i64> {
        mul::multiply_by_unscaled(self.policy, a, b, b_scale)
    }

    /// `a × 10^n`; negative `n` divides.
    #[inline]
    pub fn multiply_by_power_of_10(&self, a: i64, n: i32) -> Result<i64> {
        mul::multiply_by_power_of_10(self.policy, a, n)
    }

    #[inline]
    pub fn square(&self, a: i64) -> Result<i64> {
        self.multiply(a, a)
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// `a / b`, rounded to the engine's scale.
    ///
    /// # Errors
    /// `DivisionByZero` if `b` is zero.
    #[inline]
    pub fn divide(&self, a: i64, b: i64) -> Result<i64> {
        div::divide(self.metrics, self.policy, a, b)
    }

    #[inline]
    pub fn divide_by_long(&self, a: i64, l: i64) -> Result<i64> {
        div::divide_by_long(self.policy, a, l)
    }

    /// `a / (b × 10^-b_scale)`.
    #[inline]
    pub fn divide_by_unscaled(&self, a: i64, b: i64, b_scale: u8) -> Result<i64> {
        div::divide_by_unscaled(self.policy, a, b, b_scale)
    }

    /// `a / 10^n`; negative `n` multiplies.
    #[inline]
    pub fn divide_by_power_of_10(&self, a: i64, n: i32) -> Result<i64> {
        div::divide_by_power_of_10(self.policy, a, n)
    }

    /// `1 / a`.
    #[inline]
    pub fn invert(&self, a: i64) -> Result<i64> {
        div::invert(self.metrics, self.policy, a)
    }

    /// The integer part of `a / b` (truncated toward zero), at the engine's scale.
    #[inline]
    pub fn divide_to_integral_value(&self, a: i64, b: i64) -> Result<i64> {
        div::divide_to_integral_value(self.metrics, self.overflow(), a, b)
    }

    /// `a / b` rounded to a plain integer.
    #[inline]
    pub fn divide_to_long_value(&self, a: i64, b: i64) -> Result<i64> {
        div::divide_to_long_value(self.policy, a, b)
    }

    /// `a - b × trunc(a / b)`, with the sign of `a`.
    #[inline]
    pub fn remainder(&self, a: i64, b: i64) -> Result<i64> {
        div::remainder(a, b)
    }

    /// `(divide_to_integral_value(a, b), remainder(a, b))`.
    #[inline]
    pub fn divide_and_remainder(&self, a: i64, b: i64) -> Result<(i64, i64)> {
        Ok((self.divide_to_integral_value(a, b)?, self.remainder(a, b)?))
    }

    // ========================================================================
    // Roots, Powers and Shifts
    // ========================================================================

    /// Square root, rounded to the engine's scale.
    ///
    /// # Errors
    /// `InvalidArgument` for negative input.
    #[inline]
    pub fn sqrt(&self, a: i64) -> Result<i64> {
        sqrt::sqrt(self.metrics, self.rounding(), a)
    }

    /// `a^n`, rounding after every multiplication.
    #[inline]
    pub fn pow(&self, a: i64, n: i32) -> Result<i64> {
        pow::pow(self.metrics, self.policy, a, n)
    }

    /// `a × 2^n`; negative `n` shifts right with [`RoundingMode::SHIFT_DEFAULT`].
    #[inline]
    pub fn shift_left(&self, a: i64, n: i32) -> Result<i64> {
        shift::shift_left(self.overflow(), RoundingMode::SHIFT_DEFAULT, a, n)
    }

    /// `a / 2^n` rounded toward negative infinity, like `>>` on signed
    /// integers, whatever the engine's rounding mode.
    #[inline]
    pub fn shift_right(&self, a: i64, n: i32) -> Result<i64> {
        shift::shift_right(self.overflow(), RoundingMode::SHIFT_DEFAULT, a, n)
    }

    /// `a / 2^n` rounded with `rounding`.
    #[inline]
    pub fn shift_right_rounded(&self, a: i64, n: i32, rounding: RoundingMode) -> Result<i64> {
        shift::shift_right(self.overflow(), rounding, a, n)
    }

    // ========================================================================
    // Sign, Comparison and Rounding
    // ========================================================================

    #[inline(always)]
    pub fn negate(&self, a: i64) -> Result<i64> {
        convert::negate(self.overflow(), a)
    }

    #[inline(always)]
    pub fn abs(&self, a: i64) -> Result<i64> {
        convert::abs(self.overflow(), a)
    }

    #[inline(always)]
    pub const fn signum(&self, a: i64) -> i64 {
        a.signum()
    }

    #[inline(always)]
    pub fn compare(&self, a: i64, b: i64) -> Ordering {
        a.cmp(&b)
    }

    /// The mean of `a` and `b`, rounded. Never overflows.
    #[inline]
    pub fn avg(&self, a: i64, b: i64) -> Result<i64> {
        convert::avg(self.rounding(), a, b)
    }

    /// Rounds to `precision` fraction digits; the result keeps the engine's scale.
    #[inline]
    pub fn round(&self, a: i64, precision: i32) -> Result<i64> {
        convert::round(self.metrics, self.policy, a, precision)
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    #[inline]
    pub fn from_long(&self, l: i64) -> Result<i64> {
        convert::from_long(self.metrics, self.overflow(), l)
    }

    #[inline]
    pub fn to_long(&self, a: i64) -> Result<i64> {
        convert::to_long(self.metrics, self.rounding(), a)
    }

    /// Converts `value × 10^-scale` to the engine's scale.
    #[inline]
    pub fn from_unscaled(&self, value: i64, scale: u8) -> Result<i64> {
        convert::from_unscaled(self.metrics, self.policy, value, scale)
    }

    /// Converts `a` to an unscaled value at `scale`.
    #[inline]
    pub fn to_unscaled(&self, a: i64, scale: u8) -> Result<i64> {
        convert::to_unscaled(self.metrics, self.policy, a, scale)
    }

    /// Converts the exact binary value of `value`.
    ///
    /// # Errors
    /// `InvalidArgument` for NaN, infinities and values out of range.
    #[inline]
    pub fn from_f64(&self, value: f64) -> Result<i64> {
        float::from_f64(self.metrics, self.rounding(), value)
    }

    #[inline]
    pub fn from_f32(&self, value: f32) -> Result<i64> {
        float::from_f32(self.metrics, self.rounding(), value)
    }

    #[inline]
    pub fn to_f64(&self, a: i64) -> Result<f64> {
        float::to_f64(self.metrics, self.rounding(), a)
    }

    #[inline]
    pub fn to_f32(&self, a: i64) -> Result<f32> {
        float::to_f32(self.metrics, self.rounding(), a)
    }

    // ========================================================================
    // Strings
    // ========================================================================

    /// Parses a decimal literal such as `-12.345`.
    ///
    /// # Errors
    /// `InvalidArgument` for malformed or out-of-range literals.
    #[inline]
    pub fn parse(&self, s: &str) -> Result<i64> {
        string::parse(self.metrics, self.rounding(), s)
    }

    /// A `Display` value rendering `a` with exactly `scale` fraction digits.
    #[inline(always)]
    pub const fn format(&self, a: i64) -> DecimalDisplay {
        DecimalDisplay::new(a, self.metrics.scale())
    }

    pub fn write_to<W: fmt::Write>(&self, a: i64, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.format(a))
    }

    /// Same text as [`format`](Self::format), allocated.
    #[cfg(feature = "alloc")]
    pub fn to_string(&self, a: i64) -> String {
        self.format(a).to_string()
    }
}

impl fmt::Display for DecimalArithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecimalArithmetic[scale={}, {}]", self.scale(), self.policy)
    }
}
