//! Fixed-point decimal arithmetic on 64-bit integers
//!
//! Every value is an unscaled `i64` together with a scale, the number of
//! fraction digits (`0..=18`). `5.61` at scale 2 is the integer `561`. All
//! arithmetic runs directly on the integer representation:
//!
//! - **Correctly rounded**: multiply, divide, square root and conversions
//!   round the exact result with one of eight [`RoundingMode`]s
//! - **64-bit only**: products and rescaled dividends that need more than
//!   64 bits are handled in two-limb scratch arithmetic, never through a
//!   128-bit integer type
//! - **Checked or wrapping**: an [`OverflowMode`] either wraps like
//!   `i64::wrapping_*` or reports [`DecimalError::Overflow`]
//! - **no_std compatible**: no allocation unless the `alloc` feature is on
//!
//! An engine for one `(scale, policy)` pair is a [`DecimalArithmetic`]. All
//! 304 of them are built once by an [`ArithmeticRegistry`], which hands out
//! stable references.
//!
//! ## Example
//!
//! ```rust
//! use fixarith::{ArithmeticRegistry, RoundingMode};
//!
//! let registry = ArithmeticRegistry::new();
//! let arith = registry.get_default(2).unwrap();
//!
//! let price = arith.parse("1.23").unwrap();
//! let quantity = arith.parse("4.56").unwrap();
//! let total = arith.multiply(price, quantity).unwrap();
//! assert_eq!(arith.format(total).to_string(), "5.61");
//!
//! let down = registry.with_rounding_mode(arith, RoundingMode::Down);
//! assert_eq!(down.multiply(price, quantity).unwrap(), 560);
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(test)]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

mod arithmetic;
mod checked;
mod ops;
mod policy;
mod registry;
mod rounding;
mod scale;
mod scratch;
mod truncated;
mod unsigned;

pub use arithmetic::DecimalArithmetic;
pub use ops::string::DecimalDisplay;
pub use policy::{OverflowMode, TruncationPolicy};
pub use registry::ArithmeticRegistry;
pub use rounding::RoundingMode;
pub use scale::{MAX_SCALE, POW10_I64, POW10_U64, SCALE_COUNT, SCALE_METRICS, ScaleMetrics, pow10};
pub use truncated::TruncatedPart;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    #[error("overflow: result does not fit in 64 bits")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("rounding necessary: result is not exact")]
    RoundingNecessary,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = core::result::Result<T, DecimalError>;
