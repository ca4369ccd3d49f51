use tracing::{debug, trace};

use crate::arithmetic::DecimalArithmetic;
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::rounding::RoundingMode;
use crate::scale::{SCALE_COUNT, SCALE_METRICS};
use crate::{DecimalError, Result};

/// Every [`DecimalArithmetic`] engine, one per scale and truncation policy.
///
/// All 304 engines are built by [`ArithmeticRegistry::new`]. Lookups return
/// references into the registry, so two lookups of the same configuration
/// yield the same engine (`core::ptr::eq` holds). Build one registry and
/// pass it by reference; it is immutable and `Send + Sync`.
#[derive(Debug)]
pub struct ArithmeticRegistry {
    engines: [[DecimalArithmetic; TruncationPolicy::COUNT]; SCALE_COUNT],
}

impl Default for ArithmeticRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ArithmeticRegistry {
    pub fn new() -> Self {
        let engines = core::array::from_fn(|scale| {
            core::array::from_fn(|index| {
                DecimalArithmetic::new(&SCALE_METRICS[scale], TruncationPolicy::ALL[index])
            })
        });
        debug!(
            scales = SCALE_COUNT,
            policies = TruncationPolicy::COUNT,
            engines = SCALE_COUNT * TruncationPolicy::COUNT,
            "built decimal arithmetic registry"
        );
        Self { engines }
    }

    /// The engine for `scale` and `policy`.
    ///
    /// # Errors
    /// `InvalidArgument` if `scale` is not in `0..=18`.
    #[inline]
    pub fn get(&self, scale: u8, policy: TruncationPolicy) -> Result<&DecimalArithmetic> {
        match self.engines.get(scale as usize) {
            Some(row) => Ok(&row[policy.index()]),
            None => {
                debug!(scale, "rejected arithmetic lookup for unsupported scale");
                Err(DecimalError::InvalidArgument("scale must be in 0..=18"))
            }
        }
    }

    /// The engine for `scale` with `HalfUp` rounding and unchecked overflow.
    #[inline]
    pub fn get_default(&self, scale: u8) -> Result<&DecimalArithmetic> {
        self.get(scale, TruncationPolicy::DEFAULT)
    }

    #[inline]
    pub fn checked(&self, scale: u8, rounding: RoundingMode) -> Result<&DecimalArithmetic> {
        self.get(scale, TruncationPolicy::new(rounding, OverflowMode::Checked))
    }

    #[inline]
    pub fn unchecked(&self, scale: u8, rounding: RoundingMode) -> Result<&DecimalArithmetic> {
        self.get(scale, TruncationPolicy::new(rounding, OverflowMode::Unchecked))
    }

    /// The sibling of `arith` at another scale, with the same policy.
    pub fn with_scale(&self, arith: &DecimalArithmetic, scale: u8) -> Result<&DecimalArithmetic> {
        trace!(from = arith.scale(), to = scale, "deriving engine with scale");
        self.get(scale, arith.truncation_policy())
    }

    /// The sibling of `arith` with another rounding mode.
    pub fn with_rounding_mode(
        &self,
        arith: &DecimalArithmetic,
        rounding: RoundingMode,
    ) -> &DecimalArithmetic {
        trace!(scale = arith.scale(), %rounding, "deriving engine with rounding mode");
        self.sibling(arith, arith.truncation_policy().with_rounding_mode(rounding))
    }

    /// The sibling of `arith` with another overflow mode.
    pub fn with_overflow_mode(
        &self,
        arith: &DecimalArithmetic,
        overflow: OverflowMode,
    ) -> &DecimalArithmetic {
        trace!(scale = arith.scale(), %overflow, "deriving engine with overflow mode");
        self.sibling(arith, arith.truncation_policy().with_overflow_mode(overflow))
    }

    /// The sibling of `arith` with another truncation policy.
    pub fn with_policy(
        &self,
        arith: &DecimalArithmetic,
        policy: TruncationPolicy,
    ) -> &DecimalArithmetic {
        trace!(scale = arith.scale(), %policy, "deriving engine with truncation policy");
        self.sibling(arith, policy)
    }

    /// Every engine, ordered by scale, then by policy index.
    pub fn iter(&self) -> impl Iterator<Item = &DecimalArithmetic> {
        self.engines.iter().flatten()
    }

    #[inline(always)]
    fn sibling(&self, arith: &DecimalArithmetic, policy: TruncationPolicy) -> &DecimalArithmetic {
        // An engine's scale always indexes a row.
        &self.engines[arith.scale() as usize][policy.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    #[test]
    fn test_registry_holds_every_combination() {
        let registry = ArithmeticRegistry::new();
        assert_eq!(registry.iter().count(), 304);
        for scale in 0..=18u8 {
            for policy in TruncationPolicy::ALL {
                let arith = registry.get(scale, policy).unwrap();
                assert_eq!(arith.scale(), scale);
                assert_eq!(arith.truncation_policy(), policy);
                assert_eq!(arith.one(), 10i64.pow(scale as u32));
            }
        }
    }

    #[test]
    fn test_lookups_are_identical() {
        let registry = ArithmeticRegistry::new();
        let a = registry.get(4, TruncationPolicy::CHECKED_FLOOR).unwrap();
        let b = registry.checked(4, RoundingMode::Floor).unwrap();
        assert!(ptr::eq(a, b));
        assert!(ptr::eq(
            registry.get_default(7).unwrap(),
            registry.unchecked(7, RoundingMode::HalfUp).unwrap()
        ));
        assert!(!ptr::eq(a, registry.get(4, TruncationPolicy::FLOOR).unwrap()));
    }

    #[test]
    fn test_siblings() {
        let registry = ArithmeticRegistry::new();
        let arith = registry.get(2, TruncationPolicy::CHECKED_HALF_EVEN).unwrap();

        let rescaled = registry.with_scale(arith, 9).unwrap();
        assert_eq!(rescaled.scale(), 9);
        assert_eq!(rescaled.truncation_policy(), TruncationPolicy::CHECKED_HALF_EVEN);

        let down = registry.with_rounding_mode(arith, RoundingMode::Down);
        assert!(ptr::eq(down, registry.get(2, TruncationPolicy::CHECKED_DOWN).unwrap()));

        let unchecked = registry.with_overflow_mode(arith, OverflowMode::Unchecked);
        assert!(ptr::eq(unchecked, registry.get(2, TruncationPolicy::HALF_EVEN).unwrap()));

        let same = registry.with_policy(arith, TruncationPolicy::CHECKED_HALF_EVEN);
        assert!(ptr::eq(same, arith));

        assert!(registry.with_scale(arith, 19).is_err());
    }

    #[test]
    fn test_rejects_unsupported_scale() {
        let registry = ArithmeticRegistry::default();
        assert_eq!(
            registry.get(19, TruncationPolicy::DEFAULT),
            Err(DecimalError::InvalidArgument("scale must be in 0..=18"))
        );
        assert!(registry.get_default(u8::MAX).is_err());
    }
}
