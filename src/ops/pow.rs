use super::div::invert;
use super::mul::multiply;
use crate::checked::POW_OVERFLOW_EXPONENT;
use crate::policy::{OverflowMode, TruncationPolicy};
use crate::scale::ScaleMetrics;
use crate::unsigned::magnitude;
use crate::{DecimalError, Result};

/// `a^n` at the engine's scale.
///
/// Repeated squaring with one rounding step per multiplication, so the last
/// digit may differ from the correctly rounded power for long chains.
/// A negative exponent divides one by the positive power; when that power
/// underflows to zero or leaves the range, the reciprocal is raised instead.
pub(crate) fn pow(metrics: &ScaleMetrics, policy: TruncationPolicy, a: i64, n: i32) -> Result<i64> {
    let one = metrics.scale_factor();
    if n == 0 || a == one {
        return Ok(one);
    }
    if a == 0 {
        return if n > 0 {
            Ok(0)
        } else {
            Err(DecimalError::DivisionByZero)
        };
    }
    if a == -one {
        return Ok(if n % 2 == 0 { one } else { -one });
    }
    match n {
        1 => return Ok(a),
        -1 => return invert(metrics, policy, a),
        _ => {}
    }

    let exponent = n.unsigned_abs();
    if n > 0 {
        if policy.overflow_mode().is_checked()
            && exponent >= POW_OVERFLOW_EXPONENT
            && magnitude(a) >= 2 * metrics.scale_factor_u64()
        {
            return Err(DecimalError::Overflow);
        }
        return power_by_squaring(metrics, policy, a, exponent);
    }

    let probe = policy.with_overflow_mode(OverflowMode::Checked);
    match power_by_squaring(metrics, probe, a, exponent) {
        Ok(power) if power != 0 => invert(metrics, policy, power),
        Ok(_) | Err(DecimalError::Overflow) => {
            let reciprocal = invert(metrics, policy, a)?;
            power_by_squaring(metrics, policy, reciprocal, exponent)
        }
        Err(e) => Err(e),
    }
}

fn power_by_squaring(
    metrics: &ScaleMetrics,
    policy: TruncationPolicy,
    base: i64,
    mut exponent: u32,
) -> Result<i64> {
    let mut base = base;
    let mut result: Option<i64> = None;
    loop {
        if exponent & 1 == 1 {
            result = Some(match result {
                Some(r) => multiply(metrics, policy, r, base)?,
                None => base,
            });
        }
        exponent >>= 1;
        if exponent == 0 {
            break;
        }
        base = multiply(metrics, policy, base, base)?;
    }
    Ok(result.unwrap_or(metrics.scale_factor()))
}
