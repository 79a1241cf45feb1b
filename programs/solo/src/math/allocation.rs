//! Tranche Allocation Math
//!
//! Splits pool holdings into the protected, concentrated and flex tranches.
//!
//! - Protected: the overweight asset beyond half of total value, held idle.
//! - Flex: `percent` of the active reserves, paired along the
//!   constant-liquidity curve of the flex band.
//! - Concentrated: whatever active reserves remain after flex.

use crate::math::fixed_point::UD60x18;
use crate::state::{TrancheAmounts, Tranches};
use anchor_lang::prelude::*;

/// Whether `sqrt_price` sits above the midpoint of the band's sqrt bounds
///
/// A unit of liquidity above the midpoint is worth more in Y than in X, so
/// flex sizing starts from the Y side.
pub fn more_y_than_x(
    sqrt_price: UD60x18,
    sqrt_p_min: UD60x18,
    sqrt_p_max: UD60x18,
) -> Result<bool> {
    let midpoint = sqrt_p_min
        .checked_add(sqrt_p_max)?
        .checked_div(UD60x18::TWO)?;
    Ok(sqrt_price > midpoint)
}

/// Flex tranche amounts for reserves `(x, y)` at `percent`
///
/// Out of range the flex tranche is single-sided. In range, liquidity is
/// sized from the dominant side first and re-sized from the other side
/// when the paired amount would exceed its budget.
pub fn compute_fx_fy(
    x: UD60x18,
    y: UD60x18,
    sqrt_price: UD60x18,
    sqrt_p_min: UD60x18,
    sqrt_p_max: UD60x18,
    percent: UD60x18,
) -> Result<(UD60x18, UD60x18)> {
    let budget_x = x.checked_mul(percent)?;
    let budget_y = y.checked_mul(percent)?;

    if sqrt_price <= sqrt_p_min {
        return Ok((budget_x, UD60x18::ZERO));
    }
    if sqrt_price >= sqrt_p_max {
        return Ok((UD60x18::ZERO, budget_y));
    }

    // Amounts held by one unit of liquidity at the current price
    let unit_x = UD60x18::ONE
        .checked_div(sqrt_price)?
        .checked_sub(UD60x18::ONE.checked_div(sqrt_p_max)?)?;
    let unit_y = sqrt_price.checked_sub(sqrt_p_min)?;

    let liquidity = if more_y_than_x(sqrt_price, sqrt_p_min, sqrt_p_max)? {
        let from_y = budget_y.checked_div(unit_y)?;
        if from_y.checked_mul(unit_x)? > budget_x {
            budget_x.checked_div(unit_x)?
        } else {
            from_y
        }
    } else {
        let from_x = budget_x.checked_div(unit_x)?;
        if from_x.checked_mul(unit_y)? > budget_y {
            budget_y.checked_div(unit_y)?
        } else {
            from_x
        }
    };

    Ok((liquidity.checked_mul(unit_x)?, liquidity.checked_mul(unit_y)?))
}

/// Concentrated tranche amounts: what remains after flex
///
/// Fails with `MathUnderflow` when flex claims more than the reserves hold.
pub fn compute_cx_cy(
    x: UD60x18,
    y: UD60x18,
    flex_x: UD60x18,
    flex_y: UD60x18,
) -> Result<(UD60x18, UD60x18)> {
    Ok((x.checked_sub(flex_x)?, y.checked_sub(flex_y)?))
}

/// Protected tranche amounts for total holdings `(x, y)` at price `sqrt_price²`
///
/// With `V = x * price + y`, the side worth more than `V / 2` keeps the
/// excess idle. At most one side is non-zero.
pub fn compute_protected(
    x: UD60x18,
    y: UD60x18,
    sqrt_price: UD60x18,
) -> Result<(UD60x18, UD60x18)> {
    let x_value = x.mul_sq(sqrt_price)?;
    let half = x_value.checked_add(y)?.checked_div(UD60x18::TWO)?;

    if x_value > half {
        let balanced_x = half.div_sq(sqrt_price)?;
        Ok((x.checked_sub(balanced_x)?, UD60x18::ZERO))
    } else if y > half {
        Ok((UD60x18::ZERO, y.checked_sub(half)?))
    } else {
        Ok((UD60x18::ZERO, UD60x18::ZERO))
    }
}

/// All three tranches for total holdings `(x, y)`
pub fn compute_tranches(
    x: UD60x18,
    y: UD60x18,
    sqrt_price: UD60x18,
    sqrt_p_min: UD60x18,
    sqrt_p_max: UD60x18,
    flex_percent: UD60x18,
) -> Result<Tranches> {
    let (protected_x, protected_y) = compute_protected(x, y, sqrt_price)?;
    let active_x = x.checked_sub(protected_x)?;
    let active_y = y.checked_sub(protected_y)?;

    let (flex_x, flex_y) = compute_fx_fy(
        active_x,
        active_y,
        sqrt_price,
        sqrt_p_min,
        sqrt_p_max,
        flex_percent,
    )?;
    let (concentrated_x, concentrated_y) = compute_cx_cy(active_x, active_y, flex_x, flex_y)?;

    Ok(Tranches {
        protected: TrancheAmounts::new(protected_x, protected_y),
        concentrated: TrancheAmounts::new(concentrated_x, concentrated_y),
        flex: TrancheAmounts::new(flex_x, flex_y),
    })
}
