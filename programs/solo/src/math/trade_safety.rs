//! Trade Safety
//!
//! Pre-trade check on the projected composition of the flex tranche.

use crate::math::fixed_point::UD60x18;
use anchor_lang::prelude::*;

/// Whether a trade leaving the given reserves and flex tranche is safe
///
/// All amounts are the projected post-trade figures: `reserve_x/reserve_y`
/// are the active reserves once the flex leg is booked, `flex_x/flex_y` the
/// flex tranche after the same leg. X is valued at `sqrt_price²`.
///
/// With `V` the reserve value and `F` the flex value (both in Y):
/// - `V - F > reserve_percent * V`: enough value stays outside the flex band
/// - `min(flex_x * price, flex_y) >= reserve_percent * flex_percent * V / 2`:
///   neither flex side is depleted
pub fn pre_trade_assessment(
    sqrt_price: UD60x18,
    reserve_x: UD60x18,
    reserve_y: UD60x18,
    flex_x: UD60x18,
    flex_y: UD60x18,
    flex_percent: UD60x18,
    reserve_percent: UD60x18,
) -> Result<bool> {
    let reserve_value = reserve_x.mul_sq(sqrt_price)?.checked_add(reserve_y)?;
    let flex_x_value = flex_x.mul_sq(sqrt_price)?;
    let flex_value = flex_x_value.checked_add(flex_y)?;

    if flex_value >= reserve_value {
        return Ok(false);
    }
    let outside_value = reserve_value.checked_sub(flex_value)?;
    if outside_value <= reserve_percent.checked_mul(reserve_value)? {
        return Ok(false);
    }

    let side_floor = reserve_percent
        .checked_mul(flex_percent)?
        .checked_mul(reserve_value)?
        .checked_div(UD60x18::TWO)?;
    Ok(flex_x_value.min(flex_y) >= side_floor)
}
