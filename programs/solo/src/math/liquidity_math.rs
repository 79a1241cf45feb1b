//! Liquidity Math
//!
//! Functions for converting between constant-liquidity amounts and token
//! amounts over a sqrt price range, in 18-decimal fixed point.

use crate::math::fixed_point::UD60x18;
use anchor_lang::prelude::*;

fn ordered(sqrt_price_a: UD60x18, sqrt_price_b: UD60x18) -> (UD60x18, UD60x18) {
    if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    }
}

/// Amount of token X held by `liquidity` between two sqrt prices
///
/// amount_x = liquidity * (sqrt_price_upper - sqrt_price_lower)
///            / (sqrt_price_upper * sqrt_price_lower)
pub fn get_amount_x_delta(
    sqrt_price_a: UD60x18,
    sqrt_price_b: UD60x18,
    liquidity: UD60x18,
    round_up: bool,
) -> Result<UD60x18> {
    let (sqrt_price_lower, sqrt_price_upper) = ordered(sqrt_price_a, sqrt_price_b);
    let diff = sqrt_price_upper.checked_sub(sqrt_price_lower)?;

    if round_up {
        liquidity
            .mul_up(diff)?
            .div_up(sqrt_price_upper)?
            .div_up(sqrt_price_lower)
    } else {
        liquidity
            .checked_mul(diff)?
            .checked_div(sqrt_price_upper)?
            .checked_div(sqrt_price_lower)
    }
}

/// Amount of token Y held by `liquidity` between two sqrt prices
///
/// amount_y = liquidity * (sqrt_price_upper - sqrt_price_lower)
pub fn get_amount_y_delta(
    sqrt_price_a: UD60x18,
    sqrt_price_b: UD60x18,
    liquidity: UD60x18,
    round_up: bool,
) -> Result<UD60x18> {
    let (sqrt_price_lower, sqrt_price_upper) = ordered(sqrt_price_a, sqrt_price_b);
    let diff = sqrt_price_upper.checked_sub(sqrt_price_lower)?;

    if round_up {
        liquidity.mul_up(diff)
    } else {
        liquidity.checked_mul(diff)
    }
}

/// Liquidity provided by `amount_x` of token X between two sqrt prices
/// Inverse of get_amount_x_delta
pub fn get_liquidity_for_amount_x(
    sqrt_price_a: UD60x18,
    sqrt_price_b: UD60x18,
    amount_x: UD60x18,
) -> Result<UD60x18> {
    let (sqrt_price_lower, sqrt_price_upper) = ordered(sqrt_price_a, sqrt_price_b);
    let diff = sqrt_price_upper.checked_sub(sqrt_price_lower)?;

    amount_x
        .checked_mul(sqrt_price_upper)?
        .checked_mul(sqrt_price_lower)?
        .checked_div(diff)
}

/// Liquidity provided by `amount_y` of token Y between two sqrt prices
/// Inverse of get_amount_y_delta
pub fn get_liquidity_for_amount_y(
    sqrt_price_a: UD60x18,
    sqrt_price_b: UD60x18,
    amount_y: UD60x18,
) -> Result<UD60x18> {
    let (sqrt_price_lower, sqrt_price_upper) = ordered(sqrt_price_a, sqrt_price_b);
    amount_y.checked_div(sqrt_price_upper.checked_sub(sqrt_price_lower)?)
}

/// Calculate the maximum liquidity that can be added with the given amounts
/// for a position in the range [sqrt_price_lower, sqrt_price_upper]
/// at the current sqrt_price
pub fn get_liquidity_for_amounts(
    sqrt_price_current: UD60x18,
    sqrt_price_lower: UD60x18,
    sqrt_price_upper: UD60x18,
    amount_x: UD60x18,
    amount_y: UD60x18,
) -> Result<UD60x18> {
    if sqrt_price_current <= sqrt_price_lower {
        // Current price is below range, only token X is needed
        get_liquidity_for_amount_x(sqrt_price_lower, sqrt_price_upper, amount_x)
    } else if sqrt_price_current < sqrt_price_upper {
        // Current price is in range, need both tokens
        let liquidity_x =
            get_liquidity_for_amount_x(sqrt_price_current, sqrt_price_upper, amount_x)?;
        let liquidity_y =
            get_liquidity_for_amount_y(sqrt_price_lower, sqrt_price_current, amount_y)?;
        // The scarcer side decides how much can actually be deposited
        Ok(liquidity_x.min(liquidity_y))
    } else {
        // Current price is above range, only token Y is needed
        get_liquidity_for_amount_y(sqrt_price_lower, sqrt_price_upper, amount_y)
    }
}

/// Calculate the token amounts for a given liquidity
/// at the current sqrt_price for a position in range [lower, upper]
pub fn get_amounts_for_liquidity(
    sqrt_price_current: UD60x18,
    sqrt_price_lower: UD60x18,
    sqrt_price_upper: UD60x18,
    liquidity: UD60x18,
    round_up: bool,
) -> Result<(UD60x18, UD60x18)> {
    if sqrt_price_current <= sqrt_price_lower {
        // Below range: all token X
        let amount_x =
            get_amount_x_delta(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)?;
        Ok((amount_x, UD60x18::ZERO))
    } else if sqrt_price_current < sqrt_price_upper {
        let amount_x =
            get_amount_x_delta(sqrt_price_current, sqrt_price_upper, liquidity, round_up)?;
        let amount_y =
            get_amount_y_delta(sqrt_price_lower, sqrt_price_current, liquidity, round_up)?;
        Ok((amount_x, amount_y))
    } else {
        // Above range: all token Y
        let amount_y =
            get_amount_y_delta(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)?;
        Ok((UD60x18::ZERO, amount_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::get_sqrt_price_at_tick;

    fn close(a: UD60x18, b: UD60x18, tolerance_raw: u128) -> bool {
        a.abs_diff(b) <= UD60x18::from_raw_u128(tolerance_raw)
    }

    #[test]
    fn test_amount_deltas_order_independent() {
        let lower = get_sqrt_price_at_tick(-600).unwrap();
        let upper = get_sqrt_price_at_tick(600).unwrap();
        let liquidity = UD60x18::from_int(1000);
        assert_eq!(
            get_amount_x_delta(lower, upper, liquidity, false).unwrap(),
            get_amount_x_delta(upper, lower, liquidity, false).unwrap()
        );
        assert_eq!(
            get_amount_y_delta(lower, upper, liquidity, true).unwrap(),
            get_amount_y_delta(upper, lower, liquidity, true).unwrap()
        );
    }

    #[test]
    fn test_round_up_never_below_round_down() {
        let lower = get_sqrt_price_at_tick(-100).unwrap();
        let upper = get_sqrt_price_at_tick(300).unwrap();
        let liquidity = UD60x18::from_ratio(12345, 7).unwrap();
        let down = get_amount_x_delta(lower, upper, liquidity, false).unwrap();
        let up = get_amount_x_delta(lower, upper, liquidity, true).unwrap();
        assert!(up >= down);
    }

    #[test]
    fn test_symmetric_range_at_par_holds_equal_amounts() {
        let lower = get_sqrt_price_at_tick(-5000).unwrap();
        let upper = get_sqrt_price_at_tick(5000).unwrap();
        let (x, y) =
            get_amounts_for_liquidity(UD60x18::ONE, lower, upper, UD60x18::from_int(1000), false)
                .unwrap();
        assert!(close(x, y, 1_000_000));
    }

    #[test]
    fn test_liquidity_for_amounts_uses_scarcer_side() {
        let lower = get_sqrt_price_at_tick(-5000).unwrap();
        let upper = get_sqrt_price_at_tick(5000).unwrap();
        let liquidity = get_liquidity_for_amounts(
            UD60x18::ONE,
            lower,
            upper,
            UD60x18::from_int(1800),
            UD60x18::from_int(800),
        )
        .unwrap();
        let (x, y) =
            get_amounts_for_liquidity(UD60x18::ONE, lower, upper, liquidity, false).unwrap();
        let tolerance = 1_000_000_000u128;
        assert!(close(y, UD60x18::from_int(800), tolerance));
        assert!(close(x, UD60x18::from_int(800), tolerance));
    }

    #[test]
    fn test_out_of_range_is_single_sided() {
        let lower = get_sqrt_price_at_tick(1000).unwrap();
        let upper = get_sqrt_price_at_tick(2000).unwrap();
        let liquidity = UD60x18::from_int(50);
        let (x, y) =
            get_amounts_for_liquidity(UD60x18::ONE, lower, upper, liquidity, false).unwrap();
        assert!(x > UD60x18::ZERO);
        assert_eq!(y, UD60x18::ZERO);

        let (x, y) = get_amounts_for_liquidity(UD60x18::TWO, lower, upper, liquidity, false)
            .unwrap();
        assert_eq!(x, UD60x18::ZERO);
        assert!(y > UD60x18::ZERO);
    }
}
