//! Tick Math
//!
//! Converts exchange tick indices into 18-decimal sqrt prices.
//! Based on Uniswap V3's TickMath library.
//!
//! sqrt_price = sqrt(1.0001^tick) = 1.0001^(tick/2)

use crate::constants::{MAX_TICK_INDEX, MIN_TICK_INDEX, SCALE};
use crate::errors::SoloError;
use crate::math::fixed_point::UD60x18;
use crate::math::full_math::{mul_div, U256};
use anchor_lang::prelude::*;

/// Get sqrt price at a given tick as an 18-decimal value
///
/// Uses binary representation of tick to compute efficiently:
/// 1.0001^(-|tick|/2) = product of 1.0001^(-2^i/2) for each bit i set in |tick|
///
/// Below roughly tick -829000 the result rounds to zero at 18 decimals.
pub fn get_sqrt_price_at_tick(tick: i32) -> Result<UD60x18> {
    if tick < MIN_TICK_INDEX {
        return Err(SoloError::TickBelowMinimum.into());
    }
    if tick > MAX_TICK_INDEX {
        return Err(SoloError::TickAboveMaximum.into());
    }

    let abs_tick = tick.unsigned_abs();

    // ratio = 1 / sqrt(1.0001^|tick|) in Q128.128
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(0xfffcb933bd6fad37aa2d162d1a594001u128)
    } else {
        U256::one() << 128
    };

    const FACTORS: [(u32, u128); 19] = [
        (0x2, 0xfff97272373d413259a46990580e213a),
        (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
        (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
        (0x10, 0xffcb9843d60f6159c9db58835c926644),
        (0x20, 0xff973b41fa98c081472e6896dfb254c0),
        (0x40, 0xff2ea16466c96a3843ec78b326b52861),
        (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
        (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
        (0x200, 0xf987a7253ac413176f2b074cf7815e54),
        (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
        (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
        (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
        (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
        (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
        (0x8000, 0x31be135f97d08fd981231505542fcfa6),
        (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
        (0x20000, 0x5d6af8dedb81196699c329225ee604),
        (0x40000, 0x2216e584f5fa1ea926041bedfe98),
        (0x80000, 0x48a170391f7dc42444e8fa2),
    ];

    let q128 = U256::one() << 128;
    for (bit, factor) in FACTORS {
        if abs_tick & bit != 0 {
            ratio = mul_div(ratio, U256::from(factor), q128)?;
        }
    }

    // Positive ticks want the reciprocal: 2^256 / ratio, still Q128.128
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> 18 decimals
    Ok(UD60x18::from_raw(mul_div(ratio, U256::from(SCALE), q128)?))
}

/// Get price (sqrt price squared) at a given tick
pub fn get_price_at_tick(tick: i32) -> Result<UD60x18> {
    get_sqrt_price_at_tick(tick)?.sq()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_f64(value: UD60x18) -> f64 {
        value.to_string().parse::<f64>().unwrap()
    }

    #[test]
    fn test_sqrt_price_at_tick_zero() {
        // At tick 0, price = 1 exactly
        assert_eq!(get_sqrt_price_at_tick(0).unwrap(), UD60x18::ONE);
        assert_eq!(get_price_at_tick(0).unwrap(), UD60x18::ONE);
    }

    #[test]
    fn test_tick_bounds() {
        // Should succeed at bounds
        assert!(get_sqrt_price_at_tick(MIN_TICK_INDEX).is_ok());
        assert!(get_sqrt_price_at_tick(MAX_TICK_INDEX).is_ok());

        // Should fail outside bounds
        assert!(get_sqrt_price_at_tick(MIN_TICK_INDEX - 1).is_err());
        assert!(get_sqrt_price_at_tick(MAX_TICK_INDEX + 1).is_err());
    }

    #[test]
    fn test_sqrt_prices_at_various_ticks() {
        let sp_neg200 = get_sqrt_price_at_tick(-200).unwrap();
        let sp_0 = get_sqrt_price_at_tick(0).unwrap();
        let sp_200 = get_sqrt_price_at_tick(200).unwrap();

        // Check monotonicity: higher tick = higher price
        assert!(sp_neg200 < sp_0);
        assert!(sp_0 < sp_200);

        // At tick 200: sqrt_price = 1.0001^100 ≈ 1.010049
        assert!((to_f64(sp_200) - 1.0001f64.powi(100)).abs() < 1e-12);
        // At tick -200: sqrt_price = 1.0001^-100 ≈ 0.990050
        assert!((to_f64(sp_neg200) - 1.0001f64.powi(-100)).abs() < 1e-12);
    }

    #[test]
    fn test_reciprocal_symmetry() {
        for tick in [1, 60, 5000, 100_000, 400_000] {
            let up = get_sqrt_price_at_tick(tick).unwrap();
            let down = get_sqrt_price_at_tick(-tick).unwrap();
            let product = up.checked_mul(down).unwrap();
            let error = product.abs_diff(UD60x18::ONE);
            // one 10^-18 step on the small side dominates the error
            assert!(error < UD60x18::from_raw_u128(1_000_000_000_000), "tick {}", tick);
        }
    }

    #[test]
    fn test_extreme_ticks() {
        // Max tick: sqrt price = 1.0001^(887272/2), just under 2^64
        let top = to_f64(get_sqrt_price_at_tick(MAX_TICK_INDEX).unwrap());
        let expected = (MAX_TICK_INDEX as f64 / 2.0 * 1.0001f64.ln()).exp();
        assert!((top / expected - 1.0).abs() < 1e-9);
        assert!(top < 2f64.powi(64));
        // Min tick is below 18-decimal resolution
        assert_eq!(get_sqrt_price_at_tick(MIN_TICK_INDEX).unwrap(), UD60x18::ZERO);
    }
}
