//! Swap Settlement Math
//!
//! Splits a trade between the flex tranche and the exchange.
//!
//! 1. Deduct the fee from the gross input.
//! 2. Quote the flex tranche as a constant-product curve over its virtual
//!    reserves `(L / sqrt_price, L * sqrt_price)` and move the price factor.
//! 3. Cap the flex leg at its output-side capacity. Whatever the flex tranche
//!    cannot absorb is routed to the concentrated position on the exchange.

use crate::errors::SoloError;
use crate::math::fixed_point::UD60x18;
use crate::math::full_math::mul_div_round_up;
use crate::math::liquidity_math::get_liquidity_for_amounts;
use anchor_lang::prelude::*;

/// Everything the settlement pipeline reads from the pool
#[derive(Debug, Clone, Copy)]
pub struct SettlementContext {
    pub fee_rate: UD60x18,
    /// Largest share of the flex output side a single swap may drain
    pub flex_decay_percent: UD60x18,
    pub sqrt_price: UD60x18,
    pub sqrt_p_min: UD60x18,
    pub sqrt_p_max: UD60x18,
    pub flex_x: UD60x18,
    pub flex_y: UD60x18,
    /// Price of X in Y before the trade
    pub price_factor: UD60x18,
}

/// Result of settling a trade against the flex tranche
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexSettlement {
    /// Net input absorbed by the flex tranche
    pub amount_in: UD60x18,
    /// Output paid from the flex tranche
    pub amount_out: UD60x18,
    /// Exact input: net input left for the exchange.
    /// Exact output: output still owed by the exchange.
    pub remainder: UD60x18,
    /// Price factor after the flex leg
    pub price_factor: UD60x18,
    /// True when the flex tranche settled the whole trade
    pub fully_settled: bool,
}

impl FlexSettlement {
    fn unsettled(remainder: UD60x18, price_factor: UD60x18) -> Self {
        Self {
            amount_in: UD60x18::ZERO,
            amount_out: UD60x18::ZERO,
            remainder,
            price_factor,
            fully_settled: false,
        }
    }
}

/// Step 1: deduct the fee from a directional input pair
///
/// Exactly one of `raw_amount_x` / `raw_amount_y` must be non-zero.
pub fn step1_apply_fee(
    raw_amount_x: UD60x18,
    raw_amount_y: UD60x18,
    fee_rate: UD60x18,
) -> Result<(UD60x18, UD60x18)> {
    require!(
        raw_amount_x.is_zero() != raw_amount_y.is_zero(),
        SoloError::InvalidTradeInput
    );

    let keep = fee_rate.complement()?;
    Ok((
        raw_amount_x.checked_mul(keep)?,
        raw_amount_y.checked_mul(keep)?,
    ))
}

/// Gross input needed so that `net` remains after the fee, rounded up
pub fn gross_up(net: UD60x18, fee_rate: UD60x18) -> Result<UD60x18> {
    net.div_up(fee_rate.complement()?)
}

/// Step 3a: move the price factor by `rate` against the input asset
///
/// X in lowers the price of X, Y in raises it. The untouched side is zero.
pub fn step3a_update_quote(
    zero_for_one: bool,
    price_factor: UD60x18,
    rate: UD60x18,
) -> Result<(UD60x18, UD60x18)> {
    if zero_for_one {
        Ok((price_factor.checked_mul(rate.complement()?)?, UD60x18::ZERO))
    } else {
        Ok((
            UD60x18::ZERO,
            price_factor.checked_mul(UD60x18::ONE.checked_add(rate)?)?,
        ))
    }
}

/// Step 3b: output the flex curve can release before price leaves the band
///
/// Returns `(0, y_capacity)` for X in and `(x_capacity, 0)` for Y in.
/// Both sides are zero when price is already outside `(sqrt_p_min, sqrt_p_max)`.
pub fn step3b_flex_capacity(
    zero_for_one: bool,
    sqrt_price: UD60x18,
    flex_x: UD60x18,
    flex_y: UD60x18,
    sqrt_p_min: UD60x18,
    sqrt_p_max: UD60x18,
) -> Result<(UD60x18, UD60x18)> {
    if sqrt_price <= sqrt_p_min || sqrt_price >= sqrt_p_max {
        return Ok((UD60x18::ZERO, UD60x18::ZERO));
    }

    let liquidity = get_liquidity_for_amounts(sqrt_price, sqrt_p_min, sqrt_p_max, flex_x, flex_y)?;

    if zero_for_one {
        // Price falls to sqrt_p_min
        let capacity_y = liquidity.checked_mul(sqrt_price.checked_sub(sqrt_p_min)?)?;
        Ok((UD60x18::ZERO, capacity_y))
    } else {
        // Price rises to sqrt_p_max
        let capacity_x = liquidity.checked_mul(
            UD60x18::ONE
                .checked_div(sqrt_price)?
                .checked_sub(UD60x18::ONE.checked_div(sqrt_p_max)?)?,
        )?;
        Ok((capacity_x, UD60x18::ZERO))
    }
}

/// Step 3c: settle the candidate pair against the output-side total
///
/// Returns `(true, candidate_x, candidate_y)` when the candidate output fits.
/// Otherwise the output is capped at the total, the input is scaled down in
/// proportion (rounded up), and `false` signals a remainder for the exchange.
pub fn step3c_final_split(
    zero_for_one: bool,
    candidate_x: UD60x18,
    candidate_y: UD60x18,
    total_x: UD60x18,
    total_y: UD60x18,
) -> Result<(bool, UD60x18, UD60x18)> {
    if zero_for_one {
        if candidate_y <= total_y {
            return Ok((true, candidate_x, candidate_y));
        }
        let settled_x = UD60x18::from_raw(mul_div_round_up(
            candidate_x.raw(),
            total_y.raw(),
            candidate_y.raw(),
        )?);
        Ok((false, settled_x, total_y))
    } else {
        if candidate_x <= total_x {
            return Ok((true, candidate_x, candidate_y));
        }
        let settled_y = UD60x18::from_raw(mul_div_round_up(
            candidate_y.raw(),
            total_x.raw(),
            candidate_x.raw(),
        )?);
        Ok((false, total_x, settled_y))
    }
}

/// Liquidity of the flex tranche over its band
pub fn flex_liquidity(ctx: &SettlementContext) -> Result<UD60x18> {
    get_liquidity_for_amounts(
        ctx.sqrt_price,
        ctx.sqrt_p_min,
        ctx.sqrt_p_max,
        ctx.flex_x,
        ctx.flex_y,
    )
}

/// Virtual reserves `(L / sqrt_price, L * sqrt_price)` of the flex curve
fn virtual_reserves(ctx: &SettlementContext) -> Result<(UD60x18, UD60x18)> {
    let liquidity = flex_liquidity(ctx)?;
    Ok((
        liquidity.checked_div(ctx.sqrt_price)?,
        liquidity.checked_mul(ctx.sqrt_price)?,
    ))
}

/// Output-side capacity of the flex tranche for one swap
fn capped_capacity(ctx: &SettlementContext, zero_for_one: bool) -> Result<(UD60x18, UD60x18)> {
    let (capacity_x, capacity_y) = step3b_flex_capacity(
        zero_for_one,
        ctx.sqrt_price,
        ctx.flex_x,
        ctx.flex_y,
        ctx.sqrt_p_min,
        ctx.sqrt_p_max,
    )?;
    Ok((
        capacity_x.checked_mul(ctx.flex_decay_percent)?,
        capacity_y.checked_mul(ctx.flex_decay_percent)?,
    ))
}

/// Settle an exact-input trade of `amount_in` gross input
pub fn quote_exact_input(
    ctx: &SettlementContext,
    zero_for_one: bool,
    amount_in: UD60x18,
) -> Result<FlexSettlement> {
    require!(!amount_in.is_zero(), SoloError::ZeroSwapAmount);

    let (raw_x, raw_y) = if zero_for_one {
        (amount_in, UD60x18::ZERO)
    } else {
        (UD60x18::ZERO, amount_in)
    };
    let (net_x, net_y) = step1_apply_fee(raw_x, raw_y, ctx.fee_rate)?;
    let net = if zero_for_one { net_x } else { net_y };

    let (capacity_x, capacity_y) = capped_capacity(ctx, zero_for_one)?;
    let capacity_out = if zero_for_one { capacity_y } else { capacity_x };
    if capacity_out.is_zero() || net.is_zero() {
        return Ok(FlexSettlement::unsettled(net, ctx.price_factor));
    }

    let (virtual_x, virtual_y) = virtual_reserves(ctx)?;
    if virtual_x.is_zero() || virtual_y.is_zero() {
        return Ok(FlexSettlement::unsettled(net, ctx.price_factor));
    }
    let rate = if zero_for_one {
        net.checked_div(virtual_x.checked_add(net)?)?
    } else {
        net.checked_div(virtual_y)?
    };

    let (quote_x, quote_y) = step3a_update_quote(zero_for_one, ctx.price_factor, rate)?;

    // Constant-product output `v_out * net / (v_in + net)`, the same trade as
    // `net * quote` without dividing by a price that may round to zero
    let (candidate_x, candidate_y, price_factor) = if zero_for_one {
        let out = virtual_y.mul_div(net, virtual_x.checked_add(net)?)?;
        (net, out, quote_x)
    } else {
        let out = virtual_x.mul_div(net, virtual_y.checked_add(net)?)?;
        (out, net, quote_y)
    };

    let (fully_settled, settled_x, settled_y) =
        step3c_final_split(zero_for_one, candidate_x, candidate_y, capacity_x, capacity_y)?;
    let (flex_in, flex_out) = if zero_for_one {
        (settled_x, settled_y)
    } else {
        (settled_y, settled_x)
    };

    Ok(FlexSettlement {
        amount_in: flex_in,
        amount_out: flex_out,
        remainder: net.checked_sub(flex_in)?,
        price_factor,
        fully_settled,
    })
}

/// Settle an exact-output trade of `amount_out`
///
/// `amount_in` of the result is net of fee. The caller adds whatever the
/// exchange charges for the remainder and grosses the sum up with [`gross_up`].
pub fn quote_exact_output(
    ctx: &SettlementContext,
    zero_for_one: bool,
    amount_out: UD60x18,
) -> Result<FlexSettlement> {
    require!(!amount_out.is_zero(), SoloError::ZeroSwapAmount);

    let (capacity_x, capacity_y) = capped_capacity(ctx, zero_for_one)?;
    let capacity_out = if zero_for_one { capacity_y } else { capacity_x };
    let flex_out = amount_out.min(capacity_out);
    if flex_out.is_zero() {
        return Ok(FlexSettlement::unsettled(amount_out, ctx.price_factor));
    }

    // Inverse of the constant-product output: in = v_in * out / (v_out - out)
    let (virtual_x, virtual_y) = virtual_reserves(ctx)?;
    if virtual_x.is_zero() || virtual_y.is_zero() {
        return Ok(FlexSettlement::unsettled(amount_out, ctx.price_factor));
    }
    let (virtual_in, virtual_out) = if zero_for_one {
        (virtual_x, virtual_y)
    } else {
        (virtual_y, virtual_x)
    };
    require!(flex_out < virtual_out, SoloError::InsufficientFlexLiquidity);
    let flex_in = virtual_in
        .mul_up(flex_out)?
        .div_up(virtual_out.checked_sub(flex_out)?)?;

    let rate = if zero_for_one {
        flex_in.checked_div(virtual_x.checked_add(flex_in)?)?
    } else {
        flex_in.checked_div(virtual_y)?
    };
    let (quote_x, quote_y) = step3a_update_quote(zero_for_one, ctx.price_factor, rate)?;
    let price_factor = if zero_for_one { quote_x } else { quote_y };

    let remainder = amount_out.checked_sub(flex_out)?;
    Ok(FlexSettlement {
        amount_in: flex_in,
        amount_out: flex_out,
        remainder,
        price_factor,
        fully_settled: remainder.is_zero(),
    })
}
