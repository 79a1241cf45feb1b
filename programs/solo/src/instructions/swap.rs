use anchor_lang::prelude::*;
use crate::errors::SoloError;
use crate::math::fixed_point::UD60x18;
use crate::math::swap_math::{
    gross_up, quote_exact_input, quote_exact_output, FlexSettlement, SettlementContext,
};
use crate::math::trade_safety::pre_trade_assessment;
use crate::pool::SoloPool;
use crate::state::{PoolState, TrancheAmounts};
use crate::venue::{ExchangeVenue, ShareLedger};

/// Swap parameters
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct SwapParams {
    /// Input amount when `exact_input`, output amount otherwise
    pub amount: UD60x18,
    /// Minimum output for exact input, maximum input for exact output
    pub other_amount_threshold: UD60x18,
    pub exact_input: bool,
    /// true when selling X for Y
    pub zero_for_one: bool,
}

/// Outcome of a swap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapResult {
    /// Gross input paid by the trader
    pub amount_in: UD60x18,
    /// Total output received by the trader
    pub amount_out: UD60x18,
    /// Part of the output paid by the flex tranche
    pub flex_amount_out: UD60x18,
}

/// `(input side, output side)` pair as `(x, y)`
fn directional(zero_for_one: bool, amount_in: UD60x18, amount_out: UD60x18) -> TrancheAmounts {
    if zero_for_one {
        TrancheAmounts::new(amount_in, amount_out)
    } else {
        TrancheAmounts::new(amount_out, amount_in)
    }
}

impl<V: ExchangeVenue, L: ShareLedger> SoloPool<V, L> {
    /// Execute a swap described by `params`
    pub fn swap(&mut self, block: u64, params: SwapParams) -> Result<SwapResult> {
        if params.exact_input {
            self.swap_exact_input(
                block,
                params.zero_for_one,
                params.amount,
                params.other_amount_threshold,
            )
        } else {
            self.swap_exact_output(
                block,
                params.zero_for_one,
                params.amount,
                params.other_amount_threshold,
            )
        }
    }

    /// Sell exactly `amount_in`, receiving at least `min_amount_out`
    pub fn swap_exact_input(
        &mut self,
        block: u64,
        zero_for_one: bool,
        amount_in: UD60x18,
        min_amount_out: UD60x18,
    ) -> Result<SwapResult> {
        self.require_active()?;
        require!(!amount_in.is_zero(), SoloError::ZeroSwapAmount);

        let mut state = self.state;
        let price_tick = self.observe_price(&mut state)?;
        self.refresh_flex_band(&mut state, price_tick, block)?;

        let ctx = self.settlement_context(&state)?;
        let flex = quote_exact_input(&ctx, zero_for_one, amount_in)?;
        self.check_trade_safety(&state, &ctx, zero_for_one, &flex)?;

        // The unsettled net input goes to the concentrated range on the exchange
        let routed_out = if flex.remainder.is_zero() {
            UD60x18::ZERO
        } else {
            self.venue.swap(zero_for_one, flex.remainder)?
        };
        let amount_out = flex.amount_out.checked_add(routed_out)?;
        require!(amount_out >= min_amount_out, SoloError::SlippageExceeded);

        let kept_in = amount_in.checked_sub(flex.remainder)?;
        self.settle(&mut state, zero_for_one, kept_in, &flex, block)?;

        let (token_in, token_out) = if zero_for_one { ("X", "Y") } else { ("Y", "X") };
        msg!("Swap: {} -> {}", token_in, token_out);
        msg!("In: {}, Out: {}, routed to exchange: {}", amount_in, amount_out, flex.remainder);

        Ok(SwapResult {
            amount_in,
            amount_out,
            flex_amount_out: flex.amount_out,
        })
    }

    /// Buy exactly `amount_out`, paying at most `max_amount_in`
    pub fn swap_exact_output(
        &mut self,
        block: u64,
        zero_for_one: bool,
        amount_out: UD60x18,
        max_amount_in: UD60x18,
    ) -> Result<SwapResult> {
        self.require_active()?;
        require!(!amount_out.is_zero(), SoloError::ZeroSwapAmount);

        let mut state = self.state;
        let price_tick = self.observe_price(&mut state)?;
        self.refresh_flex_band(&mut state, price_tick, block)?;

        let ctx = self.settlement_context(&state)?;
        let flex = quote_exact_output(&ctx, zero_for_one, amount_out)?;
        self.check_trade_safety(&state, &ctx, zero_for_one, &flex)?;

        let routed_in = if flex.remainder.is_zero() {
            UD60x18::ZERO
        } else {
            self.venue.swap_exact_output(zero_for_one, flex.remainder)?
        };
        let amount_in = gross_up(flex.amount_in.checked_add(routed_in)?, ctx.fee_rate)?;
        require!(amount_in <= max_amount_in, SoloError::InputExceedsMaximum);

        let kept_in = amount_in.checked_sub(routed_in)?;
        self.settle(&mut state, zero_for_one, kept_in, &flex, block)?;

        let (token_in, token_out) = if zero_for_one { ("X", "Y") } else { ("Y", "X") };
        msg!("Swap: {} -> {}", token_in, token_out);
        msg!("In: {}, Out: {}, bought on exchange: {}", amount_in, amount_out, flex.remainder);

        Ok(SwapResult {
            amount_in,
            amount_out,
            flex_amount_out: flex.amount_out,
        })
    }

    /// Reject the trade unless the projected flex tranche stays safe
    fn check_trade_safety(
        &self,
        state: &PoolState,
        ctx: &SettlementContext,
        zero_for_one: bool,
        flex: &FlexSettlement,
    ) -> Result<()> {
        let flex_delta_in = directional(zero_for_one, flex.amount_in, UD60x18::ZERO);
        let flex_delta_out = directional(zero_for_one, UD60x18::ZERO, flex.amount_out);

        let reserves = state
            .active()
            .checked_add(flex_delta_in)?
            .checked_sub(flex_delta_out)?;
        let flex_tranche = TrancheAmounts::new(ctx.flex_x, ctx.flex_y)
            .checked_add(flex_delta_in)?
            .checked_sub(flex_delta_out)?;

        let safe = pre_trade_assessment(
            ctx.sqrt_price,
            reserves.x,
            reserves.y,
            flex_tranche.x,
            flex_tranche.y,
            self.params.flex_percent,
            self.params.reserve_percent,
        )?;
        require!(safe, SoloError::UnsafeTrade);
        Ok(())
    }

    /// Book the trade into reserves, then re-split and re-place
    ///
    /// `kept_in` is the gross input the pool keeps (flex leg plus fee).
    fn settle(
        &mut self,
        state: &mut PoolState,
        zero_for_one: bool,
        kept_in: UD60x18,
        flex: &FlexSettlement,
        block: u64,
    ) -> Result<()> {
        self.unwind_positions(state)?;

        let active = state
            .active()
            .checked_add(directional(zero_for_one, kept_in, UD60x18::ZERO))?
            .checked_sub(directional(zero_for_one, UD60x18::ZERO, flex.amount_out))?;
        state.set_active(active);
        state.price_factor = flex.price_factor;

        self.rebalance(state, block)?;
        self.commit_state(*state, block);
        Ok(())
    }
}
