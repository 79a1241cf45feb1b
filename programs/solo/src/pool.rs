//! Solo Pool
//!
//! The pool state machine. Each operation copies the state, runs
//! read -> compute -> write against the copy and stores it only on success.
//! Operations themselves live in `instructions`.

use crate::errors::SoloError;
use crate::math::allocation::{compute_fx_fy, compute_tranches};
use crate::math::fixed_point::{SD59x18, UD60x18};
use crate::math::swap_math::SettlementContext;
use crate::math::tick_band::refresh_band;
use crate::math::tick_math::get_sqrt_price_at_tick;
use crate::state::{PoolParameters, PoolState, RangePosition, TrancheAmounts, Tranches};
use crate::venue::{ExchangeVenue, ShareLedger};
use anchor_lang::prelude::*;

/// A three-tranche pool over an exchange venue and a share ledger
pub struct SoloPool<V: ExchangeVenue, L: ShareLedger> {
    pub(crate) params: PoolParameters,
    pub(crate) state: PoolState,
    pub(crate) venue: V,
    pub(crate) ledger: L,
}

impl<V: ExchangeVenue, L: ShareLedger> SoloPool<V, L> {
    pub fn new(params: PoolParameters, venue: V, ledger: L) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: PoolState::default(),
            venue,
            ledger,
        })
    }

    pub fn params(&self) -> &PoolParameters {
        &self.params
    }

    pub fn state(&self) -> &PoolState {
        &self.state
    }

    pub fn venue(&self) -> &V {
        &self.venue
    }

    pub fn venue_mut(&mut self) -> &mut V {
        &mut self.venue
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    // ═══════════════════════════════════════════════════════════════════════
    // VIEWS
    // ═══════════════════════════════════════════════════════════════════════

    /// All three tranches at the last observed price
    pub fn tranches(&self) -> Result<Tranches> {
        let active = self.state.active();
        let (flex_x, flex_y) = compute_fx_fy(
            active.x,
            active.y,
            self.state.sqrt_price,
            self.state.sqrt_p_min,
            self.state.sqrt_p_max,
            self.params.flex_percent,
        )?;
        Ok(Tranches {
            protected: self.state.protected(),
            concentrated: active.checked_sub(TrancheAmounts::new(flex_x, flex_y))?,
            flex: TrancheAmounts::new(flex_x, flex_y),
        })
    }

    pub fn protected_position(&self) -> TrancheAmounts {
        self.state.protected()
    }

    pub fn concentrated_position(&self) -> Result<TrancheAmounts> {
        Ok(self.tranches()?.concentrated)
    }

    pub fn flex_position(&self) -> Result<TrancheAmounts> {
        Ok(self.tranches()?.flex)
    }

    /// Everything the pool owns
    pub fn holdings(&self) -> Result<TrancheAmounts> {
        self.state.holdings()
    }

    /// Holdings valued in Y at the last observed price
    pub fn total_value(&self) -> Result<UD60x18> {
        self.state.holdings()?.value(self.state.sqrt_price)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // OPERATION STEPS
    // ═══════════════════════════════════════════════════════════════════════

    pub(crate) fn require_active(&self) -> Result<()> {
        require!(self.state.is_active(), SoloError::PoolNotInitialized);
        Ok(())
    }

    /// Read the exchange tick into `state`. Returns it as a scaled tick.
    pub(crate) fn observe_price(&self, state: &mut PoolState) -> Result<SD59x18> {
        let tick = self.venue.current_tick()?;
        state.sqrt_price = get_sqrt_price_at_tick(tick)?;
        Ok(SD59x18::from_tick_index(tick))
    }

    /// Pull both positions off the exchange
    ///
    /// Active reserves become `reserve - placed + removed` so that anything
    /// the exchange changed while the positions were live is picked up.
    pub(crate) fn unwind_positions(&mut self, state: &mut PoolState) -> Result<()> {
        for position in [state.flex_position, state.concentrated_position] {
            if !position.is_open() {
                continue;
            }
            let (removed_x, removed_y) = self.venue.remove_range_position(
                position.tick_lower,
                position.tick_upper,
                position.liquidity,
            )?;
            let active = state
                .active()
                .checked_sub(position.amounts())?
                .checked_add(TrancheAmounts::new(removed_x, removed_y))?;
            state.set_active(active);
        }
        state.flex_position = RangePosition::default();
        state.concentrated_position = RangePosition::default();
        Ok(())
    }

    /// Reposition the flex band around `price_tick`
    pub(crate) fn refresh_flex_band(
        &self,
        state: &mut PoolState,
        price_tick: SD59x18,
        block: u64,
    ) -> Result<()> {
        let band = state.band();
        let elapsed = block.saturating_sub(state.last_rebalance_block);
        let refreshed = refresh_band(&self.params, &band, price_tick, elapsed)?;

        if refreshed != band {
            state.set_band(refreshed);
            state.last_rebalance_block = block;
            msg!("Flex band refreshed: [{}, {}]", refreshed.tick_min, refreshed.tick_max);
        }

        let (tick_lower, tick_upper) = refreshed.tick_indices()?;
        state.sqrt_p_min = get_sqrt_price_at_tick(tick_lower)?;
        state.sqrt_p_max = get_sqrt_price_at_tick(tick_upper)?;
        Ok(())
    }

    /// Re-split holdings into the three tranches
    pub(crate) fn reallocate(&self, state: &mut PoolState) -> Result<Tranches> {
        let holdings = state.holdings()?;
        let tranches = compute_tranches(
            holdings.x,
            holdings.y,
            state.sqrt_price,
            state.sqrt_p_min,
            state.sqrt_p_max,
            self.params.flex_percent,
        )?;
        state.set_protected(tranches.protected);
        state.set_active(tranches.active()?);
        Ok(tranches)
    }

    /// Place the flex and concentrated tranches on the exchange
    pub(crate) fn commit_positions(
        &mut self,
        state: &mut PoolState,
        tranches: &Tranches,
    ) -> Result<()> {
        let (flex_lower, flex_upper) = state.band().tick_indices()?;
        state.flex_position = self.place(flex_lower, flex_upper, tranches.flex)?;
        state.concentrated_position = self.place(
            state.concentrated_tick_lower,
            state.concentrated_tick_upper,
            tranches.concentrated,
        )?;
        Ok(())
    }

    fn place(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        amounts: TrancheAmounts,
    ) -> Result<RangePosition> {
        if tick_lower >= tick_upper || amounts.is_zero() {
            return Ok(RangePosition::default());
        }
        let deposit = self
            .venue
            .create_range_position(tick_lower, tick_upper, amounts.x, amounts.y)?;
        Ok(RangePosition {
            tick_lower,
            tick_upper,
            liquidity: deposit.liquidity,
            amount_x: deposit.amount_x,
            amount_y: deposit.amount_y,
        })
    }

    /// Band refresh, re-split and placement in one step
    pub(crate) fn rebalance(&mut self, state: &mut PoolState, block: u64) -> Result<Tranches> {
        let price_tick = self.observe_price(state)?;
        self.refresh_flex_band(state, price_tick, block)?;
        let tranches = self.reallocate(state)?;
        self.commit_positions(state, &tranches)?;
        Ok(tranches)
    }

    /// Settlement inputs for the current working state
    pub(crate) fn settlement_context(&self, state: &PoolState) -> Result<SettlementContext> {
        let holdings = state.holdings()?;
        let tranches = compute_tranches(
            holdings.x,
            holdings.y,
            state.sqrt_price,
            state.sqrt_p_min,
            state.sqrt_p_max,
            self.params.flex_percent,
        )?;
        Ok(SettlementContext {
            fee_rate: self.params.fee_rate,
            flex_decay_percent: self.params.flex_decay_percent,
            sqrt_price: state.sqrt_price,
            sqrt_p_min: state.sqrt_p_min,
            sqrt_p_max: state.sqrt_p_max,
            flex_x: tranches.flex.x,
            flex_y: tranches.flex.y,
            price_factor: state.spot_price()?,
        })
    }

    /// Store the working state
    pub(crate) fn commit_state(&mut self, mut state: PoolState, block: u64) {
        state.last_update_block = block;
        self.state = state;
    }
}
