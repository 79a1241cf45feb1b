use anchor_lang::prelude::*;
use crate::errors::SoloError;
use crate::math::fixed_point::UD60x18;
use crate::math::tick_band::FlexBand;
use crate::math::tick_math::get_sqrt_price_at_tick;
use crate::pool::SoloPool;
use crate::state::{PoolStatus, TrancheAmounts};
use crate::venue::{ExchangeVenue, ShareLedger};

impl<V: ExchangeVenue, L: ShareLedger> SoloPool<V, L> {
    /// Activate the pool with its first deposit
    ///
    /// `[tick_min, tick_max]` becomes both the initial flex band and the fixed
    /// range of the concentrated tranche. Shares minted equal the deposited
    /// value in Y.
    ///
    /// # Arguments
    /// * `block` - Current block height
    /// * `depositor` - Receives the minted shares
    /// * `amount_x` / `amount_y` - Deposited amounts
    /// * `tick_min` / `tick_max` - Initial band, as exchange tick indices
    pub fn first_deposit(
        &mut self,
        block: u64,
        depositor: Pubkey,
        amount_x: UD60x18,
        amount_y: UD60x18,
        tick_min: i32,
        tick_max: i32,
    ) -> Result<UD60x18> {
        require!(!self.state.is_active(), SoloError::PoolAlreadyInitialized);
        require!(
            !amount_x.is_zero() || !amount_y.is_zero(),
            SoloError::ZeroDepositAmount
        );
        require!(tick_min < tick_max, SoloError::InvalidTickRange);

        let band = FlexBand::from_tick_indices(tick_min, tick_max)?;
        let sqrt_p_min = get_sqrt_price_at_tick(tick_min)?;
        let sqrt_p_max = get_sqrt_price_at_tick(tick_max)?;

        let mut state = self.state;
        state.status = PoolStatus::Active;
        state.set_band(band);
        state.sqrt_p_min = sqrt_p_min;
        state.sqrt_p_max = sqrt_p_max;
        state.concentrated_tick_lower = tick_min;
        state.concentrated_tick_upper = tick_max;
        state.set_active(TrancheAmounts::new(amount_x, amount_y));
        state.last_rebalance_block = block;

        self.observe_price(&mut state)?;
        state.price_factor = state.spot_price()?;

        let shares = TrancheAmounts::new(amount_x, amount_y).value(state.sqrt_price)?;
        require!(!shares.is_zero(), SoloError::ZeroShares);

        // The supplied band is taken as is, only the tranches are split
        let tranches = self.reallocate(&mut state)?;
        self.commit_positions(&mut state, &tranches)?;
        self.ledger.mint_shares(depositor, shares)?;

        self.commit_state(state, block);

        msg!("Pool activated: band [{}, {}]", tick_min, tick_max);
        msg!("First deposit: X={}, Y={}, shares minted {}", amount_x, amount_y, shares);

        Ok(shares)
    }
}
