use anchor_lang::prelude::*;
use crate::errors::SoloError;
use crate::math::fixed_point::UD60x18;
use crate::pool::SoloPool;
use crate::state::TrancheAmounts;
use crate::venue::{ExchangeVenue, ShareLedger};

impl<V: ExchangeVenue, L: ShareLedger> SoloPool<V, L> {
    /// Add liquidity to an active pool
    ///
    /// Shares are minted in proportion to the value contributed:
    /// shares = value * total_shares / pool_value
    ///
    /// # Arguments
    /// * `block` - Current block height
    /// * `recipient` - Receives the minted shares
    /// * `amount_x` / `amount_y` - Deposited amounts, either may be zero
    pub fn deposit(
        &mut self,
        block: u64,
        recipient: Pubkey,
        amount_x: UD60x18,
        amount_y: UD60x18,
    ) -> Result<UD60x18> {
        self.require_active()?;
        let contributed = TrancheAmounts::new(amount_x, amount_y);
        require!(!contributed.is_zero(), SoloError::ZeroDepositAmount);

        let mut state = self.state;
        self.observe_price(&mut state)?;
        self.unwind_positions(&mut state)?;

        let value = contributed.value(state.sqrt_price)?;
        let pool_value = state.holdings()?.value(state.sqrt_price)?;
        let total_shares = self.ledger.total_shares();

        let shares = if total_shares.is_zero() || pool_value.is_zero() {
            value
        } else {
            value.mul_div(total_shares, pool_value)?
        };
        require!(!shares.is_zero(), SoloError::ZeroShares);

        state.set_active(state.active().checked_add(contributed)?);
        let tranches = self.rebalance(&mut state, block)?;
        self.ledger.mint_shares(recipient, shares)?;

        self.commit_state(state, block);

        msg!("Deposit: value {}, shares minted {}", value, shares);
        msg!(
            "Tranches: protected {}/{}, concentrated {}/{}, flex {}/{}",
            tranches.protected.x,
            tranches.protected.y,
            tranches.concentrated.x,
            tranches.concentrated.y,
            tranches.flex.x,
            tranches.flex.y
        );

        Ok(shares)
    }
}
