use anchor_lang::prelude::*;
use crate::errors::SoloError;
use crate::math::fixed_point::UD60x18;
use crate::pool::SoloPool;
use crate::state::TrancheAmounts;
use crate::venue::{ExchangeVenue, ShareLedger};

/// `amounts * shares / total_shares` on both sides, rounded down
fn pro_rata(
    amounts: TrancheAmounts,
    shares: UD60x18,
    total_shares: UD60x18,
) -> Result<TrancheAmounts> {
    Ok(TrancheAmounts::new(
        amounts.x.mul_div(shares, total_shares)?,
        amounts.y.mul_div(shares, total_shares)?,
    ))
}

impl<V: ExchangeVenue, L: ShareLedger> SoloPool<V, L> {
    /// Burn `shares` and pay out the matching slice of every tranche
    ///
    /// # Arguments
    /// * `block` - Current block height
    /// * `owner` - Share owner
    /// * `shares` - Shares to burn
    ///
    /// # Returns
    /// The X and Y paid out
    pub fn withdraw(
        &mut self,
        block: u64,
        owner: Pubkey,
        shares: UD60x18,
    ) -> Result<(UD60x18, UD60x18)> {
        self.require_active()?;
        require!(!shares.is_zero(), SoloError::ZeroShares);
        require!(
            self.ledger.balance_of(owner) >= shares,
            SoloError::InsufficientShares
        );
        let total_shares = self.ledger.total_shares();

        let mut state = self.state;
        self.observe_price(&mut state)?;
        self.unwind_positions(&mut state)?;

        let active_out = pro_rata(state.active(), shares, total_shares)?;
        let protected_out = pro_rata(state.protected(), shares, total_shares)?;
        state.set_active(state.active().checked_sub(active_out)?);
        state.set_protected(state.protected().checked_sub(protected_out)?);
        let payout = active_out.checked_add(protected_out)?;

        self.rebalance(&mut state, block)?;
        self.ledger.burn_shares(owner, shares)?;

        self.commit_state(state, block);

        msg!("Withdraw: shares burned {}", shares);
        msg!("Paid out: X={}, Y={}", payout.x, payout.y);

        Ok((payout.x, payout.y))
    }
}
