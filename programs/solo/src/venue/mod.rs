//! External Collaborators
//!
//! The pool never talks to the exchange or the share token directly. The
//! enclosing program binds these traits to its CPI calls; tests bind them
//! to in-memory mocks.
//!
//! Every call must be all-or-nothing: an `Err` aborts the whole pool
//! operation and the pool discards its working copy of the state.

use crate::math::fixed_point::UD60x18;
use anchor_lang::prelude::*;

/// Liquidity and amounts actually accepted by the exchange for a new range
/// position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeDeposit {
    pub liquidity: u128,
    pub amount_x: UD60x18,
    pub amount_y: UD60x18,
}

/// Concentrated-liquidity exchange the pool places its positions on
pub trait ExchangeVenue {
    /// Place up to `(amount_x, amount_y)` in `[tick_lower, tick_upper]`
    fn create_range_position(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        amount_x: UD60x18,
        amount_y: UD60x18,
    ) -> Result<RangeDeposit>;

    /// Burn `liquidity` from the position at `[tick_lower, tick_upper]`
    /// Returns the token amounts released
    fn remove_range_position(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> Result<(UD60x18, UD60x18)>;

    /// Current exchange tick
    fn current_tick(&self) -> Result<i32>;

    /// Sell exactly `amount_in`. Returns the output received.
    fn swap(&mut self, zero_for_one: bool, amount_in: UD60x18) -> Result<UD60x18>;

    /// Buy exactly `amount_out`. Returns the input spent.
    fn swap_exact_output(&mut self, zero_for_one: bool, amount_out: UD60x18) -> Result<UD60x18>;
}

/// Fungible pool share bookkeeping
pub trait ShareLedger {
    fn mint_shares(&mut self, recipient: Pubkey, amount: UD60x18) -> Result<()>;

    fn burn_shares(&mut self, owner: Pubkey, amount: UD60x18) -> Result<()>;

    fn total_shares(&self) -> UD60x18;

    fn balance_of(&self, owner: Pubkey) -> UD60x18;
}
