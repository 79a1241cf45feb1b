use crate::math::fixed_point::{SD59x18, UD60x18};
use crate::math::tick_band::FlexBand;
use crate::state::TrancheAmounts;
use anchor_lang::prelude::*;

/// Lifecycle of a pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoolStatus {
    /// Waiting for the first deposit
    #[default]
    Uninitialized,
    /// Holding reserves
    Active,
}

/// A range position the pool holds on the exchange
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangePosition {
    /// Lower tick of the position range
    pub tick_lower: i32,

    /// Upper tick of the position range
    pub tick_upper: i32,

    /// Liquidity minted by the exchange
    pub liquidity: u128,

    /// Token X actually placed
    pub amount_x: UD60x18,

    /// Token Y actually placed
    pub amount_y: UD60x18,
}

impl RangePosition {
    pub fn is_open(&self) -> bool {
        self.liquidity != 0
    }

    pub fn amounts(&self) -> TrancheAmounts {
        TrancheAmounts::new(self.amount_x, self.amount_y)
    }
}

/// Mutable pool state
/// Only the pool state machine writes it, and only after an operation succeeds
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolState {
    pub status: PoolStatus,

    /// Active token X (concentrated + flex)
    pub reserve_x: UD60x18,

    /// Active token Y (concentrated + flex)
    pub reserve_y: UD60x18,

    /// Idle token X of the protected tranche
    pub protected_x: UD60x18,

    /// Idle token Y of the protected tranche
    pub protected_y: UD60x18,

    /// Lower flex band boundary, scaled tick
    pub tick_min: SD59x18,

    /// Upper flex band boundary, scaled tick
    pub tick_max: SD59x18,

    /// sqrt price at tick_min
    pub sqrt_p_min: UD60x18,

    /// sqrt price at tick_max
    pub sqrt_p_max: UD60x18,

    /// Settlement price of X in Y
    pub price_factor: UD60x18,

    /// sqrt price at the last observed exchange tick
    pub sqrt_price: UD60x18,

    /// Fixed range of the concentrated tranche
    pub concentrated_tick_lower: i32,
    pub concentrated_tick_upper: i32,

    pub flex_position: RangePosition,
    pub concentrated_position: RangePosition,

    /// Block of the last flex band move
    pub last_rebalance_block: u64,

    /// Block of the last successful operation
    pub last_update_block: u64,
}

impl PoolState {
    pub fn is_active(&self) -> bool {
        self.status == PoolStatus::Active
    }

    pub fn band(&self) -> FlexBand {
        FlexBand {
            tick_min: self.tick_min,
            tick_max: self.tick_max,
        }
    }

    pub fn set_band(&mut self, band: FlexBand) {
        self.tick_min = band.tick_min;
        self.tick_max = band.tick_max;
    }

    pub fn active(&self) -> TrancheAmounts {
        TrancheAmounts::new(self.reserve_x, self.reserve_y)
    }

    pub fn set_active(&mut self, amounts: TrancheAmounts) {
        self.reserve_x = amounts.x;
        self.reserve_y = amounts.y;
    }

    pub fn protected(&self) -> TrancheAmounts {
        TrancheAmounts::new(self.protected_x, self.protected_y)
    }

    pub fn set_protected(&mut self, amounts: TrancheAmounts) {
        self.protected_x = amounts.x;
        self.protected_y = amounts.y;
    }

    /// Everything the pool owns: active plus protected
    pub fn holdings(&self) -> Result<TrancheAmounts> {
        self.active().checked_add(self.protected())
    }

    /// Spot price of X in Y at the last observed tick
    /// Rounds to zero below 10^-18. Valuation goes through the sqrt price.
    pub fn spot_price(&self) -> Result<UD60x18> {
        self.sqrt_price.sq()
    }
}
