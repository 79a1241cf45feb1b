use crate::constants::defaults::*;
use crate::errors::SoloError;
use crate::math::fixed_point::UD60x18;
use anchor_lang::prelude::*;

/// Pool configuration, fixed at pool creation
/// All values are 18-decimal fixed point
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolParameters {
    /// Swap fee taken from the gross input
    pub fee_rate: UD60x18,

    /// Minimum flex band width, in ticks
    pub min_band_width: UD60x18,

    /// Share of the band rate that grows with blocks since the last rebalance
    pub decay_percent: UD60x18,

    /// Blocks until the time component of the band rate saturates
    pub rebalance_speed: UD60x18,

    /// Largest share of the flex output side a single swap may drain
    pub flex_decay_percent: UD60x18,

    /// Share of active reserves placed in the flex band
    pub flex_percent: UD60x18,

    /// Share of reserve value that must stay outside the flex band
    pub reserve_percent: UD60x18,
}

impl Default for PoolParameters {
    fn default() -> Self {
        Self {
            fee_rate: UD60x18::from_raw_u128(DEFAULT_FEE_RATE),
            min_band_width: UD60x18::from_raw_u128(DEFAULT_MIN_BAND_WIDTH),
            decay_percent: UD60x18::from_raw_u128(DEFAULT_DECAY_PERCENT),
            rebalance_speed: UD60x18::from_raw_u128(DEFAULT_REBALANCE_SPEED),
            flex_decay_percent: UD60x18::from_raw_u128(DEFAULT_FLEX_DECAY_PERCENT),
            flex_percent: UD60x18::from_raw_u128(DEFAULT_FLEX_PERCENT),
            reserve_percent: UD60x18::from_raw_u128(DEFAULT_RESERVE_PERCENT),
        }
    }
}

impl PoolParameters {
    pub const LEN: usize = 7 * 32;

    pub fn validate(&self) -> Result<()> {
        require!(self.fee_rate < UD60x18::ONE, SoloError::InvalidParameters);
        require!(
            self.decay_percent <= UD60x18::ONE
                && self.flex_decay_percent <= UD60x18::ONE
                && self.flex_percent <= UD60x18::ONE
                && self.reserve_percent <= UD60x18::ONE,
            SoloError::InvalidParameters
        );
        require!(
            self.flex_percent.checked_add(self.reserve_percent)? <= UD60x18::ONE,
            SoloError::InvalidParameters
        );
        require!(!self.rebalance_speed.is_zero(), SoloError::InvalidParameters);
        Ok(())
    }
}
