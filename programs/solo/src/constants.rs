// Solo Protocol Constants
// Tick domain follows the underlying Uniswap V3 style exchange

/// Number of fractional decimal digits in every fixed-point value
pub const DECIMALS: u32 = 18;

/// Fixed-point scale (10^18 = 1.0)
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Minimum tick index of the underlying exchange
pub const MIN_TICK_INDEX: i32 = -887272;

/// Maximum tick index of the underlying exchange
pub const MAX_TICK_INDEX: i32 = 887272;

/// Minimum tick, scaled by 10^18 (stored form of flex band boundaries)
pub const MIN_TICK: i128 = MIN_TICK_INDEX as i128 * SCALE as i128;

/// Maximum tick, scaled by 10^18
pub const MAX_TICK: i128 = MAX_TICK_INDEX as i128 * SCALE as i128;

/// Divisor applied to `width * rate` to obtain the near-boundary distance
/// at which a flex boundary is re-centred around price
pub const BAND_THRESHOLD_DIVISOR: u64 = 2;

/// Default pool parameters (scaled by 10^18)
pub mod defaults {
    /// 1.00% swap fee
    pub const DEFAULT_FEE_RATE: u128 = 10_000_000_000_000_000;

    /// 20 ticks minimum flex band width
    pub const DEFAULT_MIN_BAND_WIDTH: u128 = 20_000_000_000_000_000_000;

    /// 50% of the band rate comes from elapsed time
    pub const DEFAULT_DECAY_PERCENT: u128 = 500_000_000_000_000_000;

    /// 1500 blocks until time decay saturates
    pub const DEFAULT_REBALANCE_SPEED: u128 = 1_500_000_000_000_000_000_000;

    /// A single swap may drain at most 50% of the flex output side
    pub const DEFAULT_FLEX_DECAY_PERCENT: u128 = 500_000_000_000_000_000;

    /// 20% of active value sits in the flex band
    pub const DEFAULT_FLEX_PERCENT: u128 = 200_000_000_000_000_000;

    /// 10% of active value must stay outside the flex band
    pub const DEFAULT_RESERVE_PERCENT: u128 = 100_000_000_000_000_000;
}
