//! Flex Band Math
//!
//! Repositions the `[tick_min, tick_max]` band of the flex tranche as price
//! moves. A boundary that price has reached, or come within
//! `width * rate / 2` of, is reflected through price so that price lands in
//! the middle of the new band. All results are pinned to the tick domain.

use crate::constants::BAND_THRESHOLD_DIVISOR;
use crate::errors::SoloError;
use crate::math::fixed_point::{SD59x18, UD60x18};
use crate::state::PoolParameters;
use anchor_lang::prelude::*;

/// Tick boundaries of the flex tranche, scaled by 10^18
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlexBand {
    pub tick_min: SD59x18,
    pub tick_max: SD59x18,
}

impl FlexBand {
    pub fn new(tick_min: SD59x18, tick_max: SD59x18) -> Result<Self> {
        require!(tick_min <= tick_max, SoloError::InvalidTickRange);
        Ok(Self {
            tick_min: tick_min.clamp_to_tick_domain(),
            tick_max: tick_max.clamp_to_tick_domain(),
        })
    }

    /// Band from whole exchange tick indices
    pub fn from_tick_indices(tick_min: i32, tick_max: i32) -> Result<Self> {
        Self::new(
            SD59x18::from_tick_index(tick_min),
            SD59x18::from_tick_index(tick_max),
        )
    }

    pub fn width(&self) -> Result<SD59x18> {
        self.tick_max.checked_sub(self.tick_min)
    }

    /// Price strictly inside the band
    pub fn contains(&self, tick: SD59x18) -> bool {
        self.tick_min < tick && tick < self.tick_max
    }

    /// Widen symmetrically around the centre until the width reaches
    /// `min_width`. The odd unit, if any, goes to the upper side.
    pub fn enforce_min_width(self, min_width: UD60x18) -> Result<Self> {
        let min_width = SD59x18::try_from(min_width)?;
        let width = self.width()?;
        if width >= min_width {
            return Ok(self);
        }

        let deficit = min_width.checked_sub(width)?;
        let lower_extension = SD59x18::from_raw(deficit.raw() / 2);
        let upper_extension = deficit.checked_sub(lower_extension)?;

        Ok(Self {
            tick_min: self
                .tick_min
                .checked_sub(lower_extension)?
                .clamp_to_tick_domain(),
            tick_max: self
                .tick_max
                .checked_add(upper_extension)?
                .clamp_to_tick_domain(),
        })
    }

    /// Whole-tick range used to place the flex position on the exchange
    pub fn tick_indices(&self) -> Result<(i32, i32)> {
        Ok((self.tick_min.to_tick_index()?, self.tick_max.to_tick_index()?))
    }
}

/// Distance from a boundary inside which that boundary is repositioned
fn threshold(band: &FlexBand, rate: UD60x18) -> Result<SD59x18> {
    band.width()?
        .mul_unsigned(rate)?
        .div_unsigned(UD60x18::from_int(BAND_THRESHOLD_DIVISOR))
}

/// Lower boundary of the refreshed band
///
/// Moves to `2p - tick_max` when `p <= tick_min` or `p - tick_min < threshold`
pub fn compute_tmin(band: &FlexBand, price_tick: SD59x18, rate: UD60x18) -> Result<SD59x18> {
    let threshold = threshold(band, rate)?;
    let distance = price_tick.checked_sub(band.tick_min)?;

    if price_tick <= band.tick_min || distance < threshold {
        let reflected = price_tick
            .checked_add(price_tick)?
            .checked_sub(band.tick_max)?;
        Ok(reflected.clamp_to_tick_domain())
    } else {
        Ok(band.tick_min)
    }
}

/// Upper boundary of the refreshed band
///
/// Moves to `2p - tick_min` when `p >= tick_max` or `tick_max - p < threshold`
pub fn compute_tmax(band: &FlexBand, price_tick: SD59x18, rate: UD60x18) -> Result<SD59x18> {
    let threshold = threshold(band, rate)?;
    let distance = band.tick_max.checked_sub(price_tick)?;

    if price_tick >= band.tick_max || distance < threshold {
        let reflected = price_tick
            .checked_add(price_tick)?
            .checked_sub(band.tick_min)?;
        Ok(reflected.clamp_to_tick_domain())
    } else {
        Ok(band.tick_max)
    }
}

/// Both boundaries, each computed from the band as it was before the call
pub fn compute_flex_position(
    band: &FlexBand,
    price_tick: SD59x18,
    rate: UD60x18,
) -> Result<FlexBand> {
    Ok(FlexBand {
        tick_min: compute_tmin(band, price_tick, rate)?,
        tick_max: compute_tmax(band, price_tick, rate)?,
    })
}

/// Band sensitivity after `elapsed_blocks` without a rebalance
///
/// rate = min(1, fee_rate + decay_percent * min(1, elapsed / rebalance_speed))
pub fn band_rate(params: &PoolParameters, elapsed_blocks: u64) -> Result<UD60x18> {
    let elapsed = UD60x18::from_int(elapsed_blocks);
    let progress = elapsed
        .checked_div(params.rebalance_speed)?
        .min(UD60x18::ONE);
    let rate = params
        .fee_rate
        .checked_add(params.decay_percent.checked_mul(progress)?)?;
    Ok(rate.min(UD60x18::ONE))
}

/// Full band refresh: reposition around price, then widen to the minimum width
pub fn refresh_band(
    params: &PoolParameters,
    band: &FlexBand,
    price_tick: SD59x18,
    elapsed_blocks: u64,
) -> Result<FlexBand> {
    let rate = band_rate(params, elapsed_blocks)?;
    compute_flex_position(band, price_tick, rate)?.enforce_min_width(params.min_band_width)
}
