use crate::math::fixed_point::UD60x18;
use anchor_lang::prelude::*;

/// A pair of asset amounts
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrancheAmounts {
    pub x: UD60x18,
    pub y: UD60x18,
}

impl TrancheAmounts {
    pub const ZERO: Self = Self {
        x: UD60x18::ZERO,
        y: UD60x18::ZERO,
    };

    pub fn new(x: UD60x18, y: UD60x18) -> Self {
        Self { x, y }
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        Ok(Self::new(self.x.checked_add(other.x)?, self.y.checked_add(other.y)?))
    }

    pub fn checked_sub(self, other: Self) -> Result<Self> {
        Ok(Self::new(self.x.checked_sub(other.x)?, self.y.checked_sub(other.y)?))
    }

    /// Value in Y at price `sqrt_price²`
    pub fn value(&self, sqrt_price: UD60x18) -> Result<UD60x18> {
        self.x.mul_sq(sqrt_price)?.checked_add(self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

/// Computed view of the three tranches. Never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tranches {
    /// Idle single-sided buffer
    pub protected: TrancheAmounts,
    /// Fixed-range position on the exchange
    pub concentrated: TrancheAmounts,
    /// Repositioning band position on the exchange
    pub flex: TrancheAmounts,
}

impl Tranches {
    /// Concentrated + flex
    pub fn active(&self) -> Result<TrancheAmounts> {
        self.concentrated.checked_add(self.flex)
    }

    /// Sum of all three tranches
    pub fn total(&self) -> Result<TrancheAmounts> {
        self.active()?.checked_add(self.protected)
    }
}
