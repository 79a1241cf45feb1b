//! Fixed-Point Math
//!
//! Decimal fixed point with 18 fractional digits.
//!
//! - `UD60x18`: non-negative, 256-bit backing. Used for amounts, prices and
//!   percentages.
//! - `SD59x18`: signed, i128 backing. Used for tick values; the whole tick
//!   domain (±887272 · 10^18) fits with room to spare.
//!
//! Every operation is checked. Nothing saturates or wraps silently.

use std::fmt;

use crate::constants::{DECIMALS, MAX_TICK, MIN_TICK, SCALE};
use crate::errors::SoloError;
use crate::math::full_math::{isqrt, mul_div, mul_div_round_up, narrow, widen, U256};
use anchor_lang::prelude::*;

/// 10^18 as a U256
const SCALE_U256: U256 = U256([SCALE as u64, 0, 0, 0]);

/// Unsigned 60.18-decimal fixed-point number
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UD60x18(U256);

impl UD60x18 {
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));
    pub const ONE: Self = Self(U256([SCALE as u64, 0, 0, 0]));
    pub const TWO: Self = Self(U256([2 * SCALE as u64, 0, 0, 0]));
    pub const FOUR: Self = Self(U256([4 * SCALE as u64, 0, 0, 0]));

    /// Wrap an already-scaled integer
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Wrap an already-scaled u128
    pub fn from_raw_u128(raw: u128) -> Self {
        Self(U256::from(raw))
    }

    /// Whole number `n` (n · 10^18)
    pub fn from_int(n: u64) -> Self {
        // n < 2^64 and 10^18 < 2^60, product fits easily
        Self(U256::from(n) * SCALE_U256)
    }

    /// `numerator / denominator` as a fixed-point value, rounded down
    pub fn from_ratio(numerator: u64, denominator: u64) -> Result<Self> {
        Ok(Self(mul_div(
            U256::from(numerator),
            SCALE_U256,
            U256::from(denominator),
        )?))
    }

    /// The scaled integer
    pub fn raw(self) -> U256 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        let sum = self.0.checked_add(rhs.0).ok_or(SoloError::MathOverflow)?;
        Ok(Self(sum))
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        let diff = self.0.checked_sub(rhs.0).ok_or(SoloError::MathUnderflow)?;
        Ok(Self(diff))
    }

    /// `self * rhs`, rounded down
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        Ok(Self(mul_div(self.0, rhs.0, SCALE_U256)?))
    }

    /// `self * rhs`, rounded up
    pub fn mul_up(self, rhs: Self) -> Result<Self> {
        Ok(Self(mul_div_round_up(self.0, rhs.0, SCALE_U256)?))
    }

    /// `self / rhs`, rounded down
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(SoloError::DivisionByZero.into());
        }
        Ok(Self(mul_div(self.0, SCALE_U256, rhs.0)?))
    }

    /// `self / rhs`, rounded up
    pub fn div_up(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(SoloError::DivisionByZero.into());
        }
        Ok(Self(mul_div_round_up(self.0, SCALE_U256, rhs.0)?))
    }

    /// `self * numerator / denominator` with a single rounding, rounded down
    pub fn mul_div(self, numerator: Self, denominator: Self) -> Result<Self> {
        Ok(Self(mul_div(self.0, numerator.0, denominator.0)?))
    }

    /// `self * factor * factor` with a single rounding, rounded down
    ///
    /// Values an amount of X in Y from a sqrt price without first squaring
    /// it, which would lose every price below 10^-18.
    pub fn mul_sq(self, factor: Self) -> Result<Self> {
        let product = (widen(self.0) * widen(factor.0))
            .checked_mul(widen(factor.0))
            .ok_or(SoloError::MathOverflow)?;
        narrow(product / (widen(SCALE_U256) * widen(SCALE_U256)))
            .map(Self)
    }

    /// `self / (factor * factor)` with a single rounding, rounded down
    pub fn div_sq(self, factor: Self) -> Result<Self> {
        if factor.is_zero() {
            return Err(SoloError::DivisionByZero.into());
        }
        let numerator = widen(self.0) * widen(SCALE_U256) * widen(SCALE_U256);
        narrow(numerator / (widen(factor.0) * widen(factor.0))).map(Self)
    }

    /// `self * self`. Values below 10^-9 square to zero.
    pub fn sq(self) -> Result<Self> {
        self.checked_mul(self)
    }

    /// Square root, rounded down
    pub fn sqrt(self) -> Result<Self> {
        // sqrt(raw / 10^18) · 10^18 = sqrt(raw · 10^18)
        let root = isqrt(widen(self.0) * widen(SCALE_U256));
        Ok(Self(narrow(root)?))
    }

    /// `ONE - self`, used for fee and percentage complements
    pub fn complement(self) -> Result<Self> {
        Self::ONE.checked_sub(self)
    }

    /// |self - other|
    pub fn abs_diff(self, other: Self) -> Self {
        if self >= other {
            Self(self.0 - other.0)
        } else {
            Self(other.0 - self.0)
        }
    }
}

impl fmt::Display for UD60x18 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (int, frac) = self.0.div_mod(SCALE_U256);
        write!(f, "{}.{:0width$}", int, frac.low_u64(), width = DECIMALS as usize)
    }
}

impl AnchorSerialize for UD60x18 {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let U256(ref words) = self.0;
        words.serialize(writer)
    }
}

impl AnchorDeserialize for UD60x18 {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let words = <[u64; 4]>::deserialize_reader(reader)?;
        Ok(Self(U256(words)))
    }
}

/// Signed 59.18-decimal fixed-point number
#[derive(
    AnchorSerialize,
    AnchorDeserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub struct SD59x18(i128);

impl SD59x18 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(SCALE as i128);
    pub const TWO: Self = Self(2 * SCALE as i128);
    pub const MIN_TICK: Self = Self(MIN_TICK);
    pub const MAX_TICK: Self = Self(MAX_TICK);

    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> i128 {
        self.0
    }

    /// Whole number `n` (n · 10^18)
    pub fn from_int(n: i64) -> Self {
        // |n| < 2^63 and 10^18 < 2^60, product stays below 2^123
        Self(n as i128 * SCALE as i128)
    }

    /// Scaled value of an exchange tick index
    pub fn from_tick_index(tick: i32) -> Self {
        Self::from_int(tick as i64)
    }

    /// Exchange tick index, rounded toward negative infinity
    pub fn to_tick_index(self) -> Result<i32> {
        let whole = self.0.div_euclid(SCALE as i128);
        i32::try_from(whole).map_err(|_| SoloError::CastOverflow.into())
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        let sum = self.0.checked_add(rhs.0).ok_or(SoloError::MathOverflow)?;
        Ok(Self(sum))
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        let diff = self.0.checked_sub(rhs.0).ok_or(SoloError::MathOverflow)?;
        Ok(Self(diff))
    }

    pub fn checked_neg(self) -> Result<Self> {
        let neg = self.0.checked_neg().ok_or(SoloError::MathOverflow)?;
        Ok(Self(neg))
    }

    /// `self * rhs`, magnitude rounded toward zero
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        let magnitude = mul_div(self.magnitude(), rhs.magnitude(), SCALE_U256)?;
        Self::with_sign(magnitude, self.is_negative() != rhs.is_negative())
    }

    /// `self / rhs`, magnitude rounded toward zero
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.0 == 0 {
            return Err(SoloError::DivisionByZero.into());
        }
        let magnitude = mul_div(self.magnitude(), SCALE_U256, rhs.magnitude())?;
        Self::with_sign(magnitude, self.is_negative() != rhs.is_negative())
    }

    /// `self * rhs` for a non-negative factor
    pub fn mul_unsigned(self, rhs: UD60x18) -> Result<Self> {
        let magnitude = mul_div(self.magnitude(), rhs.raw(), SCALE_U256)?;
        Self::with_sign(magnitude, self.is_negative())
    }

    /// `self / rhs` for a non-negative divisor
    pub fn div_unsigned(self, rhs: UD60x18) -> Result<Self> {
        if rhs.is_zero() {
            return Err(SoloError::DivisionByZero.into());
        }
        let magnitude = mul_div(self.magnitude(), SCALE_U256, rhs.raw())?;
        Self::with_sign(magnitude, self.is_negative())
    }

    /// |self| as an unsigned value
    pub fn abs(self) -> UD60x18 {
        UD60x18::from_raw(self.magnitude())
    }

    /// Pin into `[MIN_TICK, MAX_TICK]`
    pub fn clamp_to_tick_domain(self) -> Self {
        Self(self.0.clamp(MIN_TICK, MAX_TICK))
    }

    fn magnitude(self) -> U256 {
        U256::from(self.0.unsigned_abs())
    }

    fn with_sign(magnitude: U256, negative: bool) -> Result<Self> {
        if magnitude > U256::from(i128::MAX as u128) {
            return Err(SoloError::MathOverflow.into());
        }
        let value = magnitude.low_u128() as i128;
        Ok(Self(if negative { -value } else { value }))
    }
}

impl fmt::Display for SD59x18 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.abs())
        } else {
            write!(f, "{}", self.abs())
        }
    }
}

impl TryFrom<UD60x18> for SD59x18 {
    type Error = anchor_lang::error::Error;

    fn try_from(value: UD60x18) -> Result<Self> {
        if value.raw() > U256::from(i128::MAX as u128) {
            return Err(SoloError::CastOverflow.into());
        }
        Ok(Self(value.raw().low_u128() as i128))
    }
}

impl TryFrom<SD59x18> for UD60x18 {
    type Error = anchor_lang::error::Error;

    fn try_from(value: SD59x18) -> Result<Self> {
        if value.is_negative() {
            return Err(SoloError::MathUnderflow.into());
        }
        Ok(value.abs())
    }
}
