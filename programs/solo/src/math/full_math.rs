//! Full precision math operations
//!
//! 256-bit storage integers and 512-bit intermediates so that every
//! `a * b / d` keeps all digits before rescaling.

use crate::errors::SoloError;
use anchor_lang::prelude::*;

// Kept apart from the anchor prelude: the macro expands to the two-parameter `Result`
mod wide {
    use uint::construct_uint;

    construct_uint! {
        /// 256-bit unsigned integer backing every fixed-point value
        pub struct U256(4);
    }

    construct_uint! {
        /// 512-bit unsigned integer, only used for intermediate products
        pub struct U512(8);
    }
}

pub use wide::{U256, U512};

/// Zero-extend a U256 into a U512
pub fn widen(x: U256) -> U512 {
    let U256(ref w) = x;
    U512([w[0], w[1], w[2], w[3], 0, 0, 0, 0])
}

/// Truncate a U512 back to U256, failing if any high word is set
pub fn narrow(x: U512) -> Result<U256> {
    let U512(ref w) = x;
    if w[4..].iter().any(|word| *word != 0) {
        return Err(SoloError::MathOverflow.into());
    }
    Ok(U256([w[0], w[1], w[2], w[3]]))
}

/// Multiply two U256 numbers and divide by a third, with full precision
///
/// # Formula
/// result = floor(a * b / denominator)
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(SoloError::DivisionByZero.into());
    }

    // a * b < 2^512 always, so the widened product cannot overflow
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// Multiply two U256 numbers and divide by a third, rounding up
pub fn mul_div_round_up(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(SoloError::DivisionByZero.into());
    }

    let (quotient, remainder) = (widen(a) * widen(b)).div_mod(widen(denominator));
    let quotient = if remainder.is_zero() {
        quotient
    } else {
        quotient + U512::one()
    };

    narrow(quotient)
}

/// Integer square root (floor) using Newton's iteration
pub fn isqrt(x: U512) -> U512 {
    if x.is_zero() {
        return x;
    }

    let mut y = x;
    let mut z = (x >> 1) + U512::one();
    while z < y {
        y = z;
        z = (x / z + z) >> 1;
    }
    y
}
