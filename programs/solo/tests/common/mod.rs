//! Shared test harness: in-memory exchange and share ledger.

#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::*;
use solo::errors::SoloError;
use solo::math::liquidity_math::{get_amounts_for_liquidity, get_liquidity_for_amounts};
use solo::math::tick_math::{get_price_at_tick, get_sqrt_price_at_tick};
use solo::{ExchangeVenue, PoolParameters, RangeDeposit, ShareLedger, SoloPool, UD60x18};

// ============================================================================
// Mock Exchange
// ============================================================================

/// Exchange that fills range positions along the liquidity curve and swaps
/// at the current tick price with no fee. Swaps do not move the tick.
#[derive(Debug, Default)]
pub struct MockVenue {
    pub tick: i32,
    pub positions: HashMap<(i32, i32), u128>,
    pub swaps: Vec<(bool, UD60x18)>,
    pub fail_swaps: bool,
}

impl MockVenue {
    pub fn at_tick(tick: i32) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub fn open_positions(&self) -> usize {
        self.positions.values().filter(|liquidity| **liquidity != 0).count()
    }

    fn range(&self, tick_lower: i32, tick_upper: i32) -> Result<(UD60x18, UD60x18, UD60x18)> {
        Ok((
            get_sqrt_price_at_tick(self.tick)?,
            get_sqrt_price_at_tick(tick_lower)?,
            get_sqrt_price_at_tick(tick_upper)?,
        ))
    }
}

impl ExchangeVenue for MockVenue {
    fn create_range_position(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        amount_x: UD60x18,
        amount_y: UD60x18,
    ) -> Result<RangeDeposit> {
        let (sqrt_price, sqrt_lower, sqrt_upper) = self.range(tick_lower, tick_upper)?;
        let liquidity =
            get_liquidity_for_amounts(sqrt_price, sqrt_lower, sqrt_upper, amount_x, amount_y)?;
        let (placed_x, placed_y) =
            get_amounts_for_liquidity(sqrt_price, sqrt_lower, sqrt_upper, liquidity, false)?;

        let liquidity = liquidity.raw().low_u128();
        *self.positions.entry((tick_lower, tick_upper)).or_insert(0) += liquidity;

        Ok(RangeDeposit {
            liquidity,
            amount_x: placed_x,
            amount_y: placed_y,
        })
    }

    fn remove_range_position(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> Result<(UD60x18, UD60x18)> {
        let (sqrt_price, sqrt_lower, sqrt_upper) = self.range(tick_lower, tick_upper)?;
        let held = self
            .positions
            .get_mut(&(tick_lower, tick_upper))
            .ok_or(SoloError::InvalidTickRange)?;
        *held = held.checked_sub(liquidity).ok_or(SoloError::MathUnderflow)?;

        get_amounts_for_liquidity(
            sqrt_price,
            sqrt_lower,
            sqrt_upper,
            UD60x18::from_raw_u128(liquidity),
            false,
        )
    }

    fn current_tick(&self) -> Result<i32> {
        Ok(self.tick)
    }

    fn swap(&mut self, zero_for_one: bool, amount_in: UD60x18) -> Result<UD60x18> {
        require!(!self.fail_swaps, SoloError::InsufficientFlexLiquidity);
        self.swaps.push((zero_for_one, amount_in));
        let price = get_price_at_tick(self.tick)?;
        if zero_for_one {
            amount_in.checked_mul(price)
        } else {
            amount_in.checked_div(price)
        }
    }

    fn swap_exact_output(&mut self, zero_for_one: bool, amount_out: UD60x18) -> Result<UD60x18> {
        require!(!self.fail_swaps, SoloError::InsufficientFlexLiquidity);
        self.swaps.push((zero_for_one, amount_out));
        let price = get_price_at_tick(self.tick)?;
        if zero_for_one {
            amount_out.div_up(price)
        } else {
            amount_out.mul_up(price)
        }
    }
}

// ============================================================================
// Mock Share Ledger
// ============================================================================

#[derive(Debug, Default)]
pub struct MockLedger {
    pub balances: HashMap<Pubkey, UD60x18>,
    pub total: UD60x18,
}

impl ShareLedger for MockLedger {
    fn mint_shares(&mut self, recipient: Pubkey, amount: UD60x18) -> Result<()> {
        let balance = self.balances.entry(recipient).or_default();
        *balance = balance.checked_add(amount)?;
        self.total = self.total.checked_add(amount)?;
        Ok(())
    }

    fn burn_shares(&mut self, owner: Pubkey, amount: UD60x18) -> Result<()> {
        let balance = self.balances.entry(owner).or_default();
        require!(*balance >= amount, SoloError::InsufficientShares);
        *balance = balance.checked_sub(amount)?;
        self.total = self.total.checked_sub(amount)?;
        Ok(())
    }

    fn total_shares(&self) -> UD60x18 {
        self.total
    }

    fn balance_of(&self, owner: Pubkey) -> UD60x18 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub type TestPool = SoloPool<MockVenue, MockLedger>;

pub fn ud(n: u64) -> UD60x18 {
    UD60x18::from_int(n)
}

pub fn pct(n: u64) -> UD60x18 {
    UD60x18::from_ratio(n, 100).unwrap()
}

pub fn user(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

pub fn new_pool(params: PoolParameters) -> TestPool {
    SoloPool::new(params, MockVenue::at_tick(0), MockLedger::default()).unwrap()
}

/// Default pool after `user(1)` deposits 1000/1000 on [-5000, 5000] at tick 0
pub fn seeded_pool() -> TestPool {
    seeded_pool_with(PoolParameters::default())
}

pub fn seeded_pool_with(params: PoolParameters) -> TestPool {
    let mut pool = new_pool(params);
    pool.first_deposit(1, user(1), ud(1000), ud(1000), -5000, 5000)
        .unwrap();
    pool
}

/// Tick whose price (~5.7e-19) squares to zero at 18 decimals
pub const DUST_PRICE_TICK: i32 = -420_000;

pub fn dust_sqrt_price() -> UD60x18 {
    get_sqrt_price_at_tick(DUST_PRICE_TICK).unwrap()
}

/// `user(1)` deposits X worth 1000 Y and 1000 Y on a band 10000 ticks
/// either side of `DUST_PRICE_TICK`
pub fn dust_price_pool() -> TestPool {
    let mut pool = SoloPool::new(
        PoolParameters::default(),
        MockVenue::at_tick(DUST_PRICE_TICK),
        MockLedger::default(),
    )
    .unwrap();
    let amount_x = ud(1000).div_sq(dust_sqrt_price()).unwrap();
    pool.first_deposit(
        1,
        user(1),
        amount_x,
        ud(1000),
        DUST_PRICE_TICK - 10_000,
        DUST_PRICE_TICK + 10_000,
    )
    .unwrap();
    pool
}

pub fn assert_close(actual: UD60x18, expected: UD60x18) {
    let tolerance = UD60x18::from_ratio(1, 1_000_000).unwrap();
    assert!(
        actual.abs_diff(expected) <= tolerance,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

/// Error code of a failed operation
pub fn error_code<T: std::fmt::Debug>(result: Result<T>) -> u32 {
    match result {
        Err(anchor_lang::error::Error::AnchorError(error)) => error.error_code_number,
        other => panic!("expected an anchor error, got {:?}", other),
    }
}

pub fn assert_solo_error<T: std::fmt::Debug>(result: Result<T>, expected: SoloError) {
    assert_eq!(error_code(result), u32::from(expected));
}
