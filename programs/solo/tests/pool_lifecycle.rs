//! Deposit and withdraw flows against the in-memory exchange

mod common;

use common::*;
use solo::{
    PoolParameters, PoolStatus, SD59x18, ShareLedger, SoloError, SoloPool, TrancheAmounts, UD60x18,
};

// ============================================================================
// Activation
// ============================================================================

#[test]
fn test_first_deposit_activates_pool() {
    let mut pool = new_pool(PoolParameters::default());
    let shares = pool
        .first_deposit(1, user(1), ud(1000), ud(1000), -5000, 5000)
        .unwrap();

    assert_eq!(shares, ud(2000));
    assert_eq!(pool.ledger().balance_of(user(1)), ud(2000));

    let state = pool.state();
    assert_eq!(state.status, PoolStatus::Active);
    assert_eq!(state.tick_min, SD59x18::from_int(-5000));
    assert_eq!(state.tick_max, SD59x18::from_int(5000));
    assert_eq!(state.concentrated_tick_lower, -5000);
    assert_eq!(state.concentrated_tick_upper, 5000);
    assert_eq!(state.price_factor, UD60x18::ONE);
    assert_eq!(state.last_update_block, 1);

    let tranches = pool.tranches().unwrap();
    assert!(tranches.protected.is_zero());
    assert_close(tranches.flex.x, ud(200));
    assert_close(tranches.flex.y, ud(200));
    assert_close(tranches.concentrated.x, ud(800));
    assert_close(tranches.concentrated.y, ud(800));
    assert_eq!(tranches.total().unwrap(), TrancheAmounts::new(ud(1000), ud(1000)));

    // Both tranches sit on the same range, so the exchange holds one position
    assert!(state.flex_position.is_open());
    assert!(state.concentrated_position.is_open());
    assert_eq!(pool.venue().open_positions(), 1);
}

#[test]
fn test_first_deposit_twice_fails() {
    let mut pool = seeded_pool();
    let result = pool.first_deposit(2, user(2), ud(10), ud(10), -100, 100);
    assert_solo_error(result, SoloError::PoolAlreadyInitialized);
}

#[test]
fn test_first_deposit_rejects_empty_amounts() {
    let mut pool = new_pool(PoolParameters::default());
    let result = pool.first_deposit(1, user(1), UD60x18::ZERO, UD60x18::ZERO, -5000, 5000);
    assert_solo_error(result, SoloError::ZeroDepositAmount);
    assert!(!pool.state().is_active());
}

#[test]
fn test_first_deposit_rejects_inverted_range() {
    let mut pool = new_pool(PoolParameters::default());
    let result = pool.first_deposit(1, user(1), ud(1000), ud(1000), 5000, -5000);
    assert_solo_error(result, SoloError::InvalidTickRange);

    let result = pool.first_deposit(1, user(1), ud(1000), ud(1000), 100, 100);
    assert_solo_error(result, SoloError::InvalidTickRange);
}

#[test]
fn test_operations_require_activation() {
    let mut pool = new_pool(PoolParameters::default());
    assert_solo_error(
        pool.deposit(1, user(1), ud(10), ud(10)),
        SoloError::PoolNotInitialized,
    );
    assert_solo_error(
        pool.withdraw(1, user(1), ud(10)),
        SoloError::PoolNotInitialized,
    );
    assert_solo_error(
        pool.swap_exact_input(1, true, ud(10), UD60x18::ZERO),
        SoloError::PoolNotInitialized,
    );
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let params = PoolParameters {
        flex_percent: pct(95),
        reserve_percent: pct(10),
        ..PoolParameters::default()
    };
    let result = SoloPool::new(params, MockVenue::at_tick(0), MockLedger::default());
    assert_solo_error(result.map(|_| ()), SoloError::InvalidParameters);
}

// ============================================================================
// Deposit / Withdraw
// ============================================================================

#[test]
fn test_single_sided_deposit_fills_protected_tranche() {
    let mut pool = seeded_pool();
    let shares = pool.deposit(2, user(2), ud(2000), UD60x18::ZERO).unwrap();

    // Pool value doubles, so do the shares
    assert_eq!(shares, ud(2000));
    assert_eq!(pool.ledger().total_shares(), ud(4000));
    assert_eq!(pool.total_value().unwrap(), ud(4000));

    let tranches = pool.tranches().unwrap();
    assert_eq!(tranches.protected, TrancheAmounts::new(ud(1000), UD60x18::ZERO));
    assert_close(tranches.flex.x, ud(200));
    assert_close(tranches.flex.y, ud(200));
    assert_close(tranches.concentrated.x, ud(1800));
    assert_close(tranches.concentrated.y, ud(800));
    assert_eq!(pool.holdings().unwrap(), TrancheAmounts::new(ud(3000), ud(1000)));

    // Active reserves exclude the protected buffer
    let state = pool.state();
    assert_eq!((state.reserve_x, state.reserve_y), (ud(2000), ud(1000)));
}

#[test]
fn test_withdraw_pays_out_every_tranche_pro_rata() {
    let mut pool = seeded_pool();
    pool.deposit(2, user(2), ud(2000), UD60x18::ZERO).unwrap();

    // A quarter of all shares
    let (out_x, out_y) = pool.withdraw(3, user(1), ud(1000)).unwrap();
    assert_eq!(out_x, ud(750));
    assert_eq!(out_y, ud(250));

    assert_eq!(pool.ledger().balance_of(user(1)), ud(1000));
    assert_eq!(pool.ledger().total_shares(), ud(3000));

    let tranches = pool.tranches().unwrap();
    assert_eq!(tranches.protected, TrancheAmounts::new(ud(750), UD60x18::ZERO));
    assert_close(tranches.flex.x, ud(150));
    assert_close(tranches.flex.y, ud(150));
    assert_close(tranches.concentrated.x, ud(1350));
    assert_close(tranches.concentrated.y, ud(600));
    assert_eq!(pool.holdings().unwrap(), TrancheAmounts::new(ud(2250), ud(750)));

    // Active reserves shrink by the same quarter
    let state = pool.state();
    assert_eq!((state.reserve_x, state.reserve_y), (ud(1500), ud(750)));
}

#[test]
fn test_withdraw_more_than_owned_leaves_state_untouched() {
    let mut pool = seeded_pool();
    let before = *pool.state();

    assert_solo_error(
        pool.withdraw(2, user(2), ud(1)),
        SoloError::InsufficientShares,
    );
    assert_solo_error(
        pool.withdraw(2, user(1), ud(2001)),
        SoloError::InsufficientShares,
    );
    assert_solo_error(
        pool.withdraw(2, user(1), UD60x18::ZERO),
        SoloError::ZeroShares,
    );
    assert_eq!(*pool.state(), before);
    assert_eq!(pool.ledger().total_shares(), ud(2000));
}

#[test]
fn test_deposit_rejects_empty_amounts() {
    let mut pool = seeded_pool();
    let before = *pool.state();
    assert_solo_error(
        pool.deposit(2, user(2), UD60x18::ZERO, UD60x18::ZERO),
        SoloError::ZeroDepositAmount,
    );
    assert_eq!(*pool.state(), before);
}

#[test]
fn test_x_deposit_below_decimal_price_resolution() {
    let mut pool = dust_price_pool();
    assert_close(pool.total_value().unwrap(), ud(2000));

    // X worth 100 Y is still worth 100 Y when the price squares to zero
    let amount_x = ud(100).div_sq(dust_sqrt_price()).unwrap();
    let shares = pool.deposit(2, user(2), amount_x, UD60x18::ZERO).unwrap();
    assert_close(shares, ud(100));
    assert_close(pool.total_value().unwrap(), ud(2100));
}

#[test]
fn test_full_exit_then_reentry() {
    let mut pool = seeded_pool();
    let (out_x, out_y) = pool.withdraw(2, user(1), ud(2000)).unwrap();
    assert_eq!((out_x, out_y), (ud(1000), ud(1000)));
    assert!(pool.holdings().unwrap().is_zero());
    assert!(pool.ledger().total_shares().is_zero());
    assert!(!pool.state().flex_position.is_open());

    // With no shares outstanding the next deposit is priced at face value
    let shares = pool.deposit(3, user(2), ud(50), ud(70)).unwrap();
    assert_eq!(shares, ud(120));
}

// ============================================================================
// Flex Band
// ============================================================================

#[test]
fn test_band_follows_price_to_lower_boundary() {
    let mut pool = seeded_pool();
    pool.venue_mut().tick = -5000;

    pool.deposit(10, user(2), UD60x18::ZERO, ud(100)).unwrap();

    let state = pool.state();
    assert_eq!(state.tick_min, SD59x18::from_int(-15000));
    assert_eq!(state.tick_max, SD59x18::from_int(5000));
    assert_eq!(state.last_rebalance_block, 10);
    assert_eq!(state.flex_position.tick_lower, -15000);
    assert_eq!(state.flex_position.tick_upper, 5000);
    // The concentrated range never moves
    assert_eq!(state.concentrated_tick_lower, -5000);
    assert_eq!(state.concentrated_tick_upper, 5000);
}

#[test]
fn test_band_holds_while_price_is_inside() {
    let mut pool = seeded_pool();
    pool.venue_mut().tick = 1000;

    pool.deposit(5, user(2), ud(10), ud(10)).unwrap();

    let state = pool.state();
    assert_eq!(state.tick_min, SD59x18::from_int(-5000));
    assert_eq!(state.tick_max, SD59x18::from_int(5000));
    assert_eq!(state.last_rebalance_block, 1);
    assert_eq!(state.last_update_block, 5);
}
