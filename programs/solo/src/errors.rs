use anchor_lang::prelude::*;

/// Solo Error Codes
/// Every failure aborts the whole enclosing operation
#[error_code]
pub enum SoloError {
    // ═══════════════════════════════════════════════════════════════════════
    // MATH ERRORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Arithmetic overflow in checked operation
    #[msg("Math overflow")]
    MathOverflow, // 6000

    /// Arithmetic underflow in checked operation
    #[msg("Math underflow")]
    MathUnderflow, // 6001

    /// Division by zero attempted
    #[msg("Division by zero")]
    DivisionByZero, // 6002

    /// Result doesn't fit in expected type
    #[msg("Cast overflow")]
    CastOverflow, // 6003

    // ═══════════════════════════════════════════════════════════════════════
    // TICK ERRORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Tick is below minimum allowed
    #[msg("Tick below minimum")]
    TickBelowMinimum, // 6004

    /// Tick is above maximum allowed
    #[msg("Tick above maximum")]
    TickAboveMaximum, // 6005

    /// Lower tick must not exceed upper tick
    #[msg("Invalid tick range")]
    InvalidTickRange, // 6006

    // ═══════════════════════════════════════════════════════════════════════
    // TRADE ERRORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Exactly one side of a directional amount pair must be non-zero
    #[msg("Invalid trade input")]
    InvalidTradeInput, // 6007

    /// Trade would leave the flex tranche unsafe
    #[msg("Unsafe trade")]
    UnsafeTrade, // 6008

    /// Swap amount is zero
    #[msg("Zero swap amount")]
    ZeroSwapAmount, // 6009

    /// Output below the caller's minimum
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded, // 6010

    /// Input above the caller's maximum
    #[msg("Input exceeds maximum")]
    InputExceedsMaximum, // 6011

    /// Requested output exceeds what the flex curve can ever release
    #[msg("Insufficient flex liquidity")]
    InsufficientFlexLiquidity, // 6012

    // ═══════════════════════════════════════════════════════════════════════
    // POOL ERRORS
    // ═══════════════════════════════════════════════════════════════════════

    /// First deposit already happened
    #[msg("Pool already initialized")]
    PoolAlreadyInitialized, // 6013

    /// Pool has not received its first deposit
    #[msg("Pool not initialized")]
    PoolNotInitialized, // 6014

    /// Deposit of nothing
    #[msg("Zero deposit amount")]
    ZeroDepositAmount, // 6015

    /// Share amount is zero
    #[msg("Zero shares")]
    ZeroShares, // 6016

    /// Owner holds fewer shares than requested
    #[msg("Insufficient shares")]
    InsufficientShares, // 6017

    // ═══════════════════════════════════════════════════════════════════════
    // CONFIG ERRORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Pool parameters out of range
    #[msg("Invalid pool parameters")]
    InvalidParameters, // 6018
}
