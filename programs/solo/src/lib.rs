//! Solo - Three-Tranche Liquidity Pool on a Concentrated Liquidity Exchange
//!
//! A single pool that splits depositor capital across three tranches and
//! keeps one of them centred on price as the market moves.
//!
//! ## Architecture
//!
//! - **Protected**: single-sided buffer held idle, outside any price range
//! - **Concentrated**: fixed range position placed on the exchange at activation
//! - **Flex**: band position that is repositioned around price
//! - **Settlement**: swaps are served from the flex curve first and the
//!   remainder is routed to the exchange
//!
//! ## Layout
//!
//! - `math`: pure fixed-point, band, allocation, safety and settlement math
//! - `state`: parameters and the pool state record
//! - `venue`: traits the enclosing program binds to the exchange and share token
//! - `pool` / `instructions`: the state machine
//!
//! ## Safety
//!
//! - All arithmetic uses checked 18-decimal fixed point
//! - Every operation is all-or-nothing: state is written only on success

pub mod constants;
pub mod errors;
pub mod instructions;
pub mod math;
pub mod pool;
pub mod state;
pub mod venue;

pub use errors::SoloError;
pub use instructions::{SwapParams, SwapResult};
pub use math::fixed_point::{SD59x18, UD60x18};
pub use pool::SoloPool;
pub use state::{PoolParameters, PoolState, PoolStatus, RangePosition, TrancheAmounts, Tranches};
pub use venue::{ExchangeVenue, RangeDeposit, ShareLedger};
