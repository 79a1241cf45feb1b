pub mod allocation;
pub mod fixed_point;
pub mod full_math;
pub mod liquidity_math;
pub mod swap_math;
pub mod tick_band;
pub mod tick_math;
pub mod trade_safety;

pub use allocation::*;
pub use fixed_point::*;
pub use liquidity_math::*;
pub use swap_math::*;
pub use tick_band::*;
pub use tick_math::*;
pub use trade_safety::*;
