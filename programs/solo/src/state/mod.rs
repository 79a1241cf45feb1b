pub mod params;
pub mod pool;
pub mod tranche;

pub use params::*;
pub use pool::*;
pub use tranche::*;
