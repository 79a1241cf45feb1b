pub mod deposit;
pub mod first_deposit;
pub mod swap;
pub mod withdraw;

pub use swap::*;
