pub mod distribution;
pub mod extension;
pub mod launch_config;
pub mod liquidity;
pub mod rewards;
pub mod token;

pub use distribution::*;
pub use extension::*;
pub use launch_config::*;
pub use liquidity::*;
pub use rewards::*;
pub use token::*;
