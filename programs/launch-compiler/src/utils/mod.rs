pub mod abi;
pub mod address;
pub mod bps;
pub mod merkle;
pub mod tick_math;
pub mod vesting;

pub use address::*;
pub use bps::*;
pub use merkle::*;
pub use tick_math::*;
pub use vesting::*;
