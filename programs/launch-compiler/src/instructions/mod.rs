pub mod assemble_extensions;
pub mod build_distribution;
pub mod compile_deployment;
pub mod mine_vanity_salt;
pub mod predict_address;
pub mod quote_claim;

pub use assemble_extensions::*;
pub use build_distribution::*;
pub use compile_deployment::*;
pub use mine_vanity_salt::*;
pub use predict_address::*;
pub use quote_claim::*;
