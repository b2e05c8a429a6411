#![allow(unexpected_cfgs)]
//! Compiles declarative token launches into deterministic deployment
//! payloads, and answers claim queries against published distributions.

mod const_selectors;
pub mod constants;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

pub use errors::LaunchError;
pub use state::{LaunchConfig, ProtocolConfig};
pub use utils::address::{Address, Digest};

pub mod compiler {
    use anchor_lang::prelude::*;
    use ruint::aliases::U256;

    use crate::instructions::{
        self, ClaimQuote, CompiledDeployment, CompiledExtensions, QuoteClaimParams,
        VanityOptions, VanitySalt,
    };
    use crate::state::{
        Distribution, DistributionEntry, LaunchConfig, ProtocolConfig, TokenConstructorArgs,
    };
    use crate::utils::{self, Address, Digest};

    /// Validate and encode every extension of a launch
    pub fn assemble_extensions(
        config: &LaunchConfig,
        protocol: &ProtocolConfig,
    ) -> Result<CompiledExtensions> {
        instructions::assemble(config, protocol)
    }

    /// Compile a launch into a deployment transaction and its expected address
    pub fn compile_deployment(
        config: &LaunchConfig,
        protocol: &ProtocolConfig,
        vanity: Option<&VanityOptions>,
    ) -> Result<CompiledDeployment> {
        instructions::compile_deployment(config, protocol, vanity)
    }

    /// Deterministic token address for a salt
    pub fn predict_address(
        args: &TokenConstructorArgs,
        creation_code: &[u8],
        factory: &Address,
        salt: &Digest,
        deployer: &Address,
    ) -> Address {
        instructions::predict_address(args, creation_code, factory, salt, deployer)
    }

    /// Search for a salt whose address ends with a hex suffix
    pub fn search_vanity_salt(
        args: &TokenConstructorArgs,
        creation_code: &[u8],
        factory: &Address,
        deployer: &Address,
        options: &VanityOptions,
    ) -> Result<VanitySalt> {
        instructions::search_vanity_salt(args, creation_code, factory, deployer, options)
    }

    /// Merkle commitment over airdrop or allowlist entries
    pub fn build_distribution(
        entries: Vec<DistributionEntry>,
        decimals: u8,
        lockup_duration: u64,
        vesting_duration: u64,
    ) -> Result<Distribution> {
        instructions::build_distribution(entries, decimals, lockup_duration, vesting_duration)
    }

    /// Whether `proof` places `(recipient, amount)` under `root`
    pub fn verify_claim(root: &Digest, recipient: &Address, amount: U256, proof: &[Digest]) -> bool {
        instructions::verify_claim(root, recipient, amount, proof)
    }

    /// Claimable amount and proof for one recipient
    pub fn quote_claim(distribution: &Distribution, params: &QuoteClaimParams) -> Result<ClaimQuote> {
        instructions::quote_claim(distribution, params)
    }

    /// Amount unlocked at `now` minus what was already claimed
    pub fn claimable_now(
        total: U256,
        claimed_so_far: U256,
        lockup_end: i64,
        vesting_end: i64,
        now: i64,
    ) -> Result<U256> {
        utils::vesting::claimable_now(total, claimed_so_far, lockup_end, vesting_end, now)
    }

    /// Tick for a market cap in the paired token, snapped down to the grid
    pub fn tick_from_market_cap(market_cap: f64, paired_decimals: u8, tick_spacing: i32) -> Result<i32> {
        utils::tick_math::tick_from_market_cap(market_cap, paired_decimals, tick_spacing)
    }
}
