use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::state::{Distribution, DistributionEntry};
use crate::utils::address::{Address, Digest};
use crate::utils::merkle::{leaf_hash, verify};

/// Build the Merkle commitment for a list of whole-unit entitlements
pub fn build_distribution(
    entries: Vec<DistributionEntry>,
    decimals: u8,
    lockup_duration: u64,
    vesting_duration: u64,
) -> Result<Distribution> {
    let distribution = Distribution::new(entries, decimals, lockup_duration, vesting_duration)?;

    msg!(
        "Distribution built: {} recipients, {} units total",
        distribution.entries().len(),
        distribution.total_amount()?
    );
    msg!("Root: 0x{}", hex::encode(distribution.root()));

    Ok(distribution)
}

/// Check a claim against a published root. `amount` is in base units.
pub fn verify_claim(root: &Digest, recipient: &Address, amount: U256, proof: &[Digest]) -> bool {
    verify(root, &leaf_hash(recipient, amount), proof)
}
