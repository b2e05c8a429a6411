use std::collections::HashMap;

use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::errors::LaunchError;
use crate::utils::address::{Address, Digest};
use crate::utils::merkle::{leaf_hash, MerkleTree};
use crate::utils::vesting::VestingSchedule;

/// One recipient and its entitlement in whole units (before decimal scaling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct DistributionEntry {
    pub recipient: Address,
    pub amount: u64,
}

impl DistributionEntry {
    pub fn new(recipient: Address, amount: u64) -> Self {
        Self { recipient, amount }
    }
}

/// Scale a whole-unit amount to base units: amount * 10^decimals
pub fn scale_to_base_units(amount: u64, decimals: u8) -> Result<U256> {
    let factor = U256::from(10u64)
        .checked_pow(U256::from(decimals))
        .ok_or(LaunchError::MathOverflow)?;
    U256::from(amount)
        .checked_mul(factor)
        .ok_or_else(|| error!(LaunchError::MathOverflow))
}

/// Merkle commitment over a list of entries plus the lockup/vesting it is
/// released under. Entitlements are hashed in base units.
#[derive(Debug, Clone)]
pub struct Distribution {
    entries: Vec<DistributionEntry>,
    decimals: u8,
    lockup_duration: u64,
    vesting_duration: u64,
    tree: MerkleTree,
    index: HashMap<Address, usize>,
}

impl Distribution {
    pub fn new(
        entries: Vec<DistributionEntry>,
        decimals: u8,
        lockup_duration: u64,
        vesting_duration: u64,
    ) -> Result<Self> {
        require!(!entries.is_empty(), LaunchError::EmptyDistribution);

        let mut index = HashMap::with_capacity(entries.len());
        let mut leaves = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            require!(entry.amount > 0, LaunchError::ZeroEntitlement);
            require!(!entry.recipient.is_zero(), LaunchError::InvalidAddress);
            require!(
                index.insert(entry.recipient, i).is_none(),
                LaunchError::DuplicateRecipient
            );
            leaves.push(leaf_hash(
                &entry.recipient,
                scale_to_base_units(entry.amount, decimals)?,
            ));
        }

        let tree = MerkleTree::from_leaves(leaves)?;

        Ok(Self {
            entries,
            decimals,
            lockup_duration,
            vesting_duration,
            tree,
            index,
        })
    }

    pub fn root(&self) -> Digest {
        self.tree.root()
    }

    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn lockup_duration(&self) -> u64 {
        self.lockup_duration
    }

    pub fn vesting_duration(&self) -> u64 {
        self.vesting_duration
    }

    /// Sum of entitlements in whole units
    pub fn total_amount(&self) -> Result<u64> {
        self.entries.iter().try_fold(0u64, |acc, entry| {
            acc.checked_add(entry.amount)
                .ok_or_else(|| error!(LaunchError::MathOverflow))
        })
    }

    pub fn entry_of(&self, recipient: &Address) -> Result<&DistributionEntry> {
        self.index
            .get(recipient)
            .map(|i| &self.entries[*i])
            .ok_or_else(|| error!(LaunchError::RecipientNotFound))
    }

    /// Entitlement of a recipient in base units
    pub fn entitlement_of(&self, recipient: &Address) -> Result<U256> {
        let entry = self.entry_of(recipient)?;
        scale_to_base_units(entry.amount, self.decimals)
    }

    pub fn leaf_of(&self, recipient: &Address) -> Result<Digest> {
        Ok(leaf_hash(recipient, self.entitlement_of(recipient)?))
    }

    /// Inclusion proof for a recipient; `RecipientNotFound` if absent
    pub fn proof_for(&self, recipient: &Address) -> Result<Vec<Digest>> {
        let leaf = self.leaf_of(recipient)?;
        self.tree.proof(&leaf)
    }

    /// Absolute schedule once the distribution goes live at `start_time`
    pub fn schedule(&self, start_time: i64) -> Result<VestingSchedule> {
        VestingSchedule::new(start_time, self.lockup_duration, self.vesting_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::merkle::verify;

    fn account(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        Address(bytes)
    }

    fn sample() -> Vec<DistributionEntry> {
        vec![
            DistributionEntry::new(account(1), 300_000_000),
            DistributionEntry::new(account(2), 100_000_000),
            DistributionEntry::new(account(3), 50_000_000),
        ]
    }

    #[test]
    fn scaling_is_explicit_and_exact() {
        let scaled = scale_to_base_units(300_000_000, 18).unwrap();
        assert_eq!(
            scaled,
            U256::from(300_000_000u64) * U256::from(10u64).pow(U256::from(18u64))
        );
        assert_eq!(scale_to_base_units(7, 0).unwrap(), U256::from(7u64));
    }

    #[test]
    fn proofs_verify_against_the_root() {
        let distribution = Distribution::new(sample(), 18, 86_400, 0).unwrap();
        assert_eq!(distribution.total_amount().unwrap(), 450_000_000);
        for entry in sample() {
            let proof = distribution.proof_for(&entry.recipient).unwrap();
            let leaf = distribution.leaf_of(&entry.recipient).unwrap();
            assert!(verify(&distribution.root(), &leaf, &proof));
        }
    }

    #[test]
    fn root_ignores_entry_order() {
        let mut reversed = sample();
        reversed.reverse();
        let a = Distribution::new(sample(), 18, 0, 0).unwrap();
        let b = Distribution::new(reversed, 18, 0, 0).unwrap();
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn hashing_uses_base_units() {
        let whole = Distribution::new(sample(), 0, 0, 0).unwrap();
        let scaled = Distribution::new(sample(), 18, 0, 0).unwrap();
        assert_ne!(whole.root(), scaled.root());
    }

    #[test]
    fn absent_recipient_is_not_found() {
        let distribution = Distribution::new(sample(), 18, 0, 0).unwrap();
        assert_eq!(
            distribution.proof_for(&account(9)).unwrap_err(),
            LaunchError::RecipientNotFound.into()
        );
    }

    #[test]
    fn malformed_entry_lists_are_rejected() {
        assert_eq!(
            Distribution::new(vec![], 18, 0, 0).unwrap_err(),
            LaunchError::EmptyDistribution.into()
        );

        let mut duplicated = sample();
        duplicated.push(DistributionEntry::new(account(1), 5));
        assert_eq!(
            Distribution::new(duplicated, 18, 0, 0).unwrap_err(),
            LaunchError::DuplicateRecipient.into()
        );

        assert_eq!(
            Distribution::new(vec![DistributionEntry::new(account(1), 0)], 18, 0, 0).unwrap_err(),
            LaunchError::ZeroEntitlement.into()
        );
    }
}
