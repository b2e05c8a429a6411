use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::state::Distribution;
use crate::utils::address::{Address, Digest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteClaimParams {
    pub recipient: Address,
    /// Base units already paid out
    pub claimed_so_far: U256,
    /// When the distribution went live (token deployment time)
    pub start_time: i64,
    pub now: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimQuote {
    pub recipient: Address,
    /// Full entitlement in base units
    pub entitlement: U256,
    pub claimable: U256,
    pub proof: Vec<Digest>,
    pub lockup_end: i64,
    pub vesting_end: i64,
    pub fully_claimed: bool,
}

/// How much `recipient` can claim now, with the proof to submit
pub fn quote_claim(distribution: &Distribution, params: &QuoteClaimParams) -> Result<ClaimQuote> {
    let entitlement = distribution.entitlement_of(&params.recipient)?;
    let proof = distribution.proof_for(&params.recipient)?;
    let schedule = distribution.schedule(params.start_time)?;
    let claimable = schedule.claimable(entitlement, params.claimed_so_far, params.now)?;

    if schedule.is_locked(params.now) {
        msg!("Recipient {} locked until {}", params.recipient, schedule.lockup_end);
    }
    msg!("Recipient {} claimable: {}", params.recipient, claimable);
    msg!("Claimed so far: {} of {}", params.claimed_so_far, entitlement);

    Ok(ClaimQuote {
        recipient: params.recipient,
        entitlement,
        claimable,
        proof,
        lockup_end: schedule.lockup_end,
        vesting_end: schedule.vesting_end,
        fully_claimed: params.claimed_so_far >= entitlement,
    })
}
