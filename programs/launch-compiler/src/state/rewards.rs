use anchor_lang::prelude::*;

use crate::constants::MAX_REWARD_RECIPIENTS;
use crate::errors::LaunchError;
use crate::utils::address::Address;
use crate::utils::bps::validate_sum;

/// Which side of the pair a recipient wants its LP fees converted into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum FeeIn {
    #[default]
    Both,
    Paired,
    Token,
}

impl FeeIn {
    /// Discriminant of the on-chain enum
    pub fn code(&self) -> u8 {
        match self {
            FeeIn::Both => 0,
            FeeIn::Paired => 1,
            FeeIn::Token => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct RewardRecipient {
    /// Account allowed to change this slot
    pub admin: Address,
    /// Account receiving the fees
    pub recipient: Address,
    /// Share of LP fees
    pub bps: u16,
    pub fee_in: FeeIn,
}

impl RewardRecipient {
    /// Whole fee stream to one account that administers itself
    pub fn sole(admin: Address) -> Self {
        Self {
            admin,
            recipient: admin,
            bps: 10_000,
            fee_in: FeeIn::Both,
        }
    }
}

pub fn validate_reward_recipients(recipients: &[RewardRecipient]) -> Result<()> {
    require!(
        !recipients.is_empty() && recipients.len() <= MAX_REWARD_RECIPIENTS,
        LaunchError::InvalidRewardRecipients
    );

    for reward in recipients {
        require!(
            !reward.admin.is_zero() && !reward.recipient.is_zero(),
            LaunchError::InvalidAddress
        );
    }

    let units: Vec<u16> = recipients.iter().map(|r| r.bps).collect();
    validate_sum(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = n;
        Address(bytes)
    }

    fn reward(n: u8, bps: u16) -> RewardRecipient {
        RewardRecipient {
            admin: account(n),
            recipient: account(n),
            bps,
            fee_in: FeeIn::Paired,
        }
    }

    #[test]
    fn split_must_sum_to_ten_thousand() {
        assert!(validate_reward_recipients(&[reward(1, 7_000), reward(2, 3_000)]).is_ok());
        assert_eq!(
            validate_reward_recipients(&[reward(1, 7_000), reward(2, 2_999)]).unwrap_err(),
            LaunchError::BpsSumMismatch.into()
        );
    }

    #[test]
    fn empty_or_oversized_lists_are_rejected() {
        assert_eq!(
            validate_reward_recipients(&[]).unwrap_err(),
            LaunchError::InvalidRewardRecipients.into()
        );
        let eight: Vec<RewardRecipient> = (1..=8).map(|n| reward(n, 1_250)).collect();
        assert_eq!(
            validate_reward_recipients(&eight).unwrap_err(),
            LaunchError::InvalidRewardRecipients.into()
        );
    }

    #[test]
    fn fees_default_to_both_sides() {
        assert_eq!(FeeIn::default(), FeeIn::Both);
        assert_eq!(FeeIn::default().code(), 0);
        assert_eq!(RewardRecipient::sole(account(1)).fee_in, FeeIn::default());
    }

    #[test]
    fn zero_recipient_is_rejected() {
        let mut bad = RewardRecipient::sole(account(1));
        bad.recipient = Address::ZERO;
        assert_eq!(
            validate_reward_recipients(&[bad]).unwrap_err(),
            LaunchError::InvalidAddress.into()
        );
    }
}
