use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::constants::*;
use crate::errors::LaunchError;
use crate::state::distribution::DistributionEntry;
use crate::state::rewards::{validate_reward_recipients, RewardRecipient};
use crate::state::token::TokenConstructorArgs;
use crate::utils::address::Address;
use crate::utils::bps::{apply_units, percentage_to_units};

// ===== Supply Extensions =====

/// Locks a share of supply for the token admin, then vests it linearly
#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct VaultConfig {
    /// Share of supply
    pub bps: u16,
    pub lockup_duration: u64,
    pub vesting_duration: u64,
    /// Defaults to the token admin
    pub admin: Option<Address>,
}

impl VaultConfig {
    pub fn from_percentage(percentage: f64, lockup_duration: u64, vesting_duration: u64) -> Result<Self> {
        Ok(Self {
            bps: percentage_to_units(percentage)?,
            lockup_duration,
            vesting_duration,
            admin: None,
        })
    }

    pub fn validate(&self) -> Result<()> {
        require!(
            self.bps >= 1 && self.bps <= MAX_VAULT_BPS,
            LaunchError::InvalidVaultShare
        );
        require!(
            self.lockup_duration >= MIN_VAULT_LOCKUP,
            LaunchError::VaultLockupTooShort
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct AirdropConfig {
    /// Defaults to the token admin
    pub admin: Option<Address>,
    pub entries: Vec<DistributionEntry>,
    /// Declared total in whole tokens; must equal the entries' sum
    pub amount: u64,
    pub lockup_duration: u64,
    pub vesting_duration: u64,
}

impl AirdropConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.lockup_duration >= MIN_AIRDROP_LOCKUP,
            LaunchError::AirdropLockupTooShort
        );

        let sum = self.entries.iter().try_fold(0u64, |acc, entry| {
            acc.checked_add(entry.amount)
                .ok_or_else(|| error!(LaunchError::MathOverflow))
        })?;
        require!(sum == self.amount, LaunchError::AirdropAmountMismatch);

        Ok(())
    }
}

/// Uniswap v4 pool key used to route a dev buy through a non-WETH pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct PoolKey {
    pub currency0: Address,
    pub currency1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub hooks: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct DevBuyConfig {
    /// ETH spent at launch, in wei
    pub eth_amount: u128,
    /// Defaults to the token admin
    pub recipient: Option<Address>,
    pub amount_out_min: u128,
    /// Required when the pair is not WETH
    pub pool_key: Option<PoolKey>,
}

impl DevBuyConfig {
    pub fn validate(&self, paired_token: &Address, weth: &Address) -> Result<()> {
        require!(self.eth_amount > 0, LaunchError::InvalidDevBuyAmount);
        require!(
            paired_token == weth || self.pool_key.is_some(),
            LaunchError::DevBuyPoolKeyMissing
        );
        Ok(())
    }

    pub fn msg_value(&self) -> U256 {
        U256::from(self.eth_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct PresaleConfig {
    /// Share of supply sold in the presale
    pub bps: u16,
    pub min_eth_goal: u128,
    pub max_eth_goal: u128,
    /// Seconds the presale stays open
    pub duration: u64,
    /// Receives raised ETH; defaults to the token admin
    pub recipient: Option<Address>,
    pub lockup_duration: u64,
    pub vesting_duration: u64,
    /// Buyer caps, in units of `10^-allowlist_decimals` ETH
    pub allowlist: Option<Vec<DistributionEntry>>,
    /// Decimals the caps are given in; 18 (whole ETH) when absent, 0 for wei
    pub allowlist_decimals: Option<u8>,
}

impl PresaleConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.bps >= 1 && self.bps <= MAX_EXTENSION_BPS,
            LaunchError::InvalidPresaleShare
        );
        require!(self.max_eth_goal > 0, LaunchError::PresaleGoalsInverted);
        require!(
            self.min_eth_goal <= self.max_eth_goal,
            LaunchError::PresaleGoalsInverted
        );
        require!(
            self.duration >= MIN_PRESALE_DURATION && self.duration <= MAX_PRESALE_DURATION,
            LaunchError::InvalidPresaleDuration
        );
        require!(
            self.allowlist_decimals.unwrap_or(ETH_DECIMALS) <= ETH_DECIMALS,
            LaunchError::InvalidAllowlistDecimals
        );
        Ok(())
    }
}

// ===== Pool Extensions =====

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct RewardsConfig {
    pub recipients: Vec<RewardRecipient>,
}

impl RewardsConfig {
    pub fn validate(&self) -> Result<()> {
        validate_reward_recipients(&self.recipients)
    }
}

/// MEV fee that decays linearly after the pool opens. Fees are in pips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct SniperFeeConfig {
    pub starting_fee: u32,
    pub ending_fee: u32,
    pub seconds_to_decay: u64,
}

impl Default for SniperFeeConfig {
    fn default() -> Self {
        Self {
            starting_fee: DEFAULT_SNIPER_STARTING_FEE,
            ending_fee: DEFAULT_SNIPER_ENDING_FEE,
            seconds_to_decay: DEFAULT_SNIPER_DECAY_SECONDS,
        }
    }
}

impl SniperFeeConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.ending_fee < self.starting_fee && self.starting_fee <= MAX_SNIPER_FEE,
            LaunchError::InvalidSniperFee
        );
        require!(
            self.seconds_to_decay > 0 && self.seconds_to_decay <= MAX_SNIPER_DECAY_SECONDS,
            LaunchError::InvalidSniperDecay
        );
        Ok(())
    }
}

/// Flat LP fee per side, in bps
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct StaticFeeConfig {
    pub token_fee_bps: u16,
    pub paired_fee_bps: u16,
}

impl Default for StaticFeeConfig {
    fn default() -> Self {
        Self {
            token_fee_bps: DEFAULT_TOKEN_FEE_BPS,
            paired_fee_bps: DEFAULT_PAIRED_FEE_BPS,
        }
    }
}

impl StaticFeeConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.token_fee_bps <= MAX_LP_FEE_BPS && self.paired_fee_bps <= MAX_LP_FEE_BPS,
            LaunchError::FeeOutOfRange
        );
        Ok(())
    }
}

/// Volatility-driven LP fee between a base and a maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct DynamicFeeConfig {
    pub base_fee_bps: u16,
    pub max_fee_bps: u16,
    pub reference_tick_filter_period: u64,
    pub reset_period: u64,
    pub reset_tick_filter: i32,
    pub fee_control_numerator: u64,
    pub decay_filter_bps: u16,
}

impl Default for DynamicFeeConfig {
    fn default() -> Self {
        Self {
            base_fee_bps: 100,
            max_fee_bps: 500,
            reference_tick_filter_period: 30,
            reset_period: 120,
            reset_tick_filter: 200,
            fee_control_numerator: 500_000_000,
            decay_filter_bps: 7_500,
        }
    }
}

impl DynamicFeeConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.base_fee_bps >= MIN_DYNAMIC_BASE_FEE_BPS && self.max_fee_bps <= MAX_LP_FEE_BPS,
            LaunchError::FeeOutOfRange
        );
        require!(
            self.base_fee_bps <= self.max_fee_bps,
            LaunchError::DynamicFeeInverted
        );
        require!(
            self.decay_filter_bps <= BPS_DENOMINATOR,
            LaunchError::BpsOutOfRange
        );
        Ok(())
    }
}

// ===== Extension Records =====

/// An optional launch feature
#[derive(Debug, Clone, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub enum Extension {
    Vault(VaultConfig),
    Airdrop(AirdropConfig),
    DevBuy(DevBuyConfig),
    Rewards(RewardsConfig),
    Presale(PresaleConfig),
    SniperFeeDecay(SniperFeeConfig),
    StaticFee(StaticFeeConfig),
    DynamicFee(DynamicFeeConfig),
}

impl Extension {
    pub fn kind(&self) -> ExtensionKind {
        match self {
            Extension::Vault(_) => ExtensionKind::Vault,
            Extension::Airdrop(_) => ExtensionKind::Airdrop,
            Extension::DevBuy(_) => ExtensionKind::DevBuy,
            Extension::Rewards(_) => ExtensionKind::Rewards,
            Extension::Presale(_) => ExtensionKind::Presale,
            Extension::SniperFeeDecay(_) => ExtensionKind::SniperFeeDecay,
            Extension::StaticFee(_) => ExtensionKind::StaticFee,
            Extension::DynamicFee(_) => ExtensionKind::DynamicFee,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionKind {
    Vault,
    Airdrop,
    DevBuy,
    Rewards,
    Presale,
    SniperFeeDecay,
    StaticFee,
    DynamicFee,
}

impl ExtensionKind {
    /// Extensions deployed through the factory's extension list
    pub fn is_factory_extension(&self) -> bool {
        matches!(
            self,
            ExtensionKind::Vault
                | ExtensionKind::Airdrop
                | ExtensionKind::DevBuy
                | ExtensionKind::Presale
        )
    }
}

/// An extension after validation and encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExtension {
    pub kind: ExtensionKind,
    /// Contract that consumes `data`
    pub target: Address,
    pub msg_value: U256,
    /// Share of supply routed to the extension; zero when it takes none
    pub supply_bps: u16,
    pub data: Vec<u8>,
}

impl CompiledExtension {
    /// Tokens routed to the extension, in base units
    pub fn supply_amount(&self) -> Result<U256> {
        apply_units(TokenConstructorArgs::default_supply()?, self.supply_bps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_lockup_has_a_floor() {
        let short = VaultConfig::from_percentage(10.0, MIN_VAULT_LOCKUP - 1, 0).unwrap();
        assert_eq!(short.validate().unwrap_err(), LaunchError::VaultLockupTooShort.into());

        let ok = VaultConfig::from_percentage(10.0, MIN_VAULT_LOCKUP, 0).unwrap();
        assert_eq!(ok.bps, 1_000);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn airdrop_amount_must_match_entries() {
        let config = AirdropConfig {
            admin: None,
            entries: vec![
                DistributionEntry::new(Address::new([1u8; 20]), 10),
                DistributionEntry::new(Address::new([2u8; 20]), 20),
            ],
            amount: 31,
            lockup_duration: MIN_AIRDROP_LOCKUP,
            vesting_duration: 0,
        };
        assert_eq!(config.validate().unwrap_err(), LaunchError::AirdropAmountMismatch.into());
    }

    #[test]
    fn presale_goals_and_duration_are_checked() {
        let mut presale = PresaleConfig {
            bps: 2_000,
            min_eth_goal: 10,
            max_eth_goal: 5,
            duration: MIN_PRESALE_DURATION,
            recipient: None,
            lockup_duration: 0,
            vesting_duration: 0,
            allowlist: None,
            allowlist_decimals: None,
        };
        assert_eq!(presale.validate().unwrap_err(), LaunchError::PresaleGoalsInverted.into());

        presale.max_eth_goal = 10;
        assert!(presale.validate().is_ok());

        presale.duration = MIN_PRESALE_DURATION - 1;
        assert_eq!(presale.validate().unwrap_err(), LaunchError::InvalidPresaleDuration.into());

        presale.duration = MIN_PRESALE_DURATION;
        presale.allowlist_decimals = Some(19);
        assert_eq!(presale.validate().unwrap_err(), LaunchError::InvalidAllowlistDecimals.into());
    }

    #[test]
    fn fee_defaults_are_valid() {
        assert!(StaticFeeConfig::default().validate().is_ok());
        assert!(DynamicFeeConfig::default().validate().is_ok());
        assert!(SniperFeeConfig::default().validate().is_ok());
    }

    #[test]
    fn fee_bounds_are_enforced() {
        let steep = StaticFeeConfig { token_fee_bps: MAX_LP_FEE_BPS + 1, paired_fee_bps: 0 };
        assert_eq!(steep.validate().unwrap_err(), LaunchError::FeeOutOfRange.into());

        let inverted = DynamicFeeConfig { base_fee_bps: 600, max_fee_bps: 500, ..Default::default() };
        assert_eq!(inverted.validate().unwrap_err(), LaunchError::DynamicFeeInverted.into());

        let rising = SniperFeeConfig { starting_fee: 10, ending_fee: 20, seconds_to_decay: 10 };
        assert_eq!(rising.validate().unwrap_err(), LaunchError::InvalidSniperFee.into());
    }

    #[test]
    fn supply_amount_follows_the_share() {
        let record = CompiledExtension {
            kind: ExtensionKind::Vault,
            target: Address::new([1u8; 20]),
            msg_value: U256::ZERO,
            supply_bps: 2_500,
            data: Vec::new(),
        };
        let quarter = TokenConstructorArgs::default_supply().unwrap() / U256::from(4u64);
        assert_eq!(record.supply_amount().unwrap(), quarter);
    }

    #[test]
    fn dev_buy_outside_weth_needs_a_pool_key() {
        let usdc = Address::new([9u8; 20]);
        let buy = DevBuyConfig { eth_amount: 1, recipient: None, amount_out_min: 0, pool_key: None };
        assert!(buy.validate(&WETH, &WETH).is_ok());
        assert_eq!(
            buy.validate(&usdc, &WETH).unwrap_err(),
            LaunchError::DevBuyPoolKeyMissing.into()
        );
    }
}
