use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::constants::*;
use crate::errors::LaunchError;
use crate::state::{
    validate_reward_recipients, AirdropConfig, CompiledExtension, DevBuyConfig, Distribution,
    Extension, ExtensionKind, FeeCurve, LaunchConfig, PoolKey, PresaleConfig, ProtocolConfig,
    ResolvedLaunch, RewardRecipient, SniperFeeConfig, VaultConfig,
};
use crate::utils::abi::{self, Token};
use crate::utils::address::Address;
use crate::utils::bps::{units_of_total, validate_sum};

/// Every extension of a launch, validated and encoded
#[derive(Debug, Clone)]
pub struct CompiledExtensions {
    pub launch: ResolvedLaunch,
    /// Locker, fee hook and sniper module first, then factory extensions in
    /// input order. A presale is always last.
    pub records: Vec<CompiledExtension>,
    /// Share of supply left for the pool
    pub pool_bps: u16,
    pub airdrop: Option<Distribution>,
    pub allowlist: Option<Distribution>,
}

impl CompiledExtensions {
    pub fn record(&self, kind: ExtensionKind) -> Option<&CompiledExtension> {
        self.records.iter().find(|record| record.kind == kind)
    }

    pub fn has_presale(&self) -> bool {
        self.record(ExtensionKind::Presale).is_some()
    }

    /// Records passed to the factory as `ExtensionConfig[]`
    pub fn factory_extensions(&self) -> impl Iterator<Item = &CompiledExtension> {
        self.records
            .iter()
            .filter(|record| record.kind.is_factory_extension())
    }

    /// ETH the deployment transaction must carry
    pub fn msg_value(&self) -> Result<U256> {
        self.records.iter().try_fold(U256::ZERO, |acc, record| {
            acc.checked_add(record.msg_value)
                .ok_or_else(|| error!(LaunchError::MathOverflow))
        })
    }
}

pub fn assemble(config: &LaunchConfig, protocol: &ProtocolConfig) -> Result<CompiledExtensions> {
    let launch = config.resolve(protocol)?;

    validate_reward_recipients(&launch.rewards)?;
    launch.fee.validate()?;
    launch.sniper_fee.validate()?;

    let mut records = vec![
        CompiledExtension {
            kind: ExtensionKind::Rewards,
            target: ProtocolConfig::require_deployed(&protocol.locker)?,
            msg_value: U256::ZERO,
            supply_bps: 0,
            data: encode_locker_data(&launch.rewards),
        },
        CompiledExtension {
            kind: fee_kind(&launch.fee),
            target: ProtocolConfig::require_deployed(&launch.fee.hook(protocol))?,
            msg_value: U256::ZERO,
            supply_bps: 0,
            data: encode_pool_data(&launch.fee),
        },
        CompiledExtension {
            kind: ExtensionKind::SniperFeeDecay,
            target: ProtocolConfig::require_deployed(&protocol.sniper_module)?,
            msg_value: U256::ZERO,
            supply_bps: 0,
            data: encode_sniper_data(&launch.sniper_fee),
        },
    ];

    let has_presale = launch
        .extensions
        .iter()
        .any(|extension| matches!(extension, Extension::Presale(_)));

    let mut airdrop = None;
    let mut presale = None;

    for extension in &launch.extensions {
        match extension {
            Extension::Vault(vault) => {
                records.push(compile_vault(vault, &launch, protocol)?);
            }
            Extension::Airdrop(config) => {
                let (record, distribution) = compile_airdrop(config, &launch, protocol)?;
                records.push(record);
                airdrop = Some(distribution);
            }
            Extension::DevBuy(dev_buy) => {
                require!(!has_presale, LaunchError::DevBuyWithPresale);
                records.push(compile_dev_buy(dev_buy, &launch, protocol)?);
            }
            Extension::Presale(config) => presale = Some(config),
            // lifted out of the list by resolve
            Extension::Rewards(_)
            | Extension::SniperFeeDecay(_)
            | Extension::StaticFee(_)
            | Extension::DynamicFee(_) => {}
        }
    }

    let mut allowlist = None;
    if let Some(config) = presale {
        let (record, distribution) = compile_presale(config, &launch, protocol)?;
        records.push(record);
        allowlist = distribution;
    }

    let pool_bps = settle_supply_ledger(&records)?;
    for record in records.iter().filter(|record| record.supply_bps > 0) {
        msg!("{:?} receives {} base units", record.kind, record.supply_amount()?);
    }

    msg!("Assembled {} extension records", records.len());
    msg!("Pool share: {} bps", pool_bps);

    Ok(CompiledExtensions {
        launch,
        records,
        pool_bps,
        airdrop,
        allowlist,
    })
}

/// Check that extensions leave the pool a share and that `[pool, extensions...]`
/// exhausts the supply. Returns the pool share.
fn settle_supply_ledger(records: &[CompiledExtension]) -> Result<u16> {
    let extension_units: Vec<u16> = records
        .iter()
        .filter(|record| record.supply_bps > 0)
        .map(|record| record.supply_bps)
        .collect();

    let taken = extension_units
        .iter()
        .try_fold(0u16, |acc, units| acc.checked_add(*units))
        .ok_or(LaunchError::ExtensionBpsExceeded)?;
    require!(taken <= MAX_EXTENSION_BPS, LaunchError::ExtensionBpsExceeded);

    let pool_bps = BPS_DENOMINATOR - taken;
    let mut ledger = Vec::with_capacity(extension_units.len() + 1);
    ledger.push(pool_bps);
    ledger.extend(extension_units);
    validate_sum(&ledger)?;

    Ok(pool_bps)
}

fn fee_kind(fee: &FeeCurve) -> ExtensionKind {
    match fee {
        FeeCurve::Static(_) => ExtensionKind::StaticFee,
        FeeCurve::Dynamic(_) => ExtensionKind::DynamicFee,
    }
}

fn fee_pips(bps: u16) -> Token {
    Token::uint(u64::from(bps) * u64::from(FEE_PIPS_PER_BPS))
}

/// `abi.encode((uint8[] feePreference))`
fn encode_locker_data(rewards: &[RewardRecipient]) -> Vec<u8> {
    let preferences = rewards
        .iter()
        .map(|reward| Token::uint(u64::from(reward.fee_in.code())))
        .collect();
    abi::encode(&[Token::Tuple(vec![Token::Array(preferences)])])
}

/// `abi.encode((address extension, bytes extensionData, bytes feeData))`
fn encode_pool_data(fee: &FeeCurve) -> Vec<u8> {
    let fee_data = match fee {
        FeeCurve::Static(config) => abi::encode(&[
            fee_pips(config.token_fee_bps),
            fee_pips(config.paired_fee_bps),
        ]),
        FeeCurve::Dynamic(config) => abi::encode(&[Token::Tuple(vec![
            fee_pips(config.base_fee_bps),
            fee_pips(config.max_fee_bps),
            Token::uint(config.reference_tick_filter_period),
            Token::uint(config.reset_period),
            Token::Int(i64::from(config.reset_tick_filter)),
            Token::uint(config.fee_control_numerator),
            Token::uint(u64::from(config.decay_filter_bps)),
        ])]),
    };

    abi::encode(&[Token::Tuple(vec![
        Token::Address(Address::ZERO),
        Token::Bytes(Vec::new()),
        Token::Bytes(fee_data),
    ])])
}

fn encode_sniper_data(config: &SniperFeeConfig) -> Vec<u8> {
    abi::encode(&[Token::Tuple(vec![
        Token::uint(u64::from(config.starting_fee)),
        Token::uint(u64::from(config.ending_fee)),
        Token::uint(config.seconds_to_decay),
    ])])
}

fn compile_vault(
    vault: &VaultConfig,
    launch: &ResolvedLaunch,
    protocol: &ProtocolConfig,
) -> Result<CompiledExtension> {
    vault.validate()?;
    let admin = vault.admin.unwrap_or(launch.token_admin);

    msg!(
        "Vault: {} bps, lockup {} days, vesting {} days",
        vault.bps,
        vault.lockup_duration / ONE_DAY,
        vault.vesting_duration / ONE_DAY
    );

    Ok(CompiledExtension {
        kind: ExtensionKind::Vault,
        target: ProtocolConfig::require_deployed(&protocol.vault)?,
        msg_value: U256::ZERO,
        supply_bps: vault.bps,
        data: abi::encode(&[
            Token::Address(admin),
            Token::uint(vault.lockup_duration),
            Token::uint(vault.vesting_duration),
        ]),
    })
}

fn compile_airdrop(
    config: &AirdropConfig,
    launch: &ResolvedLaunch,
    protocol: &ProtocolConfig,
) -> Result<(CompiledExtension, Distribution)> {
    config.validate()?;
    let distribution = Distribution::new(
        config.entries.clone(),
        TOKEN_DECIMALS,
        config.lockup_duration,
        config.vesting_duration,
    )?;
    let supply_bps = units_of_total(config.amount, TOKEN_SUPPLY)?;
    let admin = config.admin.unwrap_or(launch.token_admin);
    let root = distribution.root();

    msg!(
        "Airdrop: {} recipients, {} tokens ({} bps)",
        distribution.entries().len(),
        config.amount,
        supply_bps
    );
    msg!("Airdrop root: 0x{}", hex::encode(root));

    let record = CompiledExtension {
        kind: ExtensionKind::Airdrop,
        target: ProtocolConfig::require_deployed(&protocol.airdrop)?,
        msg_value: U256::ZERO,
        supply_bps,
        data: abi::encode(&[
            Token::Address(admin),
            Token::FixedBytes(root),
            Token::uint(config.lockup_duration),
            Token::uint(config.vesting_duration),
        ]),
    };

    Ok((record, distribution))
}

fn compile_dev_buy(
    dev_buy: &DevBuyConfig,
    launch: &ResolvedLaunch,
    protocol: &ProtocolConfig,
) -> Result<CompiledExtension> {
    dev_buy.validate(&launch.paired_token, &protocol.weth)?;
    let recipient = dev_buy.recipient.unwrap_or(launch.token_admin);
    let pool_key = dev_buy.pool_key.unwrap_or(PoolKey {
        currency0: Address::ZERO,
        currency1: Address::ZERO,
        fee: 0,
        tick_spacing: 0,
        hooks: Address::ZERO,
    });

    msg!("Dev buy: {} wei for {}", dev_buy.eth_amount, recipient);

    Ok(CompiledExtension {
        kind: ExtensionKind::DevBuy,
        target: ProtocolConfig::require_deployed(&protocol.dev_buy)?,
        msg_value: dev_buy.msg_value(),
        supply_bps: 0,
        data: abi::encode(&[
            Token::Tuple(vec![
                Token::Address(pool_key.currency0),
                Token::Address(pool_key.currency1),
                Token::uint(u64::from(pool_key.fee)),
                Token::Int(i64::from(pool_key.tick_spacing)),
                Token::Address(pool_key.hooks),
            ]),
            Token::Uint(U256::from(dev_buy.amount_out_min)),
            Token::Address(recipient),
        ]),
    })
}

fn compile_presale(
    config: &PresaleConfig,
    launch: &ResolvedLaunch,
    protocol: &ProtocolConfig,
) -> Result<(CompiledExtension, Option<Distribution>)> {
    config.validate()?;
    let recipient = config.recipient.unwrap_or(launch.token_admin);

    let allowlist = config
        .allowlist
        .as_ref()
        .map(|entries| {
            let decimals = config.allowlist_decimals.unwrap_or(ETH_DECIMALS);
            Distribution::new(entries.clone(), decimals, 0, 0)
        })
        .transpose()?;
    let allowlist_root = allowlist
        .as_ref()
        .map(Distribution::root)
        .unwrap_or_default();

    msg!(
        "Presale: {} bps, goals {} - {} wei, open for {} hours",
        config.bps,
        config.min_eth_goal,
        config.max_eth_goal,
        config.duration / 3600
    );
    if allowlist.is_some() {
        msg!("Presale allowlist root: 0x{}", hex::encode(allowlist_root));
    }

    let record = CompiledExtension {
        kind: ExtensionKind::Presale,
        target: ProtocolConfig::require_deployed(&protocol.presale)?,
        msg_value: U256::ZERO,
        supply_bps: config.bps,
        data: abi::encode(&[
            Token::Uint(U256::from(config.min_eth_goal)),
            Token::Uint(U256::from(config.max_eth_goal)),
            Token::uint(config.duration),
            Token::Address(recipient),
            Token::uint(config.lockup_duration),
            Token::uint(config.vesting_duration),
            Token::FixedBytes(allowlist_root),
        ]),
    };

    Ok((record, allowlist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DistributionEntry, DynamicFeeConfig, RewardsConfig, StaticFeeConfig};

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn protocol() -> ProtocolConfig {
        ProtocolConfig {
            factory: addr(0xf0),
            locker: addr(0xf1),
            vault: addr(0xf2),
            airdrop: addr(0xf3),
            dev_buy: addr(0xf4),
            presale: addr(0xf5),
            sniper_module: addr(0xf6),
            static_fee_hook: addr(0xf7),
            dynamic_fee_hook: addr(0xf8),
            token_creation_code: vec![0x60, 0x80],
            ..Default::default()
        }
    }

    fn base() -> LaunchConfig {
        LaunchConfig::new("Launch", "LNCH", addr(0xaa))
    }

    fn vault(percentage: f64) -> Extension {
        Extension::Vault(VaultConfig::from_percentage(percentage, MIN_VAULT_LOCKUP, 0).unwrap())
    }

    fn presale(bps: u16) -> Extension {
        Extension::Presale(PresaleConfig {
            bps,
            min_eth_goal: 1,
            max_eth_goal: 10,
            duration: MIN_PRESALE_DURATION,
            recipient: None,
            lockup_duration: 0,
            vesting_duration: 0,
            allowlist: None,
            allowlist_decimals: None,
        })
    }

    #[test]
    fn bare_launch_gets_default_pool_records() {
        let compiled = assemble(&base(), &protocol()).unwrap();
        assert_eq!(compiled.pool_bps, 10_000);
        assert_eq!(compiled.records.len(), 3);
        assert_eq!(compiled.records[0].kind, ExtensionKind::Rewards);
        assert_eq!(compiled.records[1].kind, ExtensionKind::StaticFee);
        assert_eq!(compiled.records[1].target, addr(0xf7));
        assert_eq!(compiled.records[2].kind, ExtensionKind::SniperFeeDecay);
        assert_eq!(compiled.factory_extensions().count(), 0);
        assert_eq!(compiled.msg_value().unwrap(), U256::ZERO);
    }

    #[test]
    fn presale_is_always_last() {
        let config = base()
            .with_extension(presale(2_000))
            .with_extension(vault(10.0));
        let compiled = assemble(&config, &protocol()).unwrap();

        let last = compiled.records.last().unwrap();
        assert_eq!(last.kind, ExtensionKind::Presale);
        assert_eq!(last.target, addr(0xf5));
        assert_eq!(compiled.pool_bps, 7_000);
        assert!(compiled.has_presale());
    }

    #[test]
    fn extensions_may_not_take_more_than_ninety_percent() {
        let config = base()
            .with_extension(vault(60.0))
            .with_extension(presale(3_001));
        assert_eq!(
            assemble(&config, &protocol()).unwrap_err(),
            LaunchError::ExtensionBpsExceeded.into()
        );
    }

    #[test]
    fn dev_buy_is_rejected_alongside_presale() {
        let config = base()
            .with_extension(Extension::DevBuy(DevBuyConfig {
                eth_amount: 1_000,
                recipient: None,
                amount_out_min: 0,
                pool_key: None,
            }))
            .with_extension(presale(1_000));
        assert_eq!(
            assemble(&config, &protocol()).unwrap_err(),
            LaunchError::DevBuyWithPresale.into()
        );
    }

    #[test]
    fn dev_buy_value_is_carried() {
        let config = base().with_extension(Extension::DevBuy(DevBuyConfig {
            eth_amount: 5_000,
            recipient: None,
            amount_out_min: 0,
            pool_key: None,
        }));
        let compiled = assemble(&config, &protocol()).unwrap();
        assert_eq!(compiled.msg_value().unwrap(), U256::from(5_000u64));
    }

    #[test]
    fn airdrop_builds_its_distribution() {
        let entries = vec![
            DistributionEntry::new(addr(1), 300_000_000),
            DistributionEntry::new(addr(2), 100_000_000),
            DistributionEntry::new(addr(3), 50_000_000),
        ];
        let config = base().with_extension(Extension::Airdrop(AirdropConfig {
            admin: None,
            entries,
            amount: 450_000_000,
            lockup_duration: MIN_AIRDROP_LOCKUP,
            vesting_duration: 0,
        }));
        let compiled = assemble(&config, &protocol()).unwrap();

        let record = compiled.record(ExtensionKind::Airdrop).unwrap();
        assert_eq!(record.supply_bps, 45);
        assert_eq!(compiled.pool_bps, 9_955);
        let root = compiled.airdrop.as_ref().unwrap().root();
        // root sits in the second word of the payload
        assert_eq!(&record.data[32..64], &root[..]);
    }

    #[test]
    fn airdrop_must_be_a_whole_number_of_bps() {
        let config = base().with_extension(Extension::Airdrop(AirdropConfig {
            admin: None,
            entries: vec![DistributionEntry::new(addr(1), 1)],
            amount: 1,
            lockup_duration: MIN_AIRDROP_LOCKUP,
            vesting_duration: 0,
        }));
        assert_eq!(
            assemble(&config, &protocol()).unwrap_err(),
            LaunchError::NotBpsAligned.into()
        );
    }

    #[test]
    fn rewards_split_is_validated() {
        let config = base().with_extension(Extension::Rewards(RewardsConfig {
            recipients: vec![RewardRecipient { bps: 9_999, ..RewardRecipient::sole(addr(1)) }],
        }));
        assert_eq!(
            assemble(&config, &protocol()).unwrap_err(),
            LaunchError::BpsSumMismatch.into()
        );
    }

    #[test]
    fn fee_curve_selects_its_hook() {
        let dynamic = base().with_extension(Extension::DynamicFee(DynamicFeeConfig::default()));
        let compiled = assemble(&dynamic, &protocol()).unwrap();
        let record = compiled.record(ExtensionKind::DynamicFee).unwrap();
        assert_eq!(record.target, addr(0xf8));

        let invalid = base().with_extension(Extension::StaticFee(StaticFeeConfig {
            token_fee_bps: 3_001,
            paired_fee_bps: 100,
        }));
        assert_eq!(
            assemble(&invalid, &protocol()).unwrap_err(),
            LaunchError::FeeOutOfRange.into()
        );
    }

    #[test]
    fn undeployed_contracts_are_rejected() {
        let mut protocol = protocol();
        protocol.vault = Address::ZERO;
        let config = base().with_extension(vault(10.0));
        assert_eq!(
            assemble(&config, &protocol).unwrap_err(),
            LaunchError::InvalidAddress.into()
        );
    }

    #[test]
    fn allowlist_caps_can_be_given_in_wei() {
        let buyer = addr(0x01);
        let half_eth = 500_000_000_000_000_000u64;
        let config = base().with_extension(Extension::Presale(PresaleConfig {
            bps: 1_000,
            min_eth_goal: 1,
            max_eth_goal: 10,
            duration: MIN_PRESALE_DURATION,
            recipient: None,
            lockup_duration: 0,
            vesting_duration: 0,
            allowlist: Some(vec![DistributionEntry::new(buyer, half_eth)]),
            allowlist_decimals: Some(0),
        }));

        let compiled = assemble(&config, &protocol()).unwrap();
        let allowlist = compiled.allowlist.unwrap();
        assert_eq!(allowlist.entitlement_of(&buyer).unwrap(), U256::from(half_eth));
    }

    #[test]
    fn allowlist_root_is_zero_without_entries() {
        let compiled = assemble(&base().with_extension(presale(1_000)), &protocol()).unwrap();
        assert!(compiled.allowlist.is_none());
        let data = &compiled.record(ExtensionKind::Presale).unwrap().data;
        assert_eq!(&data[6 * 32..7 * 32], &[0u8; 32][..]);
    }
}
