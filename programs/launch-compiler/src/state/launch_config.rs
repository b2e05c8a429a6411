use std::collections::BTreeSet;

use anchor_lang::prelude::*;
use serde::Serialize;

use crate::constants::*;
use crate::errors::LaunchError;
use crate::state::extension::{
    DynamicFeeConfig, Extension, SniperFeeConfig, StaticFeeConfig,
};
use crate::state::liquidity::{LiquidityLayout, PoolPreset, PositionBounds, PositionSpec};
use crate::state::rewards::RewardRecipient;
use crate::utils::address::{keccak256, Address, Digest};
use crate::utils::tick_math::tick_from_market_cap;

/// Initial pool price, as a raw tick or a market cap in the paired token
#[derive(Debug, Clone, Copy, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub enum StartingPrice {
    Tick(i32),
    MarketCap(f64),
}

#[derive(Debug, Clone, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub enum PositionsParams {
    Preset(PoolPreset),
    Custom(Vec<PositionSpec>),
}

#[derive(Debug, Clone, Default, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct PoolParams {
    pub paired_token: Option<Address>,
    pub paired_decimals: Option<u8>,
    pub tick_spacing: Option<i32>,
    pub starting_price: Option<StartingPrice>,
    pub positions: Option<PositionsParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, AnchorSerialize, AnchorDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub social_media_urls: Vec<String>,
    pub audit_urls: Vec<String>,
}

/// Where the launch came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, AnchorSerialize, AnchorDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenContext {
    pub interface: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn render_json<T: Serialize>(value: &Option<T>) -> Result<String> {
    match value {
        Some(value) => serde_json::to_string(value)
            .map_err(|_| error!(LaunchError::SerializationFailed)),
        None => Ok(String::new()),
    }
}

/// Declarative description of one token launch
#[derive(Debug, Clone, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct LaunchConfig {
    pub name: String,
    pub symbol: String,
    pub token_admin: Address,
    pub image: Option<String>,
    pub metadata: Option<TokenMetadata>,
    pub context: Option<TokenContext>,
    pub pool: PoolParams,
    pub extensions: Vec<Extension>,
    /// Explicit salt; zero when absent and no vanity search is requested
    pub salt: Option<Digest>,
}

impl LaunchConfig {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, token_admin: Address) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            token_admin,
            image: None,
            metadata: None,
            context: None,
            pool: PoolParams::default(),
            extensions: Vec::new(),
            salt: None,
        }
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// keccak256 of the borsh encoding; changes whenever any field does
    pub fn config_hash(&self) -> Result<Digest> {
        self.check_finite()?;
        let mut bytes = Vec::new();
        AnchorSerialize::serialize(self, &mut bytes)
            .map_err(|_| error!(LaunchError::SerializationFailed))?;
        Ok(keccak256(&[bytes.as_slice()]))
    }

    /// Borsh refuses to encode NaN, so every market cap must be finite
    pub fn check_finite(&self) -> Result<()> {
        if let Some(StartingPrice::MarketCap(market_cap)) = self.pool.starting_price {
            require!(market_cap.is_finite(), LaunchError::NonPositiveMarketCap);
        }
        if let Some(PositionsParams::Custom(specs)) = &self.pool.positions {
            for spec in specs {
                if let PositionBounds::MarketCap { low, high } = spec.bounds {
                    require!(
                        low.is_finite() && high.is_finite(),
                        LaunchError::NonPositiveMarketCap
                    );
                }
            }
        }
        Ok(())
    }

    /// Substitute every default and check identity and pool layout.
    /// Extension-specific rules are checked during assembly.
    pub fn resolve(&self, protocol: &ProtocolConfig) -> Result<ResolvedLaunch> {
        require!(!self.name.trim().is_empty(), LaunchError::MissingName);
        require!(!self.symbol.trim().is_empty(), LaunchError::MissingSymbol);
        require!(!self.token_admin.is_zero(), LaunchError::MissingTokenAdmin);

        let paired_token = self.pool.paired_token.unwrap_or(protocol.weth);
        require!(!paired_token.is_zero(), LaunchError::InvalidAddress);
        let paired_decimals = self.pool.paired_decimals.unwrap_or(DEFAULT_PAIRED_DECIMALS);
        let tick_spacing = self.pool.tick_spacing.unwrap_or(TICK_SPACING);
        require!(tick_spacing > 0, LaunchError::InvalidTickSpacing);

        let starting_tick = match self.pool.starting_price {
            None => DEFAULT_STARTING_TICK,
            Some(StartingPrice::Tick(tick)) => {
                require!(tick % tick_spacing == 0, LaunchError::TickNotAligned);
                require!(
                    (MIN_TICK..=MAX_TICK).contains(&tick),
                    LaunchError::TickOutOfBounds
                );
                tick
            }
            Some(StartingPrice::MarketCap(market_cap)) => {
                tick_from_market_cap(market_cap, paired_decimals, tick_spacing)?
            }
        };

        let layout = match &self.pool.positions {
            None => LiquidityLayout::single(starting_tick, tick_spacing)?,
            Some(PositionsParams::Preset(preset)) => {
                LiquidityLayout::preset(*preset, starting_tick, tick_spacing)?
            }
            Some(PositionsParams::Custom(specs)) => {
                LiquidityLayout::from_specs(specs, paired_decimals, starting_tick, tick_spacing)?
            }
        };

        let mut seen = BTreeSet::new();
        let mut rewards = None;
        let mut fee = None;
        let mut sniper_fee = None;
        let mut extensions = Vec::new();

        for extension in &self.extensions {
            require!(seen.insert(extension.kind()), LaunchError::DuplicateExtension);

            match extension {
                Extension::Rewards(config) => rewards = Some(config.recipients.clone()),
                Extension::StaticFee(config) => {
                    require!(fee.is_none(), LaunchError::ConflictingFeeConfig);
                    fee = Some(FeeCurve::Static(*config));
                }
                Extension::DynamicFee(config) => {
                    require!(fee.is_none(), LaunchError::ConflictingFeeConfig);
                    fee = Some(FeeCurve::Dynamic(*config));
                }
                Extension::SniperFeeDecay(config) => sniper_fee = Some(*config),
                other => extensions.push(self.with_default_admin(other.clone())),
            }
        }

        let rewards = rewards.unwrap_or_else(|| vec![RewardRecipient::sole(self.token_admin)]);
        let fee = fee.unwrap_or_default();
        let sniper_fee = sniper_fee.unwrap_or_default();

        msg!("Resolved launch {} ({})", self.name, self.symbol);
        msg!("Paired token: {}, decimals: {}", paired_token, paired_decimals);
        msg!("Starting tick: {}, spacing: {}", starting_tick, tick_spacing);

        Ok(ResolvedLaunch {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            token_admin: self.token_admin,
            image: self.image.clone().unwrap_or_default(),
            metadata: render_json(&self.metadata)?,
            context: render_json(&self.context)?,
            paired_token,
            paired_decimals,
            tick_spacing,
            starting_tick,
            layout,
            rewards,
            fee,
            sniper_fee,
            extensions,
            salt: self.salt,
        })
    }

    fn with_default_admin(&self, extension: Extension) -> Extension {
        let admin = self.token_admin;
        match extension {
            Extension::Vault(mut vault) => {
                vault.admin.get_or_insert(admin);
                Extension::Vault(vault)
            }
            Extension::Airdrop(mut airdrop) => {
                airdrop.admin.get_or_insert(admin);
                Extension::Airdrop(airdrop)
            }
            Extension::DevBuy(mut dev_buy) => {
                dev_buy.recipient.get_or_insert(admin);
                Extension::DevBuy(dev_buy)
            }
            Extension::Presale(mut presale) => {
                presale.recipient.get_or_insert(admin);
                Extension::Presale(presale)
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeCurve {
    Static(StaticFeeConfig),
    Dynamic(DynamicFeeConfig),
}

impl Default for FeeCurve {
    fn default() -> Self {
        FeeCurve::Static(StaticFeeConfig::default())
    }
}

impl FeeCurve {
    pub fn validate(&self) -> Result<()> {
        match self {
            FeeCurve::Static(config) => config.validate(),
            FeeCurve::Dynamic(config) => config.validate(),
        }
    }

    pub fn hook(&self, protocol: &ProtocolConfig) -> Address {
        match self {
            FeeCurve::Static(_) => protocol.static_fee_hook,
            FeeCurve::Dynamic(_) => protocol.dynamic_fee_hook,
        }
    }
}

/// A launch with every default filled in. Rewards, fee curve and sniper
/// fee are lifted out of the extension list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLaunch {
    pub name: String,
    pub symbol: String,
    pub token_admin: Address,
    pub image: String,
    /// JSON
    pub metadata: String,
    /// JSON
    pub context: String,
    pub paired_token: Address,
    pub paired_decimals: u8,
    pub tick_spacing: i32,
    pub starting_tick: i32,
    pub layout: LiquidityLayout,
    pub rewards: Vec<RewardRecipient>,
    pub fee: FeeCurve,
    pub sniper_fee: SniperFeeConfig,
    /// Vault, airdrop, dev-buy and presale, in input order
    pub extensions: Vec<Extension>,
    pub salt: Option<Digest>,
}

/// Addresses and code of one chain's deployment of the protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub chain_id: u64,
    pub factory: Address,
    pub locker: Address,
    pub vault: Address,
    pub airdrop: Address,
    pub dev_buy: Address,
    pub presale: Address,
    pub sniper_module: Address,
    pub static_fee_hook: Address,
    pub dynamic_fee_hook: Address,
    pub weth: Address,
    /// Token creation bytecode, without constructor arguments
    pub token_creation_code: Vec<u8>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            chain_id: 8453, // Base mainnet
            factory: Address::ZERO,
            locker: Address::ZERO,
            vault: Address::ZERO,
            airdrop: Address::ZERO,
            dev_buy: Address::ZERO,
            presale: Address::ZERO,
            sniper_module: Address::ZERO,
            static_fee_hook: Address::ZERO,
            dynamic_fee_hook: Address::ZERO,
            weth: WETH,
            token_creation_code: Vec::new(),
        }
    }
}

impl ProtocolConfig {
    /// Fails when a contract the launch needs has no address on this chain
    pub fn require_deployed(address: &Address) -> Result<Address> {
        require!(!address.is_zero(), LaunchError::InvalidAddress);
        Ok(*address)
    }
}
