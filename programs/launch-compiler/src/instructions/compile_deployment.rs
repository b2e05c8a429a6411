use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::const_selectors::entry_points::{DEPLOY_TOKEN, START_PRESALE};
use crate::errors::LaunchError;
use crate::instructions::assemble_extensions::{assemble, CompiledExtensions};
use crate::instructions::mine_vanity_salt::{search_vanity_salt, VanityOptions, VanitySalt};
use crate::instructions::predict_address::predict_address;
use crate::state::{
    CompiledExtension, ExtensionKind, FeeCurve, LaunchConfig, ProtocolConfig, TokenConstructorArgs,
};
use crate::utils::abi::{self, Token};
use crate::utils::address::{Address, Digest};

/// Call the transport layer signs and submits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTransaction {
    pub to: Address,
    pub data: Vec<u8>,
    pub value: U256,
}

#[derive(Debug, Clone)]
pub struct CompiledDeployment {
    pub transaction: DeploymentTransaction,
    pub expected_address: Address,
    /// Salt placed in the token config (before deployer mixing)
    pub salt: Digest,
    pub extensions: CompiledExtensions,
    /// Hash of the config this was compiled from
    pub config_hash: Digest,
    pub vanity: Option<VanitySalt>,
}

impl CompiledDeployment {
    /// False once any field of `config` differs from the compiled one,
    /// which invalidates `expected_address`
    pub fn matches(&self, config: &LaunchConfig) -> Result<bool> {
        Ok(config.config_hash()? == self.config_hash)
    }
}

/// Compile a launch into a deployment transaction and its predicted address.
/// The salt is the explicit one, a mined vanity salt, or zero.
pub fn compile_deployment(
    config: &LaunchConfig,
    protocol: &ProtocolConfig,
    vanity: Option<&VanityOptions>,
) -> Result<CompiledDeployment> {
    require!(
        config.salt.is_none() || vanity.is_none(),
        LaunchError::ConflictingSalt
    );

    let extensions = assemble(config, protocol)?;
    let config_hash = config.config_hash()?;
    let factory = ProtocolConfig::require_deployed(&protocol.factory)?;
    let launch = &extensions.launch;

    let chain_id = vanity
        .and_then(|options| options.chain_id)
        .unwrap_or(protocol.chain_id);
    let args = TokenConstructorArgs {
        name: launch.name.clone(),
        symbol: launch.symbol.clone(),
        max_supply: TokenConstructorArgs::default_supply()?,
        admin: launch.token_admin,
        image: launch.image.clone(),
        metadata: launch.metadata.clone(),
        context: launch.context.clone(),
        originating_chain_id: chain_id,
    };

    let (salt, vanity) = match vanity {
        Some(options) => {
            let found = search_vanity_salt(
                &args,
                &protocol.token_creation_code,
                &factory,
                &launch.token_admin,
                options,
            )?;
            (found.salt, Some(found))
        }
        None => (launch.salt.unwrap_or_default(), None),
    };

    let expected_address = predict_address(
        &args,
        &protocol.token_creation_code,
        &factory,
        &salt,
        &launch.token_admin,
    );

    let deployment = encode_deployment_config(&extensions, &args, &salt)?;
    let (to, selector) = if extensions.has_presale() {
        (ProtocolConfig::require_deployed(&protocol.presale)?, START_PRESALE)
    } else {
        (factory, DEPLOY_TOKEN)
    };
    let transaction = DeploymentTransaction {
        to,
        data: abi::encode_call(selector, &[deployment]),
        value: extensions.msg_value()?,
    };

    msg!("Compiled deployment of {} ({})", launch.name, launch.symbol);
    msg!("Target: {}, value: {} wei", transaction.to, transaction.value);
    msg!("Salt: 0x{}", hex::encode(salt));
    msg!("Expected address: {}", expected_address.to_checksum());

    Ok(CompiledDeployment {
        transaction,
        expected_address,
        salt,
        extensions,
        config_hash,
        vanity,
    })
}

fn pool_record(extensions: &CompiledExtensions, kind: ExtensionKind) -> Result<&CompiledExtension> {
    extensions
        .record(kind)
        .ok_or_else(|| error!(LaunchError::MissingPoolRecord))
}

/// The `DeploymentConfig` tuple taken by `deployToken` and `startPresale`
fn encode_deployment_config(
    extensions: &CompiledExtensions,
    args: &TokenConstructorArgs,
    salt: &Digest,
) -> Result<Token> {
    let launch = &extensions.launch;

    let fee_kind = match launch.fee {
        FeeCurve::Static(_) => ExtensionKind::StaticFee,
        FeeCurve::Dynamic(_) => ExtensionKind::DynamicFee,
    };
    let pool = pool_record(extensions, fee_kind)?;
    let locker = pool_record(extensions, ExtensionKind::Rewards)?;
    let sniper = pool_record(extensions, ExtensionKind::SniperFeeDecay)?;

    let token_config = Token::Tuple(vec![
        Token::Address(launch.token_admin),
        Token::String(args.name.clone()),
        Token::String(args.symbol.clone()),
        Token::FixedBytes(*salt),
        Token::String(args.image.clone()),
        Token::String(args.metadata.clone()),
        Token::String(args.context.clone()),
        Token::uint(args.originating_chain_id),
    ]);

    let pool_config = Token::Tuple(vec![
        Token::Address(pool.target),
        Token::Address(launch.paired_token),
        Token::Int(i64::from(launch.starting_tick)),
        Token::Int(i64::from(launch.tick_spacing)),
        Token::Bytes(pool.data.clone()),
    ]);

    let positions = launch.layout.positions();
    let locker_config = Token::Tuple(vec![
        Token::Address(locker.target),
        Token::Array(launch.rewards.iter().map(|r| Token::Address(r.admin)).collect()),
        Token::Array(launch.rewards.iter().map(|r| Token::Address(r.recipient)).collect()),
        Token::Array(launch.rewards.iter().map(|r| Token::uint(u64::from(r.bps))).collect()),
        Token::Array(positions.iter().map(|p| Token::Int(i64::from(p.range.lower))).collect()),
        Token::Array(positions.iter().map(|p| Token::Int(i64::from(p.range.upper))).collect()),
        Token::Array(positions.iter().map(|p| Token::uint(u64::from(p.bps))).collect()),
        Token::Bytes(locker.data.clone()),
    ]);

    let mev_module_config = Token::Tuple(vec![
        Token::Address(sniper.target),
        Token::Bytes(sniper.data.clone()),
    ]);

    let extension_configs = Token::Array(
        extensions
            .factory_extensions()
            .map(|record| {
                Token::Tuple(vec![
                    Token::Address(record.target),
                    Token::Uint(record.msg_value),
                    Token::uint(u64::from(record.supply_bps)),
                    Token::Bytes(record.data.clone()),
                ])
            })
            .collect(),
    );

    Ok(Token::Tuple(vec![
        token_config,
        pool_config,
        locker_config,
        mev_module_config,
        extension_configs,
    ]))
}
