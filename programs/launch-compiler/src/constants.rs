use crate::utils::address::Address;

// ===== Token Configuration =====
/// Token decimals (standard ERC-20)
pub const TOKEN_DECIMALS: u8 = 18;

/// Total supply in whole tokens: 100 billion
pub const TOKEN_SUPPLY: u64 = 100_000_000_000;

/// Price of one token when the market cap is one paired-token unit.
/// Derived from the supply so a different supply moves the whole tick grid.
pub const UNIT_PRICE: f64 = 1.0 / TOKEN_SUPPLY as f64;

// ===== Basis Points =====
/// 10000 bps = 100%
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Maximum share of supply that extensions may take (90%)
pub const MAX_EXTENSION_BPS: u16 = 9_000;

/// Maximum vault share of supply (90%)
pub const MAX_VAULT_BPS: u16 = 9_000;

/// Maximum number of reward recipients in a locker
pub const MAX_REWARD_RECIPIENTS: usize = 7;

/// Maximum number of liquidity positions in a layout
pub const MAX_LIQUIDITY_POSITIONS: usize = 7;

// ===== Pool Configuration =====
/// Tick spacing of the reference deployment
pub const TICK_SPACING: i32 = 200;

/// Price at tick t is TICK_BASE^t
pub const TICK_BASE: f64 = 1.0001;

pub const MIN_TICK: i32 = -887_272;
pub const MAX_TICK: i32 = 887_272;

/// Default starting tick: about 10 paired tokens of market cap
pub const DEFAULT_STARTING_TICK: i32 = -230_400;

/// Upper tick of the default single-position layout
pub const DEFAULT_UPPER_TICK: i32 = -120_000;

/// Decimals of the default paired token (WETH)
pub const DEFAULT_PAIRED_DECIMALS: u8 = 18;

/// Wrapped ether on Base and other OP-stack chains
pub const WETH: Address = Address::new([
    0x42, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x06,
]);

// ===== Fee Configuration =====
/// Uniswap fee units (pips) per basis point
pub const FEE_PIPS_PER_BPS: u32 = 100;

/// Default static LP fee on the token side: 1%
pub const DEFAULT_TOKEN_FEE_BPS: u16 = 100;

/// Default static LP fee on the paired side: 1%
pub const DEFAULT_PAIRED_FEE_BPS: u16 = 100;

/// Maximum LP fee: 30%
pub const MAX_LP_FEE_BPS: u16 = 3_000;

/// Minimum base fee of a dynamic fee curve: 0.25%
pub const MIN_DYNAMIC_BASE_FEE_BPS: u16 = 25;

// ===== Sniper Fee Decay =====
/// Default starting MEV fee in pips (66.6777%)
pub const DEFAULT_SNIPER_STARTING_FEE: u32 = 666_777;

/// Default ending MEV fee in pips (4.1673%)
pub const DEFAULT_SNIPER_ENDING_FEE: u32 = 41_673;

/// Default decay window in seconds
pub const DEFAULT_SNIPER_DECAY_SECONDS: u64 = 15;

/// Maximum starting MEV fee in pips (80%)
pub const MAX_SNIPER_FEE: u32 = 800_000;

/// Maximum decay window: 2 minutes
pub const MAX_SNIPER_DECAY_SECONDS: u64 = 2 * 60;

// ===== Lockup Configuration =====
pub const ONE_DAY: u64 = 24 * 60 * 60;

/// Minimum vault lockup: 7 days (in seconds)
pub const MIN_VAULT_LOCKUP: u64 = 7 * ONE_DAY;

/// Minimum airdrop lockup: 1 day (in seconds)
pub const MIN_AIRDROP_LOCKUP: u64 = ONE_DAY;

// ===== Presale Configuration =====
/// Minimum presale duration: 1 hour
pub const MIN_PRESALE_DURATION: u64 = 60 * 60;

/// Maximum presale duration: 6 weeks
pub const MAX_PRESALE_DURATION: u64 = 6 * 7 * ONE_DAY;

/// Decimals of presale allowlist amounts (ETH)
pub const ETH_DECIMALS: u8 = 18;

// ===== Vanity Search =====
/// Suffix used when a vanity address is requested without one
pub const DEFAULT_VANITY_SUFFIX: &str = "b07";

/// Default attempt budget (16M candidates)
pub const DEFAULT_VANITY_ATTEMPTS: u64 = 1 << 24;

/// Candidates evaluated sequentially by one worker before it checks for a winner
pub const VANITY_BATCH_SIZE: u64 = 4_096;
