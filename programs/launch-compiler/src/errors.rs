use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchError {
    // ===== Allocation Errors =====
    #[msg("Basis points must sum to exactly 10000")]
    BpsSumMismatch,

    #[msg("Basis point entry must be within [1, 10000]")]
    BpsOutOfRange,

    #[msg("Percentage must be within [0, 100] with at most two decimals")]
    InvalidPercentage,

    #[msg("Amount is not a whole number of basis points of the total")]
    NotBpsAligned,

    #[msg("Extensions take more than the maximum share of supply")]
    ExtensionBpsExceeded,

    // ===== Tick Errors =====
    #[msg("Tick is not a multiple of the tick spacing")]
    TickNotAligned,

    #[msg("Tick range lower bound must be below its upper bound")]
    InvalidTickRange,

    #[msg("Tick spacing must be positive")]
    InvalidTickSpacing,

    #[msg("Tick is outside the supported range")]
    TickOutOfBounds,

    #[msg("Position starts below the starting tick")]
    PositionBelowStartingTick,

    #[msg("Liquidity layout needs between 1 and 7 positions")]
    InvalidPositionCount,

    // ===== Domain Errors =====
    #[msg("Market cap must be a positive finite number")]
    NonPositiveMarketCap,

    #[msg("Market cap maps outside the tick range")]
    MarketCapOutOfDomain,

    // ===== Identity Errors =====
    #[msg("Token name is required")]
    MissingName,

    #[msg("Token symbol is required")]
    MissingSymbol,

    #[msg("Token admin must not be the zero address")]
    MissingTokenAdmin,

    #[msg("Invalid address")]
    InvalidAddress,

    // ===== Distribution Errors =====
    #[msg("Distribution has no entries")]
    EmptyDistribution,

    #[msg("Recipient appears more than once in a distribution")]
    DuplicateRecipient,

    #[msg("Distribution entry has zero entitlement")]
    ZeroEntitlement,

    #[msg("Recipient is not part of the distribution")]
    RecipientNotFound,

    #[msg("Vesting must end at or after the lockup ends")]
    InvalidVestingWindow,

    // ===== Extension Errors =====
    #[msg("Extension kind supplied more than once")]
    DuplicateExtension,

    #[msg("Compiled launch is missing its locker, fee hook or sniper record")]
    MissingPoolRecord,

    #[msg("Static and dynamic fee configurations are mutually exclusive")]
    ConflictingFeeConfig,

    #[msg("Vault lockup is shorter than the protocol minimum")]
    VaultLockupTooShort,

    #[msg("Vault share is out of range")]
    InvalidVaultShare,

    #[msg("Airdrop amount does not match the sum of its entries")]
    AirdropAmountMismatch,

    #[msg("Airdrop lockup is shorter than the protocol minimum")]
    AirdropLockupTooShort,

    #[msg("Dev buy amount must be positive")]
    InvalidDevBuyAmount,

    #[msg("Dev buy into a non-WETH pair needs a pool key")]
    DevBuyPoolKeyMissing,

    #[msg("Dev buy cannot be combined with a presale")]
    DevBuyWithPresale,

    #[msg("Reward recipients are empty or exceed the maximum")]
    InvalidRewardRecipients,

    #[msg("Presale minimum goal exceeds its maximum goal")]
    PresaleGoalsInverted,

    #[msg("Presale duration is outside the allowed window")]
    InvalidPresaleDuration,

    #[msg("Presale share is out of range")]
    InvalidPresaleShare,

    #[msg("Allowlist caps cannot have more decimals than ETH")]
    InvalidAllowlistDecimals,

    #[msg("Fee is outside the allowed range")]
    FeeOutOfRange,

    #[msg("Dynamic base fee exceeds its maximum fee")]
    DynamicFeeInverted,

    #[msg("Sniper fee must decay from a higher to a lower fee")]
    InvalidSniperFee,

    #[msg("Sniper fee decay window is out of range")]
    InvalidSniperDecay,

    // ===== Salt Errors =====
    #[msg("Explicit salt and vanity search are mutually exclusive")]
    ConflictingSalt,

    #[msg("Vanity suffix must be 1 to 40 hex characters")]
    InvalidVanitySuffix,

    #[msg("Vanity search needs a positive attempt budget")]
    InvalidAttemptBudget,

    #[msg("No salt matched the vanity suffix within the attempt budget")]
    VanitySaltNotFound,

    #[msg("Could not start the search thread pool")]
    ThreadPoolUnavailable,

    // ===== Math Errors =====
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    #[msg("Type conversion failed")]
    TypeCastFailed,

    #[msg("Serialization failed")]
    SerializationFailed,
}
