use anchor_lang::prelude::*;
use rayon::prelude::*;
use ruint::aliases::U256;

use crate::constants::{DEFAULT_VANITY_ATTEMPTS, DEFAULT_VANITY_SUFFIX, VANITY_BATCH_SIZE};
use crate::errors::LaunchError;
use crate::instructions::predict_address::predict_from_init_code_hash;
use crate::state::TokenConstructorArgs;
use crate::utils::address::{parse_hex_suffix, Address, Digest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityOptions {
    /// Hex characters the address must end with
    pub suffix: String,
    pub max_attempts: u64,
    /// First candidate index; lets callers resume or split a search
    pub start_index: u64,
    /// Overrides the constructor's originating chain id
    pub chain_id: Option<u64>,
    /// Dedicated worker count; the global rayon pool otherwise
    pub threads: Option<usize>,
}

impl Default for VanityOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_VANITY_SUFFIX.to_string(),
            max_attempts: DEFAULT_VANITY_ATTEMPTS,
            start_index: 0,
            chain_id: None,
            threads: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VanitySalt {
    pub salt: Digest,
    pub address: Address,
    /// Candidate index the salt was derived from
    pub index: u64,
}

/// Candidate salt for an index: the index as a big-endian uint256
pub fn candidate_salt(index: u64) -> Digest {
    U256::from(index).to_be_bytes::<32>()
}

/// Search `[start_index, start_index + max_attempts)` for a salt whose
/// predicted address ends with `options.suffix`. Batches run in parallel and
/// the first match wins, so which matching salt is returned is not fixed.
pub fn search_vanity_salt(
    args: &TokenConstructorArgs,
    creation_code: &[u8],
    factory: &Address,
    deployer: &Address,
    options: &VanityOptions,
) -> Result<VanitySalt> {
    require!(options.max_attempts > 0, LaunchError::InvalidAttemptBudget);
    let nibbles = parse_hex_suffix(&options.suffix)?;
    let end = options
        .start_index
        .checked_add(options.max_attempts)
        .ok_or(LaunchError::MathOverflow)?;

    let mut args = args.clone();
    if let Some(chain_id) = options.chain_id {
        args.originating_chain_id = chain_id;
    }
    let init_code_hash = args.init_code_hash(creation_code);

    msg!(
        "Searching {} candidates from {} for suffix {}",
        options.max_attempts,
        options.start_index,
        options.suffix
    );

    let check = |index: u64| {
        let salt = candidate_salt(index);
        let address = predict_from_init_code_hash(factory, deployer, &salt, &init_code_hash);
        address
            .has_nibble_suffix(&nibbles)
            .then_some(VanitySalt { salt, address, index })
    };

    let found = match options.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|_| error!(LaunchError::ThreadPoolUnavailable))?;
            pool.install(|| race_batches(options.start_index, end, &check))
        }
        None => race_batches(options.start_index, end, &check),
    };

    match found {
        Some(vanity) => {
            msg!("Vanity address {} at index {}", vanity.address.to_checksum(), vanity.index);
            Ok(vanity)
        }
        None => {
            msg!("No address ending in {} within {} attempts", options.suffix, options.max_attempts);
            err!(LaunchError::VanitySaltNotFound)
        }
    }
}

/// Split `[start, end)` into fixed batches and race them across the pool.
/// Batches not yet started when a match lands are skipped.
fn race_batches<F>(start: u64, end: u64, check: &F) -> Option<VanitySalt>
where
    F: Fn(u64) -> Option<VanitySalt> + Sync,
{
    let batches = (end - start).div_ceil(VANITY_BATCH_SIZE);
    (0..batches).into_par_iter().find_map_any(|batch| {
        let lo = start + batch * VANITY_BATCH_SIZE;
        let hi = lo.saturating_add(VANITY_BATCH_SIZE).min(end);
        (lo..hi).find_map(check)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::predict_address::predict_address;

    const CODE: [u8; 4] = [0x60, 0x80, 0x60, 0x40];

    fn admin() -> Address {
        Address::new([0xaa; 20])
    }

    fn factory() -> Address {
        Address::new([0xf0; 20])
    }

    fn args() -> TokenConstructorArgs {
        TokenConstructorArgs {
            name: "Launch".into(),
            symbol: "LNCH".into(),
            max_supply: TokenConstructorArgs::default_supply().unwrap(),
            admin: admin(),
            image: String::new(),
            metadata: String::new(),
            context: String::new(),
            originating_chain_id: 8453,
        }
    }

    #[test]
    fn finds_a_one_character_suffix() {
        let options = VanityOptions {
            suffix: "b".into(),
            max_attempts: 4_096,
            ..Default::default()
        };
        let found = search_vanity_salt(&args(), &CODE, &factory(), &admin(), &options).unwrap();

        assert!(found.address.to_hex().ends_with('b'));
        assert_eq!(found.salt, candidate_salt(found.index));
        assert_eq!(
            found.address,
            predict_address(&args(), &CODE, &factory(), &found.salt, &admin())
        );
    }

    #[test]
    fn exhausted_budget_is_not_found() {
        let options = VanityOptions {
            suffix: "0000000000".into(),
            max_attempts: 64,
            ..Default::default()
        };
        assert_eq!(
            search_vanity_salt(&args(), &CODE, &factory(), &admin(), &options).unwrap_err(),
            LaunchError::VanitySaltNotFound.into()
        );
    }

    #[test]
    fn respects_start_index_and_dedicated_pool() {
        let options = VanityOptions {
            suffix: "7".into(),
            max_attempts: 4_096,
            start_index: 1_000_000,
            threads: Some(2),
            ..Default::default()
        };
        let found = search_vanity_salt(&args(), &CODE, &factory(), &admin(), &options).unwrap();
        assert!(found.index >= 1_000_000 && found.index < 1_004_096);
    }

    #[test]
    fn chain_override_changes_the_init_code() {
        let mut options = VanityOptions {
            suffix: "a".into(),
            max_attempts: 4_096,
            chain_id: Some(1),
            ..Default::default()
        };
        let found = search_vanity_salt(&args(), &CODE, &factory(), &admin(), &options).unwrap();

        let mut mainnet = args();
        mainnet.originating_chain_id = 1;
        assert_eq!(
            found.address,
            predict_address(&mainnet, &CODE, &factory(), &found.salt, &admin())
        );

        options.max_attempts = 0;
        assert_eq!(
            search_vanity_salt(&args(), &CODE, &factory(), &admin(), &options).unwrap_err(),
            LaunchError::InvalidAttemptBudget.into()
        );
    }

    #[test]
    fn malformed_suffix_is_rejected() {
        let options = VanityOptions {
            suffix: "xyz".into(),
            ..Default::default()
        };
        assert_eq!(
            search_vanity_salt(&args(), &CODE, &factory(), &admin(), &options).unwrap_err(),
            LaunchError::InvalidVanitySuffix.into()
        );
    }
}
