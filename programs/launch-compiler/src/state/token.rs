use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::constants::{TOKEN_DECIMALS, TOKEN_SUPPLY};
use crate::state::distribution::scale_to_base_units;
use crate::utils::abi::{self, Token};
use crate::utils::address::{keccak256, Address, Digest};

/// Arguments the factory passes to the token constructor.
/// Together with the creation code they fix the init code hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConstructorArgs {
    pub name: String,
    pub symbol: String,
    /// Max supply in base units
    pub max_supply: U256,
    pub admin: Address,
    pub image: String,
    pub metadata: String,
    pub context: String,
    pub originating_chain_id: u64,
}

impl TokenConstructorArgs {
    /// Default supply (100B tokens at 18 decimals)
    pub fn default_supply() -> Result<U256> {
        scale_to_base_units(TOKEN_SUPPLY, TOKEN_DECIMALS)
    }

    pub fn encode(&self) -> Vec<u8> {
        abi::encode(&[
            Token::String(self.name.clone()),
            Token::String(self.symbol.clone()),
            Token::Uint(self.max_supply),
            Token::Address(self.admin),
            Token::String(self.image.clone()),
            Token::String(self.metadata.clone()),
            Token::String(self.context.clone()),
            Token::uint(self.originating_chain_id),
        ])
    }

    pub fn init_code(&self, creation_code: &[u8]) -> Vec<u8> {
        let mut code = creation_code.to_vec();
        code.extend(self.encode());
        code
    }

    pub fn init_code_hash(&self, creation_code: &[u8]) -> Digest {
        keccak256(&[creation_code, self.encode().as_slice()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TokenConstructorArgs {
        TokenConstructorArgs {
            name: "Launch".into(),
            symbol: "LNCH".into(),
            max_supply: TokenConstructorArgs::default_supply().unwrap(),
            admin: Address::new([7u8; 20]),
            image: String::new(),
            metadata: String::new(),
            context: String::new(),
            originating_chain_id: 8453,
        }
    }

    #[test]
    fn init_code_hash_covers_code_and_args() {
        let code = vec![0x60, 0x80, 0x60, 0x40];
        let args = args();
        assert_eq!(
            args.init_code_hash(&code),
            keccak256(&[args.init_code(&code).as_slice()])
        );

        let mut renamed = args.clone();
        renamed.symbol = "LNCH2".into();
        assert_ne!(args.init_code_hash(&code), renamed.init_code_hash(&code));
    }

    #[test]
    fn default_supply_is_one_hundred_billion_tokens() {
        let supply = TokenConstructorArgs::default_supply().unwrap();
        assert_eq!(
            supply,
            U256::from(100_000_000_000u64) * U256::from(10u64).pow(U256::from(18u64))
        );
    }
}
