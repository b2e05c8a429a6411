use std::fmt;
use std::str::FromStr;

use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;

use crate::errors::LaunchError;

/// 32-byte keccak digest
pub type Digest = [u8; 32];

pub fn keccak256(parts: &[&[u8]]) -> Digest {
    keccak::hashv(parts).to_bytes()
}

/// 20-byte EVM account address
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, AnchorSerialize, AnchorDeserialize,
)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Lowercase hex without the 0x prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// EIP-55 mixed-case representation
    pub fn to_checksum(&self) -> String {
        let lower = self.to_hex();
        let hash = keccak256(&[lower.as_bytes()]);
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Returns true when the trailing nibbles of the address equal `nibbles`.
    /// Each element of `nibbles` is a value in 0..16, most significant first.
    pub fn has_nibble_suffix(&self, nibbles: &[u8]) -> bool {
        if nibbles.len() > 40 {
            return false;
        }
        let offset = 40 - nibbles.len();
        nibbles.iter().enumerate().all(|(i, expected)| {
            let position = offset + i;
            let byte = self.0[position / 2];
            let nibble = if position % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            nibble == *expected
        })
    }
}

impl FromStr for Address {
    type Err = anchor_lang::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        require!(stripped.len() == 40, LaunchError::InvalidAddress);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(stripped, &mut bytes).map_err(|_| LaunchError::InvalidAddress)?;
        Ok(Address(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", self.to_hex())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

/// Parse a hex suffix into nibbles, accepting either case
pub fn parse_hex_suffix(suffix: &str) -> Result<Vec<u8>> {
    let suffix = suffix.strip_prefix("0x").unwrap_or(suffix);
    require!(
        !suffix.is_empty() && suffix.len() <= 40,
        LaunchError::InvalidVanitySuffix
    );
    suffix
        .chars()
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| error!(LaunchError::InvalidVanitySuffix))
        })
        .collect()
}

// address = keccak256(0xff ++ deployer ++ salt ++ keccak256(init_code))[12..]
pub fn create2_address(deployer: &Address, salt: &Digest, init_code_hash: &Digest) -> Address {
    let hash = keccak256(&[&[0xffu8], &deployer.0, salt, init_code_hash]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().expect("address")
    }

    #[test]
    fn create2_matches_eip1014_vectors() {
        let init_code_hash = keccak256(&[&[0x00u8]]);

        let zero = create2_address(&Address::ZERO, &[0u8; 32], &init_code_hash);
        assert_eq!(
            zero.to_checksum(),
            "0x4D1A2e2bB4F88F0250f26Ffff098B0b30B26BF38"
        );

        let deadbeef = create2_address(
            &addr("0xdeadbeef00000000000000000000000000000000"),
            &[0u8; 32],
            &init_code_hash,
        );
        assert_eq!(
            deadbeef.to_checksum(),
            "0xB928f69Bb1D91Cd65274e3c79d8986362984fDA3"
        );
    }

    #[test]
    fn parse_and_display_roundtrip_lowercase() {
        let a = addr("0x4200000000000000000000000000000000000006");
        assert_eq!(a.to_string(), "0x4200000000000000000000000000000000000006");
        assert_eq!(a, crate::constants::WETH);
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz00000000000000000000000000000000000006"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn nibble_suffix_matches_trailing_hex() {
        let a = addr("0x00000000000000000000000000000000000ab07f");
        assert!(a.has_nibble_suffix(&parse_hex_suffix("7f").unwrap()));
        assert!(a.has_nibble_suffix(&parse_hex_suffix("B07F").unwrap()));
        assert!(!a.has_nibble_suffix(&parse_hex_suffix("b07").unwrap()));
    }

    #[test]
    fn suffix_parser_rejects_non_hex_and_empty() {
        assert!(parse_hex_suffix("").is_err());
        assert!(parse_hex_suffix("xyz").is_err());
        assert!(parse_hex_suffix(&"a".repeat(41)).is_err());
    }
}
