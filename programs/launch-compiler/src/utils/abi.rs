use ruint::aliases::U256;

use crate::utils::address::{Address, Digest};

/// A Solidity ABI value. Integer widths below 256 bits are carried as
/// `Uint`/`Int` and padded like any other word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(U256),
    Int(i64),
    Bool(bool),
    FixedBytes(Digest),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Token>),
    Tuple(Vec<Token>),
}

impl Token {
    pub fn uint(value: u64) -> Self {
        Token::Uint(U256::from(value))
    }

    pub fn is_dynamic(&self) -> bool {
        match self {
            Token::Bytes(_) | Token::String(_) | Token::Array(_) => true,
            Token::Tuple(items) => items.iter().any(Token::is_dynamic),
            _ => false,
        }
    }

    /// Size of the head slot taken by this value inside an enclosing tuple
    fn head_size(&self) -> usize {
        match self {
            Token::Tuple(items) if !self.is_dynamic() => items.iter().map(Token::head_size).sum(),
            _ => 32,
        }
    }
}

fn word_from_usize(value: usize) -> [u8; 32] {
    U256::from(value).to_be_bytes::<32>()
}

fn int_word(value: i64) -> [u8; 32] {
    let fill = if value < 0 { 0xff } else { 0x00 };
    let mut word = [fill; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn padded(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(32 + data.len().div_ceil(32) * 32);
    out.extend_from_slice(&word_from_usize(data.len()));
    out.extend_from_slice(data);
    let rem = data.len() % 32;
    if rem != 0 {
        out.resize(out.len() + 32 - rem, 0);
    }
    out
}

fn encode_token(token: &Token) -> Vec<u8> {
    match token {
        Token::Address(address) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(&address.0);
            word.to_vec()
        }
        Token::Uint(value) => value.to_be_bytes::<32>().to_vec(),
        Token::Int(value) => int_word(*value).to_vec(),
        Token::Bool(value) => word_from_usize(*value as usize).to_vec(),
        Token::FixedBytes(bytes) => bytes.to_vec(),
        Token::Bytes(bytes) => padded(bytes),
        Token::String(s) => padded(s.as_bytes()),
        Token::Array(items) => {
            let mut out = word_from_usize(items.len()).to_vec();
            out.extend(encode_tuple(items));
            out
        }
        Token::Tuple(items) => encode_tuple(items),
    }
}

fn encode_tuple(items: &[Token]) -> Vec<u8> {
    let head_len: usize = items.iter().map(Token::head_size).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for item in items {
        if item.is_dynamic() {
            head.extend_from_slice(&word_from_usize(head_len + tail.len()));
            tail.extend(encode_token(item));
        } else {
            head.extend(encode_token(item));
        }
    }
    head.extend(tail);
    head
}

/// Equivalent of Solidity's `abi.encode(tokens...)`
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    encode_tuple(tokens)
}

/// Calldata for a function call: selector followed by the encoded arguments
pub fn encode_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut out = selector.to_vec();
    out.extend(encode(tokens));
    out
}
