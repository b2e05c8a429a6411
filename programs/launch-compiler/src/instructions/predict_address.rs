use crate::state::TokenConstructorArgs;
use crate::utils::abi::{self, Token};
use crate::utils::address::{create2_address, keccak256, Address, Digest};

/// Salt the factory passes to CREATE2: `keccak256(abi.encode(deployer, salt))`.
pub fn deployment_salt(deployer: &Address, salt: &Digest) -> Digest {
    let encoded = abi::encode(&[Token::Address(*deployer), Token::FixedBytes(*salt)]);
    keccak256(&[encoded.as_slice()])
}

pub fn predict_from_init_code_hash(
    factory: &Address,
    deployer: &Address,
    salt: &Digest,
    init_code_hash: &Digest,
) -> Address {
    create2_address(factory, &deployment_salt(deployer, salt), init_code_hash)
}

/// Address the factory will deploy the token at for `salt`
pub fn predict_address(
    args: &TokenConstructorArgs,
    creation_code: &[u8],
    factory: &Address,
    salt: &Digest,
    deployer: &Address,
) -> Address {
    let init_code_hash = args.init_code_hash(creation_code);
    predict_from_init_code_hash(factory, deployer, salt, &init_code_hash)
}
