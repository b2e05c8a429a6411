pub mod entry_points {
    use const_crypto::sha3::Keccak256;

    const fn selector(signature: &str) -> [u8; 4] {
        let hash = Keccak256::new().update(signature.as_bytes()).finalize();
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Factory entry point taking the full deployment config
    pub const DEPLOY_TOKEN_SIGNATURE: &str = "deployToken(((address,string,string,bytes32,string,string,string,uint256),(address,address,int24,int24,bytes),(address,address[],address[],uint16[],int24[],int24[],uint16[],bytes),(address,bytes),(address,uint256,uint16,bytes)[]))";

    /// Presale entry point; deploys the token once the presale ends
    pub const START_PRESALE_SIGNATURE: &str = "startPresale(((address,string,string,bytes32,string,string,string,uint256),(address,address,int24,int24,bytes),(address,address[],address[],uint16[],int24[],int24[],uint16[],bytes),(address,bytes),(address,uint256,uint16,bytes)[]))";

    pub const DEPLOY_TOKEN: [u8; 4] = selector(DEPLOY_TOKEN_SIGNATURE);

    pub const START_PRESALE: [u8; 4] = selector(START_PRESALE_SIGNATURE);

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn matches_runtime_keccak() {
            assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);

            let hash = crate::utils::address::keccak256(&[DEPLOY_TOKEN_SIGNATURE.as_bytes()]);
            assert_eq!(DEPLOY_TOKEN, [hash[0], hash[1], hash[2], hash[3]]);
            assert_ne!(DEPLOY_TOKEN, START_PRESALE);
        }
    }
}
