//! Protocol constants shared by the address codec and its front ends.

/// Network identifier used when the caller does not ask for a specific one.
/// 42 is the generic Substrate rendering.
pub const DEFAULT_SS58_FORMAT: u16 = 42;

/// Largest network identifier representable by the two-byte SS58 prefix.
pub const MAX_SS58_FORMAT: u16 = 0x3fff;

/// Network identifiers that SS58 reserves and never assigns.
pub const RESERVED_SS58_FORMATS: [u16; 2] = [46, 47];

/// Domain separator hashed in front of every SS58 checksum payload.
pub const SS58_CHECKSUM_DOMAIN: &[u8] = b"SS58PRE";

/// Domain separator hashed in front of an Ethereum address when deriving its
/// Substrate mirror.
pub const EVM_MIRROR_DOMAIN: &[u8] = b"evm:";

/// Lower-cased 16 byte prefix of every collection pseudo-address.
pub const COLLECTION_ADDRESS_PREFIX: &str = "0x17c4e6453cc49aaaaeaca894e6d9683e";

/// Lower-cased 12 byte prefix of every nesting (token owner) pseudo-address.
pub const NESTING_ADDRESS_PREFIX: &str = "0xf8238ccfff8ed887463fd5e0";

/// `eth` side of an `{eth, sub}` pair that carries a Substrate identity.
pub const ETHEREUM_ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// `sub` side of an `{eth, sub}` pair that carries an Ethereum identity.
pub const SUBSTRATE_ZERO_PUBLIC_KEY: &str = "0x00";

#[test]
fn test_pseudo_address_prefixes() {
    // Prefix + packed integers must add up to exactly 20 bytes.
    let collection = hex::decode(&COLLECTION_ADDRESS_PREFIX[2..]).unwrap();
    assert_eq!(collection.len() + 4, 20);

    let nesting = hex::decode(&NESTING_ADDRESS_PREFIX[2..]).unwrap();
    assert_eq!(nesting.len() + 4 + 4, 20);

    assert_eq!(
        COLLECTION_ADDRESS_PREFIX,
        COLLECTION_ADDRESS_PREFIX.to_lowercase()
    );
    assert_eq!(NESTING_ADDRESS_PREFIX, NESTING_ADDRESS_PREFIX.to_lowercase());
}

#[test]
fn test_wire_sentinels() {
    assert_eq!(ETHEREUM_ZERO_ADDRESS.len(), 42);
    assert!(hex::decode(&ETHEREUM_ZERO_ADDRESS[2..])
        .unwrap()
        .iter()
        .all(|b| *b == 0));
    assert_eq!(hex::decode(&SUBSTRATE_ZERO_PUBLIC_KEY[2..]).unwrap(), [0]);
}

#[test]
fn test_domain_separators() {
    assert_eq!(SS58_CHECKSUM_DOMAIN, [83, 83, 53, 56, 80, 82, 69]);
    assert_eq!(EVM_MIRROR_DOMAIN, [101, 118, 109, 58]);
}
