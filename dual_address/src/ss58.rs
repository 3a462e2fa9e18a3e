//! SS58: the network-prefixed, checksummed, base58 rendering of Substrate
//! public keys.
//!
//! Decoded layout:
//!
//! > prefix (1 or 2 bytes) | public key | checksum (1 or 2 bytes)
//!
//! Network ids below 64 take a single prefix byte. Ids in `64..=16383` are
//! split over two bytes with bit 6 of the first byte set. The checksum is the
//! head of `blake2b_512("SS58PRE" ++ prefix ++ public key)`: two bytes for 32
//! and 33 byte keys, one byte otherwise.

use blake2::{digest::Output, Blake2b512, Digest};
use dual_address_common::{
    DEFAULT_SS58_FORMAT, MAX_SS58_FORMAT, RESERVED_SS58_FORMATS, SS58_CHECKSUM_DOMAIN,
};
use log::trace;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{error::AddressError, hex_utils};

/// Public key lengths SS58 can carry.
pub const ALLOWED_KEY_LENGTHS: [usize; 6] = [1, 2, 4, 8, 32, 33];

/// Base58-decoded lengths (prefix + key + checksum) of valid addresses.
pub const ALLOWED_DECODED_LENGTHS: [usize; 8] = [3, 4, 6, 10, 35, 36, 37, 38];

/// Length of a hex public key as accepted in place of an address: `0x`
/// followed by 64 hex digits.
pub const PUBLIC_KEY_TEXT_LEN: usize = 66;

/// Successful outcome of [`decode`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedAddress {
    /// Raw public key bytes, between the prefix and the checksum.
    pub public_key: Vec<u8>,
    /// [`DecodedAddress::public_key`] as lowercase `0x` hex.
    pub hex: String,
    /// [`DecodedAddress::public_key`] read as a big-endian integer.
    pub integer: BigUint,
    /// Network identifier found in the prefix.
    pub ss58_format: u16,
}

fn checksum_hash(payload: &[u8]) -> Output<Blake2b512> {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_CHECKSUM_DOMAIN);
    hasher.update(payload);
    hasher.finalize()
}

/// Checksum length for a key (or decoded payload) of the given shape.
fn checksum_len(is_public_key: bool) -> usize {
    if is_public_key {
        2
    } else {
        1
    }
}

/// Fails with [`AddressError::Range`] unless `ss58_format` is assignable.
pub fn validate_format(ss58_format: u16) -> Result<(), AddressError> {
    if ss58_format > MAX_SS58_FORMAT || RESERVED_SS58_FORMATS.contains(&ss58_format) {
        return Err(AddressError::range("ss58_format", ss58_format));
    }

    Ok(())
}

fn prefix_bytes(ss58_format: u16) -> Vec<u8> {
    if ss58_format < 64 {
        vec![ss58_format as u8]
    } else {
        vec![
            (((ss58_format & 0x00fc) >> 2) as u8) | 0x40,
            ((ss58_format >> 8) as u8) | (((ss58_format & 0x0003) << 6) as u8),
        ]
    }
}

/// Encodes `public_key` under network `ss58_format`.
pub fn encode(public_key: &[u8], ss58_format: u16) -> Result<String, AddressError> {
    validate_format(ss58_format)?;

    if !ALLOWED_KEY_LENGTHS.contains(&public_key.len()) {
        return Err(AddressError::format(
            "public key",
            format!(
                "key length is not valid, received {}, valid values are {:?}",
                public_key.len(),
                ALLOWED_KEY_LENGTHS
            ),
        ));
    }

    let mut payload = prefix_bytes(ss58_format);
    payload.extend_from_slice(public_key);

    let hash = checksum_hash(&payload);
    let is_public_key = public_key.len() == 32 || public_key.len() == 33;
    payload.extend_from_slice(&hash[..checksum_len(is_public_key)]);

    Ok(bs58::encode(payload).into_string())
}

/// Encodes a hex public key (`0x` optional).
pub fn encode_hex(public_key: &str, ss58_format: u16) -> Result<String, AddressError> {
    encode(&hex_utils::to_bytes(public_key)?, ss58_format)
}

/// Encodes the minimal big-endian bytes of `public_key`.
pub fn encode_integer(public_key: &BigUint, ss58_format: u16) -> Result<String, AddressError> {
    encode(&public_key.to_bytes_be(), ss58_format)
}

/// Decodes `address`, checking its checksum, whatever its network.
pub fn decode(address: &str) -> Result<DecodedAddress, AddressError> {
    decode_with_options(address, false, None)
}

/// Decodes `address`.
///
/// With `ignore_checksum` the trailing checksum bytes are dropped unchecked.
/// With `expected_format`, an address rendered under any other network is
/// rejected with [`AddressError::NetworkMismatch`].
pub fn decode_with_options(
    address: &str,
    ignore_checksum: bool,
    expected_format: Option<u16>,
) -> Result<DecodedAddress, AddressError> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| AddressError::format("ss58 address", format!("decoding {address}: {e}")))?;

    if !ALLOWED_DECODED_LENGTHS.contains(&decoded.len()) {
        return Err(AddressError::format(
            "ss58 address",
            format!(
                "decoded key length is {}, valid values are {:?}",
                decoded.len(),
                ALLOWED_DECODED_LENGTHS
            ),
        ));
    }

    let prefix_len = if decoded[0] & 0b0100_0000 != 0 { 2 } else { 1 };
    let ss58_format = if prefix_len == 1 {
        decoded[0] as u16
    } else {
        (((decoded[0] & 0x3f) as u16) << 2)
            | ((decoded[1] >> 6) as u16)
            | (((decoded[1] & 0x3f) as u16) << 8)
    };

    // 32 or 33 byte key + 2 checksum bytes + prefix.
    let is_public_key = decoded.len() == 34 + prefix_len || decoded.len() == 35 + prefix_len;
    let end = decoded.len() - checksum_len(is_public_key);

    if !ignore_checksum {
        let hash = checksum_hash(&decoded[..end]);
        let is_valid = decoded[0] & 0x80 == 0
            && !RESERVED_SS58_FORMATS.contains(&(decoded[0] as u16))
            && decoded[end..] == hash[..decoded.len() - end];

        if !is_valid {
            return Err(AddressError::Checksum);
        }
    }

    if let Some(expected) = expected_format {
        if expected != ss58_format {
            return Err(AddressError::NetworkMismatch {
                expected,
                decoded: ss58_format,
            });
        }
    }

    let public_key = decoded[prefix_len..end].to_vec();
    if public_key.is_empty() {
        return Err(AddressError::format(
            "ss58 address",
            format!("{address} carries no public key"),
        ));
    }

    trace!(
        "Decoded ss58 address {} (format: {}, key length: {})",
        address,
        ss58_format,
        public_key.len()
    );

    Ok(DecodedAddress {
        hex: hex_utils::from_bytes(&public_key),
        integer: BigUint::from_bytes_be(&public_key),
        public_key,
        ss58_format,
    })
}

/// Re-encodes `address` under `ss58_format`.
pub fn normalize(address: &str, ss58_format: u16) -> Result<String, AddressError> {
    encode(&decode(address)?.public_key, ss58_format)
}

/// [`normalize`] under [`DEFAULT_SS58_FORMAT`].
pub fn normalize_default(address: &str) -> Result<String, AddressError> {
    normalize(address, DEFAULT_SS58_FORMAT)
}

/// Two addresses are equal iff they carry the same public key, whatever
/// their networks. Addresses that fail to decode are never equal.
pub fn compare(a: &str, b: &str) -> bool {
    match (decode(a), decode(b)) {
        (Ok(a), Ok(b)) => a.integer == b.integer,
        _ => false,
    }
}

/// Returns `true` iff `address` decodes with a valid checksum.
pub fn is_valid(address: &str) -> bool {
    decode(address).is_ok()
}

/// Fails with the [`decode`] error unless `address` is valid.
pub fn validate(address: &str) -> Result<(), AddressError> {
    decode(address).map(|_| ())
}

/// Returns `true` iff `key` is `0x` followed by 64 hex digits, i.e. a raw 32
/// byte public key rather than an SS58 address.
pub fn is_public_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    bytes.len() == PUBLIC_KEY_TEXT_LEN
        && key.starts_with("0x")
        && bytes[2..].iter().all(u8::is_ascii_hexdigit)
}
