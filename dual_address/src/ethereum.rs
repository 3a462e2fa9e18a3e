//! Ethereum addresses: format validation, EIP-55 mixed-case checksums and the
//! pseudo-addresses that pack collection and token ids into 20 bytes.

use dual_address_common::{COLLECTION_ADDRESS_PREFIX, NESTING_ADDRESS_PREFIX};
use ethereum_types::H160;
use keccak_hash::keccak;
use log::trace;

use crate::{error::AddressError, hex_utils};

/// Length of a textual Ethereum address: `0x` followed by 40 hex digits.
pub const ADDRESS_TEXT_LEN: usize = 42;

/// Returns `true` iff `address` is `0x` followed by exactly 40 hex digits of
/// either case. The checksum casing is not checked.
pub fn is_valid(address: &str) -> bool {
    let bytes = address.as_bytes();
    bytes.len() == ADDRESS_TEXT_LEN
        && address.starts_with("0x")
        && bytes[2..].iter().all(u8::is_ascii_hexdigit)
}

/// Fails with [`AddressError::Format`] unless [`is_valid`] holds.
pub fn validate(address: &str) -> Result<(), AddressError> {
    if is_valid(address) {
        Ok(())
    } else {
        Err(AddressError::format(
            "ethereum address",
            format!("{address:?} is not valid ethereum address"),
        ))
    }
}

/// Returns the EIP-55 checksummed form of `address`.
pub fn normalize(address: &str) -> Result<String, AddressError> {
    validate(address)?;

    let normalized = checksum_encode(&address[2..]);
    if normalized != address {
        trace!("Re-cased ethereum address {} as {}", address, normalized);
    }

    Ok(normalized)
}

/// Two addresses are equal iff they are both valid and their lower-cased
/// forms match. Never fails.
pub fn compare(a: &str, b: &str) -> bool {
    is_valid(a) && is_valid(b) && a.eq_ignore_ascii_case(b)
}

/// Checksummed text of a 20 byte address.
pub fn from_h160(address: &H160) -> String {
    checksum_encode(&hex::encode(address.as_bytes()))
}

/// Raw bytes of a textual address, whatever its casing.
pub fn to_h160(address: &str) -> Result<H160, AddressError> {
    validate(address)?;
    let bytes = hex_utils::to_bytes(address)?;
    Ok(H160::from_slice(&bytes))
}

/// Applies the EIP-55 casing to 40 hex digits (no `0x`).
///
/// Digit `i` is upper-cased iff nibble `i` of `keccak256(lowercase digits)` is
/// greater than 7.
fn checksum_encode(digits: &str) -> String {
    let lower = digits.to_ascii_lowercase();
    let hash = keccak(lower.as_bytes());

    let mut checksummed = String::with_capacity(ADDRESS_TEXT_LEN);
    checksummed.push_str("0x");

    for (i, c) in lower.chars().enumerate() {
        let byte = hash.0[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };

        checksummed.push(if nibble > 7 { c.to_ascii_uppercase() } else { c });
    }

    checksummed
}

fn has_prefix(address: &str, prefix: &str) -> bool {
    is_valid(address) && address.to_ascii_lowercase().starts_with(prefix)
}

/// Returns `true` for valid addresses under [`COLLECTION_ADDRESS_PREFIX`].
pub fn is_collection_address(address: &str) -> bool {
    has_prefix(address, COLLECTION_ADDRESS_PREFIX)
}

/// Returns `true` for valid addresses under [`NESTING_ADDRESS_PREFIX`].
pub fn is_nesting_address(address: &str) -> bool {
    has_prefix(address, NESTING_ADDRESS_PREFIX)
}

/// Fails with [`AddressError::Format`] unless [`is_collection_address`] holds.
pub fn validate_collection_address(address: &str) -> Result<(), AddressError> {
    if is_collection_address(address) {
        Ok(())
    } else {
        Err(AddressError::format(
            "collection address",
            format!("address {address} is not a collection address"),
        ))
    }
}

/// Fails with [`AddressError::Format`] unless [`is_nesting_address`] holds.
pub fn validate_nesting_address(address: &str) -> Result<(), AddressError> {
    if is_nesting_address(address) {
        Ok(())
    } else {
        Err(AddressError::format(
            "nesting address",
            format!("address {address} is not a nesting address"),
        ))
    }
}

/// Collection pseudo-addresses: the prefix followed by the big-endian
/// collection id.
pub mod collection {
    use super::{checksum_encode, validate_collection_address, COLLECTION_ADDRESS_PREFIX};
    use crate::{error::AddressError, hex_utils::dword};

    /// Checksummed address of collection `collection_id`.
    pub fn id_to_address(collection_id: u32) -> String {
        checksum_encode(&format!(
            "{}{}",
            &COLLECTION_ADDRESS_PREFIX[2..],
            dword::from_u32(collection_id)
        ))
    }

    /// Collection id packed in the last 8 hex digits of `address`.
    pub fn address_to_id(address: &str) -> Result<u32, AddressError> {
        validate_collection_address(address)?;
        dword::to_u32(&address[address.len() - 8..])
    }
}

/// Nesting pseudo-addresses, used as the owner of a token that is owned by
/// another token: the prefix followed by the big-endian collection id and the
/// big-endian token id.
pub mod nesting {
    use serde::{Deserialize, Serialize};

    use super::{checksum_encode, validate_nesting_address, NESTING_ADDRESS_PREFIX};
    use crate::{error::AddressError, hex_utils::dword};

    /// The two ids packed into a nesting address.
    #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NestingIds {
        /// Collection of the owning token.
        pub collection_id: u32,
        /// The owning token.
        pub token_id: u32,
    }

    /// Checksummed address of token `token_id` in collection `collection_id`.
    pub fn ids_to_address(collection_id: u32, token_id: u32) -> String {
        checksum_encode(&format!(
            "{}{}{}",
            &NESTING_ADDRESS_PREFIX[2..],
            dword::from_u32(collection_id),
            dword::from_u32(token_id)
        ))
    }

    /// Inverse of [`ids_to_address`].
    pub fn address_to_ids(address: &str) -> Result<NestingIds, AddressError> {
        validate_nesting_address(address)?;

        let len = address.len();
        Ok(NestingIds {
            collection_id: dword::to_u32(&address[len - 16..len - 8])?,
            token_id: dword::to_u32(&address[len - 8..])?,
        })
    }
}
