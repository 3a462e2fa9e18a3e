//! One-way address derivations between the two account spaces.
//!
//! Neither direction inverts the other: mirroring a Substrate address to
//! Ethereum and back yields a fresh hash-derived account (the "double
//! mirror"), not the original one.

use blake2::{digest::consts::U32, Blake2b, Digest};
use dual_address_common::EVM_MIRROR_DOMAIN;
use ethereum_types::H160;
use log::trace;

use crate::{error::AddressError, ethereum, ss58};

type Blake2b256 = Blake2b<U32>;

/// Ethereum mirror of a Substrate address: its first 20 public key bytes,
/// checksummed.
pub fn substrate_to_ethereum(address: &str) -> Result<String, AddressError> {
    substrate_to_ethereum_with_options(address, false)
}

/// [`substrate_to_ethereum`], optionally skipping the SS58 checksum check.
pub fn substrate_to_ethereum_with_options(
    address: &str,
    ignore_checksum: bool,
) -> Result<String, AddressError> {
    let decoded = ss58::decode_with_options(address, ignore_checksum, None)?;

    if decoded.public_key.len() < H160::len_bytes() {
        return Err(AddressError::format(
            "ss58 address",
            format!(
                "{address} carries a {} byte key, too short to mirror",
                decoded.public_key.len()
            ),
        ));
    }

    let mirror = ethereum::from_h160(&H160::from_slice(
        &decoded.public_key[..H160::len_bytes()],
    ));
    trace!("Mirrored substrate address {} to {}", address, mirror);

    Ok(mirror)
}

/// Substrate mirror of an Ethereum address:
/// `blake2b_256("evm:" ++ address bytes)` encoded under `ss58_format`.
pub fn ethereum_to_substrate(address: &str, ss58_format: u16) -> Result<String, AddressError> {
    let raw = ethereum::to_h160(address)?;

    let mut hasher = Blake2b256::new();
    hasher.update(EVM_MIRROR_DOMAIN);
    hasher.update(raw.as_bytes());
    let account = hasher.finalize();

    let mirror = ss58::encode(&account, ss58_format)?;
    trace!("Mirrored ethereum address {} to {}", address, mirror);

    Ok(mirror)
}
