//! Cross-account identities and the resolver that turns loosely shaped input
//! into one of them.
//!
//! Input reaches the resolver as an [`AccountInput`], which is already
//! classified into one of the accepted shapes. Dynamic (JSON) input is
//! classified by [`AccountInput::from_json`] in a fixed precedence:
//!
//! 1. an object with both `eth` and `sub` keys ([`EthCrossAccountId`]),
//! 2. an object with a `Substrate` key, then one with `substrate`,
//! 3. an object with an `Ethereum` key, then one with `ethereum`,
//! 4. a bare string.
//!
//! [`resolve`] then validates and (optionally) normalises the classified
//! value into a [`CrossAccountId`].

use std::fmt::{self, Display};

use dual_address_common::{
    DEFAULT_SS58_FORMAT, ETHEREUM_ZERO_ADDRESS, SUBSTRATE_ZERO_PUBLIC_KEY,
};
use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::AddressError, ethereum, hex_utils, ss58};

/// An account in exactly one of the two address spaces.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CrossAccountId {
    /// An SS58 address.
    Substrate(String),
    /// A `0x`-prefixed 20 byte address.
    Ethereum(String),
}

/// [`CrossAccountId`] with lower-case keys, as some APIs expect it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossAccountIdUncapitalized {
    /// An SS58 address.
    Substrate(String),
    /// A `0x`-prefixed 20 byte address.
    Ethereum(String),
}

/// Discriminant of a [`CrossAccountId`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AddressType {
    /// See [`CrossAccountId::Substrate`].
    Substrate,
    /// See [`CrossAccountId::Ethereum`].
    Ethereum,
}

impl Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AddressType::Substrate => "Substrate",
            AddressType::Ethereum => "Ethereum",
        };

        write!(f, "{}", s)
    }
}

impl CrossAccountId {
    /// The single address carried, whatever its chain.
    pub fn address(&self) -> &str {
        match self {
            CrossAccountId::Substrate(address) | CrossAccountId::Ethereum(address) => address,
        }
    }

    /// Which address space the identity lives in.
    pub fn address_type(&self) -> AddressType {
        match self {
            CrossAccountId::Substrate(_) => AddressType::Substrate,
            CrossAccountId::Ethereum(_) => AddressType::Ethereum,
        }
    }

    /// Same identity with lower-case keys.
    pub fn uncapitalized(&self) -> CrossAccountIdUncapitalized {
        match self {
            CrossAccountId::Substrate(address) => {
                CrossAccountIdUncapitalized::Substrate(address.clone())
            }
            CrossAccountId::Ethereum(address) => {
                CrossAccountIdUncapitalized::Ethereum(address.clone())
            }
        }
    }
}

impl From<CrossAccountIdUncapitalized> for CrossAccountId {
    fn from(value: CrossAccountIdUncapitalized) -> Self {
        match value {
            CrossAccountIdUncapitalized::Substrate(address) => CrossAccountId::Substrate(address),
            CrossAccountIdUncapitalized::Ethereum(address) => CrossAccountId::Ethereum(address),
        }
    }
}

impl Display for CrossAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.address_type(), self.address())
    }
}

/// A [`CrossAccountId`] together with every canonical form derived from it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedCrossAccountId {
    /// The identity, as resolved (not normalised).
    #[serde(flatten)]
    pub cross_account_id: CrossAccountId,
    /// Canonical form on the identity's own chain: SS58 under network 42 or
    /// the checksummed Ethereum address.
    pub address: String,
    /// SS58 rendering under the caller's network. Equal to
    /// [`EnhancedCrossAccountId::address`] for Ethereum identities.
    #[serde(rename = "addressSS58")]
    pub address_ss58: String,
    /// Hex of the underlying public key. The zero Ethereum address for
    /// Ethereum identities.
    pub substrate_public_key: String,
    /// `true` iff the identity is an Ethereum account.
    pub is_ethereum: bool,
    /// `true` iff the identity is a Substrate account.
    pub is_substrate: bool,
    /// Discriminant of [`EnhancedCrossAccountId::cross_account_id`].
    #[serde(rename = "type")]
    pub address_type: AddressType,
}

/// The `{eth, sub}` pair used by the chain's EVM compatibility layer.
///
/// Exactly one side is a zero sentinel; the other carries the identity. `sub`
/// is the public key as an unsigned 256-bit hex number.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EthCrossAccountId {
    /// Ethereum address, or the zero address.
    pub eth: String,
    /// Substrate public key, or `0x00`.
    pub sub: String,
}

/// Input already classified into one of the accepted shapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccountInput<'a> {
    /// A bare string: an SS58 address, an Ethereum address or a hex public
    /// key, in that order of preference.
    Address(&'a str),
    /// The value of a `Substrate`/`substrate` key: an SS58 address or a hex
    /// public key.
    Substrate(&'a str),
    /// The value of an `Ethereum`/`ethereum` key.
    Ethereum(&'a str),
    /// An `{eth, sub}` pair.
    Dual {
        /// Raw `eth` value.
        eth: &'a str,
        /// Raw `sub` value.
        sub: &'a str,
    },
}

impl<'a> AccountInput<'a> {
    /// Classifies a JSON value.
    pub fn from_json(value: &'a Value) -> Result<Self, AddressError> {
        let map = match value {
            Value::String(address) => return Ok(AccountInput::Address(address)),
            Value::Object(map) => map,
            Value::Array(_) => return Err(AddressError::UnrecognizedShape(value.to_string())),
            Value::Null => return Err(type_error(value, "null")),
            Value::Bool(_) => return Err(type_error(value, "boolean")),
            Value::Number(_) => return Err(type_error(value, "number")),
        };

        if let (Some(eth), Some(sub)) = (map.get("eth"), map.get("sub")) {
            return Ok(AccountInput::Dual {
                eth: eth.as_str().ok_or_else(|| {
                    AddressError::format("eth", format!("{eth} is not a hex string"))
                })?,
                sub: sub_hex(sub)?,
            });
        }

        if let Some(substrate) = map.get("Substrate").or_else(|| map.get("substrate")) {
            return string_value(substrate).map(AccountInput::Substrate);
        }

        if let Some(eth) = map.get("Ethereum").or_else(|| map.get("ethereum")) {
            return string_value(eth).map(AccountInput::Ethereum);
        }

        Err(AddressError::UnrecognizedShape(value.to_string()))
    }
}

fn type_error(value: &Value, kind: &'static str) -> AddressError {
    AddressError::Type {
        value: value.to_string(),
        kind,
    }
}

fn string_value(value: &Value) -> Result<&str, AddressError> {
    value
        .as_str()
        .ok_or_else(|| AddressError::InvalidAddress(value.to_string()))
}

/// `sub` is either a hex string or a bignumber object carrying one under
/// `_hex`.
fn sub_hex(sub: &Value) -> Result<&str, AddressError> {
    let hex = match sub {
        Value::Object(bignumber) => bignumber.get("_hex").and_then(Value::as_str),
        other => other.as_str(),
    };

    hex.ok_or_else(|| {
        AddressError::format(
            "sub",
            format!("Substrate public key must be a hex string, got {sub}"),
        )
    })
}

/// Anything the resolver accepts.
///
/// Conversion is fallible so that classification failures of dynamic input
/// surface from the same call (and the same `*_safe` wrapper) as resolution
/// failures.
pub trait IntoAccountInput<'a> {
    /// Classifies `self`.
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError>;
}

impl<'a> IntoAccountInput<'a> for AccountInput<'a> {
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError> {
        Ok(self)
    }
}

impl<'a> IntoAccountInput<'a> for &'a str {
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError> {
        Ok(AccountInput::Address(self))
    }
}

impl<'a> IntoAccountInput<'a> for &'a String {
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError> {
        Ok(AccountInput::Address(self))
    }
}

impl<'a> IntoAccountInput<'a> for &'a Value {
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError> {
        AccountInput::from_json(self)
    }
}

impl<'a> IntoAccountInput<'a> for &'a CrossAccountId {
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError> {
        Ok(match self {
            CrossAccountId::Substrate(address) => AccountInput::Substrate(address),
            CrossAccountId::Ethereum(address) => AccountInput::Ethereum(address),
        })
    }
}

impl<'a> IntoAccountInput<'a> for &'a CrossAccountIdUncapitalized {
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError> {
        Ok(match self {
            CrossAccountIdUncapitalized::Substrate(address) => AccountInput::Substrate(address),
            CrossAccountIdUncapitalized::Ethereum(address) => AccountInput::Ethereum(address),
        })
    }
}

impl<'a> IntoAccountInput<'a> for &'a EthCrossAccountId {
    fn into_account_input(self) -> Result<AccountInput<'a>, AddressError> {
        Ok(AccountInput::Dual {
            eth: &self.eth,
            sub: &self.sub,
        })
    }
}

/// Resolves `input` into a [`CrossAccountId`].
///
/// With `normalize`, SS58 addresses are re-encoded under network 42 and
/// Ethereum addresses are checksummed. Hex public keys and `{eth, sub}`
/// pairs are always normalised.
pub fn resolve<'a>(
    input: impl IntoAccountInput<'a>,
    normalize: bool,
) -> Result<CrossAccountId, AddressError> {
    let input = input.into_account_input()?;
    trace!("Resolving {:?} (normalize: {})", input, normalize);

    match input {
        AccountInput::Dual { eth, sub } => resolve_dual(eth, sub),
        AccountInput::Substrate(address) => {
            if ss58::is_public_key(address) {
                public_key_to_substrate(address)
            } else if ss58::is_valid(address) {
                substrate(address, normalize)
            } else {
                Err(AddressError::InvalidAddress(address.to_owned()))
            }
        }
        AccountInput::Ethereum(address) => {
            ethereum::validate(address)?;
            ethereum_id(address, normalize)
        }
        AccountInput::Address(address) => {
            if ss58::is_valid(address) {
                substrate(address, normalize)
            } else if ethereum::is_valid(address) {
                ethereum_id(address, normalize)
            } else if ss58::is_public_key(address) {
                public_key_to_substrate(address)
            } else {
                Err(AddressError::InvalidAddress(address.to_owned()))
            }
        }
    }
}

fn substrate(address: &str, normalize: bool) -> Result<CrossAccountId, AddressError> {
    Ok(CrossAccountId::Substrate(if normalize {
        ss58::normalize_default(address)?
    } else {
        address.to_owned()
    }))
}

fn ethereum_id(address: &str, normalize: bool) -> Result<CrossAccountId, AddressError> {
    Ok(CrossAccountId::Ethereum(if normalize {
        ethereum::normalize(address)?
    } else {
        address.to_owned()
    }))
}

fn public_key_to_substrate(key: &str) -> Result<CrossAccountId, AddressError> {
    Ok(CrossAccountId::Substrate(ss58::encode_hex(
        key,
        DEFAULT_SS58_FORMAT,
    )?))
}

/// Parses a `0x` hex number of any width.
fn parse_hex_integer(field: &'static str, value: &str) -> Result<BigUint, AddressError> {
    let digits = value.strip_prefix("0x").ok_or_else(|| {
        AddressError::format(field, format!("{value} must be a 0x-prefixed hex string"))
    })?;

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::format(
            field,
            format!("{value} is not a hex number"),
        ));
    }
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }

    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| AddressError::format(field, format!("{value} is not a hex number")))
}

/// `sub` as the 32 byte public key it encodes, left padded with zeros.
fn sub_to_public_key(sub: &BigUint, raw: &str) -> Result<[u8; 32], AddressError> {
    let bytes = sub.to_bytes_be();
    if bytes.len() > 32 {
        return Err(AddressError::range("sub", raw));
    }

    let mut key = [0u8; 32];
    key[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(key)
}

fn resolve_dual(eth: &str, sub: &str) -> Result<CrossAccountId, AddressError> {
    let sub_integer = parse_hex_integer("sub", sub)?;
    let eth_integer = parse_hex_integer("eth", eth)?;

    let sub_is_zero = sub_integer.is_zero();
    let eth_is_zero = eth_integer.is_zero();

    if sub_is_zero == eth_is_zero {
        debug!("Rejected ambiguous {{eth: {}, sub: {}}} pair", eth, sub);
        return Err(AddressError::AmbiguousIdentity {
            eth: eth.to_owned(),
            sub: sub.to_owned(),
        });
    }

    // The pair is the canonical bridge format: always normalise.
    if sub_is_zero {
        Ok(CrossAccountId::Ethereum(ethereum::normalize(eth)?))
    } else {
        let key = sub_to_public_key(&sub_integer, sub)?;
        Ok(CrossAccountId::Substrate(ss58::encode(
            &key,
            DEFAULT_SS58_FORMAT,
        )?))
    }
}

/// Builds the [`EnhancedCrossAccountId`] of an already resolved identity.
pub fn enhance(
    cross_account_id: CrossAccountId,
    ss58_format: u16,
) -> Result<EnhancedCrossAccountId, AddressError> {
    match &cross_account_id {
        CrossAccountId::Ethereum(address) => {
            let normalized = ethereum::normalize(address)?;

            Ok(EnhancedCrossAccountId {
                address: normalized.clone(),
                address_ss58: normalized,
                substrate_public_key: ETHEREUM_ZERO_ADDRESS.to_owned(),
                is_ethereum: true,
                is_substrate: false,
                address_type: AddressType::Ethereum,
                cross_account_id,
            })
        }
        CrossAccountId::Substrate(address) => {
            let decoded = ss58::decode(address)?;

            Ok(EnhancedCrossAccountId {
                address: ss58::encode(&decoded.public_key, DEFAULT_SS58_FORMAT)?,
                address_ss58: ss58::encode(&decoded.public_key, ss58_format)?,
                substrate_public_key: decoded.hex,
                is_ethereum: false,
                is_substrate: true,
                address_type: AddressType::Substrate,
                cross_account_id,
            })
        }
    }
}

/// The `{eth, sub}` pair of an already resolved identity.
pub fn to_eth_cross_account_id(
    cross_account_id: &CrossAccountId,
) -> Result<EthCrossAccountId, AddressError> {
    match cross_account_id {
        CrossAccountId::Ethereum(address) => Ok(EthCrossAccountId {
            eth: ethereum::normalize(address)?,
            sub: SUBSTRATE_ZERO_PUBLIC_KEY.to_owned(),
        }),
        CrossAccountId::Substrate(address) => Ok(EthCrossAccountId {
            eth: ETHEREUM_ZERO_ADDRESS.to_owned(),
            sub: hex_utils::from_bytes(&ss58::decode(address)?.public_key),
        }),
    }
}
