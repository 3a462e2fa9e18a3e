//! Address codecs and identity resolution for chains that expose both a
//! Substrate (SS58) and an Ethereum (20 byte, EIP-55) account space.
//!
//! The crate is layered leaf-first:
//! - [`hex_utils`] converts between hex text and bytes, and packs `u32`s into
//!   8 hex digits.
//! - [`ethereum`] checksums Ethereum addresses and builds the collection and
//!   nesting pseudo-addresses.
//! - [`ss58`] encodes and decodes network-prefixed, checksummed public keys.
//! - [`mirror`] derives one chain's address from the other's. Both directions
//!   are one-way.
//! - [`cross_account`] classifies loosely shaped input into a
//!   [`CrossAccountId`][cross_account::CrossAccountId], and [`extract`] builds
//!   every derived view on top of it.
//!
//! Every operation is a pure function of its arguments. Fallible operations
//! return [`AddressError`]; each of the [`extract`] operations also has a
//! `*_safe` twin returning [`None`] instead.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]

pub mod cross_account;
pub mod error;
pub mod ethereum;
pub mod extract;
pub mod hex_utils;
pub mod mirror;
pub mod ss58;

pub use error::AddressError;

#[cfg(test)]
pub(crate) mod testing_utils;
