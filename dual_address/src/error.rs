//! The error taxonomy shared by every codec in this crate.

use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq, Hash)]
/// Errors produced while encoding, decoding, validating or resolving
/// addresses.
///
/// Every variant is a function of the input alone, so retrying an operation
/// that failed reproduces the same error.
pub enum AddressError {
    #[error("Invalid {field}: {reason}")]
    /// The input has the wrong length, alphabet or pattern.
    Format {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    #[error("Invalid decoded address checksum")]
    /// The input is well formed but its checksum does not match.
    Checksum,

    #[error("Expected ss58 format {expected}, received {decoded}")]
    /// The decoded network identifier differs from the one the caller
    /// expected.
    NetworkMismatch {
        /// Network identifier the caller asked for.
        expected: u16,
        /// Network identifier found in the address.
        decoded: u16,
    },

    #[error("{field} is out of range: {value}")]
    /// An integer falls outside the 32-bit or SS58 network range.
    Range {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value, rendered as text.
        value: String,
    },

    #[error("One of the addresses must be 0, got eth {eth} and substrate public key {sub}")]
    /// An `{eth, sub}` pair where both sides, or neither side, are zero.
    AmbiguousIdentity {
        /// Raw `eth` value.
        eth: String,
        /// Raw `sub` value.
        sub: String,
    },

    #[error("Address {0} is not a valid Substrate or Ethereum address")]
    /// The value matches none of the accepted address forms.
    InvalidAddress(String),

    #[error("Address {0} is not a valid crossAccountId object (should contain \"Substrate\"/\"substrate\" or \"Ethereum\"/\"ethereum\" field) or EthCrossAccountId (should contain \"eth\" and \"sub\" fields)")]
    /// An object without any recognised key.
    UnrecognizedShape(String),

    #[error("Address {value} is not a string or object: {kind}")]
    /// The input is neither a string nor an object.
    Type {
        /// The rejected value, rendered as text.
        value: String,
        /// The kind of value that was received.
        kind: &'static str,
    },
}

impl AddressError {
    pub(crate) fn format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn range(field: &'static str, value: impl ToString) -> Self {
        Self::Range {
            field,
            value: value.to_string(),
        }
    }
}
