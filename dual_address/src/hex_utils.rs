//! Conversions between hexadecimal text and byte sequences, and the fixed
//! width `u32` <-> 8 hex digit codec used by the pseudo-addresses.

use crate::error::AddressError;

/// Decodes hex text into bytes. A leading `0x`/`0X` is optional.
pub fn to_bytes(hex: &str) -> Result<Vec<u8>, AddressError> {
    let digits = strip_0x(hex);
    hex::decode(digits).map_err(|e| AddressError::format("hex string", format!("{hex}: {e}")))
}

/// Renders bytes as lowercase hex with a `0x` prefix.
pub fn from_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Removes a single leading `0x` or `0X`, if present.
pub fn strip_0x(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Fixed width (8 digit) hex rendering of 32-bit words.
pub mod dword {
    use crate::error::AddressError;

    const FIELD: &str = "dword";

    /// Checks that an untyped number is an integer in `0..=0xFFFFFFFF`.
    pub fn check_u32(num: f64) -> Result<u32, AddressError> {
        if num.is_nan() {
            return Err(AddressError::format(FIELD, "passed number is NaN"));
        }
        if num < 0.0 {
            return Err(AddressError::range(FIELD, num));
        }
        if num > u32::MAX as f64 {
            return Err(AddressError::range(FIELD, num));
        }
        if num.fract() != 0.0 {
            return Err(AddressError::format(
                FIELD,
                format!("passed number is not an integer number: {num}"),
            ));
        }

        Ok(num as u32)
    }

    /// Renders `n` as exactly 8 lowercase hex digits.
    pub fn from_u32(n: u32) -> String {
        format!("{n:08x}")
    }

    /// Same as [`from_u32`] for a number that has not been range checked yet.
    pub fn from_number(num: f64) -> Result<String, AddressError> {
        check_u32(num).map(from_u32)
    }

    /// Parses hex digits (no `0x`) into a `u32`.
    pub fn to_u32(s: &str) -> Result<u32, AddressError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::format(
                FIELD,
                format!("passed string is not hexadecimal: {s:?}"),
            ));
        }

        let significant = s.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(0);
        }

        u32::from_str_radix(significant, 16).map_err(|_| AddressError::range(FIELD, s))
    }
}
