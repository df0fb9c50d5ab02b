//! Address validation
//!
//! Accepts 40 hex digits with an optional `0x` prefix. Single-case input is
//! taken as-is; mixed-case input must carry a valid EIP-55 checksum.

use alloy_primitives::Address;
use std::str::FromStr;

/// Returns true when `s` is a usable Ethereum address.
pub fn is_valid_address(s: &str) -> bool {
    parse_address(s).is_some()
}

/// Parses `s` under the same rules as [`is_valid_address`].
pub fn parse_address(s: &str) -> Option<Address> {
    let body = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let address = Address::from_str(body).ok()?;

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        // to_checksum always returns the 0x-prefixed form
        let checksummed = address.to_checksum(None);
        if checksummed[2..] != *body {
            return None;
        }
    }

    Some(address)
}
