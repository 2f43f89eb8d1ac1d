//! Parsing of caller-supplied addresses and amounts.
//!
//! Both functions are pure and fail with [`TransferError::MalformedInput`].

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::{Address, U256};

use crate::blockchain::types::{Denomination, TransferError, TransferResult};

/// Parse a `0x`-prefixed, 20-byte hex address.
///
/// Mixed-case input is treated as EIP-55 checksummed and must verify.
/// All-lowercase and all-uppercase input is accepted without a checksum.
///
/// # Arguments
/// * `field` - Name used in the error message (e.g. "sender")
/// * `input` - Address text as supplied by the caller
pub fn parse_address(field: &str, input: &str) -> TransferResult<Address> {
    let text = input.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or_else(|| {
            TransferError::MalformedInput(format!(
                "{} address '{}' is missing the 0x prefix",
                field, input
            ))
        })?;

    if digits.len() != 40 {
        return Err(TransferError::MalformedInput(format!(
            "{} address '{}' must be 40 hex digits, got {}",
            field,
            input,
            digits.len()
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TransferError::MalformedInput(format!(
            "{} address '{}' contains non-hex characters",
            field, input
        )));
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(format!("0x{}", digits), None).map_err(|_| {
            TransferError::MalformedInput(format!(
                "{} address '{}' has an invalid EIP-55 checksum",
                field, input
            ))
        });
    }

    digits.parse::<Address>().map_err(|e| {
        TransferError::MalformedInput(format!("{} address '{}': {}", field, input, e))
    })
}

/// Convert a non-negative decimal amount in `unit` to wei, exactly.
///
/// Accepts `digits` or `digits.digits`. Signs, exponents and more
/// fractional digits than the unit has decimals are rejected rather than
/// rounded.
pub fn parse_amount(input: &str, unit: Denomination) -> TransferResult<U256> {
    let amount = input.trim();
    let malformed = |reason: &str| {
        TransferError::MalformedInput(format!("amount '{}' {}", input, reason))
    };

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("is not a non-negative decimal number"));
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("is not a non-negative decimal number"));
        }
        if fraction.len() > unit.decimals() as usize {
            return Err(malformed(
                format!(
                    "has more than {} decimal places for unit {}",
                    unit.decimals(),
                    unit
                )
                .as_str(),
            ));
        }
    }

    parse_units(amount, unit.unit_name())
        .map(ParseUnits::get_absolute)
        .map_err(|e| malformed(format!("cannot be converted to wei: {}", e).as_str()))
}
