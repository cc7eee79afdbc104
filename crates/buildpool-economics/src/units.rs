//! Decimal token amounts with 18 fractional digits.

use crate::constants::*;
use crate::error::{EconomicsError, Result};

/// Parse a decimal token amount (e.g. `"1000.25"`) into smallest units
pub fn parse_units(input: &str) -> Result<u128> {
    let trimmed = input.trim();
    let invalid = || EconomicsError::InvalidAmount(input.to_string());

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > DECIMALS as usize {
        return Err(EconomicsError::InvalidAmount(format!(
            "{}: more than {} decimal places",
            input, DECIMALS
        )));
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| EconomicsError::AmountOverflow)?
    };

    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = DECIMALS as usize);
        padded.parse::<u128>().map_err(|_| invalid())?
    };

    whole_units
        .checked_mul(ONE_TOKEN)
        .and_then(|w| w.checked_add(fraction_units))
        .ok_or(EconomicsError::AmountOverflow)
}

/// Format smallest units as a decimal token amount, trimming trailing zeros
pub fn format_units(amount: u128) -> String {
    format_units_with(amount, DECIMALS)
}

/// Format smallest units showing at most `max_decimals` fractional digits (truncated)
pub fn format_units_with(amount: u128, max_decimals: u8) -> String {
    let whole = amount / ONE_TOKEN;
    let fraction = amount % ONE_TOKEN;
    let digits = max_decimals.min(DECIMALS) as usize;

    let fraction = format!("{:0>width$}", fraction, width = DECIMALS as usize);
    let fraction = fraction[..digits].trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}
