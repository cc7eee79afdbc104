//! Wide-intermediate integer helpers.
//!
//! Token amounts are `u128`; products of two amounts are formed in 256 bits
//! and floored on division.

use crate::error::{EconomicsError, Result};
use alloy_primitives::U256;

/// `floor(a * b / d)` with a 256-bit intermediate.
///
/// `d` must be non-zero. Fails only when the quotient exceeds `u128`.
pub(crate) fn mul_div_floor(a: u128, b: u128, d: u128) -> Result<u128> {
    debug_assert!(d != 0, "mul_div_floor divisor must be non-zero");
    let product = U256::from(a) * U256::from(b);
    let quotient = product / U256::from(d);
    u128::try_from(quotient).map_err(|_| EconomicsError::AmountOverflow)
}

/// `floor(a * pct / 100)` for `pct <= 100`; never overflows.
pub(crate) fn percent_of(a: u128, pct: u8) -> u128 {
    debug_assert!(pct <= 100);
    let pct = pct as u128;
    (a / 100) * pct + (a % 100) * pct / 100
}
