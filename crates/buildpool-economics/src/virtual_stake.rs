//! # Virtual Stake
//!
//! Converts a staked amount into the duration-weighted amount used for
//! proportional reward shares:
//!
//! ```text
//! scaled  = floor(power_factor × 10,000)
//! virtual = floor(staked × scaled / 10,000)
//! ```
//!
//! The product is formed in 256 bits. The result always lies in
//! `[staked, 3 × staked]`.

use crate::constants::*;
use crate::duration::StakingDuration;
use crate::error::Result;
use crate::math::mul_div_floor;
use crate::power_factor::power_factor;

/// Weight a staked amount by its lock duration
pub fn virtual_amount(staked: u128, duration: StakingDuration) -> Result<u128> {
    let scaled = power_factor(duration).scaled();
    let virtual_stake = mul_div_floor(staked, scaled as u128, BASE_SCALING_FACTOR as u128)?;

    tracing::debug!(
        staked,
        duration_secs = duration.as_secs(),
        scaled_factor = scaled,
        virtual_stake,
        "virtual stake"
    );

    Ok(virtual_stake)
}
