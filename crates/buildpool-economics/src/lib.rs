//! # Buildpool Economics - Power Factor & Reward Distribution
//!
//! Deterministic reward weighting for builder-pool staking.
//!
//! ## Key Features
//!
//! - **Duration tiers**: five lock-duration bands from one month to a year and beyond
//! - **Power factor**: piecewise-linear multiplier in `[1.0, 3.0]`, exact rational arithmetic
//! - **Virtual stake**: fixed-point (basis point) scaling of staked amounts
//! - **Reward distribution**: fixed four-way split of every reward pool
//!
//! ## Power Factor Curve
//!
//! ```text
//!  3.0 ┤                                          ┌──────────
//!  2.5 ┤                              ╭───────────┘  (+1/48 per 30d, 24 steps)
//!  2.0 ┤                   ╭──────────╯
//!  1.5 ┤          ╭────────╯
//!  1.0 ┼─────────╯
//!      └────┬──────────┬──────────┬─────────────┬──────────────┬──
//!          30d        90d       180d          365d          365d + 720d
//! ```
//!
//! ## Reward Buckets
//!
//! | Bucket | Share | Must stay staked | Liquid |
//! |--------|-------|------------------|--------|
//! | Stakers | 50% | - | - |
//! | Maintainer | 20% | 50% | 50% |
//! | Mentors | 5% | 0% | 100% |
//! | Operations | 25% | 0% | 100% |
//!
//! Calculations are pure: no I/O, no shared state, no caching. Only the
//! `StakePosition::*_now` helpers read the wall clock.

pub mod distribution;
pub mod duration;
pub mod error;
mod math;
pub mod position;
pub mod power_factor;
pub mod units;
pub mod virtual_stake;

// Re-exports
pub use distribution::{
    allocate, maintainer_staking_requirement, LiquidityRule, LiquiditySplit, RewardAllocation,
    RewardBucket,
};
pub use duration::{classify, DurationTier, StakingDuration};
pub use error::{EconomicsError, Result};
pub use position::{staker_reward_share, PoolDistribution, PoolSnapshot, PositionReward, StakePosition};
pub use power_factor::{power_factor, power_factor_checked, PowerFactor};
pub use units::{format_units, format_units_with, parse_units};
pub use virtual_stake::virtual_amount;

/// Protocol constants
pub mod constants {
    /// Seconds in a day
    pub const SECONDS_PER_DAY: u64 = 24 * 3600;

    /// One month tier boundary: 30 days
    pub const ONE_MONTH_SECS: u64 = 30 * SECONDS_PER_DAY; // 2,592,000

    /// Three month tier boundary: 90 days
    pub const THREE_MONTHS_SECS: u64 = 90 * SECONDS_PER_DAY; // 7,776,000

    /// Six month tier boundary: 180 days
    pub const SIX_MONTHS_SECS: u64 = 180 * SECONDS_PER_DAY; // 15,552,000

    /// One year tier boundary: 365 days
    pub const ONE_YEAR_SECS: u64 = 365 * SECONDS_PER_DAY; // 31,536,000

    /// Length of one "extra month" past the first year
    pub const EXTRA_MONTH_SECS: u64 = ONE_MONTH_SECS;

    /// Extra months after which the power factor stops growing
    pub const MAX_EXTRA_MONTHS: u64 = 24;

    /// Fixed-point scale: 10,000 represents 1.0x
    pub const BASE_SCALING_FACTOR: u32 = 10_000;

    /// Fixed-point cap: 30,000 represents 3.0x
    pub const MAX_SCALING_FACTOR: u32 = 30_000;

    /// Reward share of stakers (percent)
    pub const STAKERS_PERCENT: u8 = 50;

    /// Reward share of the pool maintainer (percent)
    pub const MAINTAINER_PERCENT: u8 = 20;

    /// Reward share of mentors (percent)
    pub const MENTORS_PERCENT: u8 = 5;

    /// Reward share of operations (percent)
    pub const OPERATIONS_PERCENT: u8 = 25;

    /// Portion of the maintainer allocation that must remain staked (percent)
    pub const MAINTAINER_STAKED_PERCENT: u8 = 50;

    /// Token decimal places (same as ETH)
    pub const DECIMALS: u8 = 18;

    /// One token in smallest unit
    pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000; // 10^18

    const _: () = assert!(
        STAKERS_PERCENT as u16
            + MAINTAINER_PERCENT as u16
            + MENTORS_PERCENT as u16
            + OPERATIONS_PERCENT as u16
            == 100
    );
}

pub use constants::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::distribution::{allocate, RewardAllocation, RewardBucket};
    pub use crate::duration::{DurationTier, StakingDuration};
    pub use crate::error::{EconomicsError, Result};
    pub use crate::position::StakePosition;
    pub use crate::power_factor::{power_factor, PowerFactor};
    pub use crate::virtual_stake::virtual_amount;
}
