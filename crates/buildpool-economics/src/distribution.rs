//! # Reward Distribution
//!
//! Every reward pool is split four ways:
//!
//! 1. **Stakers** (50%): shared by virtual stake
//! 2. **Maintainer** (20%): half must remain staked
//! 3. **Mentors** (5%): fully liquid
//! 4. **Operations** (25%): fully liquid
//!
//! Each bucket is floored independently; the few units lost to truncation
//! stay undistributed.

use crate::constants::*;
use crate::math::percent_of;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardBucket {
    Stakers,
    Maintainer,
    Mentors,
    Operations,
}

impl RewardBucket {
    /// All buckets in allocation order
    pub const ALL: [RewardBucket; 4] = [
        Self::Stakers,
        Self::Maintainer,
        Self::Mentors,
        Self::Operations,
    ];

    /// Share of the reward pool (percent)
    pub const fn percentage(&self) -> u8 {
        match self {
            Self::Stakers => STAKERS_PERCENT,
            Self::Maintainer => MAINTAINER_PERCENT,
            Self::Mentors => MENTORS_PERCENT,
            Self::Operations => OPERATIONS_PERCENT,
        }
    }

    /// Staked/liquid split rule, if the bucket has one
    pub const fn liquidity_rule(&self) -> Option<LiquidityRule> {
        match self {
            Self::Stakers => None,
            Self::Maintainer => Some(LiquidityRule::new(MAINTAINER_STAKED_PERCENT)),
            Self::Mentors | Self::Operations => Some(LiquidityRule::FULLY_LIQUID),
        }
    }

    /// Get bucket name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stakers => "stakers",
            Self::Maintainer => "maintainer",
            Self::Mentors => "mentors",
            Self::Operations => "operations",
        }
    }
}

impl fmt::Display for RewardBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Portion of a bucket that must stay staked vs. can be withdrawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRule {
    pub staked_percent: u8,
    pub liquid_percent: u8,
}

impl LiquidityRule {
    /// Nothing needs to stay staked
    pub const FULLY_LIQUID: Self = Self::new(0);

    /// Build a rule from the staked percentage; the rest is liquid
    pub const fn new(staked_percent: u8) -> Self {
        assert!(staked_percent <= 100);
        Self {
            staked_percent,
            liquid_percent: 100 - staked_percent,
        }
    }

    /// Split an amount according to this rule
    pub fn split(&self, amount: u128) -> LiquiditySplit {
        let staked = percent_of(amount, self.staked_percent);
        LiquiditySplit {
            staked,
            liquid: amount - staked,
        }
    }
}

/// Result of applying a [`LiquidityRule`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquiditySplit {
    /// Must remain staked
    pub staked: u128,
    /// Free to withdraw
    pub liquid: u128,
}

/// Reward pool split into buckets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardAllocation {
    /// Total reward pool
    pub total: u128,
    /// Stakers share (50%)
    pub stakers: u128,
    /// Maintainer share (20%)
    pub maintainer: u128,
    /// Mentors share (5%)
    pub mentors: u128,
    /// Operations share (25%)
    pub operations: u128,
}

impl RewardAllocation {
    /// Create allocation from total amount
    pub fn from_total(total: u128) -> Self {
        Self {
            total,
            stakers: percent_of(total, STAKERS_PERCENT),
            maintainer: percent_of(total, MAINTAINER_PERCENT),
            mentors: percent_of(total, MENTORS_PERCENT),
            operations: percent_of(total, OPERATIONS_PERCENT),
        }
    }

    /// Amount for a single bucket
    pub fn get(&self, bucket: RewardBucket) -> u128 {
        match bucket {
            RewardBucket::Stakers => self.stakers,
            RewardBucket::Maintainer => self.maintainer,
            RewardBucket::Mentors => self.mentors,
            RewardBucket::Operations => self.operations,
        }
    }

    /// Sum of all buckets
    pub fn sum(&self) -> u128 {
        // each bucket is at most its percentage of total, so this cannot overflow
        self.stakers + self.maintainer + self.mentors + self.operations
    }

    /// Units lost to truncation
    pub fn residual(&self) -> u128 {
        self.total - self.sum()
    }

    /// Verify buckets sum to total within rounding slack
    pub fn verify(&self) -> bool {
        let sum = self.sum();
        sum <= self.total && self.total - sum < RewardBucket::ALL.len() as u128
    }

    /// Maintainer amount that must stay staked
    pub fn maintainer_staking_requirement(&self) -> u128 {
        maintainer_staking_requirement(self.maintainer)
    }

    /// Staked/liquid split of a bucket, `None` for stakers
    pub fn liquidity(&self, bucket: RewardBucket) -> Option<LiquiditySplit> {
        bucket.liquidity_rule().map(|rule| rule.split(self.get(bucket)))
    }
}

/// Split a reward pool into its four buckets
pub fn allocate(total_rewards: u128) -> RewardAllocation {
    let allocation = RewardAllocation::from_total(total_rewards);
    tracing::debug!(
        total = total_rewards,
        stakers = allocation.stakers,
        maintainer = allocation.maintainer,
        mentors = allocation.mentors,
        operations = allocation.operations,
        residual = allocation.residual(),
        "reward allocation"
    );
    allocation
}

/// Part of the maintainer bucket that must remain staked
pub fn maintainer_staking_requirement(maintainer_bucket: u128) -> u128 {
    percent_of(maintainer_bucket, MAINTAINER_STAKED_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_exact() {
        let alloc = allocate(1000);
        assert_eq!(alloc.stakers, 500);
        assert_eq!(alloc.maintainer, 200);
        assert_eq!(alloc.mentors, 50);
        assert_eq!(alloc.operations, 250);
        assert_eq!(alloc.residual(), 0);
        assert!(alloc.verify());
    }

    #[test]
    fn test_allocate_tokens() {
        let alloc = allocate(100 * ONE_TOKEN);
        assert_eq!(alloc.stakers, 50 * ONE_TOKEN);
        assert_eq!(alloc.maintainer, 20 * ONE_TOKEN);
        assert_eq!(alloc.mentors, 5 * ONE_TOKEN);
        assert_eq!(alloc.operations, 25 * ONE_TOKEN);
    }

    #[test]
    fn test_allocate_rounding() {
        // 50% of 99 = 49, 20% = 19, 5% = 4, 25% = 24 → 96
        let alloc = allocate(99);
        assert_eq!(alloc.sum(), 96);
        assert_eq!(alloc.residual(), 3);
        assert!(alloc.verify());

        let alloc = allocate(1);
        assert_eq!(alloc.sum(), 0);
        assert!(alloc.verify());
    }

    #[test]
    fn test_allocate_zero() {
        assert_eq!(allocate(0), RewardAllocation::default());
    }

    #[test]
    fn test_allocate_max() {
        let alloc = allocate(u128::MAX);
        assert!(alloc.verify());
    }

    #[test]
    fn test_maintainer_requirement() {
        assert_eq!(maintainer_staking_requirement(200), 100);
        assert_eq!(maintainer_staking_requirement(201), 100);
        assert_eq!(allocate(1000).maintainer_staking_requirement(), 100);
    }

    #[test]
    fn test_liquidity_rules() {
        for bucket in RewardBucket::ALL {
            if let Some(rule) = bucket.liquidity_rule() {
                assert_eq!(rule.staked_percent + rule.liquid_percent, 100, "{}", bucket);
            }
        }
        assert_eq!(RewardBucket::Maintainer.liquidity_rule(), Some(LiquidityRule::new(50)));
        assert_eq!(RewardBucket::Mentors.liquidity_rule(), Some(LiquidityRule::FULLY_LIQUID));
        assert_eq!(RewardBucket::Operations.liquidity_rule(), Some(LiquidityRule::FULLY_LIQUID));
        assert_eq!(RewardBucket::Stakers.liquidity_rule(), None);
    }

    #[test]
    fn test_liquidity_split() {
        let alloc = allocate(1001);
        let maintainer = alloc.liquidity(RewardBucket::Maintainer).unwrap();
        assert_eq!(maintainer.staked + maintainer.liquid, alloc.maintainer);
        assert_eq!(maintainer.staked, 100);

        let mentors = alloc.liquidity(RewardBucket::Mentors).unwrap();
        assert_eq!(mentors, LiquiditySplit { staked: 0, liquid: alloc.mentors });
        assert!(alloc.liquidity(RewardBucket::Stakers).is_none());
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let total: u32 = RewardBucket::ALL.iter().map(|b| b.percentage() as u32).sum();
        assert_eq!(total, 100);
    }
}
