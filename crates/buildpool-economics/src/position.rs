//! # Stake Positions
//!
//! Positions as read from the staking contract: an amount and the Unix time
//! its lock started. Duration, power factor and virtual stake are recomputed
//! for every observation time; nothing is cached between calls.

use crate::distribution::{allocate, RewardAllocation};
use crate::duration::{DurationTier, StakingDuration};
use crate::error::{EconomicsError, Result};
use crate::math::mul_div_floor;
use crate::power_factor::{power_factor, PowerFactor};
use crate::virtual_stake::virtual_amount;
use serde::{Deserialize, Serialize};

/// A locked stake
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Staked amount in smallest unit
    pub amount: u128,
    /// Lock start timestamp (Unix seconds)
    pub lock_start: i64,
}

impl StakePosition {
    /// Create new position
    pub fn new(amount: u128, lock_start: i64) -> Self {
        Self { amount, lock_start }
    }

    /// Time locked as of `now`
    pub fn duration_at(&self, now: i64) -> Result<StakingDuration> {
        StakingDuration::between(self.lock_start, now)
    }

    /// Duration tier as of `now`
    pub fn tier_at(&self, now: i64) -> Result<DurationTier> {
        self.duration_at(now).map(|d| d.tier())
    }

    /// Power factor as of `now`
    pub fn power_factor_at(&self, now: i64) -> Result<PowerFactor> {
        self.duration_at(now).map(power_factor)
    }

    /// Virtual stake as of `now`
    pub fn virtual_amount_at(&self, now: i64) -> Result<u128> {
        virtual_amount(self.amount, self.duration_at(now)?)
    }

    /// Power factor at the current wall-clock time
    pub fn power_factor_now(&self) -> Result<PowerFactor> {
        self.power_factor_at(chrono::Utc::now().timestamp())
    }

    /// Virtual stake at the current wall-clock time
    pub fn virtual_amount_now(&self) -> Result<u128> {
        self.virtual_amount_at(chrono::Utc::now().timestamp())
    }
}

/// Proportional share of the stakers bucket: `floor(bucket × virtual / total)`
pub fn staker_reward_share(
    virtual_stake: u128,
    total_virtual_stake: u128,
    stakers_bucket: u128,
) -> Result<u128> {
    if virtual_stake > total_virtual_stake {
        return Err(EconomicsError::ShareExceedsTotal {
            share: virtual_stake,
            total: total_virtual_stake,
        });
    }
    if total_virtual_stake == 0 {
        return Ok(0);
    }
    // share <= bucket, never overflows
    mul_div_floor(stakers_bucket, virtual_stake, total_virtual_stake)
}

/// Reward owed to one position
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReward {
    /// Index of the position in the snapshot
    pub index: usize,
    /// Duration-weighted stake
    pub virtual_stake: u128,
    /// Fixed-point power factor used
    pub scaled_factor: u32,
    /// Share of the stakers bucket
    pub reward: u128,
}

/// Outcome of distributing one reward pool across a snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDistribution {
    /// Observation time
    pub timestamp: i64,
    /// Bucket split of the reward pool
    pub allocation: RewardAllocation,
    /// Sum of all virtual stakes
    pub total_virtual_stake: u128,
    /// Per-position rewards, in snapshot order
    pub rewards: Vec<PositionReward>,
    /// Part of the stakers bucket left over after flooring
    pub undistributed: u128,
}

/// Positions of a pool observed at a single time
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub positions: Vec<StakePosition>,
}

impl PoolSnapshot {
    /// Create snapshot from positions
    pub fn new(positions: Vec<StakePosition>) -> Self {
        Self { positions }
    }

    /// Sum of virtual stakes at `now`
    pub fn total_virtual_stake(&self, now: i64) -> Result<u128> {
        self.positions.iter().try_fold(0u128, |acc, p| {
            acc.checked_add(p.virtual_amount_at(now)?)
                .ok_or(EconomicsError::AmountOverflow)
        })
    }

    /// Split `total_rewards` and share the stakers bucket by virtual stake
    pub fn distribute(&self, now: i64, total_rewards: u128) -> Result<PoolDistribution> {
        let allocation = allocate(total_rewards);

        let weighted = self
            .positions
            .iter()
            .map(|p| {
                let factor = p.power_factor_at(now)?;
                Ok::<_, EconomicsError>((factor.scaled(), p.virtual_amount_at(now)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let total_virtual_stake = weighted
            .iter()
            .try_fold(0u128, |acc, (_, v)| acc.checked_add(*v))
            .ok_or(EconomicsError::AmountOverflow)?;

        let mut distributed = 0u128;
        let mut rewards = Vec::with_capacity(weighted.len());
        for (index, (scaled_factor, virtual_stake)) in weighted.into_iter().enumerate() {
            let reward = staker_reward_share(virtual_stake, total_virtual_stake, allocation.stakers)?;
            distributed += reward;
            rewards.push(PositionReward {
                index,
                virtual_stake,
                scaled_factor,
                reward,
            });
        }

        tracing::debug!(
            positions = rewards.len(),
            total_virtual_stake,
            stakers_bucket = allocation.stakers,
            distributed,
            "pool distribution"
        );

        Ok(PoolDistribution {
            timestamp: now,
            allocation,
            total_virtual_stake,
            rewards,
            undistributed: allocation.stakers - distributed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    const DAY: i64 = SECONDS_PER_DAY as i64;

    #[test]
    fn test_position_recomputes_per_observation() {
        let position = StakePosition::new(1000 * ONE_TOKEN, 0);

        assert_eq!(position.tier_at(10 * DAY).unwrap(), DurationTier::ZeroToOneMonth);
        assert_eq!(position.virtual_amount_at(10 * DAY).unwrap(), 1000 * ONE_TOKEN);

        assert_eq!(position.tier_at(180 * DAY).unwrap(), DurationTier::SixToTwelveMonths);
        assert_eq!(position.power_factor_at(180 * DAY).unwrap().scaled(), 20_000);
        assert_eq!(position.virtual_amount_at(180 * DAY).unwrap(), 2000 * ONE_TOKEN);
    }

    #[test]
    fn test_position_in_future_rejected() {
        let position = StakePosition::new(ONE_TOKEN, 1_000);
        assert!(matches!(
            position.virtual_amount_at(999),
            Err(EconomicsError::LockInFuture { .. })
        ));
    }

    #[test]
    fn test_position_now() {
        let position = StakePosition::new(ONE_TOKEN, 0);
        // locked since 1970: well past the cap
        assert_eq!(position.power_factor_now().unwrap(), PowerFactor::MAX);
        assert_eq!(position.virtual_amount_now().unwrap(), 3 * ONE_TOKEN);
    }

    #[test]
    fn test_staker_reward_share() {
        assert_eq!(staker_reward_share(1, 4, 1000).unwrap(), 250);
        assert_eq!(staker_reward_share(1, 3, 1000).unwrap(), 333);
        assert_eq!(staker_reward_share(0, 0, 1000).unwrap(), 0);
        assert!(matches!(
            staker_reward_share(5, 4, 1000),
            Err(EconomicsError::ShareExceedsTotal { share: 5, total: 4 })
        ));
    }

    #[test]
    fn test_staker_reward_share_large_values() {
        let stake = 1_000_000_000 * ONE_TOKEN;
        let bucket = 500_000_000 * ONE_TOKEN;
        assert_eq!(staker_reward_share(stake, 2 * stake, bucket).unwrap(), bucket / 2);
    }

    #[test]
    fn test_distribute_weights_by_duration() {
        let now = 400 * DAY;
        let snapshot = PoolSnapshot::new(vec![
            // 1.0x
            StakePosition::new(1000, now - 10 * DAY),
            // 2.0x
            StakePosition::new(1000, now - 180 * DAY),
        ]);

        let dist = snapshot.distribute(now, 6000).unwrap();
        assert_eq!(dist.allocation.stakers, 3000);
        assert_eq!(dist.total_virtual_stake, 3000);
        assert_eq!(dist.rewards[0].reward, 1000);
        assert_eq!(dist.rewards[1].reward, 2000);
        assert_eq!(dist.rewards[1].scaled_factor, 20_000);
        assert_eq!(dist.undistributed, 0);
        assert_eq!(snapshot.total_virtual_stake(now).unwrap(), 3000);
    }

    #[test]
    fn test_distribute_rounding_stays_in_bucket() {
        let now = 100 * DAY;
        let snapshot = PoolSnapshot::new(vec![
            StakePosition::new(1, now),
            StakePosition::new(1, now),
            StakePosition::new(1, now),
        ]);

        let dist = snapshot.distribute(now, 200).unwrap();
        let paid: u128 = dist.rewards.iter().map(|r| r.reward).sum();
        assert_eq!(dist.allocation.stakers, 100);
        assert_eq!(paid, 99);
        assert_eq!(dist.undistributed, 1);
    }

    #[test]
    fn test_distribute_empty_pool() {
        let dist = PoolSnapshot::default().distribute(0, 1000).unwrap();
        assert!(dist.rewards.is_empty());
        assert_eq!(dist.total_virtual_stake, 0);
        assert_eq!(dist.undistributed, 500);
    }

    #[test]
    fn test_position_serde() {
        let position = StakePosition::new(5 * ONE_TOKEN, 1_700_000_000);
        let json = serde_json::to_string(&position).unwrap();
        let back: StakePosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, position);
    }
}
