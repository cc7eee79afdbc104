//! Property tests for power factor, virtual stake and allocation

use buildpool_economics::{
    allocate, power_factor, staker_reward_share, virtual_amount, PowerFactor, StakingDuration,
    BASE_SCALING_FACTOR, MAX_SCALING_FACTOR,
};
use proptest::prelude::*;

// Ten years covers every segment of the curve plus the capped tail
const HORIZON: u64 = 10 * 365 * 24 * 3600;

proptest! {
    #[test]
    fn power_factor_is_monotonic(a in 0..HORIZON, b in 0..HORIZON) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let f_lo = power_factor(StakingDuration::from_secs(lo));
        let f_hi = power_factor(StakingDuration::from_secs(hi));
        prop_assert!(f_lo <= f_hi);
        prop_assert!(f_lo.scaled() <= f_hi.scaled());
    }

    #[test]
    fn power_factor_is_bounded(secs in any::<u64>()) {
        let factor = power_factor(StakingDuration::from_secs(secs));
        prop_assert!(factor >= PowerFactor::ONE);
        prop_assert!(factor <= PowerFactor::MAX);
        prop_assert!((BASE_SCALING_FACTOR..=MAX_SCALING_FACTOR).contains(&factor.scaled()));
    }

    #[test]
    fn virtual_amount_within_bounds(staked in 0u128..u128::MAX / 3, secs in 0..HORIZON) {
        let d = StakingDuration::from_secs(secs);
        let v = virtual_amount(staked, d).unwrap();
        prop_assert!(v >= staked);
        prop_assert!(v <= 3 * staked);
    }

    #[test]
    fn virtual_amount_equals_stake_only_at_base_factor(staked in 10_000u128..u64::MAX as u128, secs in 0..HORIZON) {
        let d = StakingDuration::from_secs(secs);
        let v = virtual_amount(staked, d).unwrap();
        // with at least 10,000 units every basis point above 1.0x adds a unit
        prop_assert_eq!(v == staked, power_factor(d).scaled() == BASE_SCALING_FACTOR);
    }

    #[test]
    fn allocation_conserves_total(total in any::<u128>()) {
        let alloc = allocate(total);
        prop_assert!(alloc.sum() <= total);
        prop_assert!(total - alloc.sum() < 4);
        prop_assert!(alloc.verify());
    }

    #[test]
    fn staker_shares_never_exceed_bucket(
        weights in proptest::collection::vec(1u128..1_000_000_000_000_000_000_000, 1..20),
        bucket in 0u128..1_000_000_000_000_000_000_000_000,
    ) {
        let total: u128 = weights.iter().sum();
        let paid: u128 = weights
            .iter()
            .map(|w| staker_reward_share(*w, total, bucket).unwrap())
            .sum();
        prop_assert!(paid <= bucket);
        prop_assert!(bucket - paid < weights.len() as u128);
    }
}
