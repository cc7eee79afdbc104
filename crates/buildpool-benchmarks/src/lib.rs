//! # Buildpool Benchmarks
//!
//! Fixtures shared by the criterion benches.
//!
//! ```bash
//! cargo bench --package buildpool-benchmarks
//! cargo bench --package buildpool-benchmarks -- power_factor
//! ```

use buildpool_economics::{PoolSnapshot, StakePosition, StakingDuration, ONE_TOKEN, SECONDS_PER_DAY};

/// Observation time used by every fixture
pub const BENCH_NOW: i64 = 1_750_000_000;

/// One duration per tier plus the capped tail
pub fn sample_durations() -> Vec<StakingDuration> {
    [0, 45, 120, 270, 400, 800, 2000]
        .into_iter()
        .map(StakingDuration::from_days)
        .collect()
}

/// Pool with `size` positions spread over two years of lock times
pub fn sample_pool(size: usize) -> PoolSnapshot {
    let span = 2 * 365 * SECONDS_PER_DAY as i64;
    let positions = (0..size)
        .map(|i| {
            let age = span * i as i64 / size.max(1) as i64;
            StakePosition::new((i as u128 + 1) * ONE_TOKEN, BENCH_NOW - age)
        })
        .collect();
    PoolSnapshot::new(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_pool() {
        let pool = sample_pool(10);
        assert_eq!(pool.positions.len(), 10);
        assert!(pool.positions.iter().all(|p| p.lock_start <= BENCH_NOW));
        assert!(pool.distribute(BENCH_NOW, 1_000 * ONE_TOKEN).is_ok());
    }
}
