//! # Staking Duration Tiers
//!
//! | Tier | From | Until |
//! |------|------|-------|
//! | 0-1 month | 0 | 30 days |
//! | 1-3 months | 30 days | 90 days |
//! | 3-6 months | 90 days | 180 days |
//! | 6-12 months | 180 days | 365 days |
//! | 12+ months | 365 days | - |
//!
//! Lower bounds are inclusive, upper bounds exclusive.

use crate::constants::*;
use crate::error::{EconomicsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds elapsed since a stake was locked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StakingDuration(u64);

impl StakingDuration {
    /// Zero-length duration
    pub const ZERO: Self = Self(0);

    /// Create from a non-negative second count
    pub const fn from_secs(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Create from whole days, saturating at `u64::MAX` seconds
    pub const fn from_days(days: u64) -> Self {
        Self(days.saturating_mul(SECONDS_PER_DAY))
    }

    /// Create from a signed second count, rejecting negative values
    pub fn try_from_secs(seconds: i64) -> Result<Self> {
        u64::try_from(seconds)
            .map(Self)
            .map_err(|_| EconomicsError::NegativeDuration { seconds })
    }

    /// Duration between a lock start and an observation time (Unix seconds)
    pub fn between(lock_start: i64, now: i64) -> Result<Self> {
        if now < lock_start {
            return Err(EconomicsError::LockInFuture { lock_start, now });
        }
        // i64 difference can exceed i64::MAX; the unsigned distance cannot overflow u64
        Ok(Self(now.abs_diff(lock_start)))
    }

    /// Second count
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Whole days elapsed
    pub const fn whole_days(&self) -> u64 {
        self.0 / SECONDS_PER_DAY
    }

    /// Tier this duration falls into
    pub fn tier(&self) -> DurationTier {
        classify(*self)
    }
}

impl From<u64> for StakingDuration {
    fn from(seconds: u64) -> Self {
        Self(seconds)
    }
}

impl TryFrom<i64> for StakingDuration {
    type Error = EconomicsError;

    fn try_from(seconds: i64) -> Result<Self> {
        Self::try_from_secs(seconds)
    }
}

impl fmt::Display for StakingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s ({}d)", self.0, self.whole_days())
    }
}

/// Staking duration tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationTier {
    /// Under 30 days
    ZeroToOneMonth,
    /// 30 to 90 days
    OneToThreeMonths,
    /// 90 to 180 days
    ThreeToSixMonths,
    /// 180 to 365 days
    SixToTwelveMonths,
    /// 365 days and more
    TwelvePlusMonths,
}

impl DurationTier {
    /// All tiers, shortest first
    pub const ALL: [DurationTier; 5] = [
        Self::ZeroToOneMonth,
        Self::OneToThreeMonths,
        Self::ThreeToSixMonths,
        Self::SixToTwelveMonths,
        Self::TwelvePlusMonths,
    ];

    /// Inclusive lower bound in seconds
    pub const fn lower_bound(&self) -> u64 {
        match self {
            Self::ZeroToOneMonth => 0,
            Self::OneToThreeMonths => ONE_MONTH_SECS,
            Self::ThreeToSixMonths => THREE_MONTHS_SECS,
            Self::SixToTwelveMonths => SIX_MONTHS_SECS,
            Self::TwelvePlusMonths => ONE_YEAR_SECS,
        }
    }

    /// Exclusive upper bound in seconds, `None` for the open-ended tier
    pub const fn upper_bound(&self) -> Option<u64> {
        match self {
            Self::ZeroToOneMonth => Some(ONE_MONTH_SECS),
            Self::OneToThreeMonths => Some(THREE_MONTHS_SECS),
            Self::ThreeToSixMonths => Some(SIX_MONTHS_SECS),
            Self::SixToTwelveMonths => Some(ONE_YEAR_SECS),
            Self::TwelvePlusMonths => None,
        }
    }

    /// Get tier name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZeroToOneMonth => "0-1 month",
            Self::OneToThreeMonths => "1-3 months",
            Self::ThreeToSixMonths => "3-6 months",
            Self::SixToTwelveMonths => "6-12 months",
            Self::TwelvePlusMonths => "12+ months",
        }
    }
}

impl fmt::Display for DurationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Map a staking duration to its tier
pub fn classify(duration: StakingDuration) -> DurationTier {
    let secs = duration.as_secs();
    if secs >= ONE_YEAR_SECS {
        DurationTier::TwelvePlusMonths
    } else if secs >= SIX_MONTHS_SECS {
        DurationTier::SixToTwelveMonths
    } else if secs >= THREE_MONTHS_SECS {
        DurationTier::ThreeToSixMonths
    } else if secs >= ONE_MONTH_SECS {
        DurationTier::OneToThreeMonths
    } else {
        DurationTier::ZeroToOneMonth
    }
}
