//! # Power Factor
//!
//! Time-based reward multiplier for locked stake.
//!
//! ## Curve
//!
//! | Duration | Power Factor |
//! |----------|--------------|
//! | < 30 days | 1.0 |
//! | 30 - 90 days | 1.0 → 1.5 (linear) |
//! | 90 - 180 days | 1.5 → 2.0 (linear) |
//! | 180 - 365 days | 2.0 → 2.5 (linear) |
//! | ≥ 365 days | 2.5 + 0.5 × extra_months / 24, max 3.0 |
//!
//! `extra_months` counts whole 30-day periods past the first year and stops
//! at 24. A duration sitting exactly on a boundary takes the lower segment's
//! endpoint, which is also the next segment's starting value.
//!
//! The factor is kept as an exact fraction. Fixed-point values handed to
//! amount arithmetic are derived from that fraction with integer division,
//! so no floating value ever feeds back into token math.

use crate::constants::*;
use crate::duration::{DurationTier, StakingDuration};
use crate::error::Result;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Reward multiplier in `[1.0, 3.0]`, stored as an exact fraction
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PowerFactor {
    numerator: u64,
    denominator: u64,
}

impl PowerFactor {
    /// 1.0x
    pub const ONE: Self = Self { numerator: 1, denominator: 1 };

    /// 3.0x
    pub const MAX: Self = Self { numerator: 3, denominator: 1 };

    fn new(numerator: u64, denominator: u64) -> Self {
        let g = gcd(numerator, denominator);
        let factor = Self {
            numerator: numerator / g,
            denominator: denominator / g,
        };
        factor.min(Self::MAX)
    }

    /// Numerator of the reduced fraction
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Denominator of the reduced fraction
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Fixed-point value: `floor(factor × 10,000)`
    pub fn scaled(&self) -> u32 {
        let scaled = self.numerator as u128 * BASE_SCALING_FACTOR as u128 / self.denominator as u128;
        // bounded by MAX_SCALING_FACTOR through `new`
        scaled as u32
    }

    /// Floating value, for display only
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Whether this is exactly 1.0x
    pub fn is_base(&self) -> bool {
        self.numerator == self.denominator
    }
}

impl PartialEq for PowerFactor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PowerFactor {}

impl PartialOrd for PowerFactor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PowerFactor {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as u128 * other.denominator as u128;
        let rhs = other.numerator as u128 * self.denominator as u128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for PowerFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scaled = self.scaled();
        let base = BASE_SCALING_FACTOR;
        write!(f, "{}.{:04}x", scaled / base, scaled % base)
    }
}

/// Compute the power factor for a staking duration
pub fn power_factor(duration: StakingDuration) -> PowerFactor {
    let secs = duration.as_secs();

    let factor = match duration.tier() {
        DurationTier::ZeroToOneMonth => PowerFactor::ONE,
        DurationTier::OneToThreeMonths => interpolate(secs, ONE_MONTH_SECS, THREE_MONTHS_SECS, 2),
        DurationTier::ThreeToSixMonths => interpolate(secs, THREE_MONTHS_SECS, SIX_MONTHS_SECS, 3),
        DurationTier::SixToTwelveMonths => interpolate(secs, SIX_MONTHS_SECS, ONE_YEAR_SECS, 4),
        DurationTier::TwelvePlusMonths => {
            let extra_months = ((secs - ONE_YEAR_SECS) / EXTRA_MONTH_SECS).min(MAX_EXTRA_MONTHS);
            // 2.5 + 0.5 * m / 24 == (120 + m) / 48
            PowerFactor::new(5 * MAX_EXTRA_MONTHS + extra_months, 2 * MAX_EXTRA_MONTHS)
        }
    };

    tracing::trace!(duration_secs = secs, factor = %factor, "power factor");
    factor
}

/// Like [`power_factor`], for signed second counts read from a clock
pub fn power_factor_checked(seconds: i64) -> Result<PowerFactor> {
    StakingDuration::try_from_secs(seconds).map(power_factor)
}

/// `start_halves / 2 + 0.5 × (secs − lower) / (upper − lower)`
fn interpolate(secs: u64, lower: u64, upper: u64, start_halves: u64) -> PowerFactor {
    let span = upper - lower;
    PowerFactor::new(start_halves * span + (secs - lower), 2 * span)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.max(1)
}
