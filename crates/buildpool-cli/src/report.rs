//! Text and JSON rendering of calculation results

use crate::config::OutputFormat;
use buildpool_economics::units::format_units_with;
use buildpool_economics::{DurationTier, PowerFactor, RewardBucket, StakingDuration};
use serde::Serialize;

/// Human-readable rendering of a report
pub trait Render {
    fn render(&self) -> String;
}

/// Writes reports in the configured format
pub struct Printer {
    format: OutputFormat,
    decimals: u8,
}

impl Printer {
    pub fn new(format: OutputFormat, decimals: u8) -> Self {
        Self { format, decimals }
    }

    /// Format a token amount for display
    pub fn amount(&self, amount: u128) -> String {
        format_units_with(amount, self.decimals)
    }

    /// Serialize a report to a string
    pub fn format_report<T: Serialize + Render>(&self, report: &T) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)?,
            OutputFormat::Text => report.render(),
        })
    }

    /// Print a report to stdout
    pub fn emit<T: Serialize + Render>(&self, report: &T) -> anyhow::Result<()> {
        println!("{}", self.format_report(report)?);
        Ok(())
    }
}

#[derive(Serialize)]
pub struct PowerFactorReport {
    pub duration_secs: u64,
    pub duration_days: u64,
    pub tier: DurationTier,
    pub power_factor: f64,
    pub scaled_factor: u32,
    pub display: String,
}

impl PowerFactorReport {
    pub fn new(duration: StakingDuration, factor: PowerFactor) -> Self {
        Self {
            duration_secs: duration.as_secs(),
            duration_days: duration.whole_days(),
            tier: duration.tier(),
            power_factor: factor.as_f64(),
            scaled_factor: factor.scaled(),
            display: factor.to_string(),
        }
    }
}

impl Render for PowerFactorReport {
    fn render(&self) -> String {
        format!(
            "Duration:     {}s ({} days)\nTier:         {}\nPower factor: {} (scaled {})",
            self.duration_secs,
            self.duration_days,
            self.tier,
            self.display,
            self.scaled_factor
        )
    }
}

#[derive(Serialize)]
pub struct VirtualReport {
    #[serde(flatten)]
    pub power_factor: PowerFactorReport,
    pub staked: String,
    pub virtual_stake: String,
}

impl Render for VirtualReport {
    fn render(&self) -> String {
        format!(
            "{}\nStaked:       {}\nVirtual:      {}",
            self.power_factor.render(),
            self.staked,
            self.virtual_stake
        )
    }
}

#[derive(Serialize)]
pub struct PositionReport {
    pub lock_start: i64,
    pub now: i64,
    #[serde(flatten)]
    pub power_factor: PowerFactorReport,
    pub staked: String,
    pub virtual_stake: String,
}

impl Render for PositionReport {
    fn render(&self) -> String {
        format!(
            "Locked at:    {}\nObserved at:  {}\n{}\nStaked:       {}\nVirtual:      {}",
            self.lock_start,
            self.now,
            self.power_factor.render(),
            self.staked,
            self.virtual_stake
        )
    }
}

#[derive(Serialize)]
pub struct BucketLine {
    pub bucket: RewardBucket,
    pub percentage: u8,
    pub amount: String,
    pub must_stay_staked: Option<String>,
    pub liquid: Option<String>,
}

#[derive(Serialize)]
pub struct AllocationReport {
    pub total: String,
    pub buckets: Vec<BucketLine>,
    pub residual: String,
}

impl Render for AllocationReport {
    fn render(&self) -> String {
        let mut out = format!("Total rewards: {}\n", self.total);
        for line in &self.buckets {
            out.push_str(&format!("  {:<11} {:>3}%  {}", line.bucket, line.percentage, line.amount));
            if let (Some(staked), Some(liquid)) = (&line.must_stay_staked, &line.liquid) {
                out.push_str(&format!("  (staked {}, liquid {})", staked, liquid));
            }
            out.push('\n');
        }
        out.push_str(&format!("Undistributed: {}", self.residual));
        out
    }
}

#[derive(Serialize)]
pub struct ShareReport {
    pub virtual_stake: String,
    pub total_virtual_stake: String,
    pub stakers_bucket: String,
    pub share: String,
}

impl Render for ShareReport {
    fn render(&self) -> String {
        format!(
            "Virtual stake: {} of {}\nStakers bucket: {}\nShare:         {}",
            self.virtual_stake, self.total_virtual_stake, self.stakers_bucket, self.share
        )
    }
}

#[derive(Serialize)]
pub struct TierLine {
    pub tier: DurationTier,
    pub name: &'static str,
    pub lower_bound_secs: u64,
    pub upper_bound_secs: Option<u64>,
    pub factor_at_lower_bound: String,
}

#[derive(Serialize)]
pub struct TiersReport {
    pub tiers: Vec<TierLine>,
    pub max_factor: String,
}

impl Render for TiersReport {
    fn render(&self) -> String {
        let mut out = String::from("Tier          From (s)     Until (s)    Factor\n");
        for line in &self.tiers {
            let upper = line
                .upper_bound_secs
                .map(|u| u.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "{:<13} {:<12} {:<12} {}\n",
                line.name, line.lower_bound_secs, upper, line.factor_at_lower_bound
            ));
        }
        out.push_str(&format!("Maximum factor: {}", self.max_factor));
        out
    }
}

#[derive(Serialize)]
pub struct InfoReport {
    pub version: &'static str,
    pub config_path: String,
    pub chain: &'static str,
    pub chain_id: u64,
    pub poll_interval_secs: u64,
    pub token_decimals: u8,
    pub display_decimals: u8,
    pub base_scaling_factor: u32,
    pub max_scaling_factor: u32,
    pub bucket_percentages: Vec<(RewardBucket, u8)>,
}

impl Render for InfoReport {
    fn render(&self) -> String {
        let mut out = format!(
            "Buildpool v{}\nConfig: {}\nChain: {} ({})\nPoll interval: {}s\n\
             Token decimals: {} (showing {})\nScaling: {} = 1.0x, {} = max\nBuckets:\n",
            self.version,
            self.config_path,
            self.chain,
            self.chain_id,
            self.poll_interval_secs,
            self.token_decimals,
            self.display_decimals,
            self.base_scaling_factor,
            self.max_scaling_factor
        );
        for (bucket, pct) in &self.bucket_percentages {
            out.push_str(&format!("  {:<11} {:>3}%\n", bucket, pct));
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildpool_economics::{allocate, power_factor, ONE_TOKEN};

    #[test]
    fn test_power_factor_text() {
        let d = StakingDuration::from_days(180);
        let report = PowerFactorReport::new(d, power_factor(d));
        let text = Printer::new(OutputFormat::Text, 18).format_report(&report).unwrap();
        assert!(text.contains("2.0000x"));
        assert!(text.contains("6-12 months"));
    }

    #[test]
    fn test_power_factor_json() {
        let d = StakingDuration::from_days(365);
        let report = PowerFactorReport::new(d, power_factor(d));
        let json = Printer::new(OutputFormat::Json, 18).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scaled_factor"], 25_000);
        assert_eq!(value["tier"], "TwelvePlusMonths");
    }

    #[test]
    fn test_amount_decimals() {
        let printer = Printer::new(OutputFormat::Text, 2);
        assert_eq!(printer.amount(ONE_TOKEN + ONE_TOKEN / 3), "1.33");
    }

    #[test]
    fn test_tiers_text() {
        let tiers = DurationTier::ALL
            .iter()
            .map(|tier| TierLine {
                tier: *tier,
                name: tier.name(),
                lower_bound_secs: tier.lower_bound(),
                upper_bound_secs: tier.upper_bound(),
                factor_at_lower_bound: power_factor(StakingDuration::from_secs(tier.lower_bound()))
                    .to_string(),
            })
            .collect();
        let report = TiersReport {
            tiers,
            max_factor: power_factor(StakingDuration::from_secs(u64::MAX)).to_string(),
        };

        let text = report.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[5].starts_with("12+ months"));
        assert!(lines[5].ends_with("2.5000x"));
        assert!(lines[5].contains(" - "));
        assert_eq!(lines[6], "Maximum factor: 3.0000x");
    }

    #[test]
    fn test_allocation_text() {
        let printer = Printer::new(OutputFormat::Text, 18);
        let allocation = allocate(1000 * ONE_TOKEN);
        let report = AllocationReport {
            total: printer.amount(allocation.total),
            buckets: vec![BucketLine {
                bucket: RewardBucket::Maintainer,
                percentage: 20,
                amount: printer.amount(allocation.maintainer),
                must_stay_staked: Some(printer.amount(allocation.maintainer_staking_requirement())),
                liquid: Some(printer.amount(100 * ONE_TOKEN)),
            }],
            residual: printer.amount(allocation.residual()),
        };

        let text = report.render();
        assert!(text.contains("maintainer"));
        assert!(text.contains("(staked 100, liquid 100)"));
        assert!(text.ends_with("Undistributed: 0"));
    }
}
