//! Buildpool CLI
//!
//! Command-line calculator for power factors, virtual stake and reward splits.

mod config;
mod report;

use anyhow::Context;
use buildpool_economics::{
    allocate, parse_units, power_factor, staker_reward_share, virtual_amount, DurationTier,
    EconomicsError, RewardBucket, StakePosition, StakingDuration, BASE_SCALING_FACTOR, DECIMALS,
    MAX_SCALING_FACTOR, SECONDS_PER_DAY,
};
use clap::{Args, Parser, Subcommand};
use config::{Chain, CliConfig, OutputFormat};
use report::{
    AllocationReport, BucketLine, InfoReport, PositionReport, PowerFactorReport, Printer,
    ShareReport, TierLine, TiersReport, VirtualReport,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "buildpool")]
#[command(version)]
#[command(about = "Builder pool power factor and reward calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "buildpool.toml")]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Chain override: arbitrum or base
    #[arg(long, global = true, env = "BUILDPOOL_CHAIN")]
    chain: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut CliConfig) -> anyhow::Result<()> {
        if let Some(chain) = &self.chain {
            config.network.chain = chain.parse::<Chain>()?;
        }
        if self.json {
            config.output.format = OutputFormat::Json;
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Power factor for a staking duration
    PowerFactor {
        #[command(flatten)]
        duration: DurationArgs,
    },

    /// Virtual stake for an amount locked for a duration
    Virtual {
        /// Staked amount in tokens (e.g. 1000.5)
        #[arg(short, long)]
        amount: String,

        #[command(flatten)]
        duration: DurationArgs,
    },

    /// Evaluate a stake position at a point in time
    Position {
        /// Staked amount in tokens
        #[arg(short, long)]
        amount: String,

        /// Lock start (Unix seconds)
        #[arg(long, allow_negative_numbers = true)]
        lock_start: i64,

        /// Observation time (Unix seconds), defaults to now
        #[arg(long, allow_negative_numbers = true)]
        now: Option<i64>,
    },

    /// Split a reward pool into buckets
    Allocate {
        /// Total rewards in tokens
        #[arg(short, long)]
        total: String,
    },

    /// A staker's share of the stakers bucket
    Share {
        /// Staker's virtual stake in tokens
        #[arg(long = "virtual")]
        virtual_stake: String,

        /// Pool's total virtual stake in tokens
        #[arg(long)]
        total_virtual: String,

        /// Stakers bucket in tokens
        #[arg(long)]
        bucket: String,
    },

    /// Show duration tiers and their power factors
    Tiers,

    /// Show configuration and protocol constants
    Info,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct DurationArgs {
    /// Duration in seconds
    #[arg(long, allow_negative_numbers = true)]
    seconds: Option<i64>,

    /// Duration in whole days
    #[arg(long)]
    days: Option<u64>,
}

impl DurationArgs {
    fn resolve(&self) -> anyhow::Result<StakingDuration> {
        match (self.seconds, self.days) {
            (Some(seconds), _) => Ok(StakingDuration::try_from_secs(seconds)?),
            (None, Some(days)) => {
                let seconds = days
                    .checked_mul(SECONDS_PER_DAY)
                    .with_context(|| format!("{} days is out of range", days))?;
                Ok(StakingDuration::from_secs(seconds))
            }
            (None, None) => anyhow::bail!("either --seconds or --days is required"),
        }
    }
}

fn init_logging(verbose: bool, default_level: &str) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false),
        )
        .init();
}

fn amount_arg(name: &str, value: &str) -> anyhow::Result<u128> {
    parse_units(value).with_context(|| format!("--{}", name))
}

/// First calculation error in an error chain
fn economics_error(err: &anyhow::Error) -> Option<&EconomicsError> {
    err.chain().find_map(|cause| cause.downcast_ref::<EconomicsError>())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(&cli.config)?;
    cli.apply_overrides(&mut config)?;

    init_logging(cli.verbose, &config.logging.level);
    tracing::debug!("Config: {:?}", config);

    let result = run(cli, &config);
    if let Some(err) = result.as_ref().err().and_then(economics_error) {
        tracing::error!(
            code = err.code(),
            input_error = err.is_input_error(),
            "Calculation failed: {}",
            err
        );
    }
    result
}

fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let printer = Printer::new(config.output.format, config.output.decimals);

    match cli.command {
        Commands::PowerFactor { duration } => {
            let duration = duration.resolve()?;
            printer.emit(&PowerFactorReport::new(duration, power_factor(duration)))?;
        }

        Commands::Virtual { amount, duration } => {
            let staked = amount_arg("amount", &amount)?;
            let duration = duration.resolve()?;
            let virtual_stake = virtual_amount(staked, duration)?;

            printer.emit(&VirtualReport {
                power_factor: PowerFactorReport::new(duration, power_factor(duration)),
                staked: printer.amount(staked),
                virtual_stake: printer.amount(virtual_stake),
            })?;
        }

        Commands::Position { amount, lock_start, now } => {
            let position = StakePosition::new(amount_arg("amount", &amount)?, lock_start);
            let now = now.unwrap_or_else(|| chrono::Utc::now().timestamp());
            tracing::info!("Evaluating position locked at {} as of {}", lock_start, now);

            let duration = position.duration_at(now)?;
            printer.emit(&PositionReport {
                lock_start,
                now,
                power_factor: PowerFactorReport::new(duration, power_factor(duration)),
                staked: printer.amount(position.amount),
                virtual_stake: printer.amount(position.virtual_amount_at(now)?),
            })?;
        }

        Commands::Allocate { total } => {
            let allocation = allocate(amount_arg("total", &total)?);

            let buckets = RewardBucket::ALL
                .iter()
                .map(|bucket| {
                    let split = allocation.liquidity(*bucket);
                    BucketLine {
                        bucket: *bucket,
                        percentage: bucket.percentage(),
                        amount: printer.amount(allocation.get(*bucket)),
                        must_stay_staked: split.map(|s| printer.amount(s.staked)),
                        liquid: split.map(|s| printer.amount(s.liquid)),
                    }
                })
                .collect();

            printer.emit(&AllocationReport {
                total: printer.amount(allocation.total),
                buckets,
                residual: printer.amount(allocation.residual()),
            })?;
        }

        Commands::Share { virtual_stake, total_virtual, bucket } => {
            let virtual_stake = amount_arg("virtual", &virtual_stake)?;
            let total_virtual = amount_arg("total-virtual", &total_virtual)?;
            let bucket = amount_arg("bucket", &bucket)?;
            let share = staker_reward_share(virtual_stake, total_virtual, bucket)?;

            printer.emit(&ShareReport {
                virtual_stake: printer.amount(virtual_stake),
                total_virtual_stake: printer.amount(total_virtual),
                stakers_bucket: printer.amount(bucket),
                share: printer.amount(share),
            })?;
        }

        Commands::Tiers => {
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

            printer.emit(&TiersReport {
                tiers,
                max_factor: power_factor(StakingDuration::from_secs(u64::MAX)).to_string(),
            })?;
        }

        Commands::Info => {
            printer.emit(&InfoReport {
                version: env!("CARGO_PKG_VERSION"),
                config_path: cli.config.display().to_string(),
                chain: config.network.chain.name(),
                chain_id: config.network.chain.chain_id(),
                poll_interval_secs: config.network.poll_interval_secs,
                token_decimals: DECIMALS,
                display_decimals: config.output.decimals,
                base_scaling_factor: BASE_SCALING_FACTOR,
                max_scaling_factor: MAX_SCALING_FACTOR,
                bucket_percentages: RewardBucket::ALL.iter().map(|b| (*b, b.percentage())).collect(),
            })?;
        }
    }

    Ok(())
}
