//! CLI configuration types

use anyhow::Context;
use buildpool_economics::DECIMALS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Complete CLI configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Network settings
    #[serde(default)]
    pub network: NetworkConfig,
}

impl CliConfig {
    /// Load from a TOML file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?
        } else {
            tracing::debug!("Config {:?} not found, using defaults", path);
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the calculator cannot honour
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.output.decimals > DECIMALS {
            anyhow::bail!(
                "output.decimals must be at most {}, got {}",
                DECIMALS,
                self.output.decimals
            );
        }
        if self.network.poll_interval_secs == 0 {
            anyhow::bail!("network.poll_interval_secs must be positive");
        }
        Ok(())
    }
}

/// Output format
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Text or JSON
    #[serde(default)]
    pub format: OutputFormat,

    /// Fractional digits shown for token amounts
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_decimals() -> u8 {
    DECIMALS
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            decimals: default_decimals(),
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Chain the staking contracts live on
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Arbitrum,
    Base,
}

impl Chain {
    /// EVM chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Arbitrum => 42161,
            Self::Base => 8453,
        }
    }

    /// Get chain name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arbitrum => "arbitrum",
            Self::Base => "base",
        }
    }
}

impl FromStr for Chain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "arbitrum" => Ok(Self::Arbitrum),
            "base" => Ok(Self::Base),
            other => anyhow::bail!("Unknown chain: {} (expected arbitrum or base)", other),
        }
    }
}

/// Network settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Target chain
    #[serde(default)]
    pub chain: Chain,

    /// How often position data is re-read (seconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain: Chain::default(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.decimals, 18);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.network.chain, Chain::Arbitrum);
        assert_eq!(config.network.poll_interval_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.output.decimals, 18);
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"\ndecimals = 4\n\n[network]\nchain = \"base\"").unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.decimals, 4);
        assert_eq!(config.network.chain, Chain::Base);
        assert_eq!(config.network.chain.chain_id(), 8453);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_decimals_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ndecimals = 19").unwrap();
        assert!(CliConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_chain_from_str() {
        assert_eq!("base".parse::<Chain>().unwrap(), Chain::Base);
        assert_eq!("Arbitrum".parse::<Chain>().unwrap(), Chain::Arbitrum);
        assert!("mainnet".parse::<Chain>().is_err());
    }
}
