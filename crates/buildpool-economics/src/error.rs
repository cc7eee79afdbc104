//! Error types for power factor and reward calculations

use thiserror::Error;

/// Result type alias for economics operations
pub type Result<T> = std::result::Result<T, EconomicsError>;

/// Errors that can occur in economics calculations.
///
/// Rounding during fixed-point scaling or bucket splitting is expected
/// behaviour and never produces an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomicsError {
    // === Input Validation ===
    /// Staking duration below zero
    #[error("Staking duration cannot be negative: {seconds}s")]
    NegativeDuration { seconds: i64 },

    /// Lock starts after the observation time
    #[error("Lock start {lock_start} is after observation time {now}")]
    LockInFuture { lock_start: i64, now: i64 },

    /// Amount string could not be parsed
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Individual share larger than the pool total
    #[error("Share {share} exceeds total {total}")]
    ShareExceedsTotal { share: u128, total: u128 },

    // === Arithmetic ===
    /// Result does not fit in 128 bits
    #[error("Amount overflow: result exceeds u128 range")]
    AmountOverflow,
}

impl EconomicsError {
    /// Get the numeric error code reported by the CLI
    pub fn code(&self) -> u32 {
        match self {
            Self::NegativeDuration { .. } => 2001,
            Self::LockInFuture { .. } => 2002,
            Self::InvalidAmount(_) => 2003,
            Self::ShareExceedsTotal { .. } => 2004,
            Self::AmountOverflow => 2101,
        }
    }

    /// Check if error was caused by caller input rather than arithmetic limits
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::AmountOverflow)
    }
}
