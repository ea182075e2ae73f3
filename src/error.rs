//! Error taxonomy for the goal tracker
//!
//! Every invalid-input condition is detected before the arithmetic that would
//! otherwise fault, and surfaced as a structured variant rather than a NaN or
//! a panic. Nothing here is transient; no operation retries.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An amount parameter that must be zero or greater was negative.
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: f64 },

    /// An amount parameter that must be strictly positive was not.
    #[error("{field} must be positive (got {value})")]
    NonPositiveAmount { field: &'static str, value: f64 },

    /// Monthly-contribution formulas divide by the number of months; a zero
    /// horizon would make that zero.
    #[error("time horizon must be at least 1 year for monthly contribution formulas")]
    ZeroHorizon,

    /// Rates at or below -100%/yr make the compounding base non-positive.
    #[error("annual growth rate of {rate_pct}%/yr is degenerate; rates must be above -100%")]
    DegenerateRate { rate_pct: f64 },

    /// Blended mode was requested without a lumpsum percentage or amount.
    #[error("blended mode needs either a lumpsum percentage or a fixed lumpsum amount")]
    MissingSplit,

    #[error("unknown investment mode '{0}' (expected SIP, Lumpsum, or Blended)")]
    InvalidMode(String),

    #[error("unknown basics category '{0}' (expected emergency-fund, health-insurance, or term-insurance)")]
    InvalidCategory(String),

    #[error("no goal with id {0}")]
    GoalNotFound(i64),

    /// Charting needs at least one logged contribution to draw.
    #[error("goal {0} has no logged contributions")]
    NoContributions(i64),

    #[error("invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
