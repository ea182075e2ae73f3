//! Goal and contribution record types

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a goal is funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentMode {
    /// Monthly contributions only.
    Sip,
    /// Single upfront investment only.
    Lumpsum,
    /// Upfront lumpsum plus monthly contributions.
    Blended,
}

impl InvestmentMode {
    /// String form stored in the database and shown in tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentMode::Sip => "SIP",
            InvestmentMode::Lumpsum => "Lumpsum",
            InvestmentMode::Blended => "Blended",
        }
    }
}

impl fmt::Display for InvestmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sip" => Ok(InvestmentMode::Sip),
            "lumpsum" => Ok(InvestmentMode::Lumpsum),
            // "Lumpsum + SIP" is the label older databases used for blended.
            "blended" | "lumpsum + sip" => Ok(InvestmentMode::Blended),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// A stored savings goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub horizon_years: u32,
    /// Assumed compound annual growth rate, as a percentage (12.0 = 12%/yr).
    pub cagr_pct: f64,
    pub mode: InvestmentMode,
    /// Upfront amount committed when the goal was created.
    pub initial_investment: f64,
    /// Planned monthly contribution.
    pub monthly_contribution: f64,
    /// Running sum of logged contributions. Maintained by the store and never
    /// decreases.
    pub contributions_total: f64,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Goal {
    /// Share of the target covered by contributions so far, in percent.
    pub fn progress_pct(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.contributions_total / self.target_amount * 100.0
        } else {
            0.0
        }
    }

    /// Amount still to be contributed before the target is reached.
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.contributions_total).max(0.0)
    }
}

/// Input for creating a goal; the store assigns the id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub horizon_years: u32,
    pub cagr_pct: f64,
    pub mode: InvestmentMode,
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
}

/// A single ledger entry toward a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub id: i64,
    pub goal_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    /// Fund the money went into, when tracked.
    pub fund_name: Option<String>,
    /// Purchase NAV, when tracked.
    pub nav: Option<f64>,
}

/// A progress checkpoint at a quarter of the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub label: &'static str,
    pub amount: f64,
    pub reached: bool,
}

/// Milestone table at 25/50/75/100% of the target.
pub fn milestone_statuses(target_amount: f64, contributed: f64) -> Vec<Milestone> {
    [
        ("25%", 0.25),
        ("50%", 0.50),
        ("75%", 0.75),
        ("100%", 1.00),
    ]
    .iter()
    .map(|&(label, fraction)| {
        let amount = target_amount * fraction;
        Milestone {
            label,
            amount,
            reached: contributed >= amount,
        }
    })
    .collect()
}
