//! Financial-basics advisor
//!
//! Foundation categories a household should fund before goal investing, with
//! simple recommended-target formulas for each.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The tracked foundation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicCategory {
    EmergencyFund,
    HealthInsurance,
    TermInsurance,
}

impl BasicCategory {
    pub const ALL: [BasicCategory; 3] = [
        BasicCategory::EmergencyFund,
        BasicCategory::HealthInsurance,
        BasicCategory::TermInsurance,
    ];

    /// Key stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            BasicCategory::EmergencyFund => "emergency_fund",
            BasicCategory::HealthInsurance => "health_insurance",
            BasicCategory::TermInsurance => "term_insurance",
        }
    }

    /// Human-readable name for tables.
    pub fn display_name(&self) -> &'static str {
        match self {
            BasicCategory::EmergencyFund => "Emergency Fund",
            BasicCategory::HealthInsurance => "Health Insurance",
            BasicCategory::TermInsurance => "Term Insurance",
        }
    }
}

impl fmt::Display for BasicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BasicCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "emergency_fund" => Ok(BasicCategory::EmergencyFund),
            "health_insurance" => Ok(BasicCategory::HealthInsurance),
            "term_insurance" => Ok(BasicCategory::TermInsurance),
            other => Err(Error::InvalidCategory(other.to_string())),
        }
    }
}

/// Stored funding status of one foundation category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialBasic {
    pub category: BasicCategory,
    pub target_amount: f64,
    pub current_amount: f64,
    pub is_funded: bool,
    pub notes: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl FinancialBasic {
    pub fn progress_pct(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.current_amount / self.target_amount * 100.0
        } else {
            0.0
        }
    }
}

/// Six months of expenses.
pub fn emergency_fund_target(monthly_expenses: f64) -> f64 {
    monthly_expenses * 6.0
}

/// Per-member cover with a 500,000 floor.
pub fn health_cover_target(family_members: u32) -> f64 {
    (family_members as f64 * 200_000.0).max(500_000.0)
}

/// Ten times annual income with a 10,000,000 floor.
pub fn term_cover_target(annual_income: f64) -> f64 {
    (annual_income * 10.0).max(10_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergency_fund_is_six_months_of_expenses() {
        assert_eq!(emergency_fund_target(40_000.0), 240_000.0);
    }

    #[test]
    fn health_cover_has_a_floor() {
        assert_eq!(health_cover_target(1), 500_000.0);
        assert_eq!(health_cover_target(2), 500_000.0);
        assert_eq!(health_cover_target(4), 800_000.0);
    }

    #[test]
    fn term_cover_has_a_floor() {
        assert_eq!(term_cover_target(500_000.0), 10_000_000.0);
        assert_eq!(term_cover_target(2_000_000.0), 20_000_000.0);
    }

    #[test]
    fn category_round_trips_through_storage_key() {
        for category in BasicCategory::ALL {
            assert_eq!(
                category.as_str().parse::<BasicCategory>().unwrap(),
                category
            );
        }
    }

    #[test]
    fn category_accepts_dashed_form() {
        assert_eq!(
            "emergency-fund".parse::<BasicCategory>().unwrap(),
            BasicCategory::EmergencyFund
        );
    }
}
