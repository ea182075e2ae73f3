//! Portfolio-wide projection report
//!
//! Projects every goal independently and aggregates the result. Projections
//! are pure functions of the goal row, so they fan out across a rayon pool
//! the same way batch runs do.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::goal::Goal;
use crate::projection::{self, GoalOutlook};

/// One goal's standing within the portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct GoalReport {
    pub id: i64,
    pub name: String,
    pub target_amount: f64,
    pub horizon_years: u32,
    pub cagr_pct: f64,
    pub contributions_total: f64,
    pub progress_pct: f64,
    pub outlook: GoalOutlook,
}

/// Totals across the whole report.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub goals: usize,
    pub on_track: usize,
    pub total_target: f64,
    pub total_contributed: f64,
    pub total_future_value: f64,
}

/// The full report: per-goal standings plus the totals row.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReport {
    pub goals: Vec<GoalReport>,
    pub summary: PortfolioSummary,
}

/// Project one goal against its own target and planned contribution.
pub fn build_goal_report(goal: &Goal) -> Result<GoalReport> {
    let outlook = projection::project_future_value(
        goal.target_amount,
        goal.contributions_total,
        goal.monthly_contribution,
        goal.horizon_years,
        goal.cagr_pct,
    )?;
    Ok(GoalReport {
        id: goal.id,
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        horizon_years: goal.horizon_years,
        cagr_pct: goal.cagr_pct,
        contributions_total: goal.contributions_total,
        progress_pct: goal.progress_pct(),
        outlook,
    })
}

/// Project all goals in parallel and total them up.
pub fn build_portfolio(goals: &[Goal]) -> Result<PortfolioReport> {
    let reports: Vec<GoalReport> = goals
        .par_iter()
        .map(build_goal_report)
        .collect::<Result<Vec<_>>>()?;

    let summary = PortfolioSummary {
        goals: reports.len(),
        on_track: reports.iter().filter(|r| r.outlook.on_track()).count(),
        total_target: reports.iter().map(|r| r.target_amount).sum(),
        total_contributed: reports.iter().map(|r| r.contributions_total).sum(),
        total_future_value: reports.iter().map(|r| r.outlook.future_value).sum(),
    };

    Ok(PortfolioReport {
        goals: reports,
        summary,
    })
}
