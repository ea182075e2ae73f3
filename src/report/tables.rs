//! Fixed-width terminal tables for goals, ledgers, and projections

use crate::goal::{Contribution, FinancialBasic, Goal, Milestone};
use crate::projection::{Allocation, GoalOutlook};

use super::portfolio::PortfolioReport;

const BAR_WIDTH: usize = 20;

/// Text progress bar, full blocks for the funded share.
pub fn progress_bar(pct: f64) -> String {
    let clamped = pct.clamp(0.0, 100.0);
    let filled = (BAR_WIDTH as f64 * clamped / 100.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub fn print_goal_table(goals: &[Goal]) {
    if goals.is_empty() {
        println!("No goals found. Add a goal first.");
        return;
    }

    println!(
        "{:>4} {:<24} {:>14} {:>6} {:>7} {:>8} {:>14} {:>12} {:>9}",
        "ID", "Name", "Target", "Years", "CAGR%", "Mode", "Contributed", "Start", "Progress"
    );
    println!("{}", "-".repeat(106));
    for goal in goals {
        println!(
            "{:>4} {:<24} {:>14.2} {:>6} {:>7.1} {:>8} {:>14.2} {:>12} {:>8.1}%",
            goal.id,
            truncate(&goal.name, 24),
            goal.target_amount,
            goal.horizon_years,
            goal.cagr_pct,
            goal.mode.as_str(),
            goal.contributions_total,
            goal.start_date,
            goal.progress_pct(),
        );
    }
}

pub fn print_goal_detail(goal: &Goal) {
    println!("Goal {}: {}", goal.id, goal.name);
    println!("  Target:            {:>14.2}", goal.target_amount);
    println!("  Horizon:           {:>11} yrs", goal.horizon_years);
    println!("  Expected CAGR:     {:>13.1}%", goal.cagr_pct);
    println!("  Mode:              {:>14}", goal.mode.as_str());
    println!("  Initial:           {:>14.2}", goal.initial_investment);
    println!("  Monthly:           {:>14.2}", goal.monthly_contribution);
    println!("  Contributed:       {:>14.2}", goal.contributions_total);
    println!("  Start date:        {:>14}", goal.start_date.to_string());
    println!(
        "  Progress:          {} {:.1}%",
        progress_bar(goal.progress_pct()),
        goal.progress_pct()
    );
    if let Some(ref notes) = goal.notes {
        println!("  Notes:             {notes}");
    }
}

pub fn print_contributions(goal: &Goal, entries: &[Contribution]) {
    if entries.is_empty() {
        println!("No contributions logged for goal {} yet.", goal.id);
        return;
    }

    println!("Contribution history for goal {} ({}):", goal.id, goal.name);
    println!(
        "{:>4} {:>12} {:>12} {:<20} {:>10}",
        "ID", "Amount", "Date", "Fund", "NAV"
    );
    println!("{}", "-".repeat(64));
    for entry in entries {
        println!(
            "{:>4} {:>12.2} {:>12} {:<20} {:>10}",
            entry.id,
            entry.amount,
            entry.date,
            entry.fund_name.as_deref().unwrap_or("-"),
            entry
                .nav
                .map(|n| format!("{n:.2}"))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}

pub fn print_milestones(milestones: &[Milestone]) {
    println!("{:<6} {:>14} {:>10}", "Mark", "Amount", "Status");
    println!("{}", "-".repeat(34));
    for milestone in milestones {
        println!(
            "{:<6} {:>14.2} {:>10}",
            milestone.label,
            milestone.amount,
            if milestone.reached { "reached" } else { "pending" },
        );
    }
}

pub fn print_outlook(outlook: &GoalOutlook) {
    println!("Future value projection:");
    println!("  FV of contributions so far:   {:>14.2}", outlook.fv_existing);
    println!("  FV of ongoing monthly stream: {:>14.2}", outlook.fv_contributions);
    println!("  Expected future value:        {:>14.2}", outlook.future_value);
    println!("  Target amount:                {:>14.2}", outlook.target_amount);
    match outlook.shortfall {
        None => {
            println!("  Status: on track (projected surplus {:.2})", outlook.surplus());
        }
        Some(short) => {
            println!("  Status: shortfall of {:.2}", short.amount);
            println!(
                "  Increase the monthly contribution by {:.2} to close it.",
                short.required_increase
            );
        }
    }
}

pub fn print_allocation(allocation: &Allocation) {
    println!("{:<20} {:>16}", "Component", "Required Amount");
    println!("{}", "-".repeat(38));
    if allocation.lumpsum > 0.0 {
        println!("{:<20} {:>16.2}", "Lumpsum (today)", allocation.lumpsum);
    }
    if allocation.monthly > 0.0 {
        println!("{:<20} {:>16.2}", "SIP (monthly)", allocation.monthly);
    }
    if allocation.lumpsum == 0.0 && allocation.monthly == 0.0 {
        println!("{:<20} {:>16.2}", "Nothing needed", 0.0);
    }
}

pub fn print_basics(basics: &[FinancialBasic]) {
    println!(
        "{:<18} {:>14} {:>14} {:<22} {:>10} {:>12}",
        "Category", "Target", "Current", "Progress", "Status", "Updated"
    );
    println!("{}", "-".repeat(98));
    for basic in basics {
        println!(
            "{:<18} {:>14.2} {:>14.2} {:<22} {:>10} {:>12}",
            basic.category.display_name(),
            basic.target_amount,
            basic.current_amount,
            progress_bar(basic.progress_pct()),
            if basic.is_funded { "funded" } else { "pending" },
            basic.updated_at.date(),
        );
    }
}

pub fn print_portfolio(report: &PortfolioReport) {
    if report.goals.is_empty() {
        println!("No goals found. Add a goal first.");
        return;
    }

    println!(
        "{:>4} {:<24} {:>14} {:>14} {:>14} {:>9} {:>12}",
        "ID", "Name", "Target", "Contributed", "Projected", "Progress", "Status"
    );
    println!("{}", "-".repeat(98));
    for goal in &report.goals {
        let status = match goal.outlook.shortfall {
            None => "on track".to_string(),
            Some(short) => format!("-{:.0}", short.amount),
        };
        println!(
            "{:>4} {:<24} {:>14.2} {:>14.2} {:>14.2} {:>8.1}% {:>12}",
            goal.id,
            truncate(&goal.name, 24),
            goal.target_amount,
            goal.contributions_total,
            goal.outlook.future_value,
            goal.progress_pct,
            status,
        );
    }

    let s = &report.summary;
    println!("{}", "-".repeat(98));
    println!(
        "{:>4} {:<24} {:>14.2} {:>14.2} {:>14.2}   {}/{} on track",
        "", "Total", s.total_target, s.total_contributed, s.total_future_value, s.on_track, s.goals
    );
}
