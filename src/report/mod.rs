//! Reporting: terminal tables, portfolio projections, CSV export, and charts

mod chart;
mod export;
mod portfolio;
mod tables;

pub use chart::render_progress_chart;
pub use export::{
    backup, export_csv, list_backups, read_contributions_csv, read_goals_csv, restore,
    write_contributions_csv, write_goals_csv, CsvExport, RestoreSummary,
};
pub use portfolio::{build_goal_report, build_portfolio, GoalReport, PortfolioReport, PortfolioSummary};
pub use tables::{
    print_allocation, print_basics, print_contributions, print_goal_detail, print_goal_table,
    print_milestones, print_outlook, print_portfolio, progress_bar,
};
