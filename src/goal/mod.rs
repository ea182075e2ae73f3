//! Goal records, contribution ledger entries, and the basics advisor

mod basics;
mod data;

pub use basics::{
    emergency_fund_target, health_cover_target, term_cover_target, BasicCategory, FinancialBasic,
};
pub use data::{milestone_statuses, Contribution, Goal, InvestmentMode, Milestone, NewGoal};
