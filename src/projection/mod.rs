//! Projection engine: funding formulas and category recommendations

mod engine;
mod recommend;

pub use engine::{
    blended_allocation, project_future_value, required_lumpsum, required_monthly_contribution,
    round_currency, Allocation, GoalOutlook, LumpsumSplit, Shortfall,
};
pub use recommend::recommend_category;
