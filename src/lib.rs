//! Goal Tracker - personal financial-goal tracking and projection
//!
//! This library provides:
//! - Closed-form funding formulas (lumpsum, SIP, blended, future value)
//! - Investment-category recommendations by horizon and expected return
//! - A SQLite-backed goal and contribution store with versioned migrations
//! - Reporting: terminal tables, CSV export/backup, and SVG progress charts

pub mod error;
pub mod goal;
pub mod projection;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use goal::{Contribution, Goal, InvestmentMode, NewGoal};
pub use projection::{Allocation, GoalOutlook, LumpsumSplit};
pub use store::GoalStore;
