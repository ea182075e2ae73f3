//! Goal Tracker CLI
//!
//! Command-line interface over the goal store and projection engine.

use std::path::{Path, PathBuf};

use anyhow::bail;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};

use goal_tracker::goal::{
    self, emergency_fund_target, health_cover_target, term_cover_target, BasicCategory,
    InvestmentMode, NewGoal,
};
use goal_tracker::projection::{
    blended_allocation, project_future_value, recommend_category, required_lumpsum,
    required_monthly_contribution, Allocation, LumpsumSplit,
};
use goal_tracker::report;
use goal_tracker::store::{GoalStore, GoalUpdate};
use goal_tracker::Error;

#[derive(Parser)]
#[command(
    name = "goal-tracker",
    version,
    about = "Track savings goals and the investments needed to reach them"
)]
struct Cli {
    /// Path to the goal database
    #[arg(long, global = true, default_value = "goals.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a goal and store its funding plan
    Add(AddArgs),
    /// List stored goals with progress
    List,
    /// Show one goal with milestones and its outlook
    Show { id: i64 },
    /// Update fields on a stored goal
    Edit(EditArgs),
    /// Delete a goal and its contribution ledger
    Delete { id: i64 },
    /// Log a contribution toward a goal
    Contribute(ContributeArgs),
    /// List the contribution ledger for a goal
    Contributions { id: i64 },
    /// One-off funding calculators (nothing is stored)
    Calc {
        #[command(subcommand)]
        mode: CalcCommand,
    },
    /// Project a goal's future value and any shortfall
    Outlook { id: i64 },
    /// Portfolio-wide projection across every goal
    Report {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Render an SVG progress chart for a goal
    Chart {
        id: i64,
        /// Output file
        #[arg(long, default_value = "progress.svg")]
        out: PathBuf,
    },
    /// Suggest an investment category for a horizon and rate
    Recommend {
        /// Time horizon in years
        #[arg(long)]
        years: u32,
        /// Expected CAGR in percent
        #[arg(long, default_value_t = 12.0)]
        rate: f64,
    },
    /// Export goals and contributions as CSV
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Snapshot the store into a timestamped backup directory
    Backup {
        #[arg(long, default_value = "backups")]
        dir: PathBuf,
    },
    /// Replace the store's contents from a backup directory
    Restore { dir: PathBuf },
    /// List available backups
    Backups {
        #[arg(long, default_value = "backups")]
        dir: PathBuf,
    },
    /// Show or update financial basics
    Basics {
        #[command(subcommand)]
        action: BasicsCommand,
    },
}

#[derive(Args)]
struct AddArgs {
    /// Goal name
    name: String,
    /// Target amount
    #[arg(long)]
    target: f64,
    /// Time horizon in years
    #[arg(long)]
    years: u32,
    /// Expected CAGR in percent
    #[arg(long, default_value_t = 12.0)]
    rate: f64,
    /// Funding mode: sip, lumpsum, or blended
    #[arg(long, default_value = "sip")]
    mode: InvestmentMode,
    /// Lumpsum share of the target in percent (blended mode)
    #[arg(long, conflicts_with = "lumpsum_amount")]
    lumpsum_percent: Option<f64>,
    /// Fixed lumpsum amount (blended mode)
    #[arg(long)]
    lumpsum_amount: Option<f64>,
    /// Start date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args)]
struct EditArgs {
    id: i64,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    target: Option<f64>,
    #[arg(long)]
    years: Option<u32>,
    /// Expected CAGR in percent
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long)]
    initial: Option<f64>,
    #[arg(long)]
    monthly: Option<f64>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args)]
struct ContributeArgs {
    id: i64,
    amount: f64,
    /// Contribution date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Fund the money went into
    #[arg(long)]
    fund: Option<String>,
    /// Purchase NAV
    #[arg(long)]
    nav: Option<f64>,
}

#[derive(Subcommand)]
enum CalcCommand {
    /// Lumpsum needed today to reach a target
    Lumpsum {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value_t = 12.0)]
        rate: f64,
    },
    /// Monthly SIP needed to reach a target
    Sip {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value_t = 12.0)]
        rate: f64,
    },
    /// Blended lumpsum + SIP split
    Blended {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, default_value_t = 12.0)]
        rate: f64,
        /// Lumpsum share of the target in percent
        #[arg(long, conflicts_with = "lumpsum_amount")]
        lumpsum_percent: Option<f64>,
        /// Fixed lumpsum amount
        #[arg(long)]
        lumpsum_amount: Option<f64>,
    },
}

#[derive(Subcommand)]
enum BasicsCommand {
    /// Show funding status for every category
    Show,
    /// Update a category's target or current amount
    Set {
        /// emergency-fund, health-insurance, or term-insurance
        category: BasicCategory,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        current: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Recommended targets from household numbers
    Recommend {
        #[arg(long)]
        monthly_expenses: Option<f64>,
        #[arg(long)]
        family_members: Option<u32>,
        #[arg(long)]
        annual_income: Option<f64>,
    },
}

fn resolve_split(percent: Option<f64>, amount: Option<f64>) -> Result<LumpsumSplit, Error> {
    match (percent, amount) {
        (Some(pct), None) => Ok(LumpsumSplit::Percent(pct)),
        (None, Some(amt)) => Ok(LumpsumSplit::Amount(amt)),
        _ => Err(Error::MissingSplit),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Add(args) => add_goal(&cli.db, args),
        Command::List => {
            let store = GoalStore::open(&cli.db)?;
            report::print_goal_table(&store.fetch_goals()?);
            Ok(())
        }
        Command::Show { id } => show_goal(&cli.db, id),
        Command::Edit(args) => edit_goal(&cli.db, args),
        Command::Delete { id } => {
            let store = GoalStore::open(&cli.db)?;
            if store.delete_goal(id)? {
                println!("Deleted goal {id}.");
            } else {
                bail!("no goal with id {id}");
            }
            Ok(())
        }
        Command::Contribute(args) => contribute(&cli.db, args),
        Command::Contributions { id } => {
            let store = GoalStore::open(&cli.db)?;
            let goal = store.fetch_goal(id)?;
            report::print_contributions(&goal, &store.fetch_contributions(id)?);
            Ok(())
        }
        Command::Calc { mode } => calc(mode),
        Command::Outlook { id } => {
            let store = GoalStore::open(&cli.db)?;
            let goal = store.fetch_goal(id)?;
            let outlook = project_future_value(
                goal.target_amount,
                goal.contributions_total,
                goal.monthly_contribution,
                goal.horizon_years,
                goal.cagr_pct,
            )?;
            report::print_outlook(&outlook);
            Ok(())
        }
        Command::Report { json } => {
            let store = GoalStore::open(&cli.db)?;
            let portfolio = report::build_portfolio(&store.fetch_goals()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&portfolio)?);
            } else {
                report::print_portfolio(&portfolio);
            }
            Ok(())
        }
        Command::Chart { id, out } => {
            let store = GoalStore::open(&cli.db)?;
            let goal = store.fetch_goal(id)?;
            let series = store.contribution_series(id)?;
            report::render_progress_chart(&goal, &series, &out)?;
            println!("Chart written to {}.", out.display());
            Ok(())
        }
        Command::Recommend { years, rate } => {
            println!("{}", recommend_category(years, rate));
            Ok(())
        }
        Command::Export { dir } => {
            let store = GoalStore::open(&cli.db)?;
            let export = report::export_csv(&store, &dir)?;
            println!("Goals exported to {}.", export.goals_path.display());
            println!(
                "Contributions exported to {}.",
                export.contributions_path.display()
            );
            Ok(())
        }
        Command::Backup { dir } => {
            let store = GoalStore::open(&cli.db)?;
            let path = report::backup(&store, &dir)?;
            println!("Backup written to {}.", path.display());
            Ok(())
        }
        Command::Restore { dir } => {
            let mut store = GoalStore::open(&cli.db)?;
            let summary = report::restore(&mut store, &dir)?;
            println!(
                "Restored {} goals, {} contributions, {} basics categories.",
                summary.goals, summary.contributions, summary.basics
            );
            Ok(())
        }
        Command::Backups { dir } => {
            let backups = report::list_backups(&dir)?;
            if backups.is_empty() {
                println!("No backups found under {}.", dir.display());
            } else {
                for name in backups {
                    println!("{name}");
                }
            }
            Ok(())
        }
        Command::Basics { action } => basics(&cli.db, action),
    }
}

/// Price the funding plan for the chosen mode.
fn plan_for_mode(args: &AddArgs) -> Result<Allocation, Error> {
    match args.mode {
        InvestmentMode::Sip => Ok(Allocation {
            lumpsum: 0.0,
            monthly: required_monthly_contribution(args.target, args.years, args.rate)?,
        }),
        InvestmentMode::Lumpsum => Ok(Allocation {
            lumpsum: required_lumpsum(args.target, args.years, args.rate)?,
            monthly: 0.0,
        }),
        InvestmentMode::Blended => {
            let split = resolve_split(args.lumpsum_percent, args.lumpsum_amount)?;
            blended_allocation(args.target, args.years, args.rate, split)
        }
    }
}

fn add_goal(db: &Path, args: AddArgs) -> anyhow::Result<()> {
    let plan = plan_for_mode(&args)?;

    println!("Required investments for '{}':", args.name);
    report::print_allocation(&plan);
    println!("Suggested category: {}", recommend_category(args.years, args.rate));

    let store = GoalStore::open(db)?;
    let id = store.insert_goal(&NewGoal {
        name: args.name,
        target_amount: args.target,
        horizon_years: args.years,
        cagr_pct: args.rate,
        mode: args.mode,
        initial_investment: plan.lumpsum,
        monthly_contribution: plan.monthly,
        start_date: args.start_date.unwrap_or_else(today),
        notes: args.notes,
    })?;

    println!("Goal {id} added.");
    Ok(())
}

fn show_goal(db: &Path, id: i64) -> anyhow::Result<()> {
    let store = GoalStore::open(db)?;
    let goal = store.fetch_goal(id)?;

    report::print_goal_detail(&goal);
    println!();
    report::print_milestones(&goal::milestone_statuses(
        goal.target_amount,
        goal.contributions_total,
    ));
    println!();
    let outlook = project_future_value(
        goal.target_amount,
        goal.contributions_total,
        goal.monthly_contribution,
        goal.horizon_years,
        goal.cagr_pct,
    )?;
    report::print_outlook(&outlook);
    println!(
        "Suggested category: {}",
        recommend_category(goal.horizon_years, goal.cagr_pct)
    );
    Ok(())
}

fn edit_goal(db: &Path, args: EditArgs) -> anyhow::Result<()> {
    let update = GoalUpdate {
        name: args.name,
        target_amount: args.target,
        horizon_years: args.years,
        cagr_pct: args.rate,
        initial_investment: args.initial,
        monthly_contribution: args.monthly,
        notes: args.notes,
    };
    if update.is_empty() {
        bail!("nothing to update; pass at least one field flag");
    }

    let store = GoalStore::open(db)?;
    store.update_goal(args.id, &update)?;
    println!("Goal {} updated.", args.id);
    Ok(())
}

fn contribute(db: &Path, args: ContributeArgs) -> anyhow::Result<()> {
    let mut store = GoalStore::open(db)?;
    store.log_contribution(
        args.id,
        args.amount,
        args.date.unwrap_or_else(today),
        args.fund.as_deref(),
        args.nav,
    )?;

    let goal = store.fetch_goal(args.id)?;
    println!(
        "Logged {:.2} toward '{}' ({:.1}% of target).",
        args.amount,
        goal.name,
        goal.progress_pct()
    );
    Ok(())
}

fn calc(mode: CalcCommand) -> anyhow::Result<()> {
    match mode {
        CalcCommand::Lumpsum { target, years, rate } => {
            let lumpsum = required_lumpsum(target, years, rate)?;
            report::print_allocation(&Allocation {
                lumpsum,
                monthly: 0.0,
            });
            println!("Suggested category: {}", recommend_category(years, rate));
        }
        CalcCommand::Sip { target, years, rate } => {
            let monthly = required_monthly_contribution(target, years, rate)?;
            report::print_allocation(&Allocation {
                lumpsum: 0.0,
                monthly,
            });
            println!("Suggested category: {}", recommend_category(years, rate));
        }
        CalcCommand::Blended {
            target,
            years,
            rate,
            lumpsum_percent,
            lumpsum_amount,
        } => {
            let split = resolve_split(lumpsum_percent, lumpsum_amount)?;
            let allocation = blended_allocation(target, years, rate, split)?;
            report::print_allocation(&allocation);
            println!("Suggested category: {}", recommend_category(years, rate));
        }
    }
    Ok(())
}

fn basics(db: &Path, action: BasicsCommand) -> anyhow::Result<()> {
    match action {
        BasicsCommand::Show => {
            let store = GoalStore::open(db)?;
            report::print_basics(&store.fetch_basics()?);
        }
        BasicsCommand::Set {
            category,
            target,
            current,
            notes,
        } => {
            let store = GoalStore::open(db)?;
            let updated = store.update_basic(category, target, current, notes.as_deref())?;
            println!(
                "{}: {:.2} of {:.2} ({})",
                updated.category.display_name(),
                updated.current_amount,
                updated.target_amount,
                if updated.is_funded { "funded" } else { "pending" }
            );
        }
        BasicsCommand::Recommend {
            monthly_expenses,
            family_members,
            annual_income,
        } => {
            if monthly_expenses.is_none() && family_members.is_none() && annual_income.is_none() {
                bail!(
                    "pass at least one of --monthly-expenses, --family-members, --annual-income"
                );
            }
            if let Some(expenses) = monthly_expenses {
                println!(
                    "Emergency fund:  {:>14.2}  (6 months of expenses)",
                    emergency_fund_target(expenses)
                );
            }
            if let Some(members) = family_members {
                println!(
                    "Health cover:    {:>14.2}  (for {members} family members)",
                    health_cover_target(members)
                );
            }
            if let Some(income) = annual_income {
                println!(
                    "Term cover:      {:>14.2}  (10x annual income)",
                    term_cover_target(income)
                );
            }
        }
    }
    Ok(())
}
