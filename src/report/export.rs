//! CSV export, backup, and restore
//!
//! Export writes human-facing CSVs for spreadsheets; backup writes the same
//! tables into a timestamped directory that restore can replay in full.
//! Writers and readers are generic over `io::Write`/`io::Read` so tests run
//! against in-memory buffers.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::goal::{BasicCategory, Contribution, FinancialBasic, Goal, InvestmentMode};
use crate::store::GoalStore;

const DAY_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_day(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DAY_FORMAT).map_err(|source| Error::InvalidDate {
        input: text.to_string(),
        source,
    })
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|source| Error::InvalidDate {
        input: text.to_string(),
        source,
    })
}

/// Goal row as it appears in CSV files.
#[derive(Debug, Serialize, Deserialize)]
struct GoalCsvRow {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Goal Name")]
    name: String,
    #[serde(rename = "Target Amount")]
    target_amount: f64,
    #[serde(rename = "Time Horizon (Years)")]
    horizon_years: u32,
    #[serde(rename = "CAGR (%)")]
    cagr_pct: f64,
    #[serde(rename = "Investment Mode")]
    mode: String,
    #[serde(rename = "Initial Investment")]
    initial_investment: f64,
    #[serde(rename = "Monthly Contribution")]
    monthly_contribution: f64,
    #[serde(rename = "Total Contributions")]
    contributions_total: f64,
    #[serde(rename = "Start Date")]
    start_date: String,
    #[serde(rename = "Notes")]
    notes: Option<String>,
    #[serde(rename = "Created At")]
    created_at: String,
}

impl GoalCsvRow {
    fn from_goal(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            horizon_years: goal.horizon_years,
            cagr_pct: goal.cagr_pct,
            mode: goal.mode.as_str().to_string(),
            initial_investment: goal.initial_investment,
            monthly_contribution: goal.monthly_contribution,
            contributions_total: goal.contributions_total,
            start_date: goal.start_date.format(DAY_FORMAT).to_string(),
            notes: goal.notes.clone(),
            created_at: goal.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn into_goal(self) -> Result<Goal> {
        Ok(Goal {
            id: self.id,
            name: self.name,
            target_amount: self.target_amount,
            horizon_years: self.horizon_years,
            cagr_pct: self.cagr_pct,
            mode: self.mode.parse::<InvestmentMode>()?,
            initial_investment: self.initial_investment,
            monthly_contribution: self.monthly_contribution,
            contributions_total: self.contributions_total,
            start_date: parse_day(&self.start_date)?,
            notes: self.notes,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Contribution row as it appears in CSV files; the goal name is included for
/// people reading the file and ignored on restore.
#[derive(Debug, Serialize, Deserialize)]
struct ContributionCsvRow {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Goal ID")]
    goal_id: i64,
    #[serde(rename = "Goal Name")]
    goal_name: String,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Fund")]
    fund_name: Option<String>,
    #[serde(rename = "NAV")]
    nav: Option<f64>,
}

impl ContributionCsvRow {
    fn from_entry(goal_name: &str, contribution: &Contribution) -> Self {
        Self {
            id: contribution.id,
            goal_id: contribution.goal_id,
            goal_name: goal_name.to_string(),
            amount: contribution.amount,
            date: contribution.date.format(DAY_FORMAT).to_string(),
            fund_name: contribution.fund_name.clone(),
            nav: contribution.nav,
        }
    }

    fn into_contribution(self) -> Result<Contribution> {
        Ok(Contribution {
            id: self.id,
            goal_id: self.goal_id,
            amount: self.amount,
            date: parse_day(&self.date)?,
            fund_name: self.fund_name,
            nav: self.nav,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BasicCsvRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Target Amount")]
    target_amount: f64,
    #[serde(rename = "Current Amount")]
    current_amount: f64,
    #[serde(rename = "Funded")]
    is_funded: bool,
    #[serde(rename = "Notes")]
    notes: Option<String>,
    #[serde(rename = "Updated At")]
    updated_at: String,
}

impl BasicCsvRow {
    fn from_basic(basic: &FinancialBasic) -> Self {
        Self {
            category: basic.category.as_str().to_string(),
            target_amount: basic.target_amount,
            current_amount: basic.current_amount,
            is_funded: basic.is_funded,
            notes: basic.notes.clone(),
            updated_at: basic.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn into_basic(self) -> Result<FinancialBasic> {
        Ok(FinancialBasic {
            category: self.category.parse::<BasicCategory>()?,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            is_funded: self.is_funded,
            notes: self.notes,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

pub fn write_goals_csv<W: Write>(writer: W, goals: &[Goal]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for goal in goals {
        csv_writer.serialize(GoalCsvRow::from_goal(goal))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_goals_csv<R: Read>(reader: R) -> Result<Vec<Goal>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut goals = Vec::new();
    for row in csv_reader.deserialize() {
        let row: GoalCsvRow = row?;
        goals.push(row.into_goal()?);
    }
    Ok(goals)
}

pub fn write_contributions_csv<W: Write>(
    writer: W,
    entries: &[(String, Contribution)],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (goal_name, contribution) in entries {
        csv_writer.serialize(ContributionCsvRow::from_entry(goal_name, contribution))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_contributions_csv<R: Read>(reader: R) -> Result<Vec<Contribution>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for row in csv_reader.deserialize() {
        let row: ContributionCsvRow = row?;
        entries.push(row.into_contribution()?);
    }
    Ok(entries)
}

pub fn write_basics_csv<W: Write>(writer: W, basics: &[FinancialBasic]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for basic in basics {
        csv_writer.serialize(BasicCsvRow::from_basic(basic))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_basics_csv<R: Read>(reader: R) -> Result<Vec<FinancialBasic>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut basics = Vec::new();
    for row in csv_reader.deserialize() {
        let row: BasicCsvRow = row?;
        basics.push(row.into_basic()?);
    }
    Ok(basics)
}

/// Paths written by [`export_csv`].
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub goals_path: PathBuf,
    pub contributions_path: PathBuf,
}

/// Write the goal table and the contribution ledger as CSVs into `dir`.
pub fn export_csv(store: &GoalStore, dir: &Path) -> Result<CsvExport> {
    fs::create_dir_all(dir)?;
    let goals_path = dir.join("goals_export.csv");
    let contributions_path = dir.join("contributions_export.csv");

    for path in [&goals_path, &contributions_path] {
        if path.exists() {
            warn!("overwriting {}", path.display());
        }
    }

    write_goals_csv(File::create(&goals_path)?, &store.fetch_goals()?)?;
    write_contributions_csv(
        File::create(&contributions_path)?,
        &store.fetch_all_contributions()?,
    )?;

    info!(
        "exported goals and contributions to {} and {}",
        goals_path.display(),
        contributions_path.display()
    );
    Ok(CsvExport {
        goals_path,
        contributions_path,
    })
}

const BACKUP_PREFIX: &str = "backup_";

/// Write a full snapshot into a timestamped directory under `root`.
pub fn backup(store: &GoalStore, root: &Path) -> Result<PathBuf> {
    let dir = root.join(format!(
        "{}{}",
        BACKUP_PREFIX,
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    fs::create_dir_all(&dir)?;

    write_goals_csv(File::create(dir.join("goals.csv"))?, &store.fetch_goals()?)?;
    write_contributions_csv(
        File::create(dir.join("contributions.csv"))?,
        &store.fetch_all_contributions()?,
    )?;
    write_basics_csv(File::create(dir.join("basics.csv"))?, &store.fetch_basics()?)?;

    info!("backup written to {}", dir.display());
    Ok(dir)
}

/// What a restore brought back.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreSummary {
    pub goals: usize,
    pub contributions: usize,
    pub basics: usize,
}

/// Replace the store's contents with the snapshot in `dir`.
pub fn restore(store: &mut GoalStore, dir: &Path) -> Result<RestoreSummary> {
    let goals = read_goals_csv(File::open(dir.join("goals.csv"))?)?;
    let contributions = read_contributions_csv(File::open(dir.join("contributions.csv"))?)?;
    let basics = read_basics_csv(File::open(dir.join("basics.csv"))?)?;

    store.wipe()?;
    for goal in &goals {
        store.restore_goal(goal)?;
    }
    for contribution in &contributions {
        store.restore_contribution(contribution)?;
    }
    for basic in &basics {
        store.restore_basic(basic)?;
    }

    info!(
        "restored {} goals, {} contributions, {} basics from {}",
        goals.len(),
        contributions.len(),
        basics.len(),
        dir.display()
    );
    Ok(RestoreSummary {
        goals: goals.len(),
        contributions: contributions.len(),
        basics: basics.len(),
    })
}

/// Names of backup directories under `root`, newest last.
pub fn list_backups(root: &Path) -> Result<Vec<String>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(BACKUP_PREFIX))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::NewGoal;
    use crate::store::GoalStore;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_store() -> GoalStore {
        let mut store = GoalStore::in_memory().unwrap();
        let id = store
            .insert_goal(&NewGoal {
                name: "Vacation".to_string(),
                target_amount: 80_000.0,
                horizon_years: 2,
                cagr_pct: 8.0,
                mode: InvestmentMode::Sip,
                initial_investment: 0.0,
                monthly_contribution: 3_000.0,
                start_date: day(2025, 5, 1),
                notes: None,
            })
            .unwrap();
        store
            .log_contribution(id, 3_000.0, day(2025, 6, 1), Some("Liquid Fund"), None)
            .unwrap();
        store
            .log_contribution(id, 3_000.0, day(2025, 7, 1), None, Some(12.5))
            .unwrap();
        store
    }

    #[test]
    fn goals_round_trip_through_csv() {
        let store = seeded_store();
        let goals = store.fetch_goals().unwrap();

        let mut buffer = Vec::new();
        write_goals_csv(&mut buffer, &goals).unwrap();
        let parsed = read_goals_csv(buffer.as_slice()).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Vacation");
        assert_eq!(parsed[0].mode, InvestmentMode::Sip);
        assert_eq!(parsed[0].contributions_total, 6_000.0);
        assert_eq!(parsed[0].start_date, day(2025, 5, 1));
    }

    #[test]
    fn contributions_round_trip_through_csv() {
        let store = seeded_store();
        let entries = store.fetch_all_contributions().unwrap();

        let mut buffer = Vec::new();
        write_contributions_csv(&mut buffer, &entries).unwrap();
        let parsed = read_contributions_csv(buffer.as_slice()).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].fund_name.as_deref(), Some("Liquid Fund"));
        assert_eq!(parsed[0].nav, None);
        assert_eq!(parsed[1].nav, Some(12.5));
    }

    #[test]
    fn csv_headers_are_spreadsheet_friendly() {
        let store = seeded_store();
        let mut buffer = Vec::new();
        write_goals_csv(&mut buffer, &store.fetch_goals().unwrap()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.contains("Goal Name"));
        assert!(header.contains("CAGR (%)"));
        assert!(header.contains("Total Contributions"));
    }

    #[test]
    fn backup_and_restore_rebuild_the_store() {
        let store = seeded_store();
        let root = std::env::temp_dir().join(format!(
            "goal_tracker_backup_test_{}",
            std::process::id()
        ));
        let dir = backup(&store, &root).unwrap();

        let mut fresh = GoalStore::in_memory().unwrap();
        let summary = restore(&mut fresh, &dir).unwrap();
        assert_eq!(summary.goals, 1);
        assert_eq!(summary.contributions, 2);
        assert_eq!(summary.basics, 3);

        let goals = fresh.fetch_goals().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].contributions_total, 6_000.0);
        assert_eq!(fresh.ledger_total(goals[0].id).unwrap(), 6_000.0);

        let listed = list_backups(&root).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].starts_with(BACKUP_PREFIX));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn listing_a_missing_backup_root_is_empty() {
        let root = std::env::temp_dir().join("goal_tracker_definitely_missing");
        assert!(list_backups(&root).unwrap().is_empty());
    }
}
