//! SQLite persistence for goals, contributions, and financial basics
//!
//! Only this module talks to the database. Callers go through [`GoalStore`]
//! methods and never execute SQL directly.
//!
//! Schema changes are explicit versioned migrations: numbered SQL files
//! applied in order, with `PRAGMA user_version` recording the last applied
//! index so existing databases upgrade exactly once.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::goal::{BasicCategory, Contribution, FinancialBasic, Goal, InvestmentMode, NewGoal};

const MIGRATIONS: &[&str] = &[
    include_str!("../../migrations/001_foundation.sql"),
    include_str!("../../migrations/002_financial_basics.sql"),
    include_str!("../../migrations/003_fund_tracking.sql"),
];

const DAY_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Field-wise update of a stored goal; unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub horizon_years: Option<u32>,
    pub cagr_pct: Option<f64>,
    pub initial_investment: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub notes: Option<String>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_amount.is_none()
            && self.horizon_years.is_none()
            && self.cagr_pct.is_none()
            && self.initial_investment.is_none()
            && self.monthly_contribution.is_none()
            && self.notes.is_none()
    }
}

/// The goal store: one SQLite connection plus the query surface over it.
pub struct GoalStore {
    conn: Connection,
}

impl GoalStore {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Apply pending schema migrations in order.
    fn migrate(&self) -> Result<()> {
        let applied: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        for (idx, sql) in MIGRATIONS.iter().enumerate().skip(applied as usize) {
            self.conn.execute_batch(sql)?;
            self.conn
                .pragma_update(None, "user_version", (idx + 1) as i64)?;
            info!("applied schema migration {:03}", idx + 1);
        }
        Ok(())
    }

    /// Schema version currently applied.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }

    // ── Goals ──────────────────────────────────────────────────

    pub fn insert_goal(&self, goal: &NewGoal) -> Result<i64> {
        if goal.target_amount < 0.0 {
            return Err(Error::NegativeAmount {
                field: "target amount",
                value: goal.target_amount,
            });
        }
        if goal.horizon_years == 0 {
            return Err(Error::ZeroHorizon);
        }

        self.conn.execute(
            "INSERT INTO goals (name, target_amount, horizon_years, cagr_pct, mode,
                                initial_investment, monthly_contribution, start_date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                goal.name,
                goal.target_amount,
                goal.horizon_years,
                goal.cagr_pct,
                goal.mode.as_str(),
                goal.initial_investment,
                goal.monthly_contribution,
                goal.start_date.format(DAY_FORMAT).to_string(),
                goal.notes,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("created goal {} ({})", id, goal.name);
        Ok(id)
    }

    /// All goals, newest first.
    pub fn fetch_goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, target_amount, horizon_years, cagr_pct, mode,
                    initial_investment, monthly_contribution, contributions_total,
                    start_date, notes, created_at
             FROM goals
             ORDER BY created_at DESC, id DESC",
        )?;
        let goals = stmt
            .query_map([], map_goal_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("fetched {} goals", goals.len());
        Ok(goals)
    }

    pub fn fetch_goal(&self, id: i64) -> Result<Goal> {
        self.conn
            .query_row(
                "SELECT id, name, target_amount, horizon_years, cagr_pct, mode,
                        initial_investment, monthly_contribution, contributions_total,
                        start_date, notes, created_at
                 FROM goals
                 WHERE id = ?1",
                params![id],
                map_goal_row,
            )
            .optional()?
            .ok_or(Error::GoalNotFound(id))
    }

    pub fn goal_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM goals WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Apply a field-wise update. Each field uses its own static statement;
    /// column names never come from input.
    pub fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<()> {
        if !self.goal_exists(id)? {
            return Err(Error::GoalNotFound(id));
        }
        // Validate everything before the first write so a bad field cannot
        // leave a half-applied update behind.
        if let Some(value) = update.target_amount {
            if value < 0.0 {
                return Err(Error::NegativeAmount {
                    field: "target amount",
                    value,
                });
            }
        }
        if update.horizon_years == Some(0) {
            return Err(Error::ZeroHorizon);
        }

        if let Some(value) = update.target_amount {
            self.conn.execute(
                "UPDATE goals SET target_amount = ?1 WHERE id = ?2",
                params![value, id],
            )?;
        }
        if let Some(value) = update.horizon_years {
            self.conn.execute(
                "UPDATE goals SET horizon_years = ?1 WHERE id = ?2",
                params![value, id],
            )?;
        }
        if let Some(ref value) = update.name {
            self.conn.execute(
                "UPDATE goals SET name = ?1 WHERE id = ?2",
                params![value, id],
            )?;
        }
        if let Some(value) = update.cagr_pct {
            self.conn.execute(
                "UPDATE goals SET cagr_pct = ?1 WHERE id = ?2",
                params![value, id],
            )?;
        }
        if let Some(value) = update.initial_investment {
            self.conn.execute(
                "UPDATE goals SET initial_investment = ?1 WHERE id = ?2",
                params![value, id],
            )?;
        }
        if let Some(value) = update.monthly_contribution {
            self.conn.execute(
                "UPDATE goals SET monthly_contribution = ?1 WHERE id = ?2",
                params![value, id],
            )?;
        }
        if let Some(ref value) = update.notes {
            self.conn.execute(
                "UPDATE goals SET notes = ?1 WHERE id = ?2",
                params![value, id],
            )?;
        }

        info!("updated goal {}", id);
        Ok(())
    }

    /// Delete a goal; its contributions go with it via the cascade.
    pub fn delete_goal(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        if rows > 0 {
            info!("deleted goal {}", id);
        }
        Ok(rows > 0)
    }

    // ── Contributions ──────────────────────────────────────────

    /// Append a ledger entry and bump the goal's running total in one
    /// transaction. The two writes must not be separable: the running total
    /// is what reports and projections read.
    pub fn log_contribution(
        &mut self,
        goal_id: i64,
        amount: f64,
        date: NaiveDate,
        fund_name: Option<&str>,
        nav: Option<f64>,
    ) -> Result<i64> {
        if amount <= 0.0 {
            return Err(Error::NonPositiveAmount {
                field: "contribution amount",
                value: amount,
            });
        }
        if !self.goal_exists(goal_id)? {
            return Err(Error::GoalNotFound(goal_id));
        }

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO contributions (goal_id, amount, date, fund_name, nav)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                goal_id,
                amount,
                date.format(DAY_FORMAT).to_string(),
                fund_name,
                nav,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
            "UPDATE goals SET contributions_total = contributions_total + ?1 WHERE id = ?2",
            params![amount, goal_id],
        )?;
        tx.commit()?;

        info!("logged contribution of {:.2} toward goal {}", amount, goal_id);
        Ok(id)
    }

    /// Ledger entries for one goal, oldest first.
    pub fn fetch_contributions(&self, goal_id: i64) -> Result<Vec<Contribution>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, goal_id, amount, date, fund_name, nav
             FROM contributions
             WHERE goal_id = ?1
             ORDER BY date ASC, id ASC",
        )?;
        let entries = stmt
            .query_map(params![goal_id], map_contribution_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Every ledger entry joined with its goal name, for export.
    pub fn fetch_all_contributions(&self) -> Result<Vec<(String, Contribution)>> {
        let mut stmt = self.conn.prepare(
            "SELECT g.name, c.id, c.goal_id, c.amount, c.date, c.fund_name, c.nav
             FROM contributions c
             JOIN goals g ON g.id = c.goal_id
             ORDER BY c.date ASC, c.id ASC",
        )?;
        let entries = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let date_text: String = row.get(4)?;
                Ok((
                    name,
                    Contribution {
                        id: row.get(1)?,
                        goal_id: row.get(2)?,
                        amount: row.get(3)?,
                        date: parse_day(4, &date_text)?,
                        fund_name: row.get(5)?,
                        nav: row.get(6)?,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// The goal's maintained running total.
    pub fn contributions_total(&self, goal_id: i64) -> Result<f64> {
        self.conn
            .query_row(
                "SELECT contributions_total FROM goals WHERE id = ?1",
                params![goal_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::GoalNotFound(goal_id))
    }

    /// Sum of the ledger itself; agrees with [`contributions_total`] unless
    /// the database was edited out-of-band.
    pub fn ledger_total(&self, goal_id: i64) -> Result<f64> {
        let total: Option<f64> = self.conn.query_row(
            "SELECT SUM(amount) FROM contributions WHERE goal_id = ?1",
            params![goal_id],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }

    /// Per-day contribution totals for charting, oldest first.
    pub fn contribution_series(&self, goal_id: i64) -> Result<Vec<(NaiveDate, f64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, SUM(amount)
             FROM contributions
             WHERE goal_id = ?1
             GROUP BY date
             ORDER BY date ASC",
        )?;
        let series = stmt
            .query_map(params![goal_id], |row| {
                let date_text: String = row.get(0)?;
                Ok((parse_day(0, &date_text)?, row.get::<_, f64>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(series)
    }

    // ── Financial basics ───────────────────────────────────────

    pub fn fetch_basics(&self) -> Result<Vec<FinancialBasic>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, target_amount, current_amount, is_funded, notes, updated_at
             FROM financial_basics
             ORDER BY category ASC",
        )?;
        let basics = stmt
            .query_map([], map_basic_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(basics)
    }

    pub fn fetch_basic(&self, category: BasicCategory) -> Result<FinancialBasic> {
        Ok(self.conn.query_row(
            "SELECT category, target_amount, current_amount, is_funded, notes, updated_at
             FROM financial_basics
             WHERE category = ?1",
            params![category.as_str()],
            map_basic_row,
        )?)
    }

    /// Update a basics row; unset fields keep their stored values. The funded
    /// flag is recomputed from the resulting amounts.
    pub fn update_basic(
        &self,
        category: BasicCategory,
        target_amount: Option<f64>,
        current_amount: Option<f64>,
        notes: Option<&str>,
    ) -> Result<FinancialBasic> {
        let existing = self.fetch_basic(category)?;
        let target = target_amount.unwrap_or(existing.target_amount);
        let current = current_amount.unwrap_or(existing.current_amount);
        if target < 0.0 {
            return Err(Error::NegativeAmount {
                field: "target amount",
                value: target,
            });
        }
        if current < 0.0 {
            return Err(Error::NegativeAmount {
                field: "current amount",
                value: current,
            });
        }
        let is_funded = target > 0.0 && current >= target;

        self.conn.execute(
            "UPDATE financial_basics
             SET target_amount = ?1, current_amount = ?2, is_funded = ?3,
                 notes = COALESCE(?4, notes), updated_at = CURRENT_TIMESTAMP
             WHERE category = ?5",
            params![target, current, is_funded, notes, category.as_str()],
        )?;

        info!("updated basics category {}", category.as_str());
        self.fetch_basic(category)
    }

    // ── Backup support ─────────────────────────────────────────

    /// Remove all stored rows ahead of a restore.
    pub fn wipe(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM contributions", [])?;
        tx.execute("DELETE FROM goals", [])?;
        tx.execute("DELETE FROM financial_basics", [])?;
        tx.commit()?;
        info!("wiped store for restore");
        Ok(())
    }

    /// Re-insert a goal preserving its id, running total, and timestamp.
    pub fn restore_goal(&self, goal: &Goal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO goals (id, name, target_amount, horizon_years, cagr_pct, mode,
                                initial_investment, monthly_contribution, contributions_total,
                                start_date, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                goal.id,
                goal.name,
                goal.target_amount,
                goal.horizon_years,
                goal.cagr_pct,
                goal.mode.as_str(),
                goal.initial_investment,
                goal.monthly_contribution,
                goal.contributions_total,
                goal.start_date.format(DAY_FORMAT).to_string(),
                goal.notes,
                goal.created_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    /// Re-insert a ledger entry without touching the goal's running total
    /// (the restored goal row already carries it).
    pub fn restore_contribution(&self, contribution: &Contribution) -> Result<()> {
        self.conn.execute(
            "INSERT INTO contributions (id, goal_id, amount, date, fund_name, nav)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                contribution.id,
                contribution.goal_id,
                contribution.amount,
                contribution.date.format(DAY_FORMAT).to_string(),
                contribution.fund_name,
                contribution.nav,
            ],
        )?;
        Ok(())
    }

    /// Re-insert a basics row, replacing the seeded default.
    pub fn restore_basic(&self, basic: &FinancialBasic) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO financial_basics
                 (category, target_amount, current_amount, is_funded, notes, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                basic.category.as_str(),
                basic.target_amount,
                basic.current_amount,
                basic.is_funded,
                basic.notes,
                basic.updated_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }
}

fn conv_err<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_day(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DAY_FORMAT).map_err(|e| conv_err(idx, e))
}

fn parse_timestamp(idx: usize, text: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|e| conv_err(idx, e))
}

fn map_goal_row(row: &Row<'_>) -> rusqlite::Result<Goal> {
    let mode_text: String = row.get(5)?;
    let start_text: String = row.get(9)?;
    let created_text: String = row.get(11)?;
    Ok(Goal {
        id: row.get(0)?,
        name: row.get(1)?,
        target_amount: row.get(2)?,
        horizon_years: row.get(3)?,
        cagr_pct: row.get(4)?,
        mode: mode_text
            .parse::<InvestmentMode>()
            .map_err(|e| conv_err(5, e))?,
        initial_investment: row.get(6)?,
        monthly_contribution: row.get(7)?,
        contributions_total: row.get(8)?,
        start_date: parse_day(9, &start_text)?,
        notes: row.get(10)?,
        created_at: parse_timestamp(11, &created_text)?,
    })
}

fn map_contribution_row(row: &Row<'_>) -> rusqlite::Result<Contribution> {
    let date_text: String = row.get(3)?;
    Ok(Contribution {
        id: row.get(0)?,
        goal_id: row.get(1)?,
        amount: row.get(2)?,
        date: parse_day(3, &date_text)?,
        fund_name: row.get(4)?,
        nav: row.get(5)?,
    })
}

fn map_basic_row(row: &Row<'_>) -> rusqlite::Result<FinancialBasic> {
    let category_text: String = row.get(0)?;
    let updated_text: String = row.get(5)?;
    Ok(FinancialBasic {
        category: category_text
            .parse::<BasicCategory>()
            .map_err(|e| conv_err(0, e))?,
        target_amount: row.get(1)?,
        current_amount: row.get(2)?,
        is_funded: row.get(3)?,
        notes: row.get(4)?,
        updated_at: parse_timestamp(5, &updated_text)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new_goal(name: &str) -> NewGoal {
        NewGoal {
            name: name.to_string(),
            target_amount: 500_000.0,
            horizon_years: 5,
            cagr_pct: 12.0,
            mode: InvestmentMode::Blended,
            initial_investment: 50_000.0,
            monthly_contribution: 4_000.0,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            notes: Some("review rate yearly".to_string()),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn migrations_bring_schema_to_latest_version() {
        let store = GoalStore::in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), MIGRATIONS.len() as i64);
        // Re-running is a no-op, not an error.
        store.migrate().unwrap();
        assert_eq!(store.schema_version().unwrap(), MIGRATIONS.len() as i64);
    }

    #[test]
    fn goal_round_trips_through_storage() {
        let store = GoalStore::in_memory().unwrap();
        let id = store.insert_goal(&sample_new_goal("House deposit")).unwrap();

        let goal = store.fetch_goal(id).unwrap();
        assert_eq!(goal.name, "House deposit");
        assert_eq!(goal.target_amount, 500_000.0);
        assert_eq!(goal.horizon_years, 5);
        assert_eq!(goal.mode, InvestmentMode::Blended);
        assert_eq!(goal.contributions_total, 0.0);
        assert_eq!(goal.start_date, day(2025, 6, 1));
        assert_eq!(goal.notes.as_deref(), Some("review rate yearly"));
    }

    #[test]
    fn missing_goal_is_a_structured_error() {
        let store = GoalStore::in_memory().unwrap();
        assert!(matches!(store.fetch_goal(42), Err(Error::GoalNotFound(42))));
    }

    #[test]
    fn insert_rejects_invalid_inputs() {
        let store = GoalStore::in_memory().unwrap();
        let mut goal = sample_new_goal("bad");
        goal.target_amount = -1.0;
        assert!(matches!(
            store.insert_goal(&goal),
            Err(Error::NegativeAmount { .. })
        ));

        let mut goal = sample_new_goal("bad");
        goal.horizon_years = 0;
        assert!(matches!(store.insert_goal(&goal), Err(Error::ZeroHorizon)));
    }

    #[test]
    fn update_changes_only_the_set_fields() {
        let store = GoalStore::in_memory().unwrap();
        let id = store.insert_goal(&sample_new_goal("Retirement")).unwrap();

        store
            .update_goal(
                id,
                &GoalUpdate {
                    target_amount: Some(750_000.0),
                    cagr_pct: Some(10.0),
                    ..GoalUpdate::default()
                },
            )
            .unwrap();

        let goal = store.fetch_goal(id).unwrap();
        assert_eq!(goal.target_amount, 750_000.0);
        assert_eq!(goal.cagr_pct, 10.0);
        assert_eq!(goal.name, "Retirement");
        assert_eq!(goal.horizon_years, 5);
    }

    #[test]
    fn update_of_missing_goal_fails() {
        let store = GoalStore::in_memory().unwrap();
        assert!(matches!(
            store.update_goal(9, &GoalUpdate::default()),
            Err(Error::GoalNotFound(9))
        ));
    }

    #[test]
    fn logging_contributions_maintains_the_running_total() {
        let mut store = GoalStore::in_memory().unwrap();
        let id = store.insert_goal(&sample_new_goal("Emergency")).unwrap();

        store
            .log_contribution(id, 10_000.0, day(2025, 7, 1), None, None)
            .unwrap();
        store
            .log_contribution(id, 5_000.0, day(2025, 8, 1), Some("Index Fund"), Some(84.31))
            .unwrap();

        assert_eq!(store.contributions_total(id).unwrap(), 15_000.0);
        assert_eq!(store.ledger_total(id).unwrap(), 15_000.0);

        let entries = store.fetch_contributions(id).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].amount, 10_000.0);
        assert_eq!(entries[1].fund_name.as_deref(), Some("Index Fund"));
        assert_eq!(entries[1].nav, Some(84.31));
    }

    #[test]
    fn contribution_must_be_positive() {
        let mut store = GoalStore::in_memory().unwrap();
        let id = store.insert_goal(&sample_new_goal("Emergency")).unwrap();
        assert!(matches!(
            store.log_contribution(id, 0.0, day(2025, 7, 1), None, None),
            Err(Error::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn contribution_to_missing_goal_fails() {
        let mut store = GoalStore::in_memory().unwrap();
        assert!(matches!(
            store.log_contribution(7, 100.0, day(2025, 7, 1), None, None),
            Err(Error::GoalNotFound(7))
        ));
    }

    #[test]
    fn deleting_a_goal_cascades_to_its_ledger() {
        let mut store = GoalStore::in_memory().unwrap();
        let id = store.insert_goal(&sample_new_goal("Doomed")).unwrap();
        store
            .log_contribution(id, 1_000.0, day(2025, 7, 1), None, None)
            .unwrap();

        assert!(store.delete_goal(id).unwrap());
        assert!(!store.delete_goal(id).unwrap());
        assert!(store.fetch_contributions(id).unwrap().is_empty());
    }

    #[test]
    fn series_groups_same_day_contributions() {
        let mut store = GoalStore::in_memory().unwrap();
        let id = store.insert_goal(&sample_new_goal("Chart me")).unwrap();
        store
            .log_contribution(id, 1_000.0, day(2025, 7, 1), None, None)
            .unwrap();
        store
            .log_contribution(id, 500.0, day(2025, 7, 1), None, None)
            .unwrap();
        store
            .log_contribution(id, 2_000.0, day(2025, 8, 1), None, None)
            .unwrap();

        let series = store.contribution_series(id).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0], (day(2025, 7, 1), 1_500.0));
        assert_eq!(series[1], (day(2025, 8, 1), 2_000.0));
    }

    #[test]
    fn basics_are_seeded_and_updatable() {
        let store = GoalStore::in_memory().unwrap();
        let basics = store.fetch_basics().unwrap();
        assert_eq!(basics.len(), 3);
        assert!(basics.iter().all(|b| !b.is_funded));

        let updated = store
            .update_basic(
                BasicCategory::EmergencyFund,
                Some(240_000.0),
                Some(250_000.0),
                Some("six months of expenses"),
            )
            .unwrap();
        assert!(updated.is_funded);
        assert_eq!(updated.target_amount, 240_000.0);
        assert_eq!(updated.notes.as_deref(), Some("six months of expenses"));

        // Partial update keeps the other amounts.
        let updated = store
            .update_basic(BasicCategory::EmergencyFund, None, Some(100_000.0), None)
            .unwrap();
        assert_eq!(updated.target_amount, 240_000.0);
        assert!(!updated.is_funded);
    }

    #[test]
    fn wipe_and_restore_preserve_identifiers() {
        let mut store = GoalStore::in_memory().unwrap();
        let id = store.insert_goal(&sample_new_goal("Original")).unwrap();
        store
            .log_contribution(id, 2_500.0, day(2025, 7, 15), None, None)
            .unwrap();

        let goals = store.fetch_goals().unwrap();
        let ledger = store.fetch_contributions(id).unwrap();

        store.wipe().unwrap();
        assert!(store.fetch_goals().unwrap().is_empty());

        for goal in &goals {
            store.restore_goal(goal).unwrap();
        }
        for entry in &ledger {
            store.restore_contribution(entry).unwrap();
        }

        let restored = store.fetch_goal(id).unwrap();
        assert_eq!(restored.contributions_total, 2_500.0);
        assert_eq!(store.ledger_total(id).unwrap(), 2_500.0);
    }
}
