//! SVG progress chart for a goal
//!
//! Draws the cumulative contribution line against a dashed expected-pace line
//! running from the start date to the target at the horizon. Axes are plain
//! lines; no labels, the chart is a shape-of-progress view.

use std::path::Path as FsPath;

use chrono::{Datelike, Days, NaiveDate};
use log::info;
use svg::node::element::{path::Data, Line, Path};
use svg::Document;

use crate::error::{Error, Result};
use crate::goal::Goal;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 700.0;
const MARGIN: f64 = 40.0;
const STROKE_WIDTH: f64 = 2.0;

/// Date the goal is due: start date plus the horizon.
fn expected_end(goal: &Goal) -> NaiveDate {
    let target_year = goal.start_date.year() + goal.horizon_years as i32;
    goal.start_date
        .with_year(target_year)
        // Feb 29 start dates land on a non-leap year; step back a day.
        .unwrap_or_else(|| {
            goal.start_date
                .checked_sub_days(Days::new(1))
                .unwrap_or(goal.start_date)
                .with_year(target_year)
                .unwrap_or(goal.start_date)
        })
}

/// Render the chart to `out` from per-day contribution totals.
pub fn render_progress_chart(
    goal: &Goal,
    series: &[(NaiveDate, f64)],
    out: &FsPath,
) -> Result<()> {
    if series.is_empty() {
        return Err(Error::NoContributions(goal.id));
    }

    let mut cumulative = Vec::with_capacity(series.len());
    let mut running = 0.0;
    for (date, amount) in series {
        running += amount;
        cumulative.push((*date, running));
    }

    let start = goal.start_date.min(cumulative[0].0);
    let due = expected_end(goal);
    let end = due.max(cumulative[cumulative.len() - 1].0);

    let x_span = (end - start).num_days().max(1) as f64;
    let y_max = goal.target_amount.max(running).max(1.0);

    let resize_x = |date: NaiveDate| (date - start).num_days() as f64 / x_span * WIDTH;
    let resize_y = |value: f64| HEIGHT - value / y_max * HEIGHT;

    // Actual progress: step from zero at the start through each cumulative point.
    let mut actual = Data::new().move_to((resize_x(start), resize_y(0.0)));
    for (date, total) in &cumulative {
        actual = actual.line_to((resize_x(*date), resize_y(*total)));
    }
    let actual_path = Path::new()
        .set("fill", "none")
        .set("stroke", "steelblue")
        .set("stroke-width", STROKE_WIDTH)
        .set("d", actual);

    // Expected pace: straight dashed line from zero to the target at the due date.
    let expected = Line::new()
        .set("x1", resize_x(start))
        .set("y1", resize_y(0.0))
        .set("x2", resize_x(due))
        .set("y2", resize_y(goal.target_amount))
        .set("stroke", "firebrick")
        .set("stroke-width", STROKE_WIDTH)
        .set("stroke-dasharray", "8,6");

    let x_axis = Line::new()
        .set("x1", 0.0)
        .set("x2", WIDTH)
        .set("y1", HEIGHT)
        .set("y2", HEIGHT)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);
    let y_axis = Line::new()
        .set("x1", 0.0)
        .set("x2", 0.0)
        .set("y1", 0.0)
        .set("y2", HEIGHT)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);

    let document = Document::new()
        .add(actual_path)
        .add(expected)
        .add(x_axis)
        .add(y_axis)
        .set(
            "viewBox",
            (-MARGIN, -MARGIN, WIDTH + 2.0 * MARGIN, HEIGHT + 2.0 * MARGIN),
        );

    svg::save(out, &document)?;
    info!("wrote progress chart for goal {} to {}", goal.id, out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::InvestmentMode;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_goal() -> Goal {
        Goal {
            id: 3,
            name: "Chart".to_string(),
            target_amount: 100_000.0,
            horizon_years: 2,
            cagr_pct: 10.0,
            mode: InvestmentMode::Sip,
            initial_investment: 0.0,
            monthly_contribution: 1_000.0,
            contributions_total: 3_000.0,
            start_date: day(2025, 1, 1),
            notes: None,
            created_at: day(2025, 1, 1).and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn due_date_adds_the_horizon() {
        assert_eq!(expected_end(&sample_goal()), day(2027, 1, 1));
    }

    #[test]
    fn empty_series_is_an_error() {
        let out = std::env::temp_dir().join("goal_tracker_chart_empty.svg");
        assert!(matches!(
            render_progress_chart(&sample_goal(), &[], &out),
            Err(Error::NoContributions(3))
        ));
    }

    #[test]
    fn chart_file_contains_both_lines() {
        let out = std::env::temp_dir().join("goal_tracker_chart_test.svg");
        let series = vec![
            (day(2025, 2, 1), 1_000.0),
            (day(2025, 3, 1), 1_000.0),
            (day(2025, 4, 1), 1_000.0),
        ];
        render_progress_chart(&sample_goal(), &series, &out).unwrap();

        let rendered = std::fs::read_to_string(&out).unwrap();
        assert!(rendered.contains("<path"));
        assert!(rendered.contains("stroke-dasharray"));
        std::fs::remove_file(&out).ok();
    }
}
