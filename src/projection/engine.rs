//! Closed-form funding formulas for savings goals
//!
//! Supports:
//! - Required lumpsum today (present value under annual compounding)
//! - Required monthly contribution (ordinary-annuity future value solved for
//!   the payment)
//! - Blended upfront + monthly allocation
//! - Future-value projection of a goal with shortfall analysis
//!
//! Every operation is a pure function of its inputs: no stored state, no I/O,
//! and no ordering dependency between calls. Amounts are currency in `f64`,
//! rounded to 2 decimals at the API boundary; intermediate math keeps full
//! precision.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Contribution periods per year.
const MONTHS_PER_YEAR: u32 = 12;

/// Round a currency amount to 2 decimal places.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn check_amount(field: &'static str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(Error::NegativeAmount { field, value });
    }
    Ok(())
}

/// Rates at or below -100%/yr make the compounding base `1 + r` non-positive,
/// so the discounting division (and the annuity denominators) degenerate.
fn check_rate(annual_rate_pct: f64) -> Result<()> {
    if annual_rate_pct <= -100.0 {
        return Err(Error::DegenerateRate {
            rate_pct: annual_rate_pct,
        });
    }
    Ok(())
}

/// Lumpsum needed today to grow into `target_amount` over `horizon_years`.
///
/// Discounts at `annual_rate_pct` compounded annually:
/// `target / (1 + r/100)^years`. A zero horizon returns the target unchanged.
/// Negative rates (expected shrinkage) are valid down to, but not including,
/// -100%.
pub fn required_lumpsum(
    target_amount: f64,
    horizon_years: u32,
    annual_rate_pct: f64,
) -> Result<f64> {
    check_amount("target amount", target_amount)?;
    check_rate(annual_rate_pct)?;

    let growth = 1.0 + annual_rate_pct / 100.0;
    Ok(round_currency(
        target_amount / growth.powi(horizon_years as i32),
    ))
}

/// Monthly contribution that accumulates to `target_amount` over the horizon.
///
/// Solves the ordinary-annuity future-value formula for the payment at the
/// monthly rate `annual_rate_pct / 100 / 12` over `horizon_years * 12`
/// periods. At exactly zero rate the annuity formula is undefined and simple
/// division over the months is the exact answer, not an approximation.
pub fn required_monthly_contribution(
    target_amount: f64,
    horizon_years: u32,
    annual_rate_pct: f64,
) -> Result<f64> {
    check_amount("target amount", target_amount)?;
    check_rate(annual_rate_pct)?;
    if horizon_years == 0 {
        return Err(Error::ZeroHorizon);
    }

    let months = horizon_years * MONTHS_PER_YEAR;
    let monthly_rate = annual_rate_pct / 100.0 / MONTHS_PER_YEAR as f64;

    if monthly_rate == 0.0 {
        return Ok(round_currency(target_amount / months as f64));
    }

    let accumulation = (1.0 + monthly_rate).powi(months as i32) - 1.0;
    Ok(round_currency(target_amount * monthly_rate / accumulation))
}

/// How the upfront portion of a blended goal is specified.
///
/// The two forms are mutually exclusive by construction; callers that collect
/// both as optional inputs must reject the neither/both cases before reaching
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LumpsumSplit {
    /// Percentage of the target invested upfront.
    Percent(f64),
    /// Fixed currency amount invested upfront, capped at the target.
    Amount(f64),
}

/// A blended funding plan: lumpsum to invest today plus a monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub lumpsum: f64,
    pub monthly: f64,
}

/// Split a goal between an upfront lumpsum and a monthly contribution stream.
///
/// The upfront portion is resolved from `split`, capped so the remaining
/// target never goes negative, and each component is priced independently:
/// the lumpsum via [`required_lumpsum`], the remainder via
/// [`required_monthly_contribution`]. Both results are rounded separately.
pub fn blended_allocation(
    target_amount: f64,
    horizon_years: u32,
    annual_rate_pct: f64,
    split: LumpsumSplit,
) -> Result<Allocation> {
    check_amount("target amount", target_amount)?;
    check_rate(annual_rate_pct)?;
    if horizon_years == 0 {
        return Err(Error::ZeroHorizon);
    }

    let upfront = match split {
        LumpsumSplit::Percent(pct) => {
            check_amount("lumpsum percentage", pct)?;
            target_amount * pct / 100.0
        }
        LumpsumSplit::Amount(amount) => {
            check_amount("lumpsum amount", amount)?;
            amount
        }
    };

    let upfront = upfront.min(target_amount);
    let remaining = target_amount - upfront;

    Ok(Allocation {
        lumpsum: required_lumpsum(upfront, horizon_years, annual_rate_pct)?,
        monthly: required_monthly_contribution(remaining, horizon_years, annual_rate_pct)?,
    })
}

/// Gap between a goal's projected value and its target, with the fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    /// How far the projection falls below the target.
    pub amount: f64,
    /// Additional monthly contribution that closes the gap by the horizon.
    pub required_increase: f64,
}

/// Projected standing of a goal if contributions continue as planned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalOutlook {
    /// Future value of what has already been contributed.
    pub fv_existing: f64,
    /// Future value of the ongoing monthly contribution stream.
    pub fv_contributions: f64,
    /// Combined expected future value.
    pub future_value: f64,
    /// Target the projection is measured against.
    pub target_amount: f64,
    /// Present when the projection falls short; `None` means on track.
    pub shortfall: Option<Shortfall>,
}

impl GoalOutlook {
    pub fn on_track(&self) -> bool {
        self.shortfall.is_none()
    }

    /// Projected excess over the target (zero when short).
    pub fn surplus(&self) -> f64 {
        round_currency((self.future_value - self.target_amount).max(0.0))
    }
}

/// Project a goal forward and report any shortfall against the target.
///
/// The existing balance compounds annually; the contribution stream follows
/// the annuity-due future-value formula (contributions at the start of each
/// month). A positive shortfall is closed by solving the same annuity-due
/// formula in reverse for the extra monthly payment.
pub fn project_future_value(
    target_amount: f64,
    contributions_to_date: f64,
    monthly_contribution: f64,
    horizon_years: u32,
    annual_rate_pct: f64,
) -> Result<GoalOutlook> {
    check_amount("target amount", target_amount)?;
    check_amount("contributions to date", contributions_to_date)?;
    check_amount("monthly contribution", monthly_contribution)?;
    check_rate(annual_rate_pct)?;
    if horizon_years == 0 {
        return Err(Error::ZeroHorizon);
    }

    let rate = annual_rate_pct / 100.0;
    let months = horizon_years * MONTHS_PER_YEAR;
    let monthly_rate = rate / MONTHS_PER_YEAR as f64;

    let fv_existing = contributions_to_date * (1.0 + rate).powi(horizon_years as i32);
    let fv_contributions = if monthly_rate == 0.0 {
        monthly_contribution * months as f64
    } else {
        let accumulation = ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate;
        monthly_contribution * accumulation * (1.0 + monthly_rate)
    };

    let future_value = fv_existing + fv_contributions;
    let gap = target_amount - future_value;

    let shortfall = if gap > 0.0 {
        let required_increase = if monthly_rate == 0.0 {
            gap / months as f64
        } else {
            let accumulation = (1.0 + monthly_rate).powi(months as i32) - 1.0;
            gap * monthly_rate / (accumulation * (1.0 + monthly_rate))
        };
        Some(Shortfall {
            amount: round_currency(gap),
            required_increase: round_currency(required_increase),
        })
    } else {
        None
    };

    Ok(GoalOutlook {
        fv_existing: round_currency(fv_existing),
        fv_contributions: round_currency(fv_contributions),
        future_value: round_currency(future_value),
        target_amount,
        shortfall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lumpsum_reference_value() {
        // 1,000,000 over 10 years at 12%/yr: 1,000,000 / 1.12^10
        let lumpsum = required_lumpsum(1_000_000.0, 10, 12.0).unwrap();
        assert_relative_eq!(lumpsum, 321_973.24, epsilon = 0.01);
    }

    #[test]
    fn lumpsum_round_trips_to_target() {
        for &(target, years, rate) in &[
            (1_000_000.0, 10_u32, 12.0),
            (250_000.0, 5, 8.0),
            (50_000.0, 1, 0.0),
            (750_000.0, 20, 15.5),
        ] {
            let lumpsum = required_lumpsum(target, years, rate).unwrap();
            let grown = lumpsum * (1.0 + rate / 100.0).powi(years as i32);
            // Rounding the lumpsum to cents perturbs the round trip slightly.
            let tolerance = 0.01 * (1.0 + rate / 100.0).powi(years as i32);
            assert_relative_eq!(grown, target, epsilon = tolerance);
        }
    }

    #[test]
    fn lumpsum_zero_horizon_returns_target() {
        assert_eq!(required_lumpsum(1234.56, 0, 12.0).unwrap(), 1234.56);
    }

    #[test]
    fn lumpsum_negative_rate_discounts_upward() {
        // Expected shrinkage of 50%/yr doubles the required amount.
        assert_eq!(required_lumpsum(1000.0, 1, -50.0).unwrap(), 2000.0);
    }

    #[test]
    fn lumpsum_rejects_degenerate_rate() {
        assert!(matches!(
            required_lumpsum(1000.0, 5, -100.0),
            Err(Error::DegenerateRate { .. })
        ));
    }

    #[test]
    fn lumpsum_rejects_negative_target() {
        assert!(matches!(
            required_lumpsum(-1.0, 5, 10.0),
            Err(Error::NegativeAmount { .. })
        ));
    }

    #[test]
    fn sip_reference_value() {
        // Standard SIP annuity at 1%/month over 120 months.
        let sip = required_monthly_contribution(1_000_000.0, 10, 12.0).unwrap();
        assert_relative_eq!(sip, 4_347.09, epsilon = 0.01);
    }

    #[test]
    fn sip_zero_rate_is_simple_division() {
        let sip = required_monthly_contribution(120_000.0, 5, 0.0).unwrap();
        assert_eq!(sip, 120_000.0 / 60.0);
    }

    #[test]
    fn sip_rejects_zero_horizon() {
        assert!(matches!(
            required_monthly_contribution(1000.0, 0, 12.0),
            Err(Error::ZeroHorizon)
        ));
    }

    #[test]
    fn blended_full_percent_is_pure_lumpsum() {
        let alloc = blended_allocation(500_000.0, 7, 10.0, LumpsumSplit::Percent(100.0)).unwrap();
        assert_eq!(alloc.monthly, 0.0);
        assert_eq!(alloc.lumpsum, required_lumpsum(500_000.0, 7, 10.0).unwrap());
    }

    #[test]
    fn blended_zero_percent_is_pure_sip() {
        let alloc = blended_allocation(500_000.0, 7, 10.0, LumpsumSplit::Percent(0.0)).unwrap();
        assert_eq!(alloc.lumpsum, 0.0);
        assert_eq!(
            alloc.monthly,
            required_monthly_contribution(500_000.0, 7, 10.0).unwrap()
        );
    }

    #[test]
    fn blended_fixed_amount_capped_at_target() {
        let alloc =
            blended_allocation(100_000.0, 5, 10.0, LumpsumSplit::Amount(999_999.0)).unwrap();
        assert_eq!(alloc.lumpsum, required_lumpsum(100_000.0, 5, 10.0).unwrap());
        assert_eq!(alloc.monthly, 0.0);
    }

    #[test]
    fn blended_half_split_prices_both_components() {
        let alloc = blended_allocation(200_000.0, 5, 12.0, LumpsumSplit::Percent(50.0)).unwrap();
        assert_eq!(alloc.lumpsum, required_lumpsum(100_000.0, 5, 12.0).unwrap());
        assert_eq!(
            alloc.monthly,
            required_monthly_contribution(100_000.0, 5, 12.0).unwrap()
        );
    }

    #[test]
    fn blended_rejects_negative_percent() {
        assert!(matches!(
            blended_allocation(1000.0, 5, 10.0, LumpsumSplit::Percent(-10.0)),
            Err(Error::NegativeAmount { .. })
        ));
    }

    #[test]
    fn outlook_grows_beyond_uninvested_sum() {
        let outlook = project_future_value(500_000.0, 50_000.0, 2_000.0, 5, 12.0).unwrap();
        // Growth must beat stuffing cash in a drawer.
        assert!(outlook.future_value > 50_000.0 + 2_000.0 * 60.0);
        assert!(outlook.fv_existing > 50_000.0);
        assert!(outlook.fv_contributions > 2_000.0 * 60.0);
    }

    #[test]
    fn outlook_shortfall_is_closed_by_required_increase() {
        let outlook = project_future_value(500_000.0, 50_000.0, 2_000.0, 5, 12.0).unwrap();
        let short = outlook.shortfall.expect("goal should be behind target");
        assert_relative_eq!(
            short.amount,
            500_000.0 - outlook.future_value,
            epsilon = 0.01
        );

        // Raising the monthly contribution by the suggested increase should
        // bring the projection to the target (within rounding).
        let fixed = project_future_value(
            500_000.0,
            50_000.0,
            2_000.0 + short.required_increase,
            5,
            12.0,
        )
        .unwrap();
        assert_relative_eq!(fixed.future_value, 500_000.0, epsilon = 1.0);
        match fixed.shortfall {
            None => {}
            Some(s) => assert!(s.amount < 1.0),
        }
    }

    #[test]
    fn outlook_on_track_reports_no_shortfall() {
        let outlook = project_future_value(100_000.0, 90_000.0, 1_000.0, 5, 12.0).unwrap();
        assert!(outlook.on_track());
        assert!(outlook.surplus() > 0.0);
    }

    #[test]
    fn outlook_zero_rate_is_simple_accumulation() {
        let outlook = project_future_value(200_000.0, 10_000.0, 1_000.0, 5, 0.0).unwrap();
        assert_eq!(outlook.fv_existing, 10_000.0);
        assert_eq!(outlook.fv_contributions, 60_000.0);
        let short = outlook.shortfall.unwrap();
        assert_eq!(short.amount, 130_000.0);
        assert_relative_eq!(short.required_increase, 130_000.0 / 60.0, epsilon = 0.01);
    }

    #[test]
    fn outlook_rejects_zero_horizon() {
        assert!(matches!(
            project_future_value(1000.0, 0.0, 10.0, 0, 12.0),
            Err(Error::ZeroHorizon)
        ));
    }

    #[test]
    fn rounding_is_to_cents() {
        assert_eq!(round_currency(1.234), 1.23);
        assert_eq!(round_currency(1.236), 1.24);
        assert_eq!(round_currency(4347.0935), 4347.09);
    }
}
