//! Investment-category suggestions by horizon and expected growth rate
//!
//! A deterministic decision table, not a numerical algorithm: horizon bands
//! with a rate threshold inside each band. Integer horizons leave no gap
//! between bands, so the match is exhaustive without a fallback arm.

/// Suggest an investment category for a goal.
///
/// Bands: under a year, 1-3 years, 4-5, 6-10, and beyond 10 years; the rate
/// threshold within each band separates the conservative pick from the
/// growth-oriented one.
pub fn recommend_category(horizon_years: u32, cagr_pct: f64) -> &'static str {
    match horizon_years {
        0 => "Fixed deposits or liquid funds - safe, low returns",
        1..=3 => {
            if cagr_pct < 8.0 {
                "Debt mutual funds - low risk, stable returns"
            } else {
                "Conservative hybrid funds - mix of debt and equity"
            }
        }
        4..=5 => {
            if cagr_pct < 12.0 {
                "Balanced mutual funds - moderate risk, good returns"
            } else {
                "Large-cap stocks or index funds - growth with lower volatility"
            }
        }
        6..=10 => {
            if cagr_pct < 15.0 {
                "Equity mutual funds (large and mid-cap) - long-term wealth creation"
            } else {
                "Index funds and high-growth stocks - higher volatility, better returns"
            }
        }
        _ => "Small-cap stocks and thematic funds - high risk, high reward for long-term investors",
    }
}
