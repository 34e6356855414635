//! STH-MVRV indicator: combine the mutually-exclusive profit/loss series by
//! flag, then band the combined series with expanding statistics.

use crate::indicator::expanding::expanding_stats;
use crate::model::IndicatorError;
use crate::table::Frame;
use chrono::NaiveDate;

pub const REQUIRED: &[&str] = &[
    "Price",
    "STH Cost Basis",
    "STH-MVRV (in Profit)",
    "STH-MVRV (in Loss)",
];

/// Statistics window starts here.
pub fn stats_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2012, 1, 1).expect("valid date")
}

/// Final table is trimmed to here after the bands are computed.
pub fn display_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date")
}

pub fn derive(table: &Frame) -> Result<Frame, IndicatorError> {
    let mut t = table.clone();

    let profit = t.require("STH-MVRV (in Profit)")?;
    let loss = t.require("STH-MVRV (in Loss)")?;
    // Exactly one of the two series is "parked" at 1 while the other carries
    // the live value. Rows where neither flag is 1 stay missing; upstream
    // behaves the same way, and the gap is carried over rather than patched.
    let combined: Vec<f64> = profit
        .iter()
        .zip(loss)
        .map(|(p, l)| {
            if *p == 1.0 {
                *l
            } else if *l == 1.0 {
                *p
            } else {
                f64::NAN
            }
        })
        .collect();
    t.push("STH-MVRV Combined", combined)?;

    // Two-stage filter: the bands see everything from 2012 on, the final
    // table only shows 2015 on.
    let mut t = t.filter_from(stats_cutoff());
    let (mean, std) = expanding_stats(t.require("STH-MVRV Combined")?);
    for (name, k) in [
        ("Mean + 2σ", 2.0),
        ("Mean + 2.5σ", 2.5),
        ("Mean - 1.25σ", -1.25),
    ] {
        let band: Vec<f64> = mean.iter().zip(&std).map(|(m, s)| m + k * s).collect();
        t.push(name, band)?;
    }

    Ok(t.filter_from(display_cutoff()))
}
