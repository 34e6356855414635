//! Legacy range-adjusted MVRV.
//!
//! Works in log2 space with oversold/overbought curves anchored on the row
//! index since 2010-09-02 (1-based). Missing MVRV values are replaced with 0
//! before the band math — a documented quirk of this page only, not a general
//! fill rule.

use crate::model::IndicatorError;
use crate::table::Frame;
use chrono::NaiveDate;

pub const REQUIRED: &[&str] = &["Price", "MVRV Ratio"];

pub fn cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 9, 2).expect("valid date")
}

pub fn derive(table: &Frame) -> Result<Frame, IndicatorError> {
    let mut t = table.filter_from(cutoff());

    let mvrv: Vec<f64> = t
        .require("MVRV Ratio")?
        .iter()
        .map(|r| if r.is_nan() { 0.0 } else { r.log2() })
        .collect();
    t.push("MVRV", mvrv)?;

    let n = t.len();
    let oversold: Vec<f64> = (1..=n).map(|i| (i as f64 + 2500.0).ln() - 9.35).collect();
    t.push("Oversold", oversold)?;
    let overbought: Vec<f64> = (1..=n)
        .map(|i| -(i as f64 + 2000.0).ln() + 10.75)
        .collect();
    t.push("Overbought", overbought)?;

    let mvrv = t.require("MVRV")?;
    let os = t.require("Oversold")?;
    let ob = t.require("Overbought")?;
    let adjusted: Vec<f64> = mvrv
        .iter()
        .zip(os.iter().zip(ob))
        .map(|(v, (lo, hi))| ((v - lo) / (hi - lo)).powf(1.5))
        .collect();
    t.push("Adjusted_MVRV", adjusted)?;

    Ok(t)
}
