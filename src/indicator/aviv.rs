//! AVIV ratio sigma bands. The `Mean + 2σ` / `Mean - 1σ` bands arrive scraped;
//! only `Mean + 3σ` is re-derived here, from expanding statistics over the
//! full history (display trimming is the chart's concern).

use crate::indicator::expanding::expanding_stats;
use crate::model::IndicatorError;
use crate::table::Frame;

pub const REQUIRED: &[&str] = &[
    "Price",
    "True Market Mean",
    "AVIV Ratio",
    "Mean + 2σ",
    "Mean - 1σ",
];

pub fn derive(table: &Frame) -> Result<Frame, IndicatorError> {
    let mut t = table.clone();
    let (mean, std) = expanding_stats(t.require("AVIV Ratio")?);
    let upper: Vec<f64> = mean.iter().zip(&std).map(|(m, s)| m + 3.0 * s).collect();
    t.push("Mean + 3σ", upper)?;
    Ok(t)
}
