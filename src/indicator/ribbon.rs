//! STH-MVRV from the realized-price ribbon page: the 1m–3m cost basis stands
//! in for the short-term-holder cost basis, and the ratio of price to it is
//! the indicator.

use crate::model::IndicatorError;
use crate::table::Frame;

pub const REQUIRED: &[&str] = &["Price", "1m to 3m"];

pub fn derive(table: &Frame) -> Result<Frame, IndicatorError> {
    let mut t = table.clone();
    let cost_basis = t.require("1m to 3m")?.to_vec();
    t.push("STH Cost Basis", cost_basis)?;

    let price = t.require("Price")?;
    let basis = t.require("STH Cost Basis")?;
    let ratio: Vec<f64> = price.iter().zip(basis).map(|(p, b)| p / b).collect();
    t.push("STH MVRV", ratio)?;
    Ok(t)
}
