//! Chart specifications: pure presentation, no algorithmic content.
//!
//! A [`ChartSpec`] is a serializable description of one dashboard panel —
//! trace names, values, axis scales, an optional horizontal reference line.
//! Missing values serialize as `null` so they render as gaps. One builder per
//! page of the dashboard; the trace sets and axis choices mirror the panels
//! the original published.

use crate::model::IndicatorError;
use crate::table::Frame;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(Debug, Serialize)]
pub struct TraceSpec {
    pub name: String,
    pub secondary_y: bool,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub height: u32,
    pub y_scale: AxisScale,
    pub secondary_y_scale: AxisScale,
    /// Reference line on the secondary axis, when present.
    pub h_line: Option<f64>,
    pub traces: Vec<TraceSpec>,
}

impl ChartSpec {
    fn new(title: &str, y_scale: AxisScale) -> Self {
        Self {
            title: title.to_string(),
            height: 600,
            y_scale,
            secondary_y_scale: AxisScale::Linear,
            h_line: None,
            traces: Vec::new(),
        }
    }

    fn h_line(mut self, value: f64) -> Self {
        self.h_line = Some(value);
        self
    }

    fn trace(
        mut self,
        table: &Frame,
        column: &str,
        display_name: &str,
        secondary_y: bool,
    ) -> Result<Self, IndicatorError> {
        let values = table.require(column)?;
        self.traces.push(TraceSpec {
            name: display_name.to_string(),
            secondary_y,
            x: table.dates().to_vec(),
            y: values
                .iter()
                .map(|v| if v.is_finite() { Some(*v) } else { None })
                .collect(),
        });
        Ok(self)
    }
}

/// Charts trim their display to 2012 onwards, like the original panels; the
/// statistics behind the columns are unaffected by this.
fn display_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2012, 1, 1).expect("valid date")
}

pub fn all_cycle_bands(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    ChartSpec::new("All Cycle Band Metrics", AxisScale::Log)
        .trace(table, "Price", "BTC Price (log scale)", false)?
        .trace(table, "Terminal Price", "Terminal Price", false)?
        .trace(table, "Terminal Price AVIV", "Terminal Price AVIV", false)?
        .trace(table, "Balanced Price", "Balanced Price", false)?
        .trace(table, "Realized Price", "Realized Price", false)?
        .trace(table, "Delta Top", "Delta Top", false)?
        .trace(table, "Vaulted Price", "Vaulted Price", false)?
        .trace(table, "Vaulted Top", "Vaulted Top", false)?
        .trace(table, "Cointime Price", "Cointime Price", false)
}

pub fn avg_cycle_bands(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    ChartSpec::new("Cycle Bands Avg Peaks & Troughs", AxisScale::Log)
        .trace(table, "Price", "BTC Price (log scale)", false)?
        .trace(table, "Avg Top", "Avg Top", false)?
        .trace(table, "Avg Bot", "Avg Bot", false)
}

pub fn normalized_cycle(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    ChartSpec::new("Normalized Cycle Bands", AxisScale::Log)
        .trace(table, "Price", "BTC Price (log scale)", false)?
        .trace(table, "Normalized Price", "Normalized Cycle Range", true)?
        .trace(table, "Overbought", "Transformed Top", true)?
        .trace(table, "Oversold", "Transformed Bottom", true)
}

pub fn transformed_cycle(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    ChartSpec::new("Normalized Transformed Cycle Bands", AxisScale::Log)
        .trace(table, "Price", "BTC Price (log scale)", false)?
        .trace(table, "Adjusted Normalized Price", "Transformed Cycle Range", true)
}

pub fn norm_mvrv(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    let t = table.filter_from(display_cutoff());
    ChartSpec::new("Range Adjusted MVRV", AxisScale::Log)
        .trace(&t, "Price", "BTC Price (log scale)", false)?
        .trace(&t, "Adjusted_MVRV", "Range Adjusted MVRV", true)
}

pub fn aviv_ratio(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    let t = table.filter_from(display_cutoff());
    ChartSpec::new("True Market Mean & AVIV", AxisScale::Log)
        .trace(&t, "Price", "BTC Price", false)?
        .trace(&t, "True Market Mean", "True Market Mean", false)?
        .trace(&t, "AVIV Ratio", "AVIV Ratio", true)?
        .trace(&t, "Mean + 2σ", "Mean + 2σ", true)?
        .trace(&t, "Mean + 3σ", "Mean + 3σ", true)?
        .trace(&t, "Mean - 1σ", "Mean - 1σ", true)
        .map(|c| c.h_line(0.0))
}

pub fn sth_mvrv_indicator(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    ChartSpec::new("STH Cost Basis & MVRV", AxisScale::Log)
        .trace(table, "Price", "BTC Price", false)?
        .trace(table, "STH Cost Basis", "STH Cost Basis", false)?
        .trace(table, "STH-MVRV Combined", "STH MVRV", true)?
        .trace(table, "Mean + 2σ", "Mean + 2σ", true)?
        .trace(table, "Mean + 2.5σ", "Mean + 2.5σ", true)?
        .trace(table, "Mean - 1.25σ", "Mean - 1.25σ", true)
        .map(|c| c.h_line(1.0))
}

pub fn sth_mvrv_ribbon(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    let t = table.filter_from(display_cutoff());
    ChartSpec::new("BTC Price and STH-MVRV", AxisScale::Log)
        .trace(&t, "Price", "BTC Price (log scale)", false)?
        .trace(&t, "STH Cost Basis", "STH Cost Basis", false)?
        .trace(&t, "STH MVRV", "STH MVRV", true)
        .map(|c| c.h_line(1.0))
}

pub fn sth_nupl(table: &Frame) -> Result<ChartSpec, IndicatorError> {
    let t = table.filter_from(display_cutoff());
    ChartSpec::new("BTC Price and STH-NUPL Over Time", AxisScale::Log)
        .trace(&t, "Price", "BTC Price", false)?
        .trace(&t, "Young-NUPL", "Young-NUPL", true)
        .map(|c| c.h_line(0.0))
}

/// Generic single-column panel for spreadsheet-backed tables.
pub fn tabular(title: &str, table: &Frame, column: &str) -> Result<ChartSpec, IndicatorError> {
    ChartSpec::new(title, AxisScale::Linear).trace(table, column, column, false)
}
