//! Turns extracted raw series into a date-indexed [`Frame`].
//!
//! The first required series is the index: its (deduplicated, ascending)
//! dates become the table's rows, and every other required series is joined
//! onto them by date. Within one series a duplicate date keeps the last
//! value seen (last write wins). Non-numeric y tokens become missing, never
//! zero.

use crate::model::{AssembleError, RawSeries};
use crate::table::Frame;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

pub fn assemble(series: &[RawSeries], required: &[&str]) -> Result<Frame, AssembleError> {
    let mut maps: HashMap<&str, HashMap<NaiveDate, f64>> = HashMap::new();
    for s in series {
        let map = maps.entry(s.name.as_str()).or_default();
        for (x, y) in s.x.iter().zip(s.y.iter()) {
            if let Some(date) = parse_date(x) {
                map.insert(date, coerce(y));
            }
            // Unparseable dates are dropped from the series.
        }
    }

    let index_name = required.first().copied().unwrap_or_default();
    let index = maps
        .get(index_name)
        .ok_or_else(|| AssembleError::MissingSeries(index_name.to_string()))?;

    let mut dates: Vec<NaiveDate> = index.keys().copied().collect();
    dates.sort_unstable();
    if dates.is_empty() {
        return Err(AssembleError::EmptyIndex(index_name.to_string()));
    }

    let mut table = Frame::new(dates);
    for &name in required {
        let map = maps
            .get(name)
            .ok_or_else(|| AssembleError::MissingSeries(name.to_string()))?;
        let values: Vec<f64> = table
            .dates()
            .iter()
            .map(|d| map.get(d).copied().unwrap_or(f64::NAN))
            .collect();
        table
            .push(name, values)
            .expect("column built from table's own index");
    }
    Ok(table)
}

/// Day-granularity date from a trace x-value; timestamps keep their date part.
fn parse_date(v: &Value) -> Option<NaiveDate> {
    let s = v.as_str()?;
    let day = if s.len() >= 10 && s.is_char_boundary(10) {
        &s[..10]
    } else {
        s
    };
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn coerce(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
