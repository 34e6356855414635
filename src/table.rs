//! Date-indexed column table passed along the pipeline.
//!
//! One row per calendar day, one named column per series. Missing values are
//! `f64::NAN` and serialize as JSON `null`, so gaps stay gaps all the way to
//! the chart. Column insertion order is preserved, which keeps serialized
//! output byte-identical across reruns on the same input.

use crate::model::IndicatorError;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

#[derive(Debug, Clone, Serialize)]
struct Column {
    name: String,
    values: Vec<f64>,
}

impl Frame {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Appends a column; replaces an existing column of the same name.
    pub fn push(&mut self, name: &str, values: Vec<f64>) -> Result<(), IndicatorError> {
        if values.len() != self.dates.len() {
            return Err(IndicatorError::LengthMismatch {
                name: name.to_string(),
                got: values.len(),
                expected: self.dates.len(),
            });
        }
        if let Some(col) = self.columns.iter_mut().find(|c| c.name == name) {
            col.values = values;
        } else {
            self.columns.push(Column {
                name: name.to_string(),
                values,
            });
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn require(&self, name: &str) -> Result<&[f64], IndicatorError> {
        self.column(name)
            .ok_or_else(|| IndicatorError::MissingColumn(name.to_string()))
    }

    /// Returns the rows on or after `cutoff`, all columns carried over.
    pub fn filter_from(&self, cutoff: NaiveDate) -> Frame {
        let keep: Vec<usize> = self
            .dates
            .iter()
            .enumerate()
            .filter(|(_, d)| **d >= cutoff)
            .map(|(i, _)| i)
            .collect();

        Frame {
            dates: keep.iter().map(|&i| self.dates[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: keep.iter().map(|&i| c.values[i]).collect(),
                })
                .collect(),
        }
    }
}
