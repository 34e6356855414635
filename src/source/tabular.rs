//! CSV-snapshot implementation of [`TabularSource`], standing in for the
//! hosted spreadsheet the original dashboard read. Each named table is a
//! `<name>.csv` file with a date column first and numeric columns after it.

use crate::model::TabularError;
use crate::source::traits::TabularSource;
use crate::table::Frame;
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct CsvTabular {
    dir: PathBuf,
}

impl CsvTabular {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TabularSource for CsvTabular {
    fn read_table(&self, name: &str) -> Result<Frame, TabularError> {
        let path = self.dir.join(format!("{name}.csv"));
        let display = path.display().to_string();
        let csv_err = |source| TabularError::Csv {
            path: display.clone(),
            source,
        };

        let mut reader = csv::Reader::from_path(&path).map_err(csv_err)?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .skip(1)
            .map(str::to_string)
            .collect();
        if headers.is_empty() {
            return Err(TabularError::NoColumns(name.to_string()));
        }

        let mut dates = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let Some(date) = record
                .get(0)
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
            else {
                // Rows without a parseable date are dropped, as in assembly.
                continue;
            };
            dates.push(date);
            for (i, col) in columns.iter_mut().enumerate() {
                let v = record
                    .get(i + 1)
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(f64::NAN);
                col.push(v);
            }
        }

        let mut table = Frame::new(dates);
        for (header, values) in headers.iter().zip(columns) {
            table
                .push(header, values)
                .expect("columns grown in step with dates");
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(name: &str, body: &str) -> CsvTabular {
        let dir = std::env::temp_dir().join(format!("onchain-bands-test-{name}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.csv")), body).unwrap();
        CsvTabular::new(dir)
    }

    #[test]
    fn reads_dates_and_numeric_columns() {
        let source = write_fixture(
            "speculation",
            "date,Speculation Index\n2024-01-01,42.5\n2024-01-02,n/a\nbad-row,1\n",
        );
        let t = source.read_table("speculation").unwrap();
        assert_eq!(t.len(), 2);
        let col = t.column("Speculation Index").unwrap();
        assert_eq!(col[0], 42.5);
        assert!(col[1].is_nan());
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let source = CsvTabular::new(std::env::temp_dir().join("onchain-bands-nonexistent"));
        assert!(matches!(
            source.read_table("nope"),
            Err(TabularError::Csv { .. })
        ));
    }
}
