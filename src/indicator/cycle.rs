//! Cycle bands: top/bottom price multiples derived from six scraped cost-basis
//! series, their averages, and the normalized/transformed cycle range.

use crate::model::IndicatorError;
use crate::table::Frame;
use chrono::NaiveDate;

pub const REQUIRED: &[&str] = &[
    "Price",
    "Cointime Price",
    "Delta Price",
    "Vaulted Price",
    "Realized Price",
    "Balanced Price",
    "True Mean Price",
];

/// Rows before this date are dropped before the envelope row index starts.
pub fn cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2012, 1, 1).expect("valid date")
}

pub fn derive(table: &Frame) -> Result<Frame, IndicatorError> {
    let mut t = table.clone();

    let delta_top: Vec<f64> = t.require("Delta Price")?.iter().map(|v| v * 7.0).collect();
    t.push("Delta Top", delta_top)?;

    let vaulted_top: Vec<f64> = t
        .require("Vaulted Price")?
        .iter()
        .map(|v| v * 1.75)
        .collect();
    t.push("Vaulted Top", vaulted_top)?;

    let realized = t.require("Realized Price")?;
    let balanced = t.require("Balanced Price")?;
    let transferred: Vec<f64> = realized.iter().zip(balanced).map(|(r, b)| r - b).collect();
    t.push("Transferred Price", transferred)?;

    let terminal: Vec<f64> = t
        .require("Transferred Price")?
        .iter()
        .map(|v| v * 21.0)
        .collect();
    t.push("Terminal Price", terminal)?;

    let true_mean = t.require("True Mean Price")?;
    let balanced = t.require("Balanced Price")?;
    let transferred_aviv: Vec<f64> = true_mean.iter().zip(balanced).map(|(m, b)| m - b).collect();
    t.push("Transferred Price AVIV", transferred_aviv)?;

    let terminal_aviv: Vec<f64> = t
        .require("Transferred Price AVIV")?
        .iter()
        .map(|v| v * 6.0)
        .collect();
    t.push("Terminal Price AVIV", terminal_aviv)?;

    // Averages and envelopes are defined on the post-cutoff table; the row
    // index below restarts at zero there.
    let mut t = t.filter_from(cutoff());

    let avg_top = row_mean3(
        t.require("Vaulted Top")?,
        t.require("Terminal Price AVIV")?,
        t.require("Delta Top")?,
    );
    t.push("Avg Top", avg_top)?;

    let avg_bot = row_mean3(
        t.require("Delta Price")?,
        t.require("Cointime Price")?,
        t.require("Realized Price")?,
    );
    t.push("Avg Bot", avg_bot)?;

    let price = t.require("Price")?;
    let top = t.require("Avg Top")?;
    let bot = t.require("Avg Bot")?;
    let normalized: Vec<f64> = price
        .iter()
        .zip(top.iter().zip(bot))
        .map(|(p, (t, b))| {
            // Degenerate band (top == bot) has no defined position in it.
            if t == b {
                f64::NAN
            } else {
                (p - b) / (t - b)
            }
        })
        .collect();
    t.push("Normalized Price", normalized)?;

    let n = t.len();
    let overbought: Vec<f64> = (0..n)
        .map(|i| -(1.1 * i as f64 + 4000.0).ln() + 9.8)
        .collect();
    t.push("Overbought", overbought)?;
    let oversold: Vec<f64> = (0..n)
        .map(|i| (0.25 * i as f64 + 11000.0).ln() - 9.4)
        .collect();
    t.push("Oversold", oversold)?;

    let norm = t.require("Normalized Price")?;
    let ob = t.require("Overbought")?;
    let os = t.require("Oversold")?;
    let adjusted: Vec<f64> = norm
        .iter()
        .zip(ob.iter().zip(os))
        .map(|(v, (hi, lo))| (v - lo) / (hi - lo))
        .collect();
    t.push("Adjusted Normalized Price", adjusted)?;

    Ok(t)
}

/// Row-wise mean of three columns; missing if any of the three is missing.
fn row_mean3(a: &[f64], b: &[f64], c: &[f64]) -> Vec<f64> {
    a.iter()
        .zip(b.iter().zip(c))
        .map(|(x, (y, z))| (x + y + z) / 3.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_table(rows: usize) -> Frame {
        let start = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..rows)
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        let mut t = Frame::new(dates);
        t.push("Price", vec![100.0; rows]).unwrap();
        t.push("Cointime Price", vec![40.0; rows]).unwrap();
        t.push("Delta Price", vec![10.0; rows]).unwrap();
        t.push("Vaulted Price", vec![60.0; rows]).unwrap();
        t.push("Realized Price", vec![50.0; rows]).unwrap();
        t.push("Balanced Price", vec![30.0; rows]).unwrap();
        t.push("True Mean Price", vec![45.0; rows]).unwrap();
        t
    }

    #[test]
    fn band_multiples() {
        let t = derive(&base_table(3)).unwrap();
        assert_eq!(t.column("Delta Top").unwrap()[0], 70.0);
        assert_eq!(t.column("Vaulted Top").unwrap()[0], 105.0);
        assert_eq!(t.column("Transferred Price").unwrap()[0], 20.0);
        assert_eq!(t.column("Terminal Price").unwrap()[0], 420.0);
        assert_eq!(t.column("Transferred Price AVIV").unwrap()[0], 15.0);
        assert_eq!(t.column("Terminal Price AVIV").unwrap()[0], 90.0);
    }

    #[test]
    fn averages_and_normalized_price() {
        let t = derive(&base_table(3)).unwrap();
        // Avg Top = (105 + 90 + 70) / 3, Avg Bot = (10 + 40 + 50) / 3.
        let top = t.column("Avg Top").unwrap()[0];
        let bot = t.column("Avg Bot").unwrap()[0];
        assert!((top - 265.0 / 3.0).abs() < 1e-12);
        assert!((bot - 100.0 / 3.0).abs() < 1e-12);
        let norm = t.column("Normalized Price").unwrap()[0];
        assert!((norm - (100.0 - bot) / (top - bot)).abs() < 1e-12);
    }

    #[test]
    fn missing_input_poisons_the_averages() {
        let mut t = base_table(3);
        let mut delta = vec![10.0; 3];
        delta[1] = f64::NAN;
        t.push("Delta Price", delta).unwrap();
        let out = derive(&t).unwrap();
        assert!(out.column("Avg Top").unwrap()[1].is_nan());
        assert!(out.column("Avg Bot").unwrap()[1].is_nan());
        assert!(!out.column("Avg Top").unwrap()[0].is_nan());
    }

    #[test]
    fn envelopes_follow_the_row_index() {
        let t = derive(&base_table(5)).unwrap();
        let ob = t.column("Overbought").unwrap();
        let os = t.column("Oversold").unwrap();
        assert!((ob[0] - (-(4000.0f64).ln() + 9.8)).abs() < 1e-12);
        assert!((ob[3] - (-(1.1 * 3.0 + 4000.0f64).ln() + 9.8)).abs() < 1e-12);
        assert!((os[0] - ((11000.0f64).ln() - 9.4)).abs() < 1e-12);
        assert!((os[4] - ((0.25 * 4.0 + 11000.0f64).ln() - 9.4)).abs() < 1e-12);
    }

    #[test]
    fn degenerate_band_is_missing_not_infinite() {
        let mut t = base_table(2);
        // Collapse the band: every average input equal.
        for name in [
            "Cointime Price",
            "Delta Price",
            "Vaulted Price",
            "Realized Price",
            "Balanced Price",
            "True Mean Price",
        ] {
            t.push(name, vec![0.0; 2]).unwrap();
        }
        let out = derive(&t).unwrap();
        assert!(out.column("Normalized Price").unwrap()[0].is_nan());
    }

    #[test]
    fn pre_cutoff_rows_are_dropped() {
        let start = NaiveDate::from_ymd_opt(2011, 12, 30).unwrap();
        let dates: Vec<NaiveDate> = (0..4).map(|i| start + chrono::Days::new(i)).collect();
        let mut t = Frame::new(dates);
        for name in REQUIRED {
            t.push(name, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        }
        let out = derive(&t).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.dates()[0], cutoff());
    }

    #[test]
    fn reruns_are_bit_identical() {
        let t = base_table(64);
        let a = serde_json::to_string(&derive(&t).unwrap()).unwrap();
        let b = serde_json::to_string(&derive(&t).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
