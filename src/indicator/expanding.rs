//! Cumulative mean and sample standard deviation.
//!
//! The statistic at row `i` covers rows `[0..=i]` only, so a value never
//! depends on data that postdates it. Missing values are skipped, not
//! counted: while the running count is zero the mean is missing, and the
//! standard deviation (sample, n−1 denominator) is missing until a second
//! observation arrives. A single Welford pass keeps the update numerically
//! stable over long series.

/// Expanding mean and standard deviation in one pass.
pub fn expanding_stats(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut means = Vec::with_capacity(values.len());
    let mut stds = Vec::with_capacity(values.len());
    let mut count = 0u64;
    let mut mean = 0.0f64;
    let mut m2 = 0.0f64;

    for &v in values {
        if !v.is_nan() {
            count += 1;
            let delta = v - mean;
            mean += delta / count as f64;
            m2 += delta * (v - mean);
        }
        means.push(if count > 0 { mean } else { f64::NAN });
        stds.push(if count > 1 {
            (m2 / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        });
    }
    (means, stds)
}
