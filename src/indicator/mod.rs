// Indicator engine: pure transforms over an assembled table, one file per
// dashboard page family. Every band here is an expanding statistic — it sees
// rows [0..=i] only, never a fixed or centered window.

pub mod aviv;
pub mod cycle;
pub mod expanding;
pub mod mvrv;
pub mod ribbon;
pub mod sth;
