// Extractors for the two embedded-data formats the source pages use.

mod scan;

pub mod plotly;
pub mod ribbon;

pub use plotly::PlotlyExtractor;
pub use ribbon::RibbonExtractor;

pub(crate) use scan::balanced_array;
