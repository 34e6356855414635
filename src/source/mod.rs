pub mod fetcher;
pub mod tabular;
pub mod traits;

pub use fetcher::HttpFetcher;
pub use tabular::CsvTabular;
pub use traits::{PageSource, TabularSource};
