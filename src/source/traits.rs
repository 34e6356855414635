use crate::model::{FetchError, TabularError};
use crate::table::Frame;

/// Where page markup comes from. The seam exists so tests can substitute
/// fixed HTML fixtures for the network.
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// A read-only tabular store: a named table with a date column and one or
/// more numeric columns.
pub trait TabularSource {
    fn read_table(&self, name: &str) -> Result<Frame, TabularError>;
}
