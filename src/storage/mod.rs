pub mod sqlite;

pub use sqlite::PageCache;
