//! Last-known-good page snapshot cache.
//!
//! Successful fetches are stored by URL; when a later fetch fails, the
//! pipeline renders from the most recent snapshot instead of aborting the
//! page. Nothing here is needed for correctness — tables are rebuilt
//! wholesale every run — it only rides out source outages.

use crate::model::StorageError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

pub struct PageCache {
    conn: Connection,
}

impl PageCache {
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(db_path)?)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshots (
                url TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                fetched_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self { conn })
    }

    pub fn store(&self, url: &str, body: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshots (url, body, fetched_at) VALUES (?1, ?2, ?3)",
            params![url, body, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Most recent stored snapshot for `url`, with its fetch time.
    pub fn last_known_good(
        &self,
        url: &str,
    ) -> Result<Option<(String, DateTime<Utc>)>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT body, fetched_at FROM snapshots WHERE url = ?1")?;
        let mut rows = stmt.query(params![url])?;

        if let Some(row) = rows.next()? {
            let body: String = row.get(0)?;
            let fetched_at_str: String = row.get(1)?;
            let fetched_at: DateTime<Utc> = fetched_at_str.parse()?;
            Ok(Some((body, fetched_at)))
        } else {
            Ok(None)
        }
    }
}
