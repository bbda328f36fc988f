use super::{PunchStore, Registry};
use crate::db::{queries, registry};
use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::models::site::Site;
use crate::models::worker::Worker;
use rusqlite::Connection;

/// Punch store over an open SQLite connection.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl PunchStore for SqliteStore<'_> {
    fn list_punches(&self) -> AppResult<Vec<Punch>> {
        queries::load_punches(self.conn)
    }

    fn save_punch(&mut self, punch: &Punch) -> AppResult<()> {
        queries::insert_punch(self.conn, punch)
    }

    fn update_punch(&mut self, punch: &Punch) -> AppResult<()> {
        queries::update_punch(self.conn, punch)
    }

    fn delete_punch(&mut self, id: &str) -> AppResult<()> {
        queries::delete_punch(self.conn, id)
    }

    /// Single transaction: the entry is flipped only if it is still open
    /// (compare-and-swap), then the exit is inserted. Any failure rolls back both.
    fn save_exit_closing_entry(&mut self, exit: &Punch, entry: &Punch) -> AppResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        if !queries::close_entry_if_open(&tx, &entry.id)? {
            return Err(AppError::Conflict(format!(
                "entry with code {} was closed concurrently",
                entry.code
            )));
        }
        queries::insert_punch(&tx, exit)?;

        tx.commit()?;
        Ok(())
    }

    fn delete_cascade(&mut self, ids: &[String]) -> AppResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for id in ids {
            queries::delete_punch(&tx, id)?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Registry view over the same SQLite database.
pub struct SqliteRegistry<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteRegistry<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl Registry for SqliteRegistry<'_> {
    fn list_workers(&self) -> AppResult<Vec<Worker>> {
        registry::load_workers(self.conn)
    }

    fn list_sites(&self) -> AppResult<Vec<Site>> {
        registry::load_sites(self.conn)
    }
}
