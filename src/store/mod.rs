//! Storage seams of the reconciliation engine.
//!
//! The workflow never talks to SQLite directly: it receives a [`PunchStore`]
//! for punches and a [`Registry`] for master data. Both are implemented over
//! SQLite for the CLI and in memory for tests.

pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::punch::Punch;
use crate::models::site::Site;
use crate::models::worker::Worker;

pub use memory::{MemoryRegistry, MemoryStore};
pub use sqlite::{SqliteRegistry, SqliteStore};

/// Durable record of punches. Every call is idempotent on `id`.
pub trait PunchStore {
    fn list_punches(&self) -> AppResult<Vec<Punch>>;

    /// Insert a punch whose id was assigned by the caller.
    fn save_punch(&mut self, punch: &Punch) -> AppResult<()>;

    /// Full-record replace by id.
    fn update_punch(&mut self, punch: &Punch) -> AppResult<()>;

    fn delete_punch(&mut self, id: &str) -> AppResult<()>;

    /// Insert `exit` and store `entry` as closed.
    ///
    /// The default is two sequential writes; a crash in between leaves an exit
    /// whose entry is still OPEN until the next pairing pass. Stores with
    /// transactions override this to make both writes atomic.
    fn save_exit_closing_entry(&mut self, exit: &Punch, entry: &Punch) -> AppResult<()> {
        self.save_punch(exit)?;
        self.update_punch(entry)
    }

    /// Delete several punches; the default deletes them one by one.
    fn delete_cascade(&mut self, ids: &[String]) -> AppResult<()> {
        for id in ids {
            self.delete_punch(id)?;
        }
        Ok(())
    }
}

/// Read-only worker and site/sector master data.
pub trait Registry {
    fn list_workers(&self) -> AppResult<Vec<Worker>>;
    fn list_sites(&self) -> AppResult<Vec<Site>>;
}
