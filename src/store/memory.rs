use super::{PunchStore, Registry};
use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::models::site::Site;
use crate::models::worker::Worker;

/// In-memory punch store. Keeps the default (non-atomic) two-write close,
/// and counts writes so callers can assert that a rejected command wrote nothing.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    punches: Vec<Punch>,
    writes: usize,
    fail_updates: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_punches(punches: Vec<Punch>) -> Self {
        Self {
            punches,
            ..Self::default()
        }
    }

    /// Number of save/update/delete calls that reached the store.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make every following `update_punch` fail, simulating a crash between
    /// the two writes of an exit.
    pub fn fail_updates(&mut self, fail: bool) {
        self.fail_updates = fail;
    }
}

impl PunchStore for MemoryStore {
    fn list_punches(&self) -> AppResult<Vec<Punch>> {
        Ok(self.punches.clone())
    }

    fn save_punch(&mut self, punch: &Punch) -> AppResult<()> {
        self.writes += 1;
        match self.punches.iter_mut().find(|p| p.id == punch.id) {
            Some(existing) => *existing = punch.clone(),
            None => self.punches.push(punch.clone()),
        }
        Ok(())
    }

    fn update_punch(&mut self, punch: &Punch) -> AppResult<()> {
        if self.fail_updates {
            return Err(AppError::Other("store unavailable".into()));
        }
        self.writes += 1;
        if let Some(existing) = self.punches.iter_mut().find(|p| p.id == punch.id) {
            *existing = punch.clone();
        }
        Ok(())
    }

    fn delete_punch(&mut self, id: &str) -> AppResult<()> {
        self.writes += 1;
        self.punches.retain(|p| p.id != id);
        Ok(())
    }
}

/// In-memory worker and site registry.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    pub workers: Vec<Worker>,
    pub sites: Vec<Site>,
}

impl MemoryRegistry {
    pub fn new(workers: Vec<Worker>, sites: Vec<Site>) -> Self {
        Self { workers, sites }
    }
}

impl Registry for MemoryRegistry {
    fn list_workers(&self) -> AppResult<Vec<Worker>> {
        Ok(self.workers.clone())
    }

    fn list_sites(&self) -> AppResult<Vec<Site>> {
        Ok(self.sites.clone())
    }
}
