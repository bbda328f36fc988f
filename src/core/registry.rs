//! Worker and site registration (master data behind the punches).

use crate::core::normalize::normalize_name;
use crate::core::resolve::required;
use crate::db::registry as q;
use crate::errors::{AppError, AppResult};
use crate::models::site::{Sector, Site};
use crate::models::worker::{Worker, WorkerStatus};
use chrono::Local;
use rusqlite::Connection;
use uuid::Uuid;

/// Registration form for a worker. `name` and `cpf` are mandatory.
#[derive(Debug, Clone, Default)]
pub struct NewWorker {
    pub id: Option<String>,
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub matricula: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub inactive: bool,
}

/// Edit form for an existing worker. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct WorkerChanges {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub matricula: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct RegistryLogic;

fn new_id(explicit: Option<String>) -> String {
    explicit
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

impl RegistryLogic {
    pub fn add_worker(conn: &Connection, form: NewWorker) -> AppResult<Worker> {
        let name = required(form.name, "name")?;
        let cpf = required(form.cpf, "cpf")?;

        if q::worker_by_cpf(conn, &cpf)?.is_some() {
            return Err(AppError::Conflict(format!(
                "a worker with CPF {} is already registered",
                cpf
            )));
        }

        let id = new_id(form.id);
        if q::worker_by_id(conn, &id)?.is_some() {
            return Err(AppError::Conflict(format!("worker id '{}' is already taken", id)));
        }

        let worker = Worker {
            id,
            name: normalize_name(&name),
            cpf,
            matricula: form.matricula.unwrap_or_default(),
            specialty: form.specialty.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            status: if form.inactive {
                WorkerStatus::Inactive
            } else {
                WorkerStatus::Active
            },
            updated_at: Local::now().to_rfc3339(),
        };

        q::insert_worker(conn, &worker)?;
        Ok(worker)
    }

    /// Apply `changes` to worker `id` and bump its `updated_at`.
    pub fn update_worker(conn: &Connection, id: &str, changes: WorkerChanges) -> AppResult<Worker> {
        let mut worker = q::worker_by_id(conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("worker '{}'", id)))?;

        if changes.name.is_some() {
            worker.name = normalize_name(&required(changes.name, "name")?);
        }

        if changes.cpf.is_some() {
            let cpf = required(changes.cpf, "cpf")?;
            if let Some(holder) = q::worker_by_cpf(conn, &cpf)?
                && holder.id != worker.id
            {
                return Err(AppError::Conflict(format!(
                    "CPF {} belongs to {}",
                    cpf, holder.name
                )));
            }
            worker.cpf = cpf;
        }

        if let Some(v) = changes.matricula {
            worker.matricula = v.trim().to_string();
        }
        if let Some(v) = changes.specialty {
            worker.specialty = v.trim().to_string();
        }
        if let Some(v) = changes.email {
            worker.email = v.trim().to_string();
        }
        if let Some(v) = changes.phone {
            worker.phone = v.trim().to_string();
        }

        worker.updated_at = Local::now().to_rfc3339();
        q::update_worker(conn, &worker)?;
        Ok(worker)
    }

    /// Workers matching `search` (name or registration number), newest updates first.
    pub fn list_workers(conn: &Connection, search: Option<&str>) -> AppResult<Vec<Worker>> {
        let workers = q::load_workers(conn)?;
        Ok(match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                // stored names are normalized, so accents in the query must not matter
                let term = normalize_name(term);
                workers.into_iter().filter(|w| w.matches_search(&term)).collect()
            }
            None => workers,
        })
    }

    pub fn set_worker_status(conn: &Connection, id: &str, status: WorkerStatus) -> AppResult<()> {
        let touched = q::update_worker_status(conn, id, status, &Local::now().to_rfc3339())?;
        if touched == 0 {
            return Err(AppError::NotFound(format!("worker '{}'", id)));
        }
        Ok(())
    }

    /// Re-normalize every stored worker name. Returns how many changed.
    pub fn normalize_worker_names(conn: &Connection) -> AppResult<usize> {
        let mut changed = 0;
        for w in q::load_workers(conn)? {
            let normalized = normalize_name(&w.name);
            if normalized != w.name {
                q::update_worker_name(conn, &w.id, &normalized)?;
                changed += 1;
            }
        }
        Ok(changed)
    }

    pub fn add_site(
        conn: &Connection,
        id: Option<String>,
        name: Option<String>,
    ) -> AppResult<Site> {
        let name = required(name, "name")?;
        let sites = q::load_sites(conn)?;
        if sites.iter().any(|s| s.name.eq_ignore_ascii_case(&name)) {
            return Err(AppError::Conflict(format!("site '{}' already exists", name)));
        }

        let id = new_id(id);
        if sites.iter().any(|s| s.id == id) {
            return Err(AppError::Conflict(format!("site id '{}' is already taken", id)));
        }

        let site = Site {
            id,
            name,
            sectors: Vec::new(),
        };
        q::insert_site(conn, &site.id, &site.name)?;
        Ok(site)
    }

    pub fn add_sector(
        conn: &Connection,
        site_id: &str,
        id: Option<String>,
        name: Option<String>,
    ) -> AppResult<Sector> {
        let name = required(name, "name")?;
        let sites = q::load_sites(conn)?;
        let site = sites
            .iter()
            .find(|s| s.id == site_id)
            .ok_or_else(|| AppError::NotFound(format!("site '{}'", site_id)))?;

        if site.sectors.iter().any(|s| s.name.eq_ignore_ascii_case(&name)) {
            return Err(AppError::Conflict(format!(
                "sector '{}' already exists in '{}'",
                name, site.name
            )));
        }

        // sector ids are unique across all sites
        let id = new_id(id);
        if sites.iter().flat_map(|s| &s.sectors).any(|s| s.id == id) {
            return Err(AppError::Conflict(format!("sector id '{}' is already taken", id)));
        }

        let sector = Sector {
            id,
            name,
        };
        q::insert_sector(conn, &sector.id, &site.id, &sector.name)?;
        Ok(sector)
    }
}
