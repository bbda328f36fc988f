//! Request validation and master-data lookups shared by the workflow commands.

use crate::errors::{AppError, AppResult};
use crate::models::site::{Sector, Site, find_site_sector};
use crate::models::worker::Worker;
use crate::store::Registry;

/// A present, non-blank field, trimmed.
pub fn required(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Validation(format!("missing required field '{}'", field))),
    }
}

/// Look up the worker and the site/sector pair in the registry.
pub fn resolve<R: Registry + ?Sized>(
    registry: &R,
    worker_id: &str,
    site_id: &str,
    sector_id: &str,
) -> AppResult<(Worker, Site, Sector)> {
    let worker = registry
        .list_workers()?
        .into_iter()
        .find(|w| w.id == worker_id)
        .ok_or_else(|| AppError::NotFound(format!("worker '{}'", worker_id)))?;

    let sites = registry.list_sites()?;
    let (site, sector) = find_site_sector(&sites, site_id, sector_id);
    let site = site.ok_or_else(|| AppError::NotFound(format!("site '{}'", site_id)))?;
    let sector = sector.ok_or_else(|| {
        AppError::NotFound(format!("sector '{}' in site '{}'", sector_id, site.name))
    })?;

    Ok((worker, site.clone(), sector.clone()))
}
