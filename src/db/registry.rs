//! Worker and site/sector master data.

use crate::errors::AppResult;
use crate::models::site::{Sector, Site};
use crate::models::worker::{Worker, WorkerStatus};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeMap;

fn map_worker(row: &Row) -> Result<Worker> {
    let status: String = row.get("status")?;
    Ok(Worker {
        id: row.get("id")?,
        name: row.get("name")?,
        cpf: row.get("cpf")?,
        matricula: row.get("matricula")?,
        specialty: row.get("specialty")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        status: WorkerStatus::from_db_str(&status),
        updated_at: row.get("updated_at")?,
    })
}

/// All workers, most recently updated first.
pub fn load_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, cpf, matricula, specialty, email, phone, status, updated_at
         FROM workers
         ORDER BY updated_at DESC, name ASC",
    )?;
    let rows = stmt.query_map([], map_worker)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn worker_by_cpf(conn: &Connection, cpf: &str) -> AppResult<Option<Worker>> {
    let w = conn
        .query_row(
            "SELECT id, name, cpf, matricula, specialty, email, phone, status, updated_at
             FROM workers WHERE cpf = ?1",
            [cpf],
            map_worker,
        )
        .optional()?;
    Ok(w)
}

pub fn worker_by_id(conn: &Connection, id: &str) -> AppResult<Option<Worker>> {
    let w = conn
        .query_row(
            "SELECT id, name, cpf, matricula, specialty, email, phone, status, updated_at
             FROM workers WHERE id = ?1",
            [id],
            map_worker,
        )
        .optional()?;
    Ok(w)
}

pub fn insert_worker(conn: &Connection, w: &Worker) -> AppResult<()> {
    conn.execute(
        "INSERT INTO workers (id, name, cpf, matricula, specialty, email, phone, status, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            w.id,
            w.name,
            w.cpf,
            w.matricula,
            w.specialty,
            w.email,
            w.phone,
            w.status.to_db_str(),
            w.updated_at,
        ],
    )?;
    Ok(())
}

/// Rewrites every editable column of `w`; status is left alone.
pub fn update_worker(conn: &Connection, w: &Worker) -> AppResult<()> {
    conn.execute(
        "UPDATE workers
         SET name = ?1, cpf = ?2, matricula = ?3, specialty = ?4, email = ?5, phone = ?6,
             updated_at = ?7
         WHERE id = ?8",
        params![
            w.name,
            w.cpf,
            w.matricula,
            w.specialty,
            w.email,
            w.phone,
            w.updated_at,
            w.id,
        ],
    )?;
    Ok(())
}

/// Returns the number of rows touched (0 when the id is unknown).
pub fn update_worker_status(
    conn: &Connection,
    id: &str,
    status: WorkerStatus,
    updated_at: &str,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE workers SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.to_db_str(), updated_at, id],
    )?;
    Ok(n)
}

pub fn update_worker_name(conn: &Connection, id: &str, name: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE workers SET name = ?1 WHERE id = ?2",
        params![name, id],
    )?;
    Ok(())
}

pub fn insert_site(conn: &Connection, id: &str, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sites (id, name) VALUES (?1, ?2)",
        params![id, name],
    )?;
    Ok(())
}

pub fn insert_sector(conn: &Connection, id: &str, site_id: &str, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sectors (id, site_id, name) VALUES (?1, ?2, ?3)",
        params![id, site_id, name],
    )?;
    Ok(())
}

/// All sites with their sectors embedded, ordered by name.
pub fn load_sites(conn: &Connection) -> AppResult<Vec<Site>> {
    let mut sites: BTreeMap<String, Site> = BTreeMap::new();

    {
        let mut stmt = conn.prepare("SELECT id, name FROM sites")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for r in rows {
            let (id, name) = r?;
            sites.insert(
                id.clone(),
                Site {
                    id,
                    name,
                    sectors: Vec::new(),
                },
            );
        }
    }

    let mut stmt = conn.prepare("SELECT id, site_id, name FROM sectors ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;
    for r in rows {
        let (id, site_id, name) = r?;
        if let Some(site) = sites.get_mut(&site_id) {
            site.sectors.push(Sector { id, name });
        }
    }

    let mut out: Vec<Site> = sites.into_values().collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}
