use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::models::punch_kind::{PunchKind, PunchStatus};
use chrono::{DateTime, Local};
use rusqlite::params;
use rusqlite::{Connection, OptionalExtension, Result, Row};

fn conversion_error(msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(AppError::Other(msg)),
    )
}

pub fn map_row(row: &Row) -> Result<Punch> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| conversion_error(format!("Invalid timestamp: {}", ts_str)))?;

    let kind_str: String = row.get("kind")?;
    let kind = PunchKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(format!("Invalid kind: {}", kind_str)))?;

    let status_str: String = row.get("status")?;
    let status = PunchStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(format!("Invalid status: {}", status_str)))?;

    Ok(Punch {
        id: row.get("id")?,
        code: row.get("code")?,
        worker_id: row.get("worker_id")?,
        worker_name: row.get("worker_name")?,
        timestamp,
        kind,
        site_id: row.get("site_id")?,
        sector_id: row.get("sector_id")?,
        location: row.get("location")?,
        manual: row.get::<_, i32>("manual")? == 1,
        status,
        related_id: row.get("related_id")?,
        validator: row.get("validator")?,
    })
}

/// Snapshot of every punch, oldest first.
///
/// Stored timestamps carry their local offset, so text order is not time
/// order across a DST change; the sort happens on the parsed instants.
pub fn load_punches(conn: &Connection) -> AppResult<Vec<Punch>> {
    let mut stmt = conn.prepare("SELECT * FROM punches")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    out.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
    Ok(out)
}

pub fn load_punch(conn: &Connection, id: &str) -> AppResult<Option<Punch>> {
    let punch = conn
        .query_row("SELECT * FROM punches WHERE id = ?1", [id], map_row)
        .optional()?;
    Ok(punch)
}

pub fn insert_punch(conn: &Connection, p: &Punch) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO punches
            (id, code, worker_id, worker_name, timestamp, kind, site_id, sector_id,
             location, manual, status, related_id, validator, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            p.id,
            p.code,
            p.worker_id,
            p.worker_name,
            p.timestamp.to_rfc3339(),
            p.kind.to_db_str(),
            p.site_id,
            p.sector_id,
            p.location,
            if p.manual { 1 } else { 0 },
            p.status.to_db_str(),
            p.related_id,
            p.validator,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Update a punch (all fields except id)
pub fn update_punch(conn: &Connection, p: &Punch) -> AppResult<()> {
    conn.execute(
        "UPDATE punches
         SET code = ?1, worker_id = ?2, worker_name = ?3, timestamp = ?4,
             kind = ?5, site_id = ?6, sector_id = ?7, location = ?8,
             manual = ?9, status = ?10, related_id = ?11, validator = ?12
         WHERE id = ?13",
        params![
            p.code,
            p.worker_id,
            p.worker_name,
            p.timestamp.to_rfc3339(),
            p.kind.to_db_str(),
            p.site_id,
            p.sector_id,
            p.location,
            if p.manual { 1 } else { 0 },
            p.status.to_db_str(),
            p.related_id,
            p.validator,
            p.id,
        ],
    )?;
    Ok(())
}

pub fn delete_punch(conn: &Connection, id: &str) -> AppResult<()> {
    conn.execute("DELETE FROM punches WHERE id = ?1", [id])?;
    Ok(())
}

/// Flip an ENTRY from open to closed. Returns false when the entry was not
/// open any more (already closed, or gone).
pub fn close_entry_if_open(conn: &Connection, entry_id: &str) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE punches SET status = 'closed'
         WHERE id = ?1 AND kind = 'entry' AND status = 'open'",
        [entry_id],
    )?;
    Ok(changed == 1)
}

pub fn load_log(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT date, message FROM log ORDER BY id DESC")?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}
