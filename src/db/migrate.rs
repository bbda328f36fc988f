use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check whether `table` already has `column`.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `punches` table.
fn create_punches_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS punches (
            id           TEXT PRIMARY KEY,
            code         TEXT NOT NULL,
            worker_id    TEXT NOT NULL,
            worker_name  TEXT NOT NULL DEFAULT '',
            timestamp    TEXT NOT NULL,
            kind         TEXT NOT NULL CHECK(kind IN ('entry','exit')),
            site_id      TEXT NOT NULL,
            sector_id    TEXT NOT NULL,
            location     TEXT NOT NULL DEFAULT '',
            manual       INTEGER NOT NULL DEFAULT 1,
            status       TEXT NOT NULL DEFAULT 'open' CHECK(status IN ('open','closed')),
            related_id   TEXT,
            validator    TEXT NOT NULL DEFAULT '',
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_punches_code ON punches(code, kind);
        CREATE INDEX IF NOT EXISTS idx_punches_related ON punches(related_id);
        CREATE INDEX IF NOT EXISTS idx_punches_timestamp ON punches(timestamp);
        "#,
    )?;
    Ok(())
}

/// Create the registry tables. `workers` starts with its original columns;
/// later fields are added by [`upgrade_workers_table`].
fn create_registry_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id     TEXT PRIMARY KEY,
            name   TEXT NOT NULL,
            cpf    TEXT NOT NULL UNIQUE,
            email  TEXT NOT NULL DEFAULT '',
            phone  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS sites (
            id    TEXT PRIMARY KEY,
            name  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS sectors (
            id       TEXT PRIMARY KEY,
            site_id  TEXT NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
            name     TEXT NOT NULL,
            UNIQUE(site_id, name)
        );
        "#,
    )?;
    Ok(())
}

/// Best-effort column upgrades for worker rows written by older versions.
/// A failing ALTER is reported and skipped: reads fall back to defaults.
fn upgrade_workers_table(conn: &Connection) -> Result<()> {
    let upgrades = [
        ("matricula", "ALTER TABLE workers ADD COLUMN matricula TEXT NOT NULL DEFAULT ''"),
        ("specialty", "ALTER TABLE workers ADD COLUMN specialty TEXT NOT NULL DEFAULT ''"),
        ("status", "ALTER TABLE workers ADD COLUMN status TEXT NOT NULL DEFAULT 'active'"),
        ("updated_at", "ALTER TABLE workers ADD COLUMN updated_at TEXT NOT NULL DEFAULT ''"),
    ];

    for (column, sql) in upgrades {
        if has_column(conn, "workers", column)? {
            continue;
        }
        if let Err(e) = conn.execute(sql, []) {
            warning(format!("Could not add '{}' to workers: {}", column, e));
        }
    }
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Entries closed by an exit that no longer carries a valid status flag get
/// their status recomputed from the back-references.
fn migrate_recompute_entry_status(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_recompute_entry_status";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    let fixed = conn.execute(
        "UPDATE punches SET status = 'closed'
         WHERE kind = 'entry' AND status = 'open'
           AND EXISTS (SELECT 1 FROM punches x
                       WHERE x.kind = 'exit' AND x.related_id = punches.id)",
        [],
    )?;

    mark_applied(conn, version, "Recomputed entry status from exit back-references")?;

    if fixed > 0 {
        success(format!(
            "Migration applied: {} → closed {} entries with linked exits",
            version, fixed
        ));
    }
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Core tables
    let fresh = !table_exists(conn, "punches")?;
    create_punches_table(conn)?;
    if fresh {
        success("Created punches table.");
    }

    create_registry_tables(conn)?;

    // 3) Upgrades
    upgrade_workers_table(conn)?;
    migrate_recompute_entry_status(conn)?;

    Ok(())
}
