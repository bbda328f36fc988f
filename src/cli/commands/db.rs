use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success};

/// `PRAGMA integrity_check`: `Ok(None)` when healthy, the report otherwise.
fn integrity_problems(pool: &DbPool) -> AppResult<Option<String>> {
    let report: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    Ok(if report == "ok" { None } else { Some(report) })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do: use --migrate, --check, --vacuum or --info.");
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        info("Running migrations…");
        run_pending_migrations(&pool.conn).map_err(|e| AppError::Migration(e.to_string()))?;
        success("Migration completed.");
    }

    if *show_info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    if *check {
        info("Running integrity check…");
        match integrity_problems(&pool)? {
            None => success("Integrity check passed."),
            Some(report) => error(format!("Integrity check failed: {}", report)),
        }
    }

    if *vacuum {
        info("Running VACUUM…");
        pool.conn.execute_batch("VACUUM;")?;
        audit(&pool.conn, "db", &cfg.database, "VACUUM completed");
        success("Vacuum completed.");
    }

    Ok(())
}
