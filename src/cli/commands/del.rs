use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::{DeleteLogic, resolve_punch};
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::store::{PunchStore, SqliteStore};
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { punch_id, yes } = cmd {
        let pool = open_db(cfg)?;
        let mut store = SqliteStore::new(&pool.conn);

        //
        // Confirmation prompt
        //
        let punches = store.list_punches()?;
        let target = resolve_punch(&punches, punch_id)?;

        let prompt = if target.is_entry() {
            format!(
                "Delete the ENTRY {} ({} {} {}) and its EXIT? This action is irreversible.",
                target.code,
                target.worker_name,
                target.date_str(),
                target.time_str()
            )
        } else {
            format!(
                "Delete the EXIT {} ({} {} {})? This action is irreversible.",
                target.code,
                target.worker_name,
                target.date_str(),
                target.time_str()
            )
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let removed = DeleteLogic::apply(&mut store, &target.id)?;

        for p in &removed {
            let detail = format!(
                "{} {} of {} (code {})",
                p.kind.as_str(),
                p.date_str(),
                p.worker_name,
                p.code
            );
            audit(&pool.conn, "del", &p.id, &detail);
        }

        success(format!("{} punch(es) deleted.", removed.len()));
    }

    Ok(())
}
