use crate::cli::commands::{open_db, operator, timestamp_from};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::{EntryLogic, EntryRequest};
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::store::{SqliteRegistry, SqliteStore};
use crate::ui::messages::success;
use crate::utils::formatting::bold;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Entry {
        worker,
        site,
        sector,
        date,
        time,
    } = cmd
    {
        let timestamp = timestamp_from(date.as_ref(), time.as_ref())?;

        let pool = open_db(cfg)?;
        let mut store = SqliteStore::new(&pool.conn);
        let registry = SqliteRegistry::new(&pool.conn);

        let req = EntryRequest {
            worker_id: worker.clone(),
            site_id: site.clone(),
            sector_id: sector.clone(),
            timestamp: Some(timestamp),
        };

        let entry = EntryLogic::apply(
            &mut store,
            &registry,
            &mut rand::thread_rng(),
            &operator(cfg),
            req,
        )?;

        audit(
            &pool.conn,
            "entry",
            &entry.id,
            &format!(
                "{} at {} on {} {} (code {})",
                entry.worker_name,
                entry.location,
                entry.date_str(),
                entry.time_str(),
                entry.code
            ),
        );

        success(format!(
            "Entry recorded for {} at {} ({} {})",
            entry.worker_name,
            entry.location,
            entry.date_str(),
            entry.time_str()
        ));
        println!("🔑 Code: {}", bold(&entry.code));
        println!("   Punch id: {}", entry.id);
    }

    Ok(())
}
