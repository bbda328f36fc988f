use crate::cli::commands::{open_db, operator, timestamp_from};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::exit::{ExitLogic, ExitRequest};
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::store::{PunchStore, SqliteRegistry, SqliteStore};
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Exit {
        worker,
        code,
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

        let req = ExitRequest {
            worker_id: worker.clone(),
            code: code.clone(),
            site_id: site.clone(),
            sector_id: sector.clone(),
            timestamp: Some(timestamp),
        };

        let exit = ExitLogic::apply(&mut store, &registry, &operator(cfg), req)?;

        audit(
            &pool.conn,
            "exit",
            &exit.id,
            &format!(
                "{} at {} on {} {} closes code {}",
                exit.worker_name,
                exit.location,
                exit.date_str(),
                exit.time_str(),
                exit.code
            ),
        );

        let entry_time = store
            .list_punches()?
            .into_iter()
            .find(|p| Some(&p.id) == exit.related_id.as_ref())
            .map(|p| p.timestamp);
        if let Some(entry_time) = entry_time
            && exit.timestamp < entry_time
        {
            warning(format!(
                "Exit time {} {} is earlier than the entry ({})",
                exit.date_str(),
                exit.time_str(),
                entry_time.format("%Y-%m-%d %H:%M")
            ));
        }

        success(format!(
            "Exit recorded for {} at {} ({} {}), code {} closed",
            exit.worker_name,
            exit.location,
            exit.date_str(),
            exit.time_str(),
            exit.code
        ));
    }

    Ok(())
}
