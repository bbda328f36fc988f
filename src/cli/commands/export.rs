use crate::cli::commands::{filter_from, open_db};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filter,
        events,
        force,
    } = cmd
    {
        let filter = filter_from(filter)?;
        let pool = open_db(cfg)?;
        ExportLogic::export(&pool, *format, file, &filter, *events, *force)?;
    }
    Ok(())
}
