use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let custom = cli
        .db
        .as_ref()
        .map(|p| expand_tilde(p).to_string_lossy().to_string());
    let cfg = Config::init_all(custom, cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing shiftlink…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", &db_path));

    audit(
        &conn,
        "init",
        &db_path,
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 shiftlink initialization completed!");
    Ok(())
}
