use crate::cli::commands::open_db;
use crate::cli::parser::{Commands, SiteAction};
use crate::config::Config;
use crate::core::registry::RegistryLogic;
use crate::db::log::audit;
use crate::errors::AppResult;
use crate::store::{Registry, SqliteRegistry};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Site { action } = cmd else {
        return Ok(());
    };

    let pool = open_db(cfg)?;
    let conn = &pool.conn;

    match action {
        SiteAction::Add { id, name } => {
            let site = RegistryLogic::add_site(conn, id.clone(), name.clone())?;
            audit(conn, "site", &site.id, &format!("Registered {}", site.name));
            success(format!("Site {} registered with id {}", site.name, site.id));
        }

        SiteAction::Sector { site, id, name } => {
            let sector = RegistryLogic::add_sector(conn, site, id.clone(), name.clone())?;
            audit(
                conn,
                "sector",
                &sector.id,
                &format!("Registered {} in site {}", sector.name, site),
            );
            success(format!("Sector {} registered with id {}", sector.name, sector.id));
        }

        SiteAction::List => {
            let sites = SqliteRegistry::new(conn).list_sites()?;
            if sites.is_empty() {
                info("No sites registered.");
            }
            for s in &sites {
                println!("🏥 {} [{}]", s.name, s.id);
                for sec in &s.sectors {
                    println!("   • {} [{}]", sec.name, sec.id);
                }
            }
        }
    }

    Ok(())
}
