use crate::cli::commands::{open_db, separator};
use crate::cli::parser::{Commands, WorkerAction};
use crate::config::Config;
use crate::core::registry::{NewWorker, RegistryLogic, WorkerChanges};
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::worker::{Worker, WorkerStatus};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Worker { action } = cmd else {
        return Ok(());
    };

    let pool = open_db(cfg)?;
    let conn = &pool.conn;

    match action {
        WorkerAction::Add {
            id,
            name,
            cpf,
            matricula,
            specialty,
            email,
            phone,
            inactive,
        } => {
            let form = NewWorker {
                id: id.clone(),
                name: name.clone(),
                cpf: cpf.clone(),
                matricula: matricula.clone(),
                specialty: specialty.clone(),
                email: email.clone(),
                phone: phone.clone(),
                inactive: *inactive,
            };
            let w = RegistryLogic::add_worker(conn, form)?;
            audit(conn, "worker", &w.id, &format!("Registered {}", w.name));
            success(format!("Worker {} registered with id {}", w.name, w.id));
        }

        WorkerAction::List { search } => {
            let workers = RegistryLogic::list_workers(conn, search.as_deref())?;
            if workers.is_empty() {
                info("No workers found.");
            } else {
                print_workers(&workers, separator(cfg));
            }
        }

        WorkerAction::Edit {
            id,
            name,
            cpf,
            matricula,
            specialty,
            email,
            phone,
        } => {
            let changes = WorkerChanges {
                name: name.clone(),
                cpf: cpf.clone(),
                matricula: matricula.clone(),
                specialty: specialty.clone(),
                email: email.clone(),
                phone: phone.clone(),
            };
            let w = RegistryLogic::update_worker(conn, id, changes)?;
            audit(conn, "worker", &w.id, &format!("Updated {}", w.name));
            success(format!("Worker {} updated", w.name));
        }

        WorkerAction::Status {
            id,
            active,
            inactive,
        } => {
            let status = match (*active, *inactive) {
                (true, false) => WorkerStatus::Active,
                (false, true) => WorkerStatus::Inactive,
                _ => {
                    return Err(AppError::Validation(
                        "choose one of --active or --inactive".into(),
                    ));
                }
            };
            RegistryLogic::set_worker_status(conn, id, status)?;
            audit(conn, "worker", id, &format!("Status set to {}", status.to_db_str()));
            success(format!("Worker {} is now {}", id, status.to_db_str()));
        }

        WorkerAction::Normalize => {
            let changed = RegistryLogic::normalize_worker_names(conn)?;
            if changed > 0 {
                audit(conn, "worker", "*", &format!("{} names normalized", changed));
            }
            success(format!("{} worker name(s) normalized.", changed));
        }
    }

    Ok(())
}

fn print_workers(workers: &[Worker], sep: char) {
    let mut table = Table::new(vec![
        Column::new("ID", 36),
        Column::new("NAME", 28),
        Column::new("MATRICULA", 10),
        Column::new("SPECIALTY", 16),
        Column::new("STATUS", 8),
    ]);
    for w in workers {
        table.add_row(vec![
            w.id.clone(),
            w.name.clone(),
            w.matricula.clone(),
            w.specialty.clone(),
            w.status.to_db_str().to_string(),
        ]);
    }
    println!("{}", table.render(sep));
}
