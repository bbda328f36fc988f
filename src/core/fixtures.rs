//! Shared builders for unit tests.

use crate::models::punch::Punch;
use crate::models::punch_kind::{PunchKind, PunchStatus};
use crate::models::site::{Sector, Site};
use crate::models::worker::{Worker, WorkerStatus};
use crate::store::MemoryRegistry;
use chrono::{DateTime, Local, NaiveDateTime};

pub fn at(s: &str) -> DateTime<Local> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

pub fn entry_at(id: &str, code: &str, worker: &str, ts: &str) -> Punch {
    Punch {
        id: id.into(),
        code: code.into(),
        worker_id: worker.into(),
        worker_name: format!("NAME {worker}"),
        timestamp: at(ts),
        kind: PunchKind::Entry,
        site_id: "H1".into(),
        sector_id: "S1".into(),
        location: "HOSPITAL CENTRAL - UTI".into(),
        manual: true,
        status: PunchStatus::Open,
        related_id: None,
        validator: "admin".into(),
    }
}

/// Exit referencing `entry`. The entry itself is left untouched.
pub fn exit_for(id: &str, entry: &Punch, ts: &str) -> Punch {
    Punch {
        id: id.into(),
        kind: PunchKind::Exit,
        timestamp: at(ts),
        status: PunchStatus::Closed,
        related_id: Some(entry.id.clone()),
        ..entry.clone()
    }
}

pub fn worker(id: &str, name: &str) -> Worker {
    Worker {
        id: id.into(),
        name: name.into(),
        cpf: format!("000.000.000-{id}"),
        matricula: format!("M-{id}"),
        specialty: "ENFERMAGEM".into(),
        email: String::new(),
        phone: String::new(),
        status: WorkerStatus::Active,
        updated_at: String::new(),
    }
}

/// Workers W1, W2 and site H1 with sectors S1 (UTI) and S2 (PRONTO SOCORRO).
pub fn registry() -> MemoryRegistry {
    MemoryRegistry::new(
        vec![worker("W1", "ANA SOUZA"), worker("W2", "JOAO LIMA")],
        vec![Site {
            id: "H1".into(),
            name: "HOSPITAL CENTRAL".into(),
            sectors: vec![
                Sector {
                    id: "S1".into(),
                    name: "UTI".into(),
                },
                Sector {
                    id: "S2".into(),
                    name: "PRONTO SOCORRO".into(),
                },
            ],
        }],
    )
}
