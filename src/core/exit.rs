use crate::core::OperatorContext;
use crate::core::resolve::{required, resolve};
use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchStatus;
use crate::store::{PunchStore, Registry};
use chrono::{DateTime, Local};

/// Input of the `exit` command.
#[derive(Debug, Clone, Default)]
pub struct ExitRequest {
    pub worker_id: Option<String>,
    pub code: Option<String>,
    pub site_id: Option<String>,
    pub sector_id: Option<String>,
    pub timestamp: Option<DateTime<Local>>,
}

/// Closes a shift: records the EXIT linked to the entry holding `code`.
pub struct ExitLogic;

/// Entry holding `code`. Older closed cycles may reuse a code, so the open
/// entry wins; among several candidates of the same state the oldest wins.
pub fn find_entry_by_code<'a>(punches: &'a [Punch], code: &str) -> Option<&'a Punch> {
    let mut candidates: Vec<&Punch> = punches
        .iter()
        .filter(|p| p.is_entry() && p.code == code)
        .collect();
    candidates.sort_by(|a, b| {
        b.status
            .is_open()
            .cmp(&a.status.is_open())
            .then_with(|| a.timestamp.cmp(&b.timestamp))
            .then_with(|| a.id.cmp(&b.id))
    });
    candidates.into_iter().next()
}

impl ExitLogic {
    pub fn apply<S, R>(
        store: &mut S,
        registry: &R,
        op: &OperatorContext,
        req: ExitRequest,
    ) -> AppResult<Punch>
    where
        S: PunchStore + ?Sized,
        R: Registry + ?Sized,
    {
        let code = required(req.code, "code")?;
        let worker_id = required(req.worker_id, "worker")?;
        let site_id = required(req.site_id, "site")?;
        let sector_id = required(req.sector_id, "sector")?;
        let timestamp = req
            .timestamp
            .ok_or_else(|| AppError::Validation("missing required field 'timestamp'".into()))?;

        //
        // 1. Resolve the entry behind the code
        //
        let punches = store.list_punches()?;
        let entry = find_entry_by_code(&punches, &code)
            .ok_or_else(|| AppError::NotFound(format!("no entry with code {}", code)))?;

        if entry.status == PunchStatus::Closed {
            return Err(AppError::Conflict(format!(
                "entry with code {} is already closed",
                code
            )));
        }

        if entry.worker_id != worker_id {
            return Err(AppError::Ownership(format!(
                "code {} belongs to another worker",
                code
            )));
        }

        //
        // 2. Master data for the exit side (may differ from the entry's sector)
        //
        let (worker, site, sector) = resolve(registry, &worker_id, &site_id, &sector_id)?;

        //
        // 3. Insert exit + close entry
        //
        let exit = Punch::new_exit(entry, &worker, &site, &sector, timestamp, &op.validator);
        let mut closed = entry.clone();
        closed.status = PunchStatus::Closed;

        store.save_exit_closing_entry(&exit, &closed)?;

        Ok(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{at, entry_at, exit_for, registry};
    use crate::core::pairing::pair_shifts;
    use crate::models::punch_kind::PunchKind;
    use crate::models::shift::ShiftStatus;
    use crate::store::MemoryStore;

    fn request(code: &str, worker: &str) -> ExitRequest {
        ExitRequest {
            worker_id: Some(worker.into()),
            code: Some(code.into()),
            site_id: Some("H1".into()),
            sector_id: Some("S2".into()),
            timestamp: Some(at("2024-01-01T16:00")),
        }
    }

    fn run(store: &mut MemoryStore, code: &str, worker: &str) -> AppResult<Punch> {
        let op = OperatorContext::new("admin", 16);
        ExitLogic::apply(store, &registry(), &op, request(code, worker))
    }

    #[test]
    fn closes_the_entry_and_links_back() {
        let e = entry_at("e1", "123456", "W1", "2024-01-01T08:00");
        let mut store = MemoryStore::with_punches(vec![e]);

        let x = run(&mut store, "123456", "W1").unwrap();

        assert_eq!(x.kind, PunchKind::Exit);
        assert_eq!(x.related_id.as_deref(), Some("e1"));
        assert_eq!(x.code, "123456");
        assert_eq!(x.location, "HOSPITAL CENTRAL - PRONTO SOCORRO");

        let all = store.list_punches().unwrap();
        let entry = all.iter().find(|p| p.id == "e1").unwrap();
        assert_eq!(entry.status, PunchStatus::Closed);

        let rows = pair_shifts(&all);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status(), ShiftStatus::Closed);
    }

    #[test]
    fn blank_code_is_validation() {
        let mut store = MemoryStore::new();
        let err = run(&mut store, "  ", "W1").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn unknown_code_is_not_found_and_writes_nothing() {
        let e = entry_at("e1", "123456", "W1", "2024-01-01T08:00");
        let mut store = MemoryStore::with_punches(vec![e]);

        let err = run(&mut store, "999999", "W1").unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.writes(), 0);
        assert_eq!(store.list_punches().unwrap().len(), 1);
    }

    #[test]
    fn closed_entry_is_conflict_with_zero_writes() {
        let mut e = entry_at("e1", "123456", "W1", "2024-01-01T08:00");
        e.status = PunchStatus::Closed;
        let x = exit_for("x1", &e, "2024-01-01T12:00");
        let mut store = MemoryStore::with_punches(vec![e, x]);

        let err = run(&mut store, "123456", "W1").unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn other_workers_code_is_ownership_error() {
        let e = entry_at("e1", "123456", "W1", "2024-01-01T08:00");
        let mut store = MemoryStore::with_punches(vec![e]);

        let err = run(&mut store, "123456", "W2").unwrap_err();

        assert!(matches!(err, AppError::Ownership(_)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn exit_earlier_than_entry_is_still_recorded() {
        let e = entry_at("e1", "123456", "W1", "2024-01-01T18:00");
        let mut store = MemoryStore::with_punches(vec![e]);

        let x = run(&mut store, "123456", "W1").unwrap();

        assert_eq!(x.related_id.as_deref(), Some("e1"));
        let rows = pair_shifts(&store.list_punches().unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status(), ShiftStatus::Closed);
    }

    #[test]
    fn open_entry_wins_over_older_closed_cycle_with_same_code() {
        let mut old = entry_at("e0", "123456", "W2", "2023-12-01T08:00");
        old.status = PunchStatus::Closed;
        let current = entry_at("e1", "123456", "W1", "2024-01-01T08:00");
        let mut store = MemoryStore::with_punches(vec![old, current]);

        let x = run(&mut store, "123456", "W1").unwrap();
        assert_eq!(x.related_id.as_deref(), Some("e1"));
    }

    #[test]
    fn crash_between_writes_is_healed_by_pairing() {
        let e = entry_at("e1", "123456", "W1", "2024-01-01T08:00");
        let mut store = MemoryStore::with_punches(vec![e]);
        store.fail_updates(true);

        // exit insert lands, entry update fails
        assert!(run(&mut store, "123456", "W1").is_err());

        let all = store.list_punches().unwrap();
        let entry = all.iter().find(|p| p.id == "e1").unwrap();
        assert_eq!(entry.status, PunchStatus::Open);

        let rows = pair_shifts(&all);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status(), ShiftStatus::Closed);
    }
}
