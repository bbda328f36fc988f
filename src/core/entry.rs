use crate::core::OperatorContext;
use crate::core::code::generate_free_code;
use crate::core::resolve::{required, resolve};
use crate::errors::{AppError, AppResult};
use crate::models::punch::Punch;
use crate::store::{PunchStore, Registry};
use chrono::{DateTime, Local};
use rand::Rng;
use std::collections::HashSet;

/// Input of the `entry` command. Every field is required.
#[derive(Debug, Clone, Default)]
pub struct EntryRequest {
    pub worker_id: Option<String>,
    pub site_id: Option<String>,
    pub sector_id: Option<String>,
    pub timestamp: Option<DateTime<Local>>,
}

/// Opens a shift: records an ENTRY punch with a fresh linking code.
pub struct EntryLogic;

impl EntryLogic {
    pub fn apply<S, R, G>(
        store: &mut S,
        registry: &R,
        rng: &mut G,
        op: &OperatorContext,
        req: EntryRequest,
    ) -> AppResult<Punch>
    where
        S: PunchStore + ?Sized,
        R: Registry + ?Sized,
        G: Rng + ?Sized,
    {
        let worker_id = required(req.worker_id, "worker")?;
        let site_id = required(req.site_id, "site")?;
        let sector_id = required(req.sector_id, "sector")?;
        let timestamp = req
            .timestamp
            .ok_or_else(|| AppError::Validation("missing required field 'timestamp'".into()))?;

        let (worker, site, sector) = resolve(registry, &worker_id, &site_id, &sector_id)?;

        // codes of open entries are reserved until their exit is recorded
        let punches = store.list_punches()?;
        let open_codes: HashSet<&str> = punches
            .iter()
            .filter(|p| p.is_entry() && p.status.is_open())
            .map(|p| p.code.as_str())
            .collect();
        let code = generate_free_code(rng, &open_codes, op.code_attempts)?;

        let entry = Punch::new_entry(code, &worker, &site, &sector, timestamp, &op.validator);
        store.save_punch(&entry)?;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{at, entry_at, registry};
    use crate::models::punch_kind::{PunchKind, PunchStatus};
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn request() -> EntryRequest {
        EntryRequest {
            worker_id: Some("W1".into()),
            site_id: Some("H1".into()),
            sector_id: Some("S1".into()),
            timestamp: Some(at("2024-01-01T08:00")),
        }
    }

    #[test]
    fn creates_open_entry_with_denormalized_labels() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let op = OperatorContext::new("supervisor", 16);

        let p = EntryLogic::apply(&mut store, &registry(), &mut rng, &op, request()).unwrap();

        assert_eq!(p.kind, PunchKind::Entry);
        assert_eq!(p.status, PunchStatus::Open);
        assert_eq!(p.worker_name, "ANA SOUZA");
        assert_eq!(p.location, "HOSPITAL CENTRAL - UTI");
        assert_eq!(p.validator, "supervisor");
        assert!(p.manual);
        assert!(p.related_id.is_none());
        assert_eq!(p.code.len(), 6);
        assert_eq!(store.list_punches().unwrap(), vec![p]);
    }

    #[test]
    fn each_missing_field_is_a_validation_error() {
        let op = OperatorContext::new("admin", 16);
        let cases = [
            EntryRequest { worker_id: None, ..request() },
            EntryRequest { site_id: Some(" ".into()), ..request() },
            EntryRequest { sector_id: None, ..request() },
            EntryRequest { timestamp: None, ..request() },
        ];

        for req in cases {
            let mut store = MemoryStore::new();
            let mut rng = StdRng::seed_from_u64(3);
            let err = EntryLogic::apply(&mut store, &registry(), &mut rng, &op, req).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
            assert_eq!(store.writes(), 0);
        }
    }

    #[test]
    fn unknown_sector_is_not_found() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let op = OperatorContext::new("admin", 16);
        let req = EntryRequest {
            sector_id: Some("S9".into()),
            ..request()
        };

        let err = EntryLogic::apply(&mut store, &registry(), &mut rng, &op, req).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn fresh_code_avoids_codes_of_open_entries() {
        let mut probe = StdRng::seed_from_u64(11);
        let taken = crate::core::code::generate_code(&mut probe);

        let mut store = MemoryStore::with_punches(vec![entry_at(
            "e0",
            &taken,
            "W2",
            "2024-01-01T07:00",
        )]);
        let mut rng = StdRng::seed_from_u64(11);
        let op = OperatorContext::new("admin", 16);

        let p = EntryLogic::apply(&mut store, &registry(), &mut rng, &op, request()).unwrap();
        assert_ne!(p.code, taken);
    }
}
