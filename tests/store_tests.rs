use chrono::{Local, NaiveDate, NaiveTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shiftlink::core::OperatorContext;
use shiftlink::core::del::DeleteLogic;
use shiftlink::core::entry::{EntryLogic, EntryRequest};
use shiftlink::core::exit::{ExitLogic, ExitRequest};
use shiftlink::core::filter::ShiftFilter;
use shiftlink::core::registry::{NewWorker, RegistryLogic};
use shiftlink::core::report::ShiftReport;
use shiftlink::db::initialize::init_db;
use shiftlink::db::log::audit;
use shiftlink::db::pool::DbPool;
use shiftlink::db::queries::{load_log, load_punch, load_punches};
use shiftlink::errors::{AppError, AppResult};
use shiftlink::models::punch::Punch;
use shiftlink::models::punch_kind::PunchStatus;
use shiftlink::models::shift::ShiftStatus;
use shiftlink::store::{PunchStore, Registry, SqliteRegistry, SqliteStore};
use shiftlink::utils::date::local_datetime;

fn at(date: &str, time: &str) -> chrono::DateTime<Local> {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let t = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
    local_datetime(d, t).unwrap()
}

fn seeded_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).expect("migrations");

    for (id, name, cpf) in [("W1", "Ana Souza", "111"), ("W2", "João Lima", "222")] {
        RegistryLogic::add_worker(
            &pool.conn,
            NewWorker {
                id: Some(id.into()),
                name: Some(name.into()),
                cpf: Some(cpf.into()),
                ..Default::default()
            },
        )
        .unwrap();
    }
    RegistryLogic::add_site(&pool.conn, Some("H1".into()), Some("HOSPITAL CENTRAL".into()))
        .unwrap();
    RegistryLogic::add_sector(&pool.conn, "H1", Some("S1".into()), Some("UTI".into())).unwrap();
    pool
}

fn entry_req(worker: &str, date: &str, time: &str) -> EntryRequest {
    EntryRequest {
        worker_id: Some(worker.into()),
        site_id: Some("H1".into()),
        sector_id: Some("S1".into()),
        timestamp: Some(at(date, time)),
    }
}

fn exit_req(worker: &str, code: &str, date: &str, time: &str) -> ExitRequest {
    ExitRequest {
        worker_id: Some(worker.into()),
        code: Some(code.into()),
        site_id: Some("H1".into()),
        sector_id: Some("S1".into()),
        timestamp: Some(at(date, time)),
    }
}

/// One operator working against a SQLite-backed store.
struct Desk<'c> {
    store: SqliteStore<'c>,
    registry: SqliteRegistry<'c>,
    op: OperatorContext,
    rng: StdRng,
}

impl<'c> Desk<'c> {
    fn new(pool: &'c DbPool, validator: &str, seed: u64) -> Self {
        Desk {
            store: SqliteStore::new(&pool.conn),
            registry: SqliteRegistry::new(&pool.conn),
            op: OperatorContext::new(validator, 16),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn entry(&mut self, worker: &str, date: &str, time: &str) -> AppResult<Punch> {
        let req = entry_req(worker, date, time);
        EntryLogic::apply(&mut self.store, &self.registry, &mut self.rng, &self.op, req)
    }

    fn exit(&mut self, worker: &str, code: &str, date: &str, time: &str) -> AppResult<Punch> {
        let req = exit_req(worker, code, date, time);
        ExitLogic::apply(&mut self.store, &self.registry, &self.op, req)
    }
}

#[test]
fn full_cycle_on_sqlite() {
    let pool = seeded_pool();
    let mut desk = Desk::new(&pool, "enf.chefe", 7);

    let entry = desk.entry("W1", "2024-01-01", "08:00").unwrap();
    assert_eq!(entry.validator, "enf.chefe");
    assert!(entry.manual);

    let exit = desk.exit("W1", &entry.code, "2024-01-01", "16:00").unwrap();

    let stored_entry = load_punch(&pool.conn, &entry.id).unwrap().unwrap();
    assert_eq!(stored_entry.status, PunchStatus::Closed);
    let stored_exit = load_punch(&pool.conn, &exit.id).unwrap().unwrap();
    assert_eq!(stored_exit.related_id.as_deref(), Some(entry.id.as_str()));
    assert_eq!(stored_exit.timestamp, at("2024-01-01", "16:00"));

    let report = ShiftReport::build(&desk.store, &ShiftFilter::default()).unwrap();
    assert_eq!(report.shifts.len(), 1);
    assert_eq!(report.shifts[0].status(), ShiftStatus::Closed);
    assert_eq!(report.totals.worked_minutes, 480);
}

#[test]
fn closing_an_entry_closed_behind_our_back_is_conflict_and_rolls_back() {
    let pool = seeded_pool();
    let mut desk = Desk::new(&pool, "admin", 11);

    let entry = desk.entry("W1", "2024-01-01", "08:00").unwrap();

    // another operator closed it after we read it as open
    pool.conn
        .execute("UPDATE punches SET status = 'closed' WHERE id = ?1", [&entry.id])
        .unwrap();

    let mut closed = entry.clone();
    closed.status = PunchStatus::Closed;
    let registry_worker = Registry::list_workers(&desk.registry).unwrap();
    let sites = Registry::list_sites(&desk.registry).unwrap();
    let w = registry_worker.iter().find(|w| w.id == "W1").unwrap();
    let exit = Punch::new_exit(
        &entry,
        w,
        &sites[0],
        &sites[0].sectors[0],
        at("2024-01-01", "16:00"),
        "admin",
    );

    let err = desk.store.save_exit_closing_entry(&exit, &closed).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(load_punch(&pool.conn, &exit.id).unwrap().is_none());
    assert_eq!(desk.store.list_punches().unwrap().len(), 1);
}

#[test]
fn delete_entry_cascades_in_one_transaction() {
    let pool = seeded_pool();
    let mut desk = Desk::new(&pool, "admin", 3);

    let e1 = desk.entry("W1", "2024-01-01", "08:00").unwrap();
    desk.exit("W1", &e1.code, "2024-01-01", "16:00").unwrap();
    let e2 = desk.entry("W2", "2024-01-02", "08:00").unwrap();

    let removed = DeleteLogic::apply(&mut desk.store, &e1.id).unwrap();
    assert_eq!(removed.len(), 2);

    let left = desk.store.list_punches().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, e2.id);
}

#[test]
fn deleting_the_exit_leaves_an_orphaned_closed_entry() {
    let pool = seeded_pool();
    let mut desk = Desk::new(&pool, "admin", 5);

    let e = desk.entry("W1", "2024-01-01", "08:00").unwrap();
    let x = desk.exit("W1", &e.code, "2024-01-01", "16:00").unwrap();

    DeleteLogic::apply(&mut desk.store, &x.id).unwrap();

    // stays closed, so a new exit with the same code is refused
    let err = desk.exit("W1", &e.code, "2024-01-01", "17:00").unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let report = ShiftReport::build(&desk.store, &ShiftFilter::default()).unwrap();
    assert_eq!(report.shifts[0].status(), ShiftStatus::Open);
}

#[test]
fn exit_stamped_before_its_entry_is_stored() {
    let pool = seeded_pool();
    let mut desk = Desk::new(&pool, "admin", 13);

    let e = desk.entry("W1", "2024-01-01", "16:00").unwrap();
    let x = desk.exit("W1", &e.code, "2024-01-01", "08:00").unwrap();

    let stored = load_punch(&pool.conn, &x.id).unwrap().unwrap();
    assert_eq!(stored.related_id.as_deref(), Some(e.id.as_str()));
    let entry = load_punch(&pool.conn, &e.id).unwrap().unwrap();
    assert_eq!(entry.status, PunchStatus::Closed);
}

#[test]
fn punches_load_in_instant_order_across_offsets() {
    let pool = seeded_pool();

    // 01:30-04:00 is 05:30Z and 01:10-05:00 is 06:10Z: text order is the reverse
    for (id, ts) in [
        ("later", "2024-11-03T01:10:00-05:00"),
        ("earlier", "2024-11-03T01:30:00-04:00"),
    ] {
        pool.conn
            .execute(
                "INSERT INTO punches (id, code, worker_id, timestamp, kind, site_id, sector_id,
                                      created_at)
                 VALUES (?1, '123456', 'W1', ?2, 'entry', 'H1', 'S1', ?2)",
                [id, ts],
            )
            .unwrap();
    }

    let ids: Vec<String> = load_punches(&pool.conn).unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["earlier", "later"]);
}

#[test]
fn audit_rows_are_readable_back() {
    let pool = seeded_pool();
    audit(&pool.conn, "entry", "abc", "Ana at HOSPITAL CENTRAL - UTI");

    let rows = load_log(&pool.conn).unwrap();
    assert!(rows.iter().any(|(_, msg)| msg == "Ana at HOSPITAL CENTRAL - UTI"));
}
