use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::{DateTime, Local, NaiveDate};
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COUNTS
    //
    let count = |sql: &str| -> rusqlite::Result<i64> { pool.conn.query_row(sql, [], |r| r.get(0)) };

    let punches = count("SELECT COUNT(*) FROM punches")?;
    let open = count("SELECT COUNT(*) FROM punches WHERE kind = 'entry' AND status = 'open'")?;
    let orphans = count(
        "SELECT COUNT(*) FROM punches x
         WHERE x.kind = 'exit'
           AND NOT EXISTS (SELECT 1 FROM punches e WHERE e.id = x.related_id)",
    )?;
    let workers = count("SELECT COUNT(*) FROM workers")?;
    let sites = count("SELECT COUNT(*) FROM sites")?;

    println!("{}• Total punches:{} {}{}{}", CYAN, RESET, GREEN, punches, RESET);
    println!("{}• Open entries:{} {}", CYAN, RESET, open);
    println!("{}• Exits without entry:{} {}", CYAN, RESET, orphans);
    println!("{}• Workers:{} {}  {}• Sites:{} {}", CYAN, RESET, workers, CYAN, RESET, sites);

    //
    // 3) DATE RANGE
    //
    let mut stmt = pool.conn.prepare("SELECT timestamp FROM punches")?;
    let mut dates: Vec<NaiveDate> = Vec::new();
    for ts in stmt.query_map([], |row| row.get::<_, String>(0))? {
        let ts = ts?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&ts) {
            dates.push(dt.with_timezone(&Local).date_naive());
        }
    }
    let first_date = dates.iter().min().copied();
    let last_date = dates.iter().max().copied();

    let fmt_first = first_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE PUNCHES/DAY
    //
    if let (Some(d1), Some(d2)) = (first_date, last_date) {
        let days = (d2 - d1).num_days().max(1);

        let avg = punches as f64 / days as f64;
        println!("{}• Average punches/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
