use crate::cli::commands::{filter_from, open_db, separator};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ShiftReport;
use crate::errors::AppResult;
use crate::models::punch::Punch;
use crate::store::{PunchStore, SqliteStore};
use crate::ui::messages::info;
use crate::utils::colors::{RESET, color_for_status, colorize_in_out};
use crate::utils::formatting::{mins2readable, short_id};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, events } = cmd {
        let filter = filter_from(filter)?;
        let pool = open_db(cfg)?;
        let store = SqliteStore::new(&pool.conn);

        if *events {
            let punches = filter.apply(&store.list_punches()?);
            if punches.is_empty() {
                info("No punches match the selected filters.");
            } else {
                print_events(&punches, separator(cfg));
            }
            return Ok(());
        }

        let report = ShiftReport::build(&store, &filter)?;
        if report.is_empty() {
            if filter.is_empty() {
                info("No shifts recorded yet.");
            } else {
                info("No shifts match the selected filters.");
            }
            return Ok(());
        }
        print_report(&report, separator(cfg));
    }
    Ok(())
}

fn print_report(report: &ShiftReport, sep: char) {
    let mut table = Table::new(vec![
        Column::new("ID", 8),
        Column::new("DATE", 10),
        Column::new("WORKER", 24),
        Column::new("LOCATION", 32),
        Column::new("IN", 5),
        Column::new("OUT", 5),
        Column::new("STATUS", 15),
        Column::new("CODE", 6),
    ]);

    for s in &report.shifts {
        let entry_time = s.entry().map(Punch::time_str).unwrap_or_else(|| "--:--".into());
        let exit_time = s.exit().map(Punch::time_str).unwrap_or_else(|| "--:--".into());
        let status = s.status();

        table.add_row(vec![
            short_id(s.row_id()).to_string(),
            s.date().format("%Y-%m-%d").to_string(),
            s.worker_name().to_string(),
            s.location().to_string(),
            colorize_in_out(&entry_time, true),
            colorize_in_out(&exit_time, false),
            format!("{}{}{}", color_for_status(status), status.as_str(), RESET),
            s.code().to_string(),
        ]);
    }

    println!("{}", table.render(sep));

    let t = &report.totals;
    println!(
        "Shifts: {}  Open: {}  Closed: {}  No entry: {}  Worked: {}",
        report.shifts.len(),
        t.open,
        t.closed,
        t.orphans,
        mins2readable(t.worked_minutes, false, false)
    );
}

fn print_events(punches: &[Punch], sep: char) {
    let mut table = Table::new(vec![
        Column::new("ID", 8),
        Column::new("KIND", 5),
        Column::new("DATE", 10),
        Column::new("TIME", 5),
        Column::new("WORKER", 24),
        Column::new("LOCATION", 32),
        Column::new("CODE", 6),
        Column::new("STATUS", 6),
        Column::new("ENTRY", 8),
    ]);

    for p in punches {
        table.add_row(vec![
            short_id(&p.id).to_string(),
            p.kind.as_str().to_string(),
            p.date_str(),
            colorize_in_out(&p.time_str(), p.is_entry()),
            p.worker_name.clone(),
            p.location.clone(),
            p.code.clone(),
            p.status.to_db_str().to_string(),
            p.related_id.as_deref().map(short_id).unwrap_or("").to_string(),
        ]);
    }

    println!("{}", table.render(sep));
}
