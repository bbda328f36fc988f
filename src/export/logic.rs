// src/export/logic.rs

use crate::core::filter::ShiftFilter;
use crate::core::report::ShiftReport;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{PunchExport, ShiftExport};
use crate::store::{PunchStore, SqliteStore};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

/// High level export of shift rows or raw punches.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the filtered view to `file`.
    ///
    /// - `events == false`: one row per shift, newest first (same rows as `list`)
    /// - `events == true`: raw punches passing the filter, in time order
    ///
    /// Returns the number of rows written; nothing is written for an empty view.
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        filter: &ShiftFilter,
        events: bool,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let store = SqliteStore::new(&pool.conn);

        let written = if events {
            let rows: Vec<PunchExport> = filter
                .apply(&store.list_punches()?)
                .iter()
                .map(PunchExport::from)
                .collect();
            write_rows(&rows, format, &path, force)?
        } else {
            let report = ShiftReport::build(&store, filter)?;
            let rows: Vec<ShiftExport> = report.shifts.iter().map(ShiftExport::from).collect();
            write_rows(&rows, format, &path, force)?
        };

        if written > 0 {
            audit(
                &pool.conn,
                "export",
                &path.to_string_lossy(),
                &format!("{} rows exported as {}", written, format.as_str()),
            );
        }

        Ok(written)
    }
}

fn write_rows<T: serde::Serialize>(
    rows: &[T],
    format: ExportFormat,
    path: &std::path::Path,
    force: bool,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No shifts found for the selected filters.");
        return Ok(0);
    }

    ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }

    Ok(rows.len())
}
