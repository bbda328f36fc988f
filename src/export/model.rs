// src/export/model.rs

use crate::models::punch::Punch;
use crate::models::shift::Shift;
use serde::Serialize;

/// Flat shift row, one per paired/open/orphan shift.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ShiftExport {
    pub row_id: String,
    pub code: String,
    pub worker_id: String,
    pub worker: String,
    pub location: String,
    pub date: String,
    pub entry_time: String,
    pub exit_time: String,
    pub status: String,
    pub worked_minutes: Option<i64>,
}

impl From<&Shift> for ShiftExport {
    fn from(s: &Shift) -> Self {
        let head = s.head();
        Self {
            row_id: s.row_id().to_string(),
            code: s.code().to_string(),
            worker_id: head.worker_id.clone(),
            worker: s.worker_name().to_string(),
            location: s.location().to_string(),
            date: s.date().format("%Y-%m-%d").to_string(),
            entry_time: s.entry().map(Punch::time_str).unwrap_or_default(),
            exit_time: s.exit().map(Punch::time_str).unwrap_or_default(),
            status: s.status().as_str().to_string(),
            worked_minutes: s.worked_minutes(),
        }
    }
}

/// Flat raw punch, for `--events` exports.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PunchExport {
    pub id: String,
    pub kind: String,
    pub code: String,
    pub worker_id: String,
    pub worker: String,
    pub timestamp: String,
    pub site_id: String,
    pub sector_id: String,
    pub location: String,
    pub status: String,
    pub related_id: String,
    pub manual: bool,
    pub validator: String,
}

impl From<&Punch> for PunchExport {
    fn from(p: &Punch) -> Self {
        Self {
            id: p.id.clone(),
            kind: p.kind.as_str().to_string(),
            code: p.code.clone(),
            worker_id: p.worker_id.clone(),
            worker: p.worker_name.clone(),
            timestamp: p.timestamp.to_rfc3339(),
            site_id: p.site_id.clone(),
            sector_id: p.sector_id.clone(),
            location: p.location.clone(),
            status: p.status.to_db_str().to_string(),
            related_id: p.related_id.clone().unwrap_or_default(),
            manual: p.manual,
            validator: p.validator.clone(),
        }
    }
}
