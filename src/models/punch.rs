use super::punch_kind::{PunchKind, PunchStatus};
use super::site::{Sector, Site};
use super::worker::Worker;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

/// One raw clock-in or clock-out record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Punch {
    pub id: String,                 // ⇔ punches.id (TEXT, UUID v4)
    pub code: String,               // ⇔ punches.code (6-digit linking token)
    pub worker_id: String,          // ⇔ punches.worker_id
    pub worker_name: String,        // ⇔ punches.worker_name (denormalized)
    pub timestamp: DateTime<Local>, // ⇔ punches.timestamp (TEXT, RFC 3339)
    pub kind: PunchKind,            // ⇔ punches.kind ('entry' | 'exit')
    pub site_id: String,            // ⇔ punches.site_id
    pub sector_id: String,          // ⇔ punches.sector_id
    pub location: String,           // ⇔ punches.location ("<site> - <sector>")
    pub manual: bool,               // ⇔ punches.manual (INT 0/1)
    pub status: PunchStatus,        // ⇔ punches.status ('open' | 'closed')
    pub related_id: Option<String>, // ⇔ punches.related_id (EXIT only)
    pub validator: String,          // ⇔ punches.validator
}

impl Punch {
    /// Build a hand-entered ENTRY punch, OPEN until its EXIT is recorded.
    pub fn new_entry(
        code: String,
        worker: &Worker,
        site: &Site,
        sector: &Sector,
        timestamp: DateTime<Local>,
        validator: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code,
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            timestamp,
            kind: PunchKind::Entry,
            site_id: site.id.clone(),
            sector_id: sector.id.clone(),
            location: location_label(site, sector),
            manual: true,
            status: PunchStatus::Open,
            related_id: None,
            validator: validator.to_string(),
        }
    }

    /// Build the EXIT punch closing `entry`. Code and back-reference come from the entry.
    pub fn new_exit(
        entry: &Punch,
        worker: &Worker,
        site: &Site,
        sector: &Sector,
        timestamp: DateTime<Local>,
        validator: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code: entry.code.clone(),
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            timestamp,
            kind: PunchKind::Exit,
            site_id: site.id.clone(),
            sector_id: sector.id.clone(),
            location: location_label(site, sector),
            manual: true,
            status: PunchStatus::Closed,
            related_id: Some(entry.id.clone()),
            validator: validator.to_string(),
        }
    }

    /// Calendar date of the punch in local time.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn date_str(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn is_entry(&self) -> bool {
        self.kind.is_entry()
    }

    pub fn is_exit(&self) -> bool {
        self.kind.is_exit()
    }

    /// True when this is an EXIT pointing back at `entry_id`.
    pub fn closes(&self, entry_id: &str) -> bool {
        self.is_exit() && self.related_id.as_deref() == Some(entry_id)
    }
}

/// Display label stored alongside each punch.
pub fn location_label(site: &Site, sector: &Sector) -> String {
    format!("{} - {}", site.name, sector.name)
}
