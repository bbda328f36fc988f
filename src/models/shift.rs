use super::punch::Punch;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// Derived status of a shift row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    /// Entry without a matching exit.
    Open,
    /// Entry paired with its exit.
    Closed,
    /// Exit whose entry is deleted or outside the current view.
    ClosedNoEntry,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Open => "OPEN",
            ShiftStatus::Closed => "CLOSED",
            ShiftStatus::ClosedNoEntry => "CLOSED_NO_ENTRY",
        }
    }
}

/// One work cycle as shown in reports. Never persisted.
///
/// Built only through [`Shift::from_entry`] and [`Shift::orphan`], so a row
/// always holds at least one punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    entry: Option<Punch>,
    exit: Option<Punch>,
    status: ShiftStatus,
}

impl Shift {
    pub fn from_entry(entry: Punch, exit: Option<Punch>) -> Self {
        let status = if exit.is_some() {
            ShiftStatus::Closed
        } else {
            ShiftStatus::Open
        };
        Self {
            entry: Some(entry),
            exit,
            status,
        }
    }

    pub fn orphan(exit: Punch) -> Self {
        Self {
            entry: None,
            exit: Some(exit),
            status: ShiftStatus::ClosedNoEntry,
        }
    }

    pub fn entry(&self) -> Option<&Punch> {
        self.entry.as_ref()
    }

    pub fn exit(&self) -> Option<&Punch> {
        self.exit.as_ref()
    }

    pub fn status(&self) -> ShiftStatus {
        self.status
    }

    /// The punch representing the row: the entry if present, else the exit.
    pub fn head(&self) -> &Punch {
        match (&self.entry, &self.exit) {
            (Some(e), _) => e,
            (None, Some(x)) => x,
            (None, None) => unreachable!("shift rows always hold a punch"),
        }
    }

    /// Row identifier: entry id, or the exit id for orphans.
    pub fn row_id(&self) -> &str {
        &self.head().id
    }

    /// Instant used to order rows.
    pub fn anchor(&self) -> DateTime<Local> {
        self.head().timestamp
    }

    pub fn date(&self) -> NaiveDate {
        self.head().date()
    }

    pub fn worker_name(&self) -> &str {
        &self.head().worker_name
    }

    pub fn location(&self) -> &str {
        &self.head().location
    }

    pub fn code(&self) -> &str {
        &self.head().code
    }

    /// Minutes between entry and exit; `None` unless both halves are present.
    pub fn worked_minutes(&self) -> Option<i64> {
        match (&self.entry, &self.exit) {
            (Some(e), Some(x)) => Some((x.timestamp - e.timestamp).num_minutes()),
            _ => None,
        }
    }
}
