use serde::Serialize;

/// Direction of a punch: clock-in or clock-out.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchKind {
    Entry,
    Exit,
}

impl PunchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchKind::Entry => "ENTRY",
            PunchKind::Exit => "EXIT",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::Entry => "entry",
            PunchKind::Exit => "exit",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(PunchKind::Entry),
            "exit" => Some(PunchKind::Exit),
            _ => None,
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, PunchKind::Entry)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, PunchKind::Exit)
    }
}

/// Lifecycle state of an ENTRY punch. EXIT punches are always stored as `Closed`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchStatus {
    Open,
    Closed,
}

impl PunchStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchStatus::Open => "open",
            PunchStatus::Closed => "closed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(PunchStatus::Open),
            "closed" => Some(PunchStatus::Closed),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PunchStatus::Open)
    }
}
