use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkerStatus {
    Active,
    Inactive,
}

impl WorkerStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkerStatus::Active => "active",
            WorkerStatus::Inactive => "inactive",
        }
    }

    /// Unknown or empty values (rows from older schemas) count as active.
    pub fn from_db_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "inactive" => WorkerStatus::Inactive,
            _ => WorkerStatus::Active,
        }
    }
}

/// A registered cooperative member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub cpf: String,
    pub matricula: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    pub status: WorkerStatus,
    pub updated_at: String,
}

impl Worker {
    /// Case-insensitive match on name or registration number.
    pub fn matches_search(&self, term: &str) -> bool {
        let t = term.to_lowercase();
        self.name.to_lowercase().contains(&t) || self.matricula.to_lowercase().contains(&t)
    }
}
