//! Unified application error type.
//! The workflow (core), the stores (db/store) and the CLI all return AppError
//! so a failed command always ends in the same `Error: ...` line.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    /// A required field is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A code, punch, worker, site or sector lookup found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request clashes with the current state (e.g. closing a closed entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The linking code belongs to a different worker.
    #[error("Ownership error: {0}")]
    Ownership(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
