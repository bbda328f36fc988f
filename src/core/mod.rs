//! Shift reconciliation engine and the commands built on it.

pub mod backup;
pub mod code;
pub mod config;
pub mod del;
pub mod entry;
pub mod exit;
pub mod filter;
pub mod log;
pub mod normalize;
pub mod pairing;
pub mod registry;
pub mod report;
pub mod resolve;

#[cfg(test)]
pub(crate) mod fixtures;

/// Who is recording punches, and how hard to try for a free linking code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorContext {
    pub validator: String,
    pub code_attempts: usize,
}

impl OperatorContext {
    pub fn new(validator: &str, code_attempts: usize) -> Self {
        Self {
            validator: validator.to_string(),
            code_attempts,
        }
    }
}
