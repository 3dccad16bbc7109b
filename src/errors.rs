use std::result::Result as StdResult;

use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::BuildingKind;

/// Unified error type for the catalog, ledger, state and storage layers.
///
/// Every validation variant is raised before any mutation happens, so a
/// rejected operation leaves both memory and disk untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EconomyError {
    #[error("Invalid size {size:?} for {kind}")]
    InvalidSize {
        kind: BuildingKind,
        size: Option<u32>,
    },
    #[error("Unknown building type `{input}`{}", suggestion_suffix(.suggestion))]
    UnknownBuildingKind {
        input: String,
        suggestion: Option<String>,
    },
    #[error("Region `{0}` already exists")]
    DuplicateRegionName(String),
    #[error("Invalid region name `{0}`")]
    InvalidRegionName(String),
    #[error("Region not found: {0}")]
    UnknownRegion(String),
    #[error("Only {available} matching buildings available, cannot sell {requested}")]
    InsufficientBuildings { requested: u32, available: u32 },
    #[error("Cannot advance to {target}: it is past today ({today})")]
    FutureDate { target: NaiveDate, today: NaiveDate },
    #[error("Income for {0} has already been paid")]
    AlreadyPaid(NaiveDate),
    #[error("Day delta must not be negative (got {0})")]
    InvalidDelta(i64),
    #[error("Loan payment must be a positive amount (got {0})")]
    InsufficientLoanPayment(f64),
    #[error("Loan #{0} is missing from the loan book")]
    MissingLoan(usize),
    #[error("Transaction #{index} is a {kind} transaction and cannot be deleted")]
    ProtectedTransaction { index: usize, kind: &'static str },
    #[error("Transaction not found: #{0}")]
    TransactionNotFound(usize),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EconomyError {
    /// True for errors that signal state corruption or data loss rather than a
    /// rejected user action.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EconomyError::MissingLoan(_) | EconomyError::Storage(_))
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{name}`?)"),
        None => String::new(),
    }
}

pub type Result<T> = StdResult<T, EconomyError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EconomyError),
    #[error("Terminal input failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for EconomyError {
    fn from(err: std::io::Error) -> Self {
        EconomyError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for EconomyError {
    fn from(err: serde_json::Error) -> Self {
        EconomyError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_fatal_storage_errors() {
        let err: EconomyError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(matches!(err, EconomyError::Storage(ref message) if message.contains("disk full")));
        assert!(err.is_fatal());
    }

    #[test]
    fn unknown_kind_message_includes_suggestion() {
        let err = EconomyError::UnknownBuildingKind {
            input: "hospitl".into(),
            suggestion: Some("hospital".into()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown building type `hospitl` (did you mean `hospital`?)"
        );
        assert!(!err.is_fatal());
    }
}
