use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::{Ledger, LoanBook, Transaction};

use super::region::RegionStore;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The persisted economy document: everything needed to rebuild the state,
/// and the unit written to the primary file and to every dated backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyData {
    #[serde(default)]
    pub regions: RegionStore,
    #[serde(default)]
    pub transactions: Ledger,
    pub current_day: NaiveDate,
    #[serde(default)]
    pub loans: LoanBook,
    #[serde(default = "EconomyData::schema_version_default")]
    pub schema_version: u8,
}

impl EconomyData {
    /// Fresh economy with a single seed transaction holding the initial balance.
    pub fn seeded(start: NaiveDate, initial_balance: f64) -> Self {
        let mut transactions = Ledger::new();
        transactions.append(Transaction::manual(start, initial_balance, "Initial balance"));
        Self {
            regions: RegionStore::new(),
            transactions,
            current_day: start,
            loans: LoanBook::new(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn total_balance(&self) -> f64 {
        self.transactions.total_balance()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
