use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{EconomyError, Result};

use super::transaction::Transaction;

/// Append-only transaction log. The balance is always recomputed from the
/// entries, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, transaction: Transaction) -> usize {
        self.transactions.push(transaction);
        self.transactions.len() - 1
    }

    /// Removes a manual entry. Derived entries are protected because removing
    /// them would leave buildings, income or loans out of sync with the log.
    pub fn remove_manual(&mut self, index: usize) -> Result<Transaction> {
        let txn = self
            .transactions
            .get(index)
            .ok_or(EconomyError::TransactionNotFound(index))?;
        if !txn.is_manual() {
            return Err(EconomyError::ProtectedTransaction {
                index,
                kind: txn.kind.label(),
            });
        }
        Ok(self.transactions.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Balance after the first `index + 1` transactions.
    pub fn balance_as_of(&self, index: usize) -> f64 {
        self.transactions
            .iter()
            .take(index.saturating_add(1))
            .map(Transaction::amount)
            .sum()
    }

    pub fn total_balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    pub fn has_income_on(&self, day: NaiveDate) -> bool {
        self.transactions
            .iter()
            .rev()
            .any(|txn| txn.is_income() && txn.timestamp == day)
    }

    /// Money spent on `day`, as a positive number.
    pub fn expenditure_on(&self, day: NaiveDate) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.timestamp == day)
            .map(Transaction::amount)
            .filter(|amount| *amount < 0.0)
            .map(|amount| -amount)
            .sum()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
