//! Manual ledger entries and the rows shown in transaction listings.

use chrono::NaiveDate;

use crate::currency::{format_date, round_cents, MoneyFormat};
use crate::economy::EconomyData;
use crate::errors::{EconomyError, Result};
use crate::ledger::Transaction;

/// One rendered ledger line.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub index: usize,
    pub amount: String,
    pub date: String,
    pub comment: String,
    pub balance: String,
    pub kind: &'static str,
}

pub struct TransactionService;

impl TransactionService {
    /// Posts a manual entry dated on the current simulated day. Amounts are
    /// rounded to cents.
    pub fn add_manual(data: &mut EconomyData, amount: f64, comment: &str) -> Result<usize> {
        if !amount.is_finite() {
            return Err(EconomyError::InvalidInput(format!(
                "`{amount}` is not a valid amount"
            )));
        }
        let txn = Transaction::manual(data.current_day, round_cents(amount), comment.trim());
        Ok(data.transactions.append(txn))
    }

    /// Deletes a manual entry; every other kind is protected.
    pub fn remove(data: &mut EconomyData, index: usize) -> Result<Transaction> {
        data.transactions.remove_manual(index)
    }

    pub fn rows(data: &EconomyData, money: &MoneyFormat) -> Vec<TransactionRow> {
        let mut running = 0.0;
        data.transactions
            .iter()
            .enumerate()
            .map(|(index, txn)| {
                running += txn.amount();
                TransactionRow {
                    index,
                    amount: money.format(txn.amount()),
                    date: format_date(txn.timestamp),
                    comment: txn.comment(),
                    balance: money.format(running),
                    kind: txn.kind.label(),
                }
            })
            .collect()
    }

    pub fn on_day(data: &EconomyData, day: NaiveDate) -> Vec<&Transaction> {
        data.transactions
            .iter()
            .filter(|txn| txn.timestamp == day)
            .collect()
    }
}
