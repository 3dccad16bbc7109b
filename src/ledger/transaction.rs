use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::economy::Building;

pub const OVERDRAFT_COMMENT: &str = "Overdraft interest";

/// A balance-affecting ledger entry, immutable once posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub timestamp: NaiveDate,
    #[serde(flatten)]
    pub kind: TransactionKind,
}

/// Payload per transaction type. Purchases and sales carry the buildings
/// themselves; their amount is always derived from those buildings' costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Manual { amount: f64, comment: String },
    Buy { buildings: Vec<Building> },
    Sell { buildings: Vec<Building> },
    Income { amount: f64 },
    GivenLoan { amount: f64, borrower: String },
    TakenLoan { amount: f64, lender: String },
    /// Repayment towards a taken loan; `amount` is the positive sum paid.
    LoanPayment { amount: f64, lender: String },
    /// Interest charged on a negative balance; `amount` is already signed.
    Overdraft { amount: f64 },
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Manual { .. } => "manual",
            TransactionKind::Buy { .. } => "buy",
            TransactionKind::Sell { .. } => "sell",
            TransactionKind::Income { .. } => "income",
            TransactionKind::GivenLoan { .. } => "given loan",
            TransactionKind::TakenLoan { .. } => "taken loan",
            TransactionKind::LoanPayment { .. } => "loan payment",
            TransactionKind::Overdraft { .. } => "overdraft",
        }
    }
}

impl Transaction {
    pub fn manual(timestamp: NaiveDate, amount: f64, comment: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::Manual {
                amount,
                comment: comment.into(),
            },
        }
    }

    pub fn buy(timestamp: NaiveDate, buildings: Vec<Building>) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::Buy { buildings },
        }
    }

    pub fn sell(timestamp: NaiveDate, buildings: Vec<Building>) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::Sell { buildings },
        }
    }

    pub fn income(timestamp: NaiveDate, amount: f64) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::Income { amount },
        }
    }

    pub fn given_loan(timestamp: NaiveDate, amount: f64, borrower: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::GivenLoan {
                amount,
                borrower: borrower.into(),
            },
        }
    }

    pub fn taken_loan(timestamp: NaiveDate, amount: f64, lender: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::TakenLoan {
                amount,
                lender: lender.into(),
            },
        }
    }

    pub fn loan_payment(timestamp: NaiveDate, amount: f64, lender: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::LoanPayment {
                amount,
                lender: lender.into(),
            },
        }
    }

    pub fn overdraft(timestamp: NaiveDate, amount: f64) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::Overdraft { amount },
        }
    }

    /// Signed effect on the balance.
    pub fn amount(&self) -> f64 {
        match &self.kind {
            TransactionKind::Manual { amount, .. }
            | TransactionKind::Income { amount }
            | TransactionKind::Overdraft { amount }
            | TransactionKind::TakenLoan { amount, .. } => *amount,
            TransactionKind::GivenLoan { amount, .. }
            | TransactionKind::LoanPayment { amount, .. } => -amount,
            TransactionKind::Buy { buildings } => -buildings.iter().map(Building::cost).sum::<f64>(),
            TransactionKind::Sell { buildings } => buildings.iter().map(Building::cost).sum(),
        }
    }

    /// Human readable description, derived from the payload at display time.
    pub fn comment(&self) -> String {
        match &self.kind {
            TransactionKind::Manual { comment, .. } => comment.clone(),
            TransactionKind::Income { .. } => "Income".to_string(),
            TransactionKind::TakenLoan { lender, .. } => format!("Loan from {lender}"),
            TransactionKind::GivenLoan { borrower, .. } => format!("Loan to {borrower}"),
            TransactionKind::LoanPayment { lender, .. } => format!("Loan payment to {lender}"),
            TransactionKind::Overdraft { .. } => OVERDRAFT_COMMENT.to_string(),
            TransactionKind::Buy { buildings } => describe("Bought", buildings),
            TransactionKind::Sell { buildings } => describe("Sold", buildings),
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.kind, TransactionKind::Manual { .. })
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income { .. })
    }
}

fn describe(verb: &str, buildings: &[Building]) -> String {
    match buildings.first() {
        Some(first) => format!("{verb} {}x {}", buildings.len(), first.name()),
        None => format!("{verb} nothing"),
    }
}
