use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{EconomyError, Result};

/// Principal below which a loan counts as repaid.
pub const SETTLED_THRESHOLD: f64 = 0.01;

/// Lender whose settled loans produce no summary notice.
pub const UN_LENDER: &str = "UN";

/// Position of a loan in the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoanId(pub usize);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type LoanRecord = (f64, f64, String, f64);

/// An outstanding loan, persisted as `[principal, rate_percent, lender, paid]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LoanRecord", into = "LoanRecord")]
pub struct Loan {
    pub principal: f64,
    pub rate_percent: f64,
    pub lender: String,
    pub paid_so_far: f64,
}

impl From<LoanRecord> for Loan {
    fn from((principal, rate_percent, lender, paid_so_far): LoanRecord) -> Self {
        Self {
            principal,
            rate_percent,
            lender,
            paid_so_far,
        }
    }
}

impl From<Loan> for LoanRecord {
    fn from(loan: Loan) -> Self {
        (loan.principal, loan.rate_percent, loan.lender, loan.paid_so_far)
    }
}

impl Loan {
    pub fn new(principal: f64, rate_percent: f64, lender: impl Into<String>) -> Self {
        Self {
            principal,
            rate_percent,
            lender: lender.into(),
            paid_so_far: 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.principal < SETTLED_THRESHOLD
    }
}

/// Notice raised when a non-UN loan is paid off.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementNotice {
    pub lender: String,
    pub total_paid: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    /// Amount actually paid, after clamping to the outstanding principal.
    pub paid: f64,
    pub remaining: f64,
    pub settled: bool,
    pub notice: Option<SettlementNotice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanBook {
    loans: Vec<Loan>,
}

impl LoanBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, loan: Loan) -> LoanId {
        self.loans.push(loan);
        LoanId(self.loans.len() - 1)
    }

    pub fn get(&self, id: LoanId) -> Option<&Loan> {
        self.loans.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LoanId, &Loan)> {
        self.loans
            .iter()
            .enumerate()
            .map(|(idx, loan)| (LoanId(idx), loan))
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    pub fn total_outstanding(&self) -> f64 {
        self.loans.iter().map(|loan| loan.principal).sum()
    }

    /// Checks a payment without applying it and returns the clamped amount.
    pub fn validate_payment(&self, id: LoanId, amount: f64) -> Result<f64> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EconomyError::InsufficientLoanPayment(amount));
        }
        let loan = self.get(id).ok_or(EconomyError::MissingLoan(id.0))?;
        Ok(amount.min(loan.principal))
    }

    /// Applies a payment, clamping it so the principal never goes below zero,
    /// and drops the loan once it is settled.
    pub fn pay(&mut self, id: LoanId, amount: f64) -> Result<PaymentOutcome> {
        let paid = self.validate_payment(id, amount)?;
        let loan = self
            .loans
            .get_mut(id.0)
            .ok_or(EconomyError::MissingLoan(id.0))?;
        loan.principal = (loan.principal - paid).max(0.0);
        loan.paid_so_far += paid;

        let remaining = loan.principal;
        if !loan.is_settled() {
            return Ok(PaymentOutcome {
                paid,
                remaining,
                settled: false,
                notice: None,
            });
        }

        let loan = self.loans.remove(id.0);
        let notice = (loan.lender != UN_LENDER).then(|| SettlementNotice {
            lender: loan.lender.clone(),
            total_paid: loan.paid_so_far,
        });
        Ok(PaymentOutcome {
            paid,
            remaining: 0.0,
            settled: true,
            notice,
        })
    }

    /// Compounds one day of interest on every loan.
    pub fn accrue_daily_interest(&mut self) {
        for loan in &mut self.loans {
            loan.principal *= 1.0 + loan.rate_percent / 100.0;
        }
    }
}
