use crate::economy::EconomyData;
use crate::errors::{EconomyError, Result};
use crate::ledger::{Loan, LoanId, PaymentOutcome, Transaction};

pub struct LoanService;

impl LoanService {
    /// Records money borrowed from `lender` and posts the TakenLoan inflow.
    pub fn take(
        data: &mut EconomyData,
        principal: f64,
        rate_percent: f64,
        lender: &str,
    ) -> Result<LoanId> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(EconomyError::InvalidInput(format!(
                "loan principal must be positive (got {principal})"
            )));
        }
        if !rate_percent.is_finite() || rate_percent < 0.0 {
            return Err(EconomyError::InvalidInput(format!(
                "interest rate must be a non-negative percentage (got {rate_percent})"
            )));
        }
        let lender = lender.trim();
        if lender.is_empty() {
            return Err(EconomyError::InvalidInput("lender name is required".into()));
        }
        let id = data.loans.add(Loan::new(principal, rate_percent, lender));
        data.transactions
            .append(Transaction::taken_loan(data.current_day, principal, lender));
        Ok(id)
    }

    /// Posts money lent to someone else as a GivenLoan outflow.
    pub fn give(data: &mut EconomyData, amount: f64, borrower: &str) -> Result<usize> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EconomyError::InvalidInput(format!(
                "loan amount must be positive (got {amount})"
            )));
        }
        let borrower = borrower.trim();
        if borrower.is_empty() {
            return Err(EconomyError::InvalidInput("borrower name is required".into()));
        }
        Ok(data
            .transactions
            .append(Transaction::given_loan(data.current_day, amount, borrower)))
    }

    /// Pays towards a loan and posts a protected LoanPayment outflow. The
    /// payment is clamped to the outstanding principal.
    pub fn pay(data: &mut EconomyData, id: LoanId, amount: f64) -> Result<PaymentOutcome> {
        let lender = data
            .loans
            .get(id)
            .map(|loan| loan.lender.clone())
            .ok_or(EconomyError::MissingLoan(id.0))?;
        let outcome = data.loans.pay(id, amount)?;
        data.transactions
            .append(Transaction::loan_payment(data.current_day, outcome.paid, lender));
        Ok(outcome)
    }
}
