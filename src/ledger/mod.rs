//! Transaction log, loan book, and the balance derived from them.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod loan;
pub mod transaction;

pub use ledger::Ledger;
pub use loan::{
    Loan, LoanBook, LoanId, PaymentOutcome, SettlementNotice, SETTLED_THRESHOLD, UN_LENDER,
};
pub use transaction::{Transaction, TransactionKind, OVERDRAFT_COMMENT};
