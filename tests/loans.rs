mod common;

use common::{day, setup_state};
use economy_core::errors::EconomyError;
use economy_core::ledger::{LoanId, UN_LENDER};

#[test]
fn settling_a_private_loan_reports_the_total_paid() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    let id = state.take_loan(1000.0, 10.0, "Harbour Bank").unwrap();
    state.advance_day(Some(1)).unwrap();

    let first = state.pay_loan(id, 600.0).unwrap();
    assert!(!first.settled);
    assert!((first.remaining - 500.0).abs() < 1e-9);

    let second = state.pay_loan(id, 10_000.0).unwrap();
    assert!(second.settled);
    assert!((second.paid - 500.0).abs() < 1e-9);
    let notice = second.notice.expect("private lenders produce a notice");
    assert_eq!(notice.lender, "Harbour Bank");
    assert!((notice.total_paid - 1100.0).abs() < 1e-9);
    assert!(state.loans().is_empty());
}

#[test]
fn payments_are_posted_as_loan_payment_outflows() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    let id = state.take_loan(300.0, 0.0, "Guild").unwrap();
    assert_eq!(state.total_balance(), 40300.0);
    state.pay_loan(id, 100.0).unwrap();
    assert_eq!(state.total_balance(), 40200.0);

    let rows = state.transaction_rows();
    let last = rows.last().unwrap();
    assert_eq!(last.kind, "loan payment");
    assert_eq!(last.comment, "Loan payment to Guild");
    assert_eq!(last.amount, "-UN$100.00");
}

#[test]
fn un_loans_settle_silently() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    let id = state.take_un_loan(250.0).unwrap();
    assert_eq!(state.loans().get(id).unwrap().lender, UN_LENDER);
    let outcome = state.pay_loan(id, 250.0).unwrap();
    assert!(outcome.settled);
    assert!(outcome.notice.is_none());
}

#[test]
fn invalid_payments_change_nothing() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    let id = state.take_loan(100.0, 1.0, "Bank").unwrap();
    let before = state.snapshot().clone();

    assert_eq!(
        state.pay_loan(id, 0.0).unwrap_err(),
        EconomyError::InsufficientLoanPayment(0.0)
    );
    assert_eq!(
        state.pay_loan(id, -5.0).unwrap_err(),
        EconomyError::InsufficientLoanPayment(-5.0)
    );
    let missing = state.pay_loan(LoanId(7), 5.0).unwrap_err();
    assert_eq!(missing, EconomyError::MissingLoan(7));
    assert!(missing.is_fatal());
    assert_eq!(state.snapshot(), &before);
}

#[test]
fn lending_money_reduces_the_balance() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.give_loan(1500.0, "Neighbour").unwrap();
    assert_eq!(state.total_balance(), 38500.0);
    let rows = state.transaction_rows();
    assert_eq!(rows[1].comment, "Loan to Neighbour");
    assert!(state.loans().is_empty());
}

#[test]
fn payment_rows_cannot_be_deleted() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    let id = state.take_loan(1000.0, 5.0, "Bank").unwrap();
    state.pay_loan(id, 400.0).unwrap();
    let balance = state.total_balance();
    let last = state.snapshot().transactions.len() - 1;

    let err = state.remove_transaction(last).unwrap_err();
    assert_eq!(
        err,
        EconomyError::ProtectedTransaction {
            index: last,
            kind: "loan payment"
        }
    );
    assert_eq!(state.total_balance(), balance);
    let loan = state.loans().get(id).unwrap();
    assert!((loan.principal - 600.0).abs() < 1e-9);
    assert!((loan.paid_so_far - 400.0).abs() < 1e-9);
}
