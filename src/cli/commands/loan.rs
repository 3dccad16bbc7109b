use crate::cli::core::{parse_amount, parse_index, usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::ledger::LoanId;

const LOAN_USAGE: &str = "loan <take <principal> <rate%> <lender>|un <principal>|give <amount> <borrower>|pay <id> <amount>|list>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "loan",
        "Borrow, lend and repay money",
        LOAN_USAGE,
        cmd_loan,
    )]
}

fn cmd_loan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["take", principal, rate, lender @ ..] if !lender.is_empty() => {
            let principal = parse_amount(principal, "principal")?;
            let rate = parse_amount(rate.trim_end_matches('%'), "interest rate")?;
            let lender = lender.join(" ");
            let id = context.state.take_loan(principal, rate, &lender)?;
            output::success(format!(
                "Loan {id} from {lender} recorded: {} at {rate}% per day.",
                context.money(principal)
            ));
            Ok(())
        }
        ["un", principal] => {
            let principal = parse_amount(principal, "principal")?;
            let id = context.state.take_un_loan(principal)?;
            output::success(format!(
                "UN loan {id} recorded: {} at {}% per day.",
                context.money(principal),
                context.state.config().un_loan_rate_percent
            ));
            Ok(())
        }
        ["give", amount, borrower @ ..] if !borrower.is_empty() => {
            let amount = parse_amount(amount, "amount")?;
            let borrower = borrower.join(" ");
            context.state.give_loan(amount, &borrower)?;
            output::success(format!("Lent {} to {borrower}.", context.money(amount)));
            Ok(())
        }
        ["pay", id, amount] => pay_loan(context, id, amount),
        ["list"] => list_loans(context),
        _ => Err(usage_error(LOAN_USAGE)),
    }
}

fn pay_loan(context: &mut ShellContext, id: &str, amount: &str) -> CommandResult {
    let id = LoanId(parse_index(id, "loan id")?);
    let amount = parse_amount(amount, "amount")?;
    let outcome = context.state.pay_loan(id, amount)?;
    if outcome.paid < amount {
        output::warning(format!(
            "Payment capped at the outstanding {}.",
            context.money(outcome.paid)
        ));
    }
    if outcome.settled {
        output::success(format!("Loan {id} settled."));
    } else {
        output::success(format!(
            "Paid {} towards loan {id}; {} remaining.",
            context.money(outcome.paid),
            context.money(outcome.remaining)
        ));
    }
    if let Some(notice) = outcome.notice {
        output::info(format!(
            "Total paid to {}: {}.",
            notice.lender,
            context.money(notice.total_paid)
        ));
    }
    Ok(())
}

fn list_loans(context: &mut ShellContext) -> CommandResult {
    let loans = context.state.loans();
    if loans.is_empty() {
        output::info("No outstanding loans.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::right("Id"),
        TableColumn::left("Lender"),
        TableColumn::right("Rate"),
        TableColumn::right("Outstanding"),
        TableColumn::right("Paid"),
    ]);
    for (id, loan) in loans.iter() {
        table.push(vec![
            id.0.to_string(),
            loan.lender.clone(),
            format!("{}%", loan.rate_percent),
            context.money(loan.principal),
            context.money(loan.paid_so_far),
        ]);
    }
    output::section("Loans");
    output::info(table.render());
    output::info(format!(
        "Total outstanding: {}",
        context.money(loans.total_outstanding())
    ));
    Ok(())
}
