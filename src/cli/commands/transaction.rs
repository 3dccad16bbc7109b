use crate::cli::core::{parse_amount, parse_index, usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

const TXN_USAGE: &str = "txn <add <amount> [comment]|list|delete <index>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "txn",
        "Record, list and delete ledger transactions",
        TXN_USAGE,
        cmd_txn,
    )]
}

fn cmd_txn(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["add", amount, comment @ ..] => {
            let amount = parse_amount(amount, "amount")?;
            let index = context.state.add_manual(amount, &comment.join(" "))?;
            output::success(format!(
                "Transaction #{index} recorded ({}).",
                context.money(amount)
            ));
            Ok(())
        }
        ["list"] => list_transactions(context),
        ["delete", index] => {
            let index = parse_index(index, "transaction index")?;
            if !context.confirm(&format!("Delete transaction #{index}?"))? {
                output::info("Transaction kept.");
                return Ok(());
            }
            let removed = context.state.remove_transaction(index)?;
            output::success(format!(
                "Transaction #{index} deleted ({}, {}).",
                removed.comment(),
                context.money(removed.amount())
            ));
            Ok(())
        }
        _ => Err(usage_error(TXN_USAGE)),
    }
}

fn list_transactions(context: &mut ShellContext) -> CommandResult {
    let rows = context.state.transaction_rows();
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Comment"),
        TableColumn::right("Amount"),
        TableColumn::right("Balance"),
    ]);
    for row in rows {
        table.push(vec![
            row.index.to_string(),
            row.date,
            row.kind.to_string(),
            row.comment,
            row.amount,
            row.balance,
        ]);
    }
    output::section("Transactions");
    output::info(table.render());
    Ok(())
}
