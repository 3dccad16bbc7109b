use crate::cli::core::{
    parse_building, parse_count, usage_error, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::economy::TOTAL_REGION;

const REGION_USAGE: &str = "region <new|delete|list|show> [name]";
const BUY_USAGE: &str = "buy <region> <building[:size]> [count]";
const SELL_USAGE: &str = "sell <region> <building[:size]> [count]";
const QUOTE_USAGE: &str = "quote <region|Total> <building[:size]> [count]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("region", "Create, delete and inspect regions", REGION_USAGE, cmd_region),
        CommandEntry::new("buy", "Buy buildings at the current growth multiplier", BUY_USAGE, cmd_buy),
        CommandEntry::new("sell", "Sell buildings, highest multiplier first", SELL_USAGE, cmd_sell),
        CommandEntry::new("quote", "Price a purchase without buying", QUOTE_USAGE, cmd_quote),
    ]
}

fn cmd_region(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["new", name] => {
            context.state.create_region(name)?;
            output::success(format!("Region `{}` created.", name.trim()));
            Ok(())
        }
        ["delete", name] => delete_region(context, name),
        ["list"] => list_regions(context),
        ["show"] => show_region(context, TOTAL_REGION),
        ["show", name] => show_region(context, name),
        _ => Err(usage_error(REGION_USAGE)),
    }
}

fn delete_region(context: &mut ShellContext, name: &str) -> CommandResult {
    if !context.confirm(&format!("Delete region `{name}` and all of its buildings?"))? {
        output::info("Region kept.");
        return Ok(());
    }
    let dropped = context.state.delete_region(name)?;
    output::success(format!("Region `{name}` deleted ({dropped} buildings dropped)."));
    Ok(())
}

fn list_regions(context: &mut ShellContext) -> CommandResult {
    let names = context.state.region_names();
    if names.is_empty() {
        output::info("No regions yet. Use `region new <name>` to create one.");
        return Ok(());
    }
    let income = context.state.calc_income();
    let jobs = context.state.calc_jobs();
    let population = context.state.calc_population();
    let mut table = Table::new(vec![
        TableColumn::left("Region"),
        TableColumn::right("Buildings"),
        TableColumn::right("Income/day"),
        TableColumn::right("Jobs"),
        TableColumn::right("Population"),
    ]);
    let counted = names
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(TOTAL_REGION));
    for name in counted {
        let buildings: usize = context.state.groups(name)?.iter().map(|g| g.count).sum();
        table.push(vec![
            name.to_string(),
            buildings.to_string(),
            context.money(income.get(name).unwrap_or_default()),
            format!("{:.2}", jobs.get(name).unwrap_or_default()),
            population.get(name).unwrap_or_default().to_string(),
        ]);
    }
    output::section("Regions");
    output::info(table.render());
    Ok(())
}

fn show_region(context: &mut ShellContext, name: &str) -> CommandResult {
    let groups = context.state.groups(name)?;
    output::section(format!("Region: {name}"));
    if groups.is_empty() {
        output::info("No buildings.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Building"),
        TableColumn::right("Count"),
        TableColumn::right("Cost"),
        TableColumn::right("Income/day"),
        TableColumn::right("Staff"),
    ]);
    for group in &groups {
        table.push(vec![
            group.name.clone(),
            group.count.to_string(),
            context.money(group.cost),
            context.money(group.income),
            format!("{:.2}", group.employees),
        ]);
    }
    output::info(table.render());
    Ok(())
}

fn cmd_buy(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [region, building, rest @ ..] = args else {
        return Err(usage_error(BUY_USAGE));
    };
    let (kind, size) = parse_building(building)?;
    let count = parse_count(rest.first().copied())?;
    let txn = context.state.buy(region, kind, size, count)?;
    output::success(format!(
        "{} in {region} for {}.",
        txn.comment(),
        context.money(-txn.amount())
    ));
    Ok(())
}

fn cmd_sell(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [region, building, rest @ ..] = args else {
        return Err(usage_error(SELL_USAGE));
    };
    let (kind, size) = parse_building(building)?;
    let count = parse_count(rest.first().copied())?;
    let txn = context.state.sell(region, kind, size, count)?;
    output::success(format!(
        "{} in {region} for {}.",
        txn.comment(),
        context.money(txn.amount())
    ));
    Ok(())
}

fn cmd_quote(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [region, building, rest @ ..] = args else {
        return Err(usage_error(QUOTE_USAGE));
    };
    let (kind, size) = parse_building(building)?;
    let count = parse_count(rest.first().copied())?;
    let preview = context.state.preview_purchase(region, kind, size, count)?;

    output::section(format!("Quote: {count}x {kind}"));
    output::info(format!("Cost       : {}", context.money(preview.cost)));
    output::info(format!("Income/day : {}", context.money(preview.income)));
    output::info(format!("Staff      : {:.2}", preview.employees));
    if let Some(projection) = preview.projection {
        output::info(format!("After purchase in {region}:"));
        output::info(format!("  Balance    : {}", context.money(projection.balance)));
        output::info(format!("  Income/day : {}", context.money(projection.income)));
        output::info(format!("  Employment : {:.2}%", projection.employment * 100.0));
    }
    Ok(())
}
