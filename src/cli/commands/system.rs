use crate::catalog::{self, HOURS_PER_DAY};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::currency::format_date;
use crate::economy::CURRENT_SCHEMA_VERSION;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new(
            "catalog",
            "List every building type with its base economics",
            "catalog",
            cmd_catalog,
        ),
        CommandEntry::new(
            "today",
            "Show the simulated day, balance and growth multiplier",
            "today",
            cmd_today,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_catalog(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut table = Table::new(vec![
        TableColumn::left("Building"),
        TableColumn::left("Id"),
        TableColumn::left("Category"),
        TableColumn::right("Wage"),
        TableColumn::right("Staff"),
        TableColumn::right("Cost"),
        TableColumn::right("Income/day"),
    ]);
    for kind in catalog::sorted_by_name() {
        let info = kind.info();
        let id = if info.sizeable {
            format!("{}:<size>", kind.slug())
        } else {
            kind.slug()
        };
        table.push(vec![
            info.name.to_string(),
            id,
            kind.category().label().to_string(),
            format!("{:.2}", info.wage),
            format!("{:.3}", info.employees_per_unit),
            context.money(info.base_cost),
            context.money(info.wage * info.employees_per_unit * HOURS_PER_DAY),
        ]);
    }
    output::section("Building catalog");
    output::info(table.render());
    output::info("Sized buildings are priced per unit; houses come in sizes 1, 2, 4 and 6.");
    Ok(())
}

fn cmd_today(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = &context.state;
    output::info(format!("Simulated day : {}", format_date(state.current_day())));
    output::info(format!("Real day      : {}", format_date(state.today())));
    output::info(format!("Balance       : {}", context.money(state.total_balance())));
    output::info(format!("Growth        : x{:.4}", state.growth_multiplier()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section("Economy Core");
    output::info(format!("  {}", meta.summary()));
    output::info(format!("  Schema ver : v{CURRENT_SCHEMA_VERSION}"));
    output::info(format!("  Build hash : {}", meta.git_hash));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
