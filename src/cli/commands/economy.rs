use crate::cli::core::{usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::Metric;
use crate::currency::format_date;
use crate::economy::TOTAL_REGION;
use crate::errors::EconomyError;

const ADVANCE_USAGE: &str = "advance [days]";
const STATS_USAGE: &str = "stats [region]";
const SERIES_USAGE: &str = "series <balance|income|expenditure|employment|population|jobs>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "advance",
            "Advance the simulated day (to today when no days are given)",
            ADVANCE_USAGE,
            cmd_advance,
        ),
        CommandEntry::new(
            "stats",
            "Show income, jobs, population and employment",
            STATS_USAGE,
            cmd_stats,
        ),
        CommandEntry::new(
            "series",
            "Show a metric over every backed-up day",
            SERIES_USAGE,
            cmd_series,
        ),
    ]
}

fn cmd_advance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let delta = match args {
        [] => None,
        [days] => Some(days.parse::<i64>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid number of days `{days}`"))
        })?),
        _ => return Err(usage_error(ADVANCE_USAGE)),
    };
    let report = context.state.advance_day(delta)?;
    output::success(format!(
        "Advanced from {} to {}.",
        format_date(report.from),
        format_date(report.to)
    ));
    output::info(format!("Income paid : {}", context.money(report.income)));
    if let Some(interest) = report.overdraft_interest {
        output::warning(format!(
            "Balance overdrawn; overdraft interest {} charged.",
            context.money(interest)
        ));
    }
    output::info(format!("Balance     : {}", context.money(report.balance)));
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let region = match args {
        [] => TOTAL_REGION,
        [name] => *name,
        _ => return Err(usage_error(STATS_USAGE)),
    };
    let state = &context.state;
    if region != TOTAL_REGION && !state.snapshot().regions.contains(region) {
        return Err(EconomyError::UnknownRegion(region.to_string()).into());
    }

    let income = state.calc_income().get(region).unwrap_or_default();
    let jobs = state.calc_jobs().get(region).unwrap_or_default();
    let population = state.calc_population().get(region).unwrap_or_default();
    let employment = state.calc_employment().get(region).unwrap_or_default();
    let industries = state.calc_industry_income().get(region).unwrap_or_default();

    output::section(format!("Statistics: {region}"));
    output::info(format!("Income/day : {}", context.money(income)));
    output::info(format!("Jobs       : {jobs:.2}"));
    output::info(format!("Population : {population}"));
    output::info(format!("Employment : {:.2}%", employment * 100.0));
    if region == TOTAL_REGION {
        output::info(format!("Balance    : {}", context.money(state.total_balance())));
        output::info(format!("Growth     : x{:.4}", state.growth_multiplier()));
    }
    if !industries.is_empty() {
        let mut table = Table::new(vec![TableColumn::left("Industry"), TableColumn::right("Income/day")]);
        for (category, amount) in &industries {
            table.push(vec![category.label().to_string(), context.money(*amount)]);
        }
        output::info(table.render());
    }
    Ok(())
}

fn cmd_series(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [metric] = args else {
        return Err(usage_error(SERIES_USAGE));
    };
    let metric: Metric = metric.parse()?;
    let points = context.state.load_historical_series(metric)?;

    let mut table = Table::new(vec![TableColumn::left("Day"), TableColumn::right(metric.label())]);
    for (day, value) in points {
        let rendered = match metric {
            m if m.is_monetary() => context.money(value),
            Metric::Employment => format!("{value:.2}%"),
            Metric::Population => format!("{value:.0}"),
            _ => format!("{value:.2}"),
        };
        table.push(vec![format_date(day), rendered]);
    }
    output::section(format!("{metric} history"));
    output::info(table.render());
    Ok(())
}
