//! Dispatch, error reporting and argument parsing shared by every command.

use dialoguer::Confirm;
use strsim::levenshtein;
use tracing::error;

use crate::catalog::BuildingKind;
use crate::core::services::MAX_PURCHASE_COUNT;
use crate::errors::{CliError, EconomyError};

use super::output;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] EconomyError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    /// Asks before destructive actions; scripted runs always proceed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        self.confirm("Exit shell?")
            .map_err(|err| CliError::Command(err.to_string()))
    }

    /// Prints a failed command. Only errors that leave the economy in doubt
    /// stop the shell.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(core) if core.is_fatal() => {
                error!(error = %core, command = ?self.last_command, "fatal economy error");
                output::error(&core);
                Err(CliError::Core(core))
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn money(&self, amount: f64) -> String {
        self.state.money().format(amount)
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

pub(crate) fn parse_amount(raw: &str, what: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("invalid {what} `{raw}`")))
}

pub(crate) fn parse_count(raw: Option<&str>) -> Result<u32, CommandError> {
    match raw {
        None => Ok(1),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|count| (1..=MAX_PURCHASE_COUNT).contains(count))
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "count must be a whole number from 1 to {MAX_PURCHASE_COUNT} (got `{raw}`)"
                ))
            }),
    }
}

pub(crate) fn parse_index(raw: &str, what: &str) -> Result<usize, CommandError> {
    raw.trim_start_matches('#')
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid {what} `{raw}`")))
}

/// Parses `kind` or `kind:size`, e.g. `market_stall` or `house:4`.
pub(crate) fn parse_building(raw: &str) -> Result<(BuildingKind, Option<u32>), CommandError> {
    let (kind, size) = match raw.split_once(':') {
        Some((kind, size)) => {
            let size = size.parse::<u32>().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid building size `{size}`"))
            })?;
            (kind, Some(size))
        }
        None => (raw, None),
    };
    Ok((kind.parse::<BuildingKind>()?, size))
}

#[cfg(test)]
pub(crate) fn process_script(
    context: &mut ShellContext,
    lines: &[&str],
) -> Result<(), CliError> {
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;
    use crate::core::{EconomyState, FixedClock};
    use crate::economy::GrowthCurve;
    use crate::storage::JsonStorage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let config = EconomyConfig {
            start_date: NaiveDate::from_ymd_opt(2022, 10, 10),
            growth: GrowthCurve::Flat,
            ..EconomyConfig::default()
        };
        let clock = FixedClock(NaiveDate::from_ymd_opt(2022, 10, 20).unwrap());
        let state = EconomyState::open(Box::new(storage), Box::new(clock), config).unwrap();
        (ShellContext::with_state(CliMode::Script, state), temp)
    }

    #[test]
    fn parse_line_handles_quotes() {
        let tokens = crate::cli::shell::parse_command_line("region new \"Old Town\"").unwrap();
        assert_eq!(tokens, vec!["region", "new", "Old Town"]);
    }

    #[test]
    fn building_specs_carry_optional_size() {
        assert_eq!(parse_building("pier").unwrap(), (BuildingKind::Pier, None));
        assert_eq!(parse_building("house:4").unwrap(), (BuildingKind::House, Some(4)));
        assert!(parse_building("house:big").is_err());
        assert!(matches!(
            parse_building("hospitl"),
            Err(CommandError::Core(EconomyError::UnknownBuildingKind { .. }))
        ));
    }

    #[test]
    fn script_runner_drives_the_economy() {
        let (mut context, _temp) = context();
        process_script(
            &mut context,
            &[
                "region new Harbour",
                "buy Harbour market_stall 2",
                "sell Harbour pier",
                "advance 1",
                "exit",
                "txn add 100 never-run",
            ],
        )
        .unwrap();
        assert!(!context.running);
        let state = &context.state;
        assert_eq!(state.current_day(), NaiveDate::from_ymd_opt(2022, 10, 11).unwrap());
        assert_eq!(state.total_balance(), 40000.0 - 2.0 * 2024.0 + 2.0 * 88.0);
    }

    #[test]
    fn unknown_commands_do_not_stop_the_script() {
        let (mut context, _temp) = context();
        process_script(&mut context, &["regoin list", "region new Docks"]).unwrap();
        assert_eq!(context.state.region_names(), vec!["Docks".to_string()]);
    }

    #[test]
    fn amounts_and_counts_are_validated() {
        assert!(parse_amount("12.5", "amount").is_ok());
        assert!(parse_amount("NaN", "amount").is_err());
        assert_eq!(parse_count(None).unwrap(), 1);
        assert!(parse_count(Some("0")).is_err());
        assert_eq!(parse_count(Some("10000")).unwrap(), MAX_PURCHASE_COUNT);
        assert!(parse_count(Some("10001")).is_err());
        assert!(parse_count(Some("4294967295")).is_err());
        assert_eq!(parse_index("#3", "index").unwrap(), 3);
    }
}
