use std::env;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;

use crate::core::{Clock, EconomyState, FixedClock, SystemClock};
use crate::errors::CliError;

use super::commands;
use super::registry::CommandRegistry;

/// Pins "today" for scripted runs, formatted `YYYY-MM-DD`.
pub const TODAY_ENV: &str = "ECONOMY_CORE_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub state: EconomyState,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the economy in the resolved application directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let state = EconomyState::open_in(None, clock_from_env()?)?;
        Ok(Self::with_state(mode, state))
    }

    pub fn with_state(mode: CliMode, state: EconomyState) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            state,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("economy [{}]> ", self.state.current_day().format("%d/%m/%Y"))
    }
}

fn clock_from_env() -> Result<Box<dyn Clock>, CliError> {
    match env::var(TODAY_ENV) {
        Ok(raw) => {
            let day = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                CliError::Command(format!("{TODAY_ENV} must be YYYY-MM-DD (got `{raw}`)"))
            })?;
            Ok(Box::new(FixedClock(day)))
        }
        Err(_) => Ok(Box::new(SystemClock)),
    }
}
