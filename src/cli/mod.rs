pub mod commands;
pub mod core;
pub mod help;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod table;

pub use shell::{run_cli, SCRIPT_ENV};
pub use shell_context::TODAY_ENV;
