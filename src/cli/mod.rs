//! Command-line interface layer.
//!
//! Parses arguments, installs diagnostic logging, runs the command and prints
//! a short summary on stderr. Controls themselves go to stdout or `--output`.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod logging;
mod report;
mod run;
mod scan;

pub use args::{Arguments, Command, CommonArgs, GenerateCommand, LogFormat};
pub use exit_status::ExitStatus;
pub use logging::init_logging;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(result.exit_status())
}
