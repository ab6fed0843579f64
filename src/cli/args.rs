//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Generate negative-coverage controls from state files
//! - `init`: Initialize negcov configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the common args of the command, if it has any.
    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Generate(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Diagnostic log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Terraform state files, or directories to scan for them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Resource catalog file (overrides config file)
    #[arg(long, env = "NEGCOV_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Target platform; repeat for several (overrides config file)
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Output format (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write controls to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate controls asserting that no unexpected resources exist
    Generate(GenerateCommand),
    /// Initialize a new .negcovrc.json configuration file
    Init,
}
