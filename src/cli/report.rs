//! Summary printing.
//!
//! Summaries go to stderr; stdout is reserved for rendered controls.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, GenerateSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stderr().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Generate(summary) => print_generate(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_generate<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let count = summary.control_count();
    let msg = format!(
        "Generated {} negative-coverage {} ({} unmatched, {} matched) from {} state {} for {}",
        count,
        plural(count, "control", "controls"),
        summary.unmatched_count,
        summary.matched_count,
        summary.state_files,
        plural(summary.state_files, "file", "files"),
        summary.platforms.join(", ")
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());

    if let Some(output) = &summary.output {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), output.display());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} already exists",
            FAILURE_MARK.red(),
            CONFIG_FILE_NAME
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
