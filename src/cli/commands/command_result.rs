use std::path::PathBuf;

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub state_files: usize,
    pub platforms: Vec<String>,
    pub unmatched_count: usize,
    pub matched_count: usize,
    /// File the controls were written to; `None` for stdout.
    pub output: Option<PathBuf>,
}

impl GenerateSummary {
    pub fn control_count(&self) -> usize {
        self.unmatched_count + self.matched_count
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running negcov commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match &self.summary {
            CommandSummary::Init(InitSummary { created: false }) => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }
}
