use std::process::ExitCode;

/// Process outcome of a negcov run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Controls were generated, or the config file was written.
    Success,
    /// `init` found an existing config and left it alone.
    Failure,
    /// Catalog, config, state or output could not be read, parsed or written.
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
