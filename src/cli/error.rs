//! CLI-level errors (wrap core errors)

use thiserror::Error;

use crate::errors::HierarchyError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Hierarchy(e) => match e {
                HierarchyError::ParseFailure { .. } => exitcode::DATAERR,
                HierarchyError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                    exitcode::NOINPUT
                }
                HierarchyError::Io(_) => exitcode::IOERR,
                _ => exitcode::SOFTWARE,
            },
        }
    }
}
