//! CLI-level errors (wraps store errors)

use thiserror::Error;

use crate::errors::StoreError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Failed to read commands: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::Store(e) => match e {
                StoreError::InvalidDate { .. } | StoreError::UnknownOrder(_) => {
                    crate::exitcode::DATAERR
                }
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}
