use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish between
/// different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the dashboard session ended normally
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration error, startup failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the dashboard client.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
///
/// The variants mirror the failure taxonomy of the sync engine: transport
/// and parse failures are recovered per tick, schema mismatches are
/// defaulted away, and only mutation and configuration failures reach
/// the user.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Request to the findings API failed ({resource})\nDetails: {details}\n\n💡 Hint: Check that the API is reachable and the --api-url value is correct")]
    Transport { resource: String, details: String },

    #[error("The findings API returned an unexpected payload ({resource})\nDetails: {details}")]
    Schema { resource: String, details: String },

    #[error("Project deletion failed: {message}")]
    Mutation { message: String },

    #[error("Invalid configuration file: {path}\nReason: {reason}\n\n💡 Hint: Check the file against the documented secdash.config.yml schema")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Invalid option: {message}")]
    InvalidOption { message: String },
}

impl DashboardError {
    /// Maps an error to the exit code the process should terminate with.
    ///
    /// Configuration and option errors are usage errors (2); everything
    /// else is an application error (3).
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DashboardError::InvalidConfig { .. } | DashboardError::InvalidOption { .. } => {
                ExitCode::InvalidArguments
            }
            _ => ExitCode::ApplicationError,
        }
    }
}
