//! CLI error type.

use thiserror::Error;

/// Errors reported by the `optionlab` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// An engine or configuration builder rejected its input.
    #[error(transparent)]
    Pricing(#[from] ol_core::Error),

    /// The configuration file could not be read or parsed.
    #[error("configuration file {path}: {message}")]
    ConfigFile {
        /// Path given on the command line.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// A command-line argument combination makes no sense.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI commands.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
