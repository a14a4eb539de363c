//! Error types for repodoc operations.

use std::fmt;
use std::io;

/// All fatal repodoc errors. Every variant ends the process with exit code 1.
#[derive(Debug)]
pub enum RepodocError {
    /// Required command-line input was missing or malformed.
    Usage(String),
    /// The repository existence check failed with something other than 404.
    RemoteLookup(String),
    /// Repository creation failed with something other than 422.
    RemoteCreate(String),
    /// The text-generation call failed.
    Generation(String),
    /// A publishing git command (add, commit, push) failed.
    GitCommand(String),
    /// Reading the project or writing generated files failed.
    Io(String),
    /// Configuration or runtime setup failed.
    Config(String),
}

impl fmt::Display for RepodocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepodocError::Usage(msg) => write!(f, "{}", msg.trim_end()),
            RepodocError::RemoteLookup(msg) => {
                write!(f, "Error checking repository existence: {msg}")
            }
            RepodocError::RemoteCreate(msg) => write!(f, "Error creating repository: {msg}"),
            RepodocError::Generation(msg) => write!(f, "Error generating documentation: {msg}"),
            RepodocError::GitCommand(msg) => write!(f, "Error during git operations: {msg}"),
            RepodocError::Io(msg) => write!(f, "I/O error: {msg}"),
            RepodocError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for RepodocError {}

impl From<io::Error> for RepodocError {
    fn from(e: io::Error) -> Self {
        RepodocError::Io(e.to_string())
    }
}

/// Convenience alias for results carrying a [`RepodocError`].
pub type Result<T> = std::result::Result<T, RepodocError>;
