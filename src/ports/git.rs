//! Git repository port for version-control queries and publishing.

use super::PortError;

/// Provides access to the git working tree the tool operates on.
///
/// Abstracting git access allows deterministic replay and testing
/// without requiring a real repository or remote.
pub trait GitRepo: Send + Sync {
    /// Returns the hash of the current HEAD commit (`git rev-parse HEAD`).
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no commits or is invalid.
    fn current_commit(&self) -> Result<String, PortError>;

    /// Returns the diff of the working tree against HEAD (`git diff HEAD`).
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed, e.g. when HEAD does not exist.
    fn diff(&self) -> Result<String, PortError>;

    /// Stages every change in the working tree (`git add .`).
    ///
    /// # Errors
    ///
    /// Returns an error if the command exits non-zero.
    fn stage_all(&self) -> Result<(), PortError>;

    /// Records staged changes with the given message (`git commit -m`).
    ///
    /// # Errors
    ///
    /// Returns an error if the command exits non-zero (including "nothing to commit").
    fn commit(&self, message: &str) -> Result<(), PortError>;

    /// Pushes the current branch to its configured remote (`git push`).
    ///
    /// # Errors
    ///
    /// Returns an error if the command exits non-zero.
    fn push(&self) -> Result<(), PortError>;
}
