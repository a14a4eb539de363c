//! Deployment documenter: regenerate project docs from the working tree,
//! then commit and push.
//!
//! The run is a straight line through
//! `gather → plan → generate → persist → publish`, where `plan` may stop the
//! run early when a repository with history has nothing to publish.

pub mod cleanup;
pub mod collect;
pub mod pipeline;
pub mod prompt;

use std::collections::BTreeMap;

pub use cleanup::clean_generated;
pub use collect::gather_inputs;
pub use pipeline::{deploy, DeployOptions};

/// Extensions (without the dot) of files fed to the generator.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["gs", "js", "html", "json"];
/// README path relative to the project root.
pub const README_PATH: &str = "README.md";
/// Documentation index path relative to the project root.
pub const DOCS_INDEX_PATH: &str = "docs/index.md";
/// Message used for the publishing commit.
pub const COMMIT_MESSAGE: &str =
    "Automated update: synchronized with GAS project and updated README.md";

/// Source files directly inside the project root, keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFiles(BTreeMap<String, String>);

impl ProjectFiles {
    /// Returns `true` if `name` has one of the [`SOURCE_EXTENSIONS`].
    #[must_use]
    pub fn is_source(name: &str) -> bool {
        std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no source files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// File names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(name, content)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, content)| (name.as_str(), content.as_str()))
    }
}

impl FromIterator<(String, String)> for ProjectFiles {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Whether the repository has any commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// `HEAD` does not resolve: nothing has been committed yet.
    Empty,
    /// At least one commit exists.
    NonEmpty,
}

/// Everything the generator needs, read once at the start of a run.
#[derive(Debug, Clone)]
pub struct DeployInputs {
    /// Project name used in prompts.
    pub project_name: String,
    /// Source files from the project root.
    pub files: ProjectFiles,
    /// Output of `git diff HEAD`; empty when there are no changes or the diff failed.
    pub diff: String,
    /// Whether the repository has history.
    pub state: RepoState,
}

impl DeployInputs {
    /// Returns `true` if the diff has any non-whitespace content.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.diff.trim().is_empty()
    }
}

/// What a run will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Nothing to do: no writes, no commit.
    Skip,
    /// Short README only; `docs/` untouched.
    Brief,
    /// Full README plus the documentation index.
    Full,
}

/// Chooses the plan for a run.
///
/// An empty repository or a non-empty diff always gets full documentation.
/// A repository with history and no changes is skipped unless `force` asks
/// for a brief README refresh.
#[must_use]
pub fn plan(state: RepoState, diff: &str, force: bool) -> Plan {
    let changed = !diff.trim().is_empty();
    match (state, changed) {
        (RepoState::Empty, _) | (RepoState::NonEmpty, true) => Plan::Full,
        (RepoState::NonEmpty, false) if force => Plan::Brief,
        (RepoState::NonEmpty, false) => Plan::Skip,
    }
}

/// How a deployment run ended. Both variants exit 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Nothing changed; no files written and no commit made.
    NoChanges,
    /// Documentation was written, committed and pushed.
    Published {
        /// The plan that was carried out.
        plan: Plan,
        /// Whether `docs/index.md` was written.
        wrote_docs: bool,
    },
}

impl DeployOutcome {
    /// Console line reported to the user.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            DeployOutcome::NoChanges => "No changes detected. Skipping README update and git push.",
            DeployOutcome::Published { .. } => "Changes pushed to GitHub successfully.",
        }
    }
}
