//! CLI argument definitions.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};

/// Top-level CLI parser for `repodoc`.
#[derive(Debug, Parser)]
#[command(
    name = "repodoc",
    version,
    about = "Provision GitHub repositories and publish generated project documentation"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a private GitHub repository for a project unless it already exists.
    Provision {
        /// Identifier of the source project, quoted in the repository description.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        project_id: String,
        /// Human-readable project name; the repository name is its slug.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        english_name: String,
        /// GitHub personal access token.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        github_pat: String,
        /// GitHub user that owns the repository.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        github_user: String,
    },
    /// Regenerate README.md (and docs/index.md) from the project, then commit and push.
    Deploy {
        /// Project root; git commands run here.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Refresh a brief README even when the working tree is clean.
        #[arg(long)]
        force: bool,
    },
}
