//! Core library entry for the `repodoc` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod deploy;
pub mod error;
pub mod ports;
pub mod provision;

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::error::RepodocError;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and count as success.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let cli = match cli::Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(RepodocError::Usage(with_usage(&err, &args)).to_string()),
    };
    commands::dispatch(&cli.command)
}

/// Renders a parse error, appending the usage line when clap left it out
/// (as it does for rejected values).
fn with_usage(err: &clap::Error, args: &[OsString]) -> String {
    let message = err.to_string();
    if message.contains("Usage:") {
        return message;
    }

    let mut cmd = cli::Cli::command();
    cmd.build();
    let subcommand = args.get(1).and_then(|a| a.to_str());
    let usage = match subcommand.and_then(|name| cmd.find_subcommand_mut(name)) {
        Some(sub) => sub.render_usage(),
        None => cmd.render_usage(),
    };
    format!("{}\n\n{usage}", message.trim_end())
}
