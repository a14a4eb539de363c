//! Command dispatch and handlers.

pub mod deploy;
pub mod provision;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::RepodocError;

/// Dispatch a parsed command to its handler.
///
/// When `REPODOC_RECORD` is set to a directory path, all port interactions are
/// recorded to per-port cassette files in a new session under that directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::from_env();
    let root = match command {
        Command::Deploy { root, .. } => root.as_path(),
        Command::Provision { .. } => Path::new("."),
    };

    let (ctx, session) = if let Some(dir) = &settings.record_dir {
        let (ctx, session) = ServiceContext::recording_at(dir, &settings, root)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&settings, root), None)
    };

    let result = block_on_command(command, &ctx, &settings);

    // Finish recording after command completes (even on error)
    let recorded = session.map(|session| {
        // Drop context first to release Arc references
        drop(ctx);
        session.finish()
    });

    settle(result, recorded)
}

/// Runs the command on a current-thread runtime.
fn block_on_command(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), RepodocError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| RepodocError::Config(format!("failed to start async runtime: {e}")))?;

    runtime.block_on(dispatch_with_context(command, ctx, settings))
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
) -> Result<(), RepodocError> {
    match command {
        Command::Provision { project_id, english_name, github_pat, github_user } => {
            provision::run_with_context(ctx, project_id, english_name, github_pat, github_user)
                .await
        }
        Command::Deploy { root, force } => {
            deploy::run_with_context(ctx, settings, root, *force).await
        }
    }
}

/// Combines the command result with the outcome of finishing a recording.
///
/// A command error is always the one reported; a recording failure after
/// it is only logged.
fn settle(
    result: Result<(), RepodocError>,
    recorded: Option<Result<PathBuf, String>>,
) -> Result<(), String> {
    match recorded {
        None => result.map_err(|e| e.to_string()),
        Some(Ok(output_dir)) => {
            eprintln!("Recording saved to: {}", output_dir.display());
            result.map_err(|e| e.to_string())
        }
        Some(Err(recording_err)) => match result {
            Ok(()) => Err(recording_err),
            Err(e) => {
                warn!(error = %recording_err, "failed to save recording");
                Err(e.to_string())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_error_wins_over_recording_failure() {
        let err = settle(
            Err(RepodocError::GitCommand("git push failed: rejected".into())),
            Some(Err("Failed to write git cassette: disk full".into())),
        )
        .unwrap_err();
        assert_eq!(err, "Error during git operations: git push failed: rejected");
    }

    #[test]
    fn recording_failure_fails_a_successful_command() {
        let err = settle(Ok(()), Some(Err("Recording adapter for fs still has references".into())))
            .unwrap_err();
        assert!(err.contains("still has references"));
    }

    #[test]
    fn saved_recording_keeps_the_command_result() {
        assert!(settle(Ok(()), Some(Ok(PathBuf::from("/tmp/cassettes/run")))).is_ok());
        let err = settle(Err(RepodocError::Generation("timeout".into())), None).unwrap_err();
        assert!(err.starts_with("Error generating documentation"));
    }
}
