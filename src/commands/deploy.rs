//! `repodoc deploy` command.

use std::path::Path;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::deploy::{deploy, DeployOptions};
use crate::error::{RepodocError, Result};

/// Execute the `deploy` command against `root` and print the outcome.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or any pipeline step fails.
pub async fn run_with_context(
    ctx: &ServiceContext,
    settings: &Settings,
    root: &Path,
    force: bool,
) -> Result<()> {
    let options = DeployOptions {
        project_name: project_name(root)?,
        model: settings.model.clone(),
        force,
    };
    let outcome = deploy(ctx, root, &options).await?;
    println!("{}", outcome.message());
    Ok(())
}

/// Final component of the canonicalized project root.
///
/// # Errors
///
/// Returns [`RepodocError::Io`] if the root does not exist or has no name.
pub fn project_name(root: &Path) -> Result<String> {
    let canonical = root
        .canonicalize()
        .map_err(|e| RepodocError::Io(format!("cannot resolve {}: {e}", root.display())))?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| RepodocError::Io(format!("{} has no directory name", canonical.display())))
}
