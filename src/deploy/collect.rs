//! Reading the project and its git state at the start of a run.

use std::path::Path;

use tracing::{info, warn};

use super::{DeployInputs, ProjectFiles, RepoState};
use crate::context::ServiceContext;
use crate::error::{RepodocError, Result};

/// Reads every source file directly inside `root`.
///
/// # Errors
///
/// Returns [`RepodocError::Io`] if the directory cannot be listed or a
/// source file cannot be read.
pub fn read_project_files(ctx: &ServiceContext, root: &Path) -> Result<ProjectFiles> {
    let names = ctx
        .fs
        .list_files(root)
        .map_err(|e| RepodocError::Io(format!("failed to list {}: {e}", root.display())))?;

    names
        .into_iter()
        .filter(|name| ProjectFiles::is_source(name))
        .map(|name| {
            let content = ctx
                .fs
                .read_to_string(&root.join(&name))
                .map_err(|e| RepodocError::Io(e.to_string()))?;
            Ok((name, content))
        })
        .collect::<Result<Vec<_>>>()
        .map(ProjectFiles::from_iter)
}

/// Outstanding changes against `HEAD`. A failing diff (no `HEAD` yet) reads as no changes.
pub fn read_diff(ctx: &ServiceContext) -> String {
    ctx.git.diff().unwrap_or_else(|e| {
        warn!(error = %e, "could not compute git diff, treating as no changes");
        String::new()
    })
}

/// Whether `HEAD` resolves to a commit.
pub fn read_repo_state(ctx: &ServiceContext) -> RepoState {
    match ctx.git.current_commit() {
        Ok(_) => RepoState::NonEmpty,
        Err(e) => {
            info!(reason = %e, "repository has no commits yet");
            RepoState::Empty
        }
    }
}

/// Gathers files, diff and repository state, in that order.
///
/// # Errors
///
/// Only reading the project files can fail; both git reads are soft.
pub fn gather_inputs(ctx: &ServiceContext, root: &Path, project_name: &str) -> Result<DeployInputs> {
    info!(root = %root.display(), "reading project files");
    let files = read_project_files(ctx, root)?;

    info!("retrieving git diff for change summary");
    let diff = read_diff(ctx);
    let state = read_repo_state(ctx);

    Ok(DeployInputs { project_name: project_name.to_string(), files, diff, state })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use crate::adapters::replaying::{ReplayingFileSystem, ReplayingGitRepo};
    use crate::cassette::config::CassetteConfig;
    use serde_json::json;

    fn ctx(
        fs: &[(&str, &str, serde_json::Value)],
        git: &[(&str, &str, serde_json::Value)],
    ) -> ServiceContext {
        let mut ctx = ServiceContext::replaying_from(&CassetteConfig::default()).unwrap();
        ctx.fs = Box::new(ReplayingFileSystem::new(replayer(fs)));
        ctx.git = Box::new(ReplayingGitRepo::new(replayer(git)));
        ctx
    }

    #[test]
    fn reads_only_source_files() {
        let ctx = ctx(
            &[
                ("fs", "list_files", json!({"ok": ["README.md", "a.gs", "appsscript.json", "notes.txt"]})),
                ("fs", "read_to_string", json!({"ok": "function a() {}"})),
                ("fs", "read_to_string", json!({"ok": "{\"timeZone\":\"UTC\"}"})),
            ],
            &[],
        );
        let files = read_project_files(&ctx, Path::new("/project")).unwrap();
        assert_eq!(files.names().collect::<Vec<_>>(), vec!["a.gs", "appsscript.json"]);
    }

    #[test]
    fn non_utf8_source_file_is_read_lossily() {
        let dir = std::env::temp_dir().join("repodoc_collect_latin1");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.gs"), "function a() {}").unwrap();
        std::fs::write(dir.join("legacy.js"), b"var s = 'caf\xe9';").unwrap();

        let mut ctx = ServiceContext::replaying_from(&CassetteConfig::default()).unwrap();
        ctx.fs = Box::new(crate::adapters::live::LiveFileSystem);
        let files = read_project_files(&ctx, &dir).unwrap();

        assert_eq!(files.len(), 2);
        let legacy = files.iter().find(|(name, _)| *name == "legacy.js").map(|(_, c)| c);
        assert_eq!(legacy, Some("var s = 'caf\u{fffd}';"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_source_file_is_fatal() {
        let ctx = ctx(
            &[
                ("fs", "list_files", json!({"ok": ["a.gs"]})),
                ("fs", "read_to_string", json!({"err": "failed to read /project/a.gs: denied"})),
            ],
            &[],
        );
        let err = read_project_files(&ctx, Path::new("/project")).unwrap_err();
        assert!(matches!(err, RepodocError::Io(ref m) if m.contains("denied")));
    }

    #[test]
    fn git_failures_read_as_empty_repository_without_changes() {
        let ctx = ctx(
            &[("fs", "list_files", json!({"ok": []}))],
            &[
                ("git", "diff", json!({"err": "git diff HEAD failed: bad revision 'HEAD'"})),
                ("git", "current_commit", json!({"err": "git rev-parse HEAD failed"})),
            ],
        );
        let inputs = gather_inputs(&ctx, Path::new("/project"), "invoice-tool").unwrap();
        assert_eq!(inputs.diff, "");
        assert!(!inputs.has_changes());
        assert_eq!(inputs.state, RepoState::Empty);
        assert!(inputs.files.is_empty());
        assert_eq!(inputs.project_name, "invoice-tool");
    }

    #[test]
    fn resolving_head_means_non_empty() {
        let ctx = ctx(
            &[],
            &[("git", "current_commit", json!({"ok": "0123abcd"}))],
        );
        assert_eq!(read_repo_state(&ctx), RepoState::NonEmpty);
    }
}
