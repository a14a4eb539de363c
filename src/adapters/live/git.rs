//! Live git adapter using `git` CLI commands.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Live git adapter that shells out to the `git` CLI inside a working tree.
pub struct LiveGitRepo {
    root: PathBuf,
}

impl LiveGitRepo {
    /// Creates an adapter running git commands with `root` as working directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Runs `git <args>` and returns stdout, or an error carrying stderr.
    fn git(&self, args: &[&str]) -> Result<String, PortError> {
        let command_line = format!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| format!("failed to run {command_line}: {e}"))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{command_line} failed: {}", stderr.trim()).into());
        }
        debug!(command = %command_line, "git command succeeded");
        Ok(stdout)
    }
}

impl GitRepo for LiveGitRepo {
    fn current_commit(&self) -> Result<String, PortError> {
        Ok(self.git(&["rev-parse", "HEAD"])?.trim().to_string())
    }

    fn diff(&self) -> Result<String, PortError> {
        self.git(&["diff", "HEAD"])
    }

    fn stage_all(&self) -> Result<(), PortError> {
        self.git(&["add", "."]).map(drop)
    }

    fn commit(&self, message: &str) -> Result<(), PortError> {
        self.git(&["commit", "-m", message]).map(drop)
    }

    fn push(&self) -> Result<(), PortError> {
        self.git(&["push"]).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_failures_outside_a_repository() {
        let dir = std::env::temp_dir().join("repodoc_live_git_not_a_repo");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let git = LiveGitRepo::new(&dir);
        let err = git.current_commit().unwrap_err();
        assert!(err.to_string().contains("git rev-parse HEAD"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn reads_head_of_a_fresh_commit() {
        let dir = std::env::temp_dir().join("repodoc_live_git_head");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.gs"), "function a() {}").unwrap();

        let git = LiveGitRepo::new(&dir);
        git.git(&["init", "--quiet"]).unwrap();
        git.stage_all().unwrap();
        let identity = ["-c", "user.name=repodoc", "-c", "user.email=repodoc@example.com"];
        git.git(&[&identity[..], &["commit", "--quiet", "-m", "init"][..]].concat()).unwrap();

        assert_eq!(git.current_commit().unwrap().len(), 40);
        assert!(git.diff().unwrap().is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
